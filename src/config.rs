//! Editor configuration loaded from TOML
//!
//! Missing keys fall back to defaults; out-of-range values are clamped with a
//! warning instead of failing the load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants::{self, geometry::MIN_BUTTON_DIMENSION};
use crate::types::Geometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Clamp geometry on every drag/resize tick instead of only on canvas resize
    #[serde(default)]
    pub clamp_during_drag: bool,

    #[serde(default = "default_duplicate_offset")]
    pub duplicate_offset: f64,

    #[serde(default)]
    pub new_button: NewButtonSettings,

    #[serde(default)]
    pub maximize: MaximizeSettings,
}

/// Initial values for buttons created with "add button"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewButtonSettings {
    pub name: String,
    pub color: String,
    pub font_color: String,
    pub font_size: f64,
    pub is_font_adaptive: bool,
    pub show_legend: bool,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Share of the display used by "maximize canvas"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaximizeSettings {
    pub full_width: f64,
    pub full_height: f64,
    pub embedded_width: f64,
    pub embedded_height: f64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_duplicate_offset() -> f64 {
    constants::new_button::DUPLICATE_OFFSET
}

impl Default for NewButtonSettings {
    fn default() -> Self {
        use constants::new_button::*;
        Self {
            name: NAME.to_string(),
            color: COLOR.to_string(),
            font_color: FONT_COLOR.to_string(),
            font_size: FONT_SIZE,
            is_font_adaptive: true,
            show_legend: false,
            x: X,
            y: Y,
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

impl NewButtonSettings {
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.x, self.y, self.width, self.height)
    }
}

impl Default for MaximizeSettings {
    fn default() -> Self {
        use constants::maximize::*;
        Self {
            full_width: FULL_WIDTH_FRACTION,
            full_height: FULL_HEIGHT_FRACTION,
            embedded_width: EMBEDDED_WIDTH_FRACTION,
            embedded_height: EMBEDDED_HEIGHT_FRACTION,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            clamp_during_drag: false,
            duplicate_offset: default_duplicate_offset(),
            new_button: NewButtonSettings::default(),
            maximize: MaximizeSettings::default(),
        }
    }
}

fn clamp_fraction(name: &str, value: f64, fallback: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        warn!(key = name, value, using = fallback, "maximize fraction not positive, using default");
        fallback
    } else if value > 1.0 {
        warn!(key = name, value, "maximize fraction exceeds 1.0, clamping");
        1.0
    } else {
        value
    }
}

/// Larger-than-canvas defaults are left to the geometry clamp in `add_button`
fn clamp_default_extent(name: &str, value: f64) -> f64 {
    if !value.is_finite() || value < MIN_BUTTON_DIMENSION {
        warn!(key = name, value, min = MIN_BUTTON_DIMENSION, "default button size below minimum, clamping");
        MIN_BUTTON_DIMENSION
    } else {
        value
    }
}

impl EditorConfig {
    /// Default location: `<config dir>/chart-editor/config.toml`
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(constants::config::APP_DIR);
        path.push(constants::config::FILENAME);
        path
    }

    /// Load from the default location, or defaults when no file exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse TOML from {:?}", path))?;
        config.validate_and_clamp();

        info!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid editor config")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        info!(path = %path.display(), "Saved editor config");
        Ok(())
    }

    /// Repair values that would break editor invariants
    pub fn validate_and_clamp(&mut self) {
        let defaults = MaximizeSettings::default();
        self.maximize.full_width = clamp_fraction("full_width", self.maximize.full_width, defaults.full_width);
        self.maximize.full_height = clamp_fraction("full_height", self.maximize.full_height, defaults.full_height);
        self.maximize.embedded_width =
            clamp_fraction("embedded_width", self.maximize.embedded_width, defaults.embedded_width);
        self.maximize.embedded_height =
            clamp_fraction("embedded_height", self.maximize.embedded_height, defaults.embedded_height);

        self.new_button.width = clamp_default_extent("new_button.width", self.new_button.width);
        self.new_button.height = clamp_default_extent("new_button.height", self.new_button.height);

        if !self.new_button.x.is_finite() || self.new_button.x < 0.0 {
            warn!(x = self.new_button.x, "new_button.x negative, using 0");
            self.new_button.x = 0.0;
        }
        if !self.new_button.y.is_finite() || self.new_button.y < 0.0 {
            warn!(y = self.new_button.y, "new_button.y negative, using 0");
            self.new_button.y = 0.0;
        }

        if !self.duplicate_offset.is_finite() || self.duplicate_offset < 0.0 {
            warn!(
                duplicate_offset = self.duplicate_offset,
                using = default_duplicate_offset(),
                "duplicate_offset negative, using default"
            );
            self.duplicate_offset = default_duplicate_offset();
        }

        if !self.new_button.font_size.is_finite() || self.new_button.font_size <= 0.0 {
            warn!(font_size = self.new_button.font_size, "new_button.font_size not positive, using default");
            self.new_button.font_size = constants::new_button::FONT_SIZE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = EditorConfig::from_toml("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.new_button.geometry(), Geometry::new(50.0, 50.0, 120.0, 40.0));
        assert!(!config.clamp_during_drag);
    }

    #[test]
    fn test_partial_tables_keep_other_defaults() {
        let config = EditorConfig::from_toml(
            r##"
clamp_during_drag = true

[new_button]
color = "#00FF00"

[maximize]
embedded_width = 0.4
"##,
        )
        .unwrap();

        assert!(config.clamp_during_drag);
        assert_eq!(config.new_button.color, "#00FF00");
        assert_eq!(config.new_button.name, constants::new_button::NAME);
        assert_eq!(config.maximize.embedded_width, 0.4);
        assert_eq!(config.maximize.full_width, constants::maximize::FULL_WIDTH_FRACTION);
    }

    #[test]
    fn test_validate_and_clamp_repairs_out_of_range_values() {
        let mut config = EditorConfig::default();
        config.maximize.full_width = 3.0;
        config.maximize.embedded_height = -0.5;
        config.new_button.width = f64::NAN;
        config.new_button.height = 1.0;
        config.new_button.x = -20.0;
        config.duplicate_offset = -4.0;

        config.validate_and_clamp();

        assert_eq!(config.maximize.full_width, 1.0);
        assert_eq!(config.maximize.embedded_height, constants::maximize::EMBEDDED_HEIGHT_FRACTION);
        assert_eq!(config.new_button.width, MIN_BUTTON_DIMENSION);
        assert_eq!(config.new_button.height, MIN_BUTTON_DIMENSION);
        assert_eq!(config.new_button.x, 0.0);
        assert_eq!(config.duplicate_offset, constants::new_button::DUPLICATE_OFFSET);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = EditorConfig::default();
        config.log_level = "debug".to_string();
        config.maximize.full_height = 0.5;
        config.save_to(&path).unwrap();

        let loaded = EditorConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_keeps_default_size_above_minimum_canvas() {
        let mut config = EditorConfig::default();
        config.new_button.width = 500.0;
        config.validate_and_clamp();
        assert_eq!(config.new_button.width, 500.0);
    }

    #[test]
    fn test_loaded_empty_file_keeps_new_button_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = EditorConfig::load_from(&path).unwrap();
        assert_eq!(config, EditorConfig::default());

        let mut lifecycle = crate::lifecycle::ButtonLifecycle::new(crate::types::Chart {
            name: "c".to_string(),
            canvas_width: 800,
            canvas_height: 500,
            buttons: Vec::new(),
        });
        let added = lifecycle.add_button(&config.new_button, &crate::context::StaticCatalog::default());
        assert_eq!(added.geometry(), Geometry::new(50.0, 50.0, 120.0, 40.0));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = EditorConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, EditorConfig::default());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "clamp_during_drag = \"sometimes\"").unwrap();

        let err = EditorConfig::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
