//! JSON carrier for charts and reference catalogs
//!
//! The editor core never touches storage. This module is the file-backed
//! collaborator used by the command-line front end.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::context::StaticCatalog;
use crate::editor::EditorHost;
use crate::types::Chart;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn load_chart(path: &Path) -> Result<Chart> {
    let chart: Chart = read_json(path)?;
    info!(path = %path.display(), chart = %chart.name, buttons = chart.buttons.len(), "Loaded chart");
    Ok(chart)
}

pub fn save_chart(path: &Path, chart: &Chart) -> Result<()> {
    write_json(path, chart)?;
    info!(path = %path.display(), chart = %chart.name, "Saved chart");
    Ok(())
}

/// Missing path means the host has no reference items to offer
pub fn load_catalog(path: Option<&Path>) -> Result<StaticCatalog> {
    match path {
        Some(path) => {
            let catalog: StaticCatalog = read_json(path)?;
            info!(
                path = %path.display(),
                reference_items = catalog.reference_items.len(),
                action_buttons = catalog.action_buttons.len(),
                "Loaded reference catalog"
            );
            Ok(catalog)
        }
        None => Ok(StaticCatalog::default()),
    }
}

/// Host that writes the chart back to a JSON file on exit
#[derive(Debug)]
pub struct JsonFileHost {
    path: PathBuf,
    left: bool,
}

impl JsonFileHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            left: false,
        }
    }

    pub fn has_left(&self) -> bool {
        self.left
    }
}

impl EditorHost for JsonFileHost {
    fn save_chart(&mut self, chart: Chart) -> Result<()> {
        save_chart(&self.path, &chart)
    }

    fn leave_editor(&mut self) -> Result<()> {
        info!(path = %self.path.display(), "Editor closed");
        self.left = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::editor::ChartEditor;
    use std::sync::Arc;

    const CHART_JSON: &str = r##"{
        "name": "Preflop",
        "canvasWidth": 800,
        "canvasHeight": 500,
        "buttons": [{
            "id": "b1",
            "name": "Raise",
            "color": "#FF0000",
            "linkedItem": "label-only",
            "x": 700, "y": 400, "width": 120, "height": 40,
            "type": "label",
            "isFontAdaptive": true,
            "fontSize": 14,
            "fontColor": "#FFFFFF",
            "showLegend": false
        }]
    }"##;

    #[test]
    fn test_load_chart_from_host_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(&path, CHART_JSON).unwrap();

        let chart = load_chart(&path).unwrap();
        assert_eq!(chart.name, "Preflop");
        assert_eq!(chart.buttons[0].x, 700.0);
        assert!(chart.buttons[0].legend_overrides.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("chart.json");
        fs::write(&source, CHART_JSON).unwrap();
        let chart = load_chart(&source).unwrap();

        let target = dir.path().join("out").join("chart.json");
        save_chart(&target, &chart).unwrap();
        assert_eq!(load_chart(&target).unwrap(), chart);
    }

    #[test]
    fn test_missing_chart_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_chart(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[test]
    fn test_no_catalog_path_gives_empty_catalog() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.reference_items.is_empty());
    }

    #[test]
    fn test_json_host_persists_on_leave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(&path, CHART_JSON).unwrap();

        let chart = load_chart(&path).unwrap();
        let mut editor = ChartEditor::new(chart, Arc::new(StaticCatalog::default()), EditorConfig::default());
        editor.maximize_canvas(
            crate::editor::DisplayArea { width: 200, height: 200 },
            crate::editor::PresentationMode::Embedded,
        );

        let mut host = JsonFileHost::new(&path);
        editor.leave_editor(&mut host).unwrap();
        assert!(host.has_left());

        let saved = load_chart(&path).unwrap();
        assert_eq!((saved.canvas_width, saved.canvas_height), (120, 100));
        let button = &saved.buttons[0];
        assert!(button.x + button.width <= 120.0);
        assert!(button.y + button.height <= 100.0);
    }
}
