//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the editor, providing a single source of truth for constant values.

/// Canvas and button size limits
pub mod geometry {
    /// Smallest width or height a button may have at rest
    pub const MIN_BUTTON_DIMENSION: f64 = 5.0;

    /// Smallest width or height a chart canvas may have
    pub const MIN_CANVAS_DIMENSION: u32 = 100;
}

/// Values used when a new button is created
pub mod new_button {
    pub const X: f64 = 50.0;
    pub const Y: f64 = 50.0;
    pub const WIDTH: f64 = 120.0;
    pub const HEIGHT: f64 = 40.0;

    pub const NAME: &str = "New Button";
    pub const COLOR: &str = "#4A90E2";
    pub const FONT_COLOR: &str = "#FFFFFF";
    pub const FONT_SIZE: f64 = 14.0;

    /// Offset applied to both axes when a button is duplicated
    pub const DUPLICATE_OFFSET: f64 = 10.0;
}

/// Button link constants
pub mod link {
    /// Serialized `linkedItem` value of a button that links to nothing
    pub const LABEL_ONLY: &str = "label-only";
}

/// Fractions of the display area used by "maximize canvas"
pub mod maximize {
    pub const FULL_WIDTH_FRACTION: f64 = 0.9;
    pub const FULL_HEIGHT_FRACTION: f64 = 0.75;

    pub const EMBEDDED_WIDTH_FRACTION: f64 = 0.6;
    pub const EMBEDDED_HEIGHT_FRACTION: f64 = 0.5;
}

/// Config file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "chart-editor";

    /// Config file name
    pub const FILENAME: &str = "config.toml";

    /// Environment variable overriding the configured log level
    pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
}
