//! Button geometry and lifecycle engine for a visual chart editor
//!
//! A chart is a named canvas of fixed pixel size holding rectangular buttons.
//! This crate keeps every button inside its canvas, runs the draft/commit
//! editing protocol and merges per-button legend overrides. Rendering, pointer
//! capture and storage are left to the host application.

#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod context;
pub mod editor;
pub mod geometry;
pub mod interaction;
pub mod legend;
pub mod lifecycle;
pub mod persistence;
pub mod reconcile;
pub mod types;

pub use config::EditorConfig;
pub use context::{ReferenceCatalog, StaticCatalog};
pub use editor::{ChartEditor, DisplayArea, EditorHost, PresentationMode};
pub use types::{Axis, Button, ButtonPatch, ButtonType, CanvasSize, Chart, LinkedItem};
