//! Editor façade: the operations a presentation layer invokes
//!
//! Owns one editing session (working chart, draft, pending dimension text,
//! pointer state) and routes every gesture through the lifecycle manager,
//! the geometry clamp and the legend merger.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::constants::geometry::MIN_CANVAS_DIMENSION;
use crate::context::ReferenceCatalog;
use crate::interaction::{InputState, InteractionMode, PointerPosition};
use crate::legend::{self, ResolvedLegendEntry};
use crate::lifecycle::ButtonLifecycle;
use crate::types::{Axis, Button, ButtonPatch, CanvasSize, Chart};

/// Collaborator that stores charts and navigates away from the editor
pub trait EditorHost {
    fn save_chart(&mut self, chart: Chart) -> Result<()>;
    fn leave_editor(&mut self) -> Result<()>;
}

/// How the editor is presented, which decides the maximize fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMode {
    /// Compact view hosted inside another screen
    Embedded,
    Full,
}

/// Display area available to the canvas, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayArea {
    pub width: u32,
    pub height: u32,
}

/// Parse a dimension field; only finite values at or above the minimum count
fn parse_dimension(raw: &str) -> Option<u32> {
    let value = raw.trim().parse::<f64>().ok()?;
    if !value.is_finite() || value < MIN_CANVAS_DIMENSION as f64 {
        return None;
    }
    Some(value.floor() as u32)
}

fn scaled_dimension(available: u32, fraction: f64) -> u32 {
    ((available as f64 * fraction).floor() as u32).max(MIN_CANVAS_DIMENSION)
}

pub struct ChartEditor {
    lifecycle: ButtonLifecycle,
    catalog: Arc<dyn ReferenceCatalog>,
    config: EditorConfig,
    pending_width: Option<String>,
    pending_height: Option<String>,
    input: InputState,
}

impl ChartEditor {
    pub fn new(chart: Chart, catalog: Arc<dyn ReferenceCatalog>, config: EditorConfig) -> Self {
        info!(
            chart = %chart.name,
            buttons = chart.buttons.len(),
            width = chart.canvas_width,
            height = chart.canvas_height,
            "Opened chart editor"
        );
        Self {
            lifecycle: ButtonLifecycle::new(chart),
            catalog,
            config,
            pending_width: None,
            pending_height: None,
            input: InputState::default(),
        }
    }

    pub fn name(&self) -> &str {
        self.lifecycle.name()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.lifecycle.set_name(name);
    }

    pub fn canvas(&self) -> CanvasSize {
        self.lifecycle.canvas()
    }

    pub fn buttons(&self) -> &Arc<[Button]> {
        self.lifecycle.buttons()
    }

    pub fn button(&self, id: &str) -> Option<&Button> {
        self.lifecycle.button(id)
    }

    /// Button currently open in the settings dialog
    pub fn draft(&self) -> Option<&Button> {
        self.lifecycle.draft()
    }

    pub fn catalog(&self) -> &dyn ReferenceCatalog {
        self.catalog.as_ref()
    }

    pub fn add_button(&mut self) -> &Button {
        self.lifecycle.add_button(&self.config.new_button, self.catalog.as_ref())
    }

    /// Settings icon clicked on a button
    pub fn settings_click(&mut self, id: &str) -> bool {
        self.lifecycle.open_settings(id)
    }

    /// Live edits from the settings dialog
    pub fn update_properties(&mut self, patch: ButtonPatch) {
        self.lifecycle.update_draft(patch, self.catalog.as_ref());
    }

    pub fn save_properties(&mut self) {
        self.lifecycle.commit_draft();
    }

    pub fn cancel_properties(&mut self) {
        self.lifecycle.cancel_draft();
    }

    pub fn duplicate(&mut self) -> Option<&Button> {
        self.lifecycle.duplicate_draft(self.config.duplicate_offset)
    }

    pub fn delete(&mut self) {
        self.lifecycle.delete_draft();
    }

    fn pending_slot(&mut self, axis: Axis) -> &mut Option<String> {
        match axis {
            Axis::Width => &mut self.pending_width,
            Axis::Height => &mut self.pending_height,
        }
    }

    /// Text currently typed into a dimension field, if any
    pub fn pending_dimension(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::Width => self.pending_width.as_deref(),
            Axis::Height => self.pending_height.as_deref(),
        }
    }

    fn set_dimension(&mut self, axis: Axis, value: u32) {
        let mut canvas = self.lifecycle.canvas();
        match axis {
            Axis::Width => canvas.width = value,
            Axis::Height => canvas.height = value,
        }
        self.lifecycle.resize_canvas(canvas);
    }

    /// Keystroke in a dimension field.
    ///
    /// A usable number is applied at once; anything else waits for blur.
    pub fn change_dimension(&mut self, axis: Axis, raw: &str) {
        *self.pending_slot(axis) = Some(raw.to_string());
        match parse_dimension(raw) {
            Some(value) => self.set_dimension(axis, value),
            None => debug!(?axis, raw, "Deferred dimension input"),
        }
    }

    /// Dimension field lost focus; unusable input falls back to the minimum
    pub fn commit_dimension(&mut self, axis: Axis) {
        let Some(raw) = self.pending_slot(axis).take() else {
            return;
        };
        if parse_dimension(&raw).is_none() {
            info!(?axis, raw = %raw, min = MIN_CANVAS_DIMENSION, "Invalid canvas dimension, resetting to minimum");
            self.set_dimension(axis, MIN_CANVAS_DIMENSION);
        }
    }

    /// Fit the canvas to a share of the display area
    pub fn maximize_canvas(&mut self, display: DisplayArea, mode: PresentationMode) -> CanvasSize {
        let fractions = self.config.maximize;
        let (fw, fh) = match mode {
            PresentationMode::Embedded => (fractions.embedded_width, fractions.embedded_height),
            PresentationMode::Full => (fractions.full_width, fractions.full_height),
        };
        let canvas = CanvasSize::new(
            scaled_dimension(display.width, fw),
            scaled_dimension(display.height, fh),
        );

        info!(?mode, width = canvas.width, height = canvas.height, "Maximized canvas");
        self.pending_width = None;
        self.pending_height = None;
        self.lifecycle.resize_canvas(canvas);
        canvas
    }

    /// Legend of the draft's linked reference item with the draft's overrides applied
    pub fn legend_preview(&self) -> Vec<ResolvedLegendEntry> {
        let Some(draft) = self.lifecycle.draft() else {
            return Vec::new();
        };
        draft
            .linked_item
            .reference_id()
            .and_then(|id| self.catalog.find_reference(id))
            .map(|item| legend::resolve_legend(&item.legend, &draft.legend_overrides))
            .unwrap_or_default()
    }

    /// Store the preview dialog's overrides on the draft, replacing the old set
    pub fn save_legend_overrides(&mut self, overrides: BTreeMap<String, String>) {
        let Some(draft) = self.lifecycle.draft() else {
            debug!("save_legend_overrides without a draft ignored");
            return;
        };
        let saved = legend::save_overrides(draft, overrides);
        self.update_properties(ButtonPatch {
            legend_overrides: Some(saved.legend_overrides),
            ..Default::default()
        });
    }

    /// Pointer pressed on a button body or its resize handle
    pub fn pointer_down(&mut self, id: &str, mode: InteractionMode, at: PointerPosition) -> bool {
        let Some(geometry) = self.lifecycle.button(id).map(Button::geometry) else {
            return false;
        };
        self.input.begin(id, mode, at, geometry);
        true
    }

    /// Pointer moved while a button is held
    pub fn pointer_move(&mut self, at: PointerPosition) -> bool {
        let Some((id, geometry)) = self.input.track(at) else {
            return false;
        };
        let id = id.to_string();
        self.lifecycle
            .apply_geometry(&id, geometry, self.config.clamp_during_drag)
    }

    /// Pointer released or left the canvas
    pub fn pointer_up(&mut self) {
        self.input.end();
    }

    pub fn active_button_id(&self) -> Option<&str> {
        self.input.active_button_id()
    }

    /// Immutable snapshot of the working chart
    pub fn save_chart(&self) -> Chart {
        self.lifecycle.snapshot()
    }

    /// Save through the host, then navigate out
    pub fn leave_editor(&mut self, host: &mut dyn EditorHost) -> Result<()> {
        self.input.end();
        let chart = self.save_chart();
        info!(chart = %chart.name, buttons = chart.buttons.len(), "Leaving editor");
        host.save_chart(chart)
            .with_context(|| format!("Failed to save chart '{}'", self.lifecycle.name()))?;
        host.leave_editor().context("Failed to leave editor")?;
        Ok(())
    }
}
