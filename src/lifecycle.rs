//! Committed button collection plus the single editing draft
//!
//! The committed collection is an immutable `Arc<[Button]>` that is replaced
//! wholesale on every change. Edits happen on the draft and only reach the
//! collection through [`ButtonLifecycle::commit_draft`].

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::NewButtonSettings;
use crate::context::ReferenceCatalog;
use crate::geometry::{self, clamp_geometry};
use crate::reconcile::reconcile;
use crate::types::{Button, ButtonPatch, ButtonType, CanvasSize, Chart, Geometry, LinkedItem};

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Enforce the link rules: labels carry `LabelOnly`, normal buttons point at
/// an existing reference item (the first one if theirs is gone), and a normal
/// button with nothing to link to becomes a label.
fn normalize_link(mut button: Button, catalog: &dyn ReferenceCatalog) -> Button {
    match button.kind {
        ButtonType::Label => {
            button.linked_item = LinkedItem::LabelOnly;
        }
        ButtonType::Normal => {
            let linked = button
                .linked_item
                .reference_id()
                .and_then(|id| catalog.find_reference(id));
            if linked.is_none() {
                match catalog.first_reference() {
                    Some(item) => {
                        debug!(button = %button.id, reference = %item.id, "Relinked button to first reference item");
                        button.linked_item = LinkedItem::Reference(item.id.clone());
                    }
                    None => {
                        debug!(button = %button.id, "No reference items, demoting button to label");
                        button.kind = ButtonType::Label;
                        button.linked_item = LinkedItem::LabelOnly;
                    }
                }
            }
        }
    }
    button
}

#[derive(Debug, Clone)]
pub struct ButtonLifecycle {
    name: String,
    canvas: CanvasSize,
    buttons: Arc<[Button]>,
    draft: Option<Button>,
    /// Ids present when the session started
    original_ids: HashSet<String>,
    /// Button created by `add_button` that has not been saved yet
    unsaved_new: Option<String>,
}

impl ButtonLifecycle {
    /// Start a session from a chart; buttons are reconciled against its canvas
    pub fn new(chart: Chart) -> Self {
        let canvas = chart.canvas().at_least_minimum();
        if canvas != chart.canvas() {
            warn!(
                width = chart.canvas_width,
                height = chart.canvas_height,
                "Chart canvas below minimum, raising"
            );
        }

        let original_ids = chart.buttons.iter().map(|b| b.id.clone()).collect();
        let loaded: Arc<[Button]> = chart.buttons.into();
        let buttons = reconcile(&loaded, canvas).buttons;

        Self {
            name: chart.name,
            canvas,
            buttons,
            draft: None,
            original_ids,
            unsaved_new: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn buttons(&self) -> &Arc<[Button]> {
        &self.buttons
    }

    pub fn draft(&self) -> Option<&Button> {
        self.draft.as_ref()
    }

    pub fn button(&self, id: &str) -> Option<&Button> {
        self.buttons.iter().find(|b| b.id == id)
    }

    fn replace_collection(&mut self, buttons: Vec<Button>) {
        self.buttons = buttons.into();
    }

    /// Create a button with default geometry, append it and open it as the draft
    pub fn add_button(&mut self, defaults: &NewButtonSettings, catalog: &dyn ReferenceCatalog) -> &Button {
        let (kind, linked_item) = match catalog.first_reference() {
            Some(item) => (ButtonType::Normal, LinkedItem::Reference(item.id.clone())),
            None => (ButtonType::Label, LinkedItem::LabelOnly),
        };

        let button = Button {
            id: fresh_id(),
            name: defaults.name.clone(),
            color: defaults.color.clone(),
            linked_item,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            kind,
            is_font_adaptive: defaults.is_font_adaptive,
            font_size: defaults.font_size,
            font_color: defaults.font_color.clone(),
            show_legend: defaults.show_legend,
            legend_overrides: Default::default(),
        }
        .with_geometry(clamp_geometry(defaults.geometry(), self.canvas));

        info!(button = %button.id, kind = ?button.kind, "Added button");

        let mut next = self.buttons.to_vec();
        next.push(button.clone());
        self.replace_collection(next);
        self.unsaved_new = Some(button.id.clone());
        self.draft.insert(button)
    }

    /// Open the committed button with `id` in the settings dialog
    pub fn open_settings(&mut self, id: &str) -> bool {
        match self.button(id).cloned() {
            Some(button) => {
                debug!(button = %id, "Opened button settings");
                self.draft = Some(button);
                true
            }
            None => {
                debug!(button = %id, "open_settings for unknown button ignored");
                false
            }
        }
    }

    /// Merge `patch` into the draft; the committed collection is untouched
    pub fn update_draft(&mut self, patch: ButtonPatch, catalog: &dyn ReferenceCatalog) {
        let Some(draft) = self.draft.take() else {
            debug!("update_draft without a draft ignored");
            return;
        };
        self.draft = Some(normalize_link(patch.apply(&draft), catalog));
    }

    /// Write the draft over the committed button with the same id
    pub fn commit_draft(&mut self) {
        let Some(draft) = self.draft.take() else {
            debug!("commit_draft without a draft ignored");
            return;
        };

        let draft = geometry::clamp(&draft, self.canvas.width, self.canvas.height);
        if !self.buttons.iter().any(|b| b.id == draft.id) {
            debug!(button = %draft.id, "Draft no longer in collection, commit ignored");
            return;
        }

        if self.unsaved_new.as_deref() == Some(draft.id.as_str()) {
            self.unsaved_new = None;
        }

        info!(button = %draft.id, "Committed button");
        let next = self
            .buttons
            .iter()
            .map(|b| if b.id == draft.id { draft.clone() } else { b.clone() })
            .collect();
        self.replace_collection(next);
    }

    /// Close the dialog without saving; a never-saved new button is removed
    pub fn cancel_draft(&mut self) {
        let Some(draft) = self.draft.take() else {
            debug!("cancel_draft without a draft ignored");
            return;
        };

        let fresh = !self.original_ids.contains(&draft.id)
            && self.unsaved_new.as_deref() == Some(draft.id.as_str());
        if fresh {
            info!(button = %draft.id, "Discarded unsaved new button");
            self.unsaved_new = None;
            let next = self.buttons.iter().filter(|b| b.id != draft.id).cloned().collect();
            self.replace_collection(next);
        } else {
            debug!(button = %draft.id, "Cancelled button edit");
        }
    }

    /// Append an offset copy of the draft; the draft's own edits are dropped
    pub fn duplicate_draft(&mut self, offset: f64) -> Option<&Button> {
        let Some(draft) = self.draft.take() else {
            debug!("duplicate_draft without a draft ignored");
            return None;
        };

        // A fresh button that gets duplicated stays in the collection as-is
        if self.unsaved_new.as_deref() == Some(draft.id.as_str()) {
            self.unsaved_new = None;
        }

        let mut copy = draft.clone();
        copy.id = fresh_id();
        copy.x += offset;
        copy.y += offset;
        let copy = geometry::clamp(&copy, self.canvas.width, self.canvas.height);

        info!(source = %draft.id, button = %copy.id, x = copy.x, y = copy.y, "Duplicated button");

        let mut next = self.buttons.to_vec();
        next.push(copy);
        self.replace_collection(next);
        self.buttons.last()
    }

    /// Remove the committed button the draft was opened from
    pub fn delete_draft(&mut self) {
        let Some(draft) = self.draft.take() else {
            debug!("delete_draft without a draft ignored");
            return;
        };

        if self.unsaved_new.as_deref() == Some(draft.id.as_str()) {
            self.unsaved_new = None;
        }

        if self.buttons.iter().any(|b| b.id == draft.id) {
            info!(button = %draft.id, "Deleted button");
            let next = self.buttons.iter().filter(|b| b.id != draft.id).cloned().collect();
            self.replace_collection(next);
        }
    }

    /// Store a new canvas size and re-clamp every button in one step.
    /// Returns true when the button collection changed.
    pub fn resize_canvas(&mut self, canvas: CanvasSize) -> bool {
        if canvas == self.canvas {
            return false;
        }
        debug!(width = canvas.width, height = canvas.height, "Canvas resized");
        self.canvas = canvas;

        let outcome = reconcile(&self.buttons, canvas);
        let changed = outcome.changed();
        self.buttons = outcome.buttons;
        changed
    }

    /// Replace one committed button's geometry, optionally clamped to the canvas.
    ///
    /// An open draft of the same button follows along so a later commit does
    /// not restore the pre-drag geometry.
    pub fn apply_geometry(&mut self, id: &str, geometry: Geometry, clamp: bool) -> bool {
        let geometry = if clamp {
            clamp_geometry(geometry, self.canvas)
        } else {
            geometry
        };

        let Some(current) = self.button(id) else {
            debug!(button = %id, "Geometry update for unknown button ignored");
            return false;
        };
        let unchanged = current.geometry() == geometry;

        if let Some(draft) = self.draft.take() {
            self.draft = Some(if draft.id == id { draft.with_geometry(geometry) } else { draft });
        }
        if unchanged {
            return false;
        }

        let next = self
            .buttons
            .iter()
            .map(|b| if b.id == id { b.clone().with_geometry(geometry) } else { b.clone() })
            .collect();
        self.replace_collection(next);
        true
    }

    /// Immutable snapshot for the persistence collaborator
    pub fn snapshot(&self) -> Chart {
        Chart {
            name: self.name.clone(),
            canvas_width: self.canvas.width,
            canvas_height: self.canvas.height,
            buttons: self.buttons.to_vec(),
        }
    }
}
