//! Pointer drag/resize tracking for one active button
//!
//! Pointer capture itself lives in the presentation layer; it reports
//! canvas-space pointer positions here and gets back the geometry the active
//! button should take.

use tracing::debug;

use crate::types::Geometry;

/// What a pointer-down grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// Body of the button: moves x/y
    Move,
    /// Resize handle: changes width/height
    Resize,
}

/// Pointer location in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveInteraction {
    button_id: String,
    mode: InteractionMode,
    pointer_start: PointerPosition,
    geometry_start: Geometry,
}

#[derive(Debug, Default)]
pub struct InputState {
    active: Option<ActiveInteraction>,
}

impl InputState {
    pub fn active_button_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.button_id.as_str())
    }

    pub fn mode(&self) -> Option<InteractionMode> {
        self.active.as_ref().map(|a| a.mode)
    }

    /// Start interacting with a button; any previous interaction is replaced
    pub fn begin(&mut self, button_id: &str, mode: InteractionMode, at: PointerPosition, geometry: Geometry) {
        debug!(button = %button_id, ?mode, x = at.x, y = at.y, "Pointer down");
        self.active = Some(ActiveInteraction {
            button_id: button_id.to_string(),
            mode,
            pointer_start: at,
            geometry_start: geometry,
        });
    }

    /// Geometry implied by the pointer having moved to `at`.
    /// Returns the active button id with its new, unclamped geometry.
    pub fn track(&self, at: PointerPosition) -> Option<(&str, Geometry)> {
        let active = self.active.as_ref()?;
        let dx = at.x - active.pointer_start.x;
        let dy = at.y - active.pointer_start.y;
        let start = active.geometry_start;

        let geometry = match active.mode {
            InteractionMode::Move => Geometry::new(start.x + dx, start.y + dy, start.width, start.height),
            InteractionMode::Resize => Geometry::new(start.x, start.y, start.width + dx, start.height + dy),
        };
        Some((active.button_id.as_str(), geometry))
    }

    /// Pointer up or leave; the button keeps its last reported geometry
    pub fn end(&mut self) -> Option<String> {
        let ended = self.active.take().map(|a| a.button_id);
        if let Some(id) = &ended {
            debug!(button = %id, "Pointer released");
        }
        ended
    }
}
