//! Re-clamps the whole button collection after a canvas size change

use std::sync::Arc;
use tracing::{debug, info};

use crate::geometry;
use crate::types::{Button, CanvasSize};

/// Result of reconciling a collection against a canvas
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub buttons: Arc<[Button]>,
    /// Number of buttons whose geometry had to be repaired
    pub repaired: usize,
}

impl ReconcileOutcome {
    pub fn changed(&self) -> bool {
        self.repaired > 0
    }
}

/// Clamp every button to `canvas`.
///
/// Returns the same `Arc` when nothing moved, so consumers diffing by
/// reference see no update. Otherwise the whole replacement collection is
/// built before it is returned.
pub fn reconcile(buttons: &Arc<[Button]>, canvas: CanvasSize) -> ReconcileOutcome {
    let mut repaired = 0;
    let clamped: Vec<Button> = buttons
        .iter()
        .map(|button| {
            let next = geometry::clamp(button, canvas.width, canvas.height);
            if next.geometry() != button.geometry() {
                debug!(
                    button = %button.id,
                    from = ?button.geometry(),
                    to = ?next.geometry(),
                    "Repaired button geometry"
                );
                repaired += 1;
            }
            next
        })
        .collect();

    if repaired == 0 {
        return ReconcileOutcome {
            buttons: Arc::clone(buttons),
            repaired,
        };
    }

    info!(
        repaired,
        width = canvas.width,
        height = canvas.height,
        "Reconciled buttons with canvas"
    );
    ReconcileOutcome {
        buttons: clamped.into(),
        repaired,
    }
}
