//! Read-only application data the editor consumes
//!
//! Reference items and action buttons belong to the host application. The
//! editor only ever borrows them through [`ReferenceCatalog`].

use serde::{Deserialize, Serialize};

use crate::types::{ActionButton, ReferenceItem};

pub trait ReferenceCatalog {
    /// All reference items, in display order
    fn reference_items(&self) -> &[ReferenceItem];

    fn action_buttons(&self) -> &[ActionButton];

    fn find_reference(&self, id: &str) -> Option<&ReferenceItem> {
        self.reference_items().iter().find(|item| item.id == id)
    }

    /// Default link target for new buttons
    fn first_reference(&self) -> Option<&ReferenceItem> {
        self.reference_items().first()
    }
}

/// Owned catalog, deserialized from the host's JSON export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticCatalog {
    #[serde(default)]
    pub reference_items: Vec<ReferenceItem>,
    #[serde(default)]
    pub action_buttons: Vec<ActionButton>,
}

impl StaticCatalog {
    pub fn new(reference_items: Vec<ReferenceItem>) -> Self {
        Self {
            reference_items,
            action_buttons: Vec::new(),
        }
    }
}

impl ReferenceCatalog for StaticCatalog {
    fn reference_items(&self) -> &[ReferenceItem] {
        &self.reference_items
    }

    fn action_buttons(&self) -> &[ActionButton] {
        &self.action_buttons
    }
}
