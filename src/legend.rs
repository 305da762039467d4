//! Per-button legend overrides layered over a reference item's canonical legend

use std::collections::BTreeMap;
use tracing::info;

use crate::types::{Button, LegendEntry};

/// Legend line as shown in the preview dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLegendEntry {
    pub key: String,
    pub text: String,
    pub overridden: bool,
}

fn usable_override<'a>(overrides: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    overrides
        .get(key)
        .map(String::as_str)
        .filter(|text| !text.trim().is_empty())
}

/// Effective label of one entry: override, then canonical label, then `fallback_label`
pub fn resolve_legend_text(
    entry: &LegendEntry,
    overrides: &BTreeMap<String, String>,
    fallback_label: &str,
) -> String {
    if let Some(text) = usable_override(overrides, &entry.key) {
        return text.to_string();
    }
    if entry.label.is_empty() {
        fallback_label.to_string()
    } else {
        entry.label.clone()
    }
}

/// Resolve every canonical entry, keeping canonical order.
///
/// Override keys with no canonical entry are ignored.
pub fn resolve_legend(
    entries: &[LegendEntry],
    overrides: &BTreeMap<String, String>,
) -> Vec<ResolvedLegendEntry> {
    entries
        .iter()
        .map(|entry| ResolvedLegendEntry {
            key: entry.key.clone(),
            text: resolve_legend_text(entry, overrides, &entry.key),
            overridden: usable_override(overrides, &entry.key).is_some(),
        })
        .collect()
}

/// Replace the button's whole override mapping with `overrides`.
///
/// Snapshot semantics: keys missing from `overrides` revert to canonical text.
/// Blank texts are dropped rather than stored.
pub fn save_overrides(button: &Button, overrides: BTreeMap<String, String>) -> Button {
    let kept: BTreeMap<String, String> = overrides
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .collect();
    info!(button = %button.id, count = kept.len(), "Saved legend overrides");

    let mut next = button.clone();
    next.legend_overrides = kept;
    next
}
