//! Store Configuration
//!
//! Five ordered store slots. A slot is either empty (unused) or holds a label.
//! Slot order drives filter button order.

use serde::{Deserialize, Serialize};

/// Number of configurable store slots
pub const STORE_SLOTS: usize = 5;

/// Length of the short label shown on filter buttons
const ABBREVIATION_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreConfig {
    slots: [String; STORE_SLOTS],
}

/// A filter control for one non-empty slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    /// Slot position, 0..STORE_SLOTS
    pub index: usize,
    pub label: String,
    pub abbreviation: String,
}

impl StoreConfig {
    pub fn new(slots: [String; STORE_SLOTS]) -> Self {
        Self { slots }
    }

    /// All five slots, empty ones included
    pub fn slots(&self) -> &[String; STORE_SLOTS] {
        &self.slots
    }

    /// Label in a slot, `None` when the slot is empty or out of range
    pub fn label(&self, index: usize) -> Option<&str> {
        self.slots
            .get(index)
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    /// Non-empty labels with their slot index, in slot order
    pub fn labels(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, label)| !label.is_empty())
            .map(|(idx, label)| (idx, label.as_str()))
    }

    /// Check if `label` is one of the configured (non-empty) labels
    pub fn contains(&self, label: &str) -> bool {
        !label.is_empty() && self.slots.iter().any(|slot| slot == label)
    }

    pub fn is_unconfigured(&self) -> bool {
        self.slots.iter().all(String::is_empty)
    }

    pub fn filter_buttons(&self) -> Vec<FilterButton> {
        self.labels()
            .map(|(index, label)| FilterButton {
                index,
                label: label.to_string(),
                abbreviation: label.chars().take(ABBREVIATION_LEN).collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(slots: [&str; STORE_SLOTS]) -> StoreConfig {
        StoreConfig::new(slots.map(String::from))
    }

    #[test]
    fn test_default_is_five_empty_slots() {
        let config = StoreConfig::default();
        assert!(config.is_unconfigured());
        assert_eq!(config.slots().len(), STORE_SLOTS);
        assert_eq!(config.labels().count(), 0);
    }

    #[test]
    fn test_labels_skip_empty_slots() {
        let config = config(["Aldi", "", "Target", "", "Costco"]);
        let labels: Vec<_> = config.labels().collect();
        assert_eq!(labels, vec![(0, "Aldi"), (2, "Target"), (4, "Costco")]);
        assert_eq!(config.label(1), None);
        assert_eq!(config.label(2), Some("Target"));
        assert_eq!(config.label(7), None);
    }

    #[test]
    fn test_contains_rejects_empty() {
        let config = config(["Aldi", "", "", "", ""]);
        assert!(config.contains("Aldi"));
        assert!(!config.contains(""));
        assert!(!config.contains("aldi"));
    }

    #[test]
    fn test_filter_buttons() {
        let config = config(["", "Walmart", "Lidl", "", "Ü-Markt"]);
        let buttons = config.filter_buttons();
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0].index, 1);
        assert_eq!(buttons[0].abbreviation, "Wal");
        assert_eq!(buttons[1].abbreviation, "Lid");
        assert_eq!(buttons[2].abbreviation, "Ü-M");
    }
}
