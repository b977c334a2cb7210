//! View Utilities
//!
//! Derives the visible list from stored items. Pure; call it on every change.

use crate::domain::{Entity, GroceryItem, SelectionSet};

/// Label shown when no store filter is active
pub const ALL_STORES: &str = "All Stores";

/// Transient view settings, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Active store label, `None` = all stores
    pub store_filter: Option<String>,
    /// Shopping mode: show only selected items
    pub shopping: bool,
}

impl ViewState {
    pub fn preview(&self) -> &str {
        self.store_filter.as_deref().unwrap_or(ALL_STORES)
    }
}

/// Filter and sort items for display.
///
/// 1. Keep items carried by `store_filter`, if one is set.
/// 2. In shopping mode with a non-empty selection, keep only selected items.
///    An empty selection does not restrict anything.
/// 3. Sort by name, case-insensitive; equal names keep insertion order.
pub fn compute_visible<'a>(
    items: &'a [GroceryItem],
    store_filter: Option<&str>,
    shopping_mode: bool,
    selection: &SelectionSet,
) -> Vec<&'a GroceryItem> {
    let restrict_to_selection = shopping_mode && !selection.is_empty();

    let mut visible: Vec<&GroceryItem> = items
        .iter()
        .filter(|item| store_filter.map_or(true, |store| item.is_available_at(store)))
        .filter(|item| !restrict_to_selection || selection.contains(&item.id()))
        .collect();

    // Stable, so name ties stay in insertion order
    visible.sort_by_cached_key(|item| sort_key(item.name()));
    visible
}

/// Same as [`compute_visible`], driven by a [`ViewState`]
pub fn visible_for<'a>(
    items: &'a [GroceryItem],
    view: &ViewState,
    selection: &SelectionSet,
) -> Vec<&'a GroceryItem> {
    compute_visible(items, view.store_filter.as_deref(), view.shopping, selection)
}

fn sort_key(name: &str) -> String {
    name.to_lowercase()
}
