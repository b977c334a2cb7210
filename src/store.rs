//! Application State Store
//!
//! Single owned container for the grocery list: items, selection, store
//! labels, the active filter and the shopping session. Every mutation is
//! applied in memory, persisted immediately, then published to subscribers.
//!
//! A failed save never undoes the in-memory change. It is logged, kept as
//! `last_persist_error`, and published as [`StoreEvent::PersistFailed`].

use std::collections::{BTreeSet, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};

use log::{debug, error, info};

use crate::domain::{
    DomainError, DomainResult, Entity, FilterButton, FoodType, GroceryItem, ItemId, SelectionSet,
    StoreConfig, STORE_SLOTS,
};
use crate::repository::{
    KeyValueStore, ListRepository, ITEMS_KEY, SELECTION_KEY, STORE_LABELS_KEY,
};
use crate::session::{SessionState, ShoppingSession, Transition};
use crate::view::{self, ViewState};

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ItemsChanged,
    SelectionChanged,
    StoreLabelsChanged,
    /// Store filter changed
    FilterChanged(Option<String>),
    SessionChanged(SessionState),
    /// One-shot: the last selected item was cleared while shopping
    ShoppingComplete,
    PersistFailed { key: &'static str, message: String },
}

/// Behaviour switches for the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Accept items with an empty name
    pub allow_empty_names: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            allow_empty_names: true,
        }
    }
}

pub struct GroceryStore<S: KeyValueStore> {
    repo: ListRepository<S>,
    options: StoreOptions,
    items: Vec<GroceryItem>,
    selection: SelectionSet,
    stores: StoreConfig,
    store_filter: Option<String>,
    session: ShoppingSession,
    subscribers: Vec<Sender<StoreEvent>>,
    last_persist_error: Option<String>,
}

impl<S: KeyValueStore> GroceryStore<S> {
    /// Load all persisted state from `kv`. Corrupt or missing values start empty.
    pub fn load(kv: S, options: StoreOptions) -> Self {
        let repo = ListRepository::new(kv);
        let items = repo.load_items();
        let selection = repo.load_selection();
        let stores = repo.load_store_config();
        info!(
            "Loaded {} items, {} selected, {} stores configured",
            items.len(),
            selection.len(),
            stores.labels().count()
        );

        Self {
            repo,
            options,
            items,
            selection,
            stores,
            store_filter: None,
            session: ShoppingSession::new(),
            subscribers: Vec::new(),
            last_persist_error: None,
        }
    }

    // ========================
    // Read access
    // ========================

    /// Items in insertion order
    pub fn items(&self) -> &[GroceryItem] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&GroceryItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn store_config(&self) -> &StoreConfig {
        &self.stores
    }

    pub fn filter_buttons(&self) -> Vec<FilterButton> {
        self.stores.filter_buttons()
    }

    pub fn store_filter(&self) -> Option<&str> {
        self.store_filter.as_deref()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            store_filter: self.store_filter.clone(),
            shopping: self.session.is_shopping(),
        }
    }

    /// The filtered, sorted list to display. Recomputed on every call.
    pub fn visible_items(&self) -> Vec<&GroceryItem> {
        view::compute_visible(
            &self.items,
            self.store_filter.as_deref(),
            self.session.is_shopping(),
            &self.selection,
        )
    }

    /// Active store label or "All Stores"
    pub fn store_preview(&self) -> &str {
        self.store_filter.as_deref().unwrap_or(view::ALL_STORES)
    }

    pub fn can_begin_shopping(&self) -> bool {
        self.session.can_begin(&self.selection)
    }

    /// The add control is hidden while shopping
    pub fn can_add_items(&self) -> bool {
        !self.session.is_shopping()
    }

    pub fn completion_pending(&self) -> bool {
        self.session.notice_pending()
    }

    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    pub fn backend(&self) -> &S {
        self.repo.backend()
    }

    pub fn into_backend(self) -> S {
        self.repo.into_backend()
    }

    /// Receive every event published from now on
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    // ========================
    // Items
    // ========================

    /// Append a new item. Clears the store filter and leaves shopping mode.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        food_type: &str,
        stores: impl IntoIterator<Item = impl Into<String>>,
    ) -> DomainResult<GroceryItem> {
        let name = name.into();
        if !self.options.allow_empty_names && name.trim().is_empty() {
            return Err(DomainError::validation("item name must not be empty"));
        }
        let food_type = FoodType::parse(food_type)?;
        let stores: BTreeSet<String> = stores.into_iter().map(Into::into).collect();
        if let Some(unknown) = stores.iter().find(|s| !self.stores.contains(s)) {
            return Err(DomainError::validation(format!(
                "'{}' is not a configured store",
                unknown
            )));
        }

        let item = GroceryItem::new(name, food_type, stores);
        debug!("Adding item {} ({})", item.id(), item.name());
        self.items.push(item.clone());
        self.persist_items();
        self.emit(StoreEvent::ItemsChanged);

        if self.store_filter.take().is_some() {
            self.emit(StoreEvent::FilterChanged(None));
        }
        if self.session.exit() {
            self.emit(StoreEvent::SessionChanged(SessionState::Browsing));
        }

        Ok(item)
    }

    /// Delete items by position in the current visible list.
    ///
    /// Positions are resolved to identifiers first, so the right items go
    /// regardless of filtering and sort order. Out-of-range positions reject
    /// the whole batch. Deleted ids are dropped from the selection.
    pub fn delete_items(
        &mut self,
        indices: impl IntoIterator<Item = usize>,
    ) -> DomainResult<Vec<GroceryItem>> {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        if indices.is_empty() {
            return Ok(Vec::new());
        }

        let visible: Vec<ItemId> = self.visible_items().iter().map(|item| item.id()).collect();
        if let Some(bad) = indices.iter().find(|&&idx| idx >= visible.len()) {
            return Err(DomainError::validation(format!(
                "position {} is outside the visible list of {} items",
                bad,
                visible.len()
            )));
        }
        let doomed: HashSet<ItemId> = indices.iter().map(|&idx| visible[idx]).collect();

        let mut removed = Vec::with_capacity(doomed.len());
        self.items.retain(|item| {
            if doomed.contains(&item.id()) {
                removed.push(item.clone());
                false
            } else {
                true
            }
        });
        debug!("Deleted {} items", removed.len());
        self.persist_items();
        self.emit(StoreEvent::ItemsChanged);

        if self.selection.remove_all(doomed.iter()) {
            self.selection_changed();
        }

        Ok(removed)
    }

    // ========================
    // Selection
    // ========================

    /// Select or deselect an item. Returns `true` if it is now selected.
    ///
    /// Selecting requires the item to exist; deselecting a stale id is allowed.
    pub fn toggle_selection(&mut self, id: ItemId) -> DomainResult<bool> {
        if !self.selection.contains(&id) && self.item(id).is_none() {
            return Err(DomainError::NotFound(format!("item {}", id)));
        }
        let selected = self.selection.toggle(id);
        self.selection_changed();
        Ok(selected)
    }

    fn selection_changed(&mut self) {
        self.persist_selection();
        self.emit(StoreEvent::SelectionChanged);
        if self.session.observe(&self.selection) == Transition::Completed {
            self.emit(StoreEvent::SessionChanged(SessionState::Browsing));
            self.emit(StoreEvent::ShoppingComplete);
        }
    }

    // ========================
    // Store labels and filter
    // ========================

    /// Replace all five store labels at once
    pub fn set_store_labels<L: Into<String>>(&mut self, labels: [L; STORE_SLOTS]) {
        self.stores = StoreConfig::new(labels.map(Into::into));
        self.persist_store_config();
        self.emit(StoreEvent::StoreLabelsChanged);
    }

    /// Show one store (must be configured) or, with `None`, all stores
    pub fn set_store_filter(&mut self, store: Option<&str>) -> DomainResult<()> {
        if let Some(label) = store {
            if !self.stores.contains(label) {
                return Err(DomainError::validation(format!(
                    "'{}' is not a configured store",
                    label
                )));
            }
        }
        let next = store.map(str::to_string);
        if next != self.store_filter {
            self.store_filter = next;
            self.emit(StoreEvent::FilterChanged(self.store_filter.clone()));
        }
        Ok(())
    }

    /// Filter button behaviour: pressing the active store again shows all
    pub fn toggle_store_filter(&mut self, store: &str) -> DomainResult<()> {
        if self.store_filter.as_deref() == Some(store) {
            self.set_store_filter(None)
        } else {
            self.set_store_filter(Some(store))
        }
    }

    pub fn clear_store_filter(&mut self) {
        if self.store_filter.take().is_some() {
            self.emit(StoreEvent::FilterChanged(None));
        }
    }

    // ========================
    // Shopping session
    // ========================

    pub fn begin_shopping(&mut self) -> DomainResult<()> {
        let was_shopping = self.session.is_shopping();
        self.session.begin(&self.selection)?;
        if !was_shopping {
            self.emit(StoreEvent::SessionChanged(SessionState::Shopping));
        }
        Ok(())
    }

    /// "Go back": leave shopping mode without a completion notice
    pub fn end_shopping(&mut self) -> DomainResult<()> {
        self.session.end()?;
        self.emit(StoreEvent::SessionChanged(SessionState::Browsing));
        Ok(())
    }

    /// Dismiss the "shopping complete" notice
    pub fn acknowledge_completion(&mut self) -> bool {
        self.session.acknowledge()
    }

    // ========================
    // Persistence and events
    // ========================

    fn persist_items(&mut self) {
        let result = self.repo.save_items(&self.items);
        self.record_persist(ITEMS_KEY, result);
    }

    fn persist_selection(&mut self) {
        let result = self.repo.save_selection(&self.selection);
        self.record_persist(SELECTION_KEY, result);
    }

    fn persist_store_config(&mut self) {
        let result = self.repo.save_store_config(&self.stores);
        self.record_persist(STORE_LABELS_KEY, result);
    }

    fn record_persist(&mut self, key: &'static str, result: DomainResult<()>) {
        if let Err(e) = result {
            error!("Failed to save {}: {}", key, e);
            let message = e.to_string();
            self.last_persist_error = Some(message.clone());
            self.emit(StoreEvent::PersistFailed { key, message });
        }
    }

    fn emit(&mut self, event: StoreEvent) {
        // Drop subscribers whose receiver is gone
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
