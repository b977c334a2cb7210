//! Grocery List Repository
//!
//! Saves and loads the three aggregates (items, selection, store labels)
//! through a `KeyValueStore`. Loads never fail: a missing key yields the
//! default value and a corrupt one yields the default plus a warning.

use log::warn;

use super::codec::{self, CodecResult};
use super::traits::KeyValueStore;
use crate::domain::{DomainError, DomainResult, GroceryItem, SelectionSet, StoreConfig};

/// Key for the serialized item list
pub const ITEMS_KEY: &str = "savedListItems";
/// Key for the serialized selection set
pub const SELECTION_KEY: &str = "selectedGrocIDs";
/// Key for the five store labels
pub const STORE_LABELS_KEY: &str = "savedStoreArray";

pub struct ListRepository<S> {
    kv: S,
}

impl<S: KeyValueStore> ListRepository<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn backend(&self) -> &S {
        &self.kv
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.kv
    }

    pub fn into_backend(self) -> S {
        self.kv
    }

    fn save(&mut self, key: &str, encoded: CodecResult<Vec<u8>>) -> DomainResult<()> {
        let bytes = encoded.map_err(|e| DomainError::serialization(key, e))?;
        self.kv.set(key, &bytes)
    }

    /// Strict load: `Ok(None)` when the key was never written
    fn try_load<T>(
        &self,
        key: &str,
        decode: fn(&[u8]) -> CodecResult<T>,
    ) -> DomainResult<Option<T>> {
        match self.kv.get(key)? {
            Some(bytes) => decode(&bytes)
                .map(Some)
                .map_err(|e| DomainError::serialization(key, e)),
            None => Ok(None),
        }
    }

    fn load_or_default<T: Default>(&self, key: &str, decode: fn(&[u8]) -> CodecResult<T>) -> T {
        match self.try_load(key, decode) {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load {}, falling back to default: {}", key, e);
                T::default()
            }
        }
    }

    pub fn save_items(&mut self, items: &[GroceryItem]) -> DomainResult<()> {
        self.save(ITEMS_KEY, codec::encode_items(items))
    }

    pub fn save_selection(&mut self, selection: &SelectionSet) -> DomainResult<()> {
        self.save(SELECTION_KEY, codec::encode_selection(selection))
    }

    pub fn save_store_config(&mut self, config: &StoreConfig) -> DomainResult<()> {
        self.save(STORE_LABELS_KEY, codec::encode_store_config(config))
    }

    pub fn try_load_items(&self) -> DomainResult<Option<Vec<GroceryItem>>> {
        self.try_load(ITEMS_KEY, codec::decode_items)
    }

    pub fn try_load_selection(&self) -> DomainResult<Option<SelectionSet>> {
        self.try_load(SELECTION_KEY, codec::decode_selection)
    }

    pub fn try_load_store_config(&self) -> DomainResult<Option<StoreConfig>> {
        self.try_load(STORE_LABELS_KEY, codec::decode_store_config)
    }

    pub fn load_items(&self) -> Vec<GroceryItem> {
        self.load_or_default(ITEMS_KEY, codec::decode_items)
    }

    pub fn load_selection(&self) -> SelectionSet {
        self.load_or_default(SELECTION_KEY, codec::decode_selection)
    }

    pub fn load_store_config(&self) -> StoreConfig {
        self.load_or_default(STORE_LABELS_KEY, codec::decode_store_config)
    }
}
