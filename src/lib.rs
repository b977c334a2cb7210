//! Grocery List Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Key-value persistence and the JSON codec
//! - view: Pure derivation of the visible list
//! - session: Shopping mode state machine
//! - store: Owned state container tying the layers together

pub mod config;
pub mod domain;
pub mod repository;
pub mod session;
pub mod store;
pub mod view;

use std::fs;

use log::info;

pub use config::AppConfig;
pub use domain::{
    DomainError, DomainResult, Entity, FilterButton, FoodType, GroceryItem, ItemId,
    SelectionSet, StoreConfig, STORE_SLOTS,
};
pub use repository::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use session::SessionState;
pub use store::{GroceryStore, StoreEvent, StoreOptions};
pub use view::{compute_visible, ViewState};

/// Open the on-disk grocery list described by `config`.
///
/// Creates the data directory, starts the rolling logger (an already running
/// logger is left in place) and loads persisted state.
pub fn open_app(config: &AppConfig) -> DomainResult<GroceryStore<SqliteKvStore>> {
    fs::create_dir_all(config.data_dir()).map_err(|e| {
        DomainError::Storage(format!(
            "Failed to create {}: {}",
            config.data_dir().display(),
            e
        ))
    })?;

    if !rolling_logger::is_initialized() {
        if let Err(e) = rolling_logger::init_logger(config.log_dir(), &config.app_name) {
            // Continue without a file sink
            eprintln!("[{}] Logger init failed: {}", chrono::Local::now().format("%H:%M:%S%.3f"), e);
        }
    }

    let db_path = config.db_path();
    let kv = SqliteKvStore::open(&db_path)?;
    info!("Opened grocery list at {}", db_path.display());

    let store = GroceryStore::load(kv, config.store_options());
    if store.store_config().is_unconfigured() {
        info!("No stores configured yet");
    }
    Ok(store)
}
