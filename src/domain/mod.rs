//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no storage dependencies (serde only, for the codec).

mod entity;
mod item;
mod selection;
mod store_config;

pub use entity::{DomainError, DomainResult, Entity};
pub use item::{FoodType, GroceryItem, ItemId};
pub use selection::SelectionSet;
pub use store_config::{FilterButton, StoreConfig, STORE_SLOTS};
