//! Repository Layer
//!
//! Data access abstractions and implementations.

mod codec;
mod db;
mod list_repo;
mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use codec::{
    decode_items, decode_selection, decode_store_config, encode_items, encode_selection,
    encode_store_config, CodecResult,
};
pub use db::SqliteKvStore;
pub use list_repo::{ListRepository, ITEMS_KEY, SELECTION_KEY, STORE_LABELS_KEY};
pub use memory::MemoryKvStore;
pub use traits::KeyValueStore;
