//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for durable storage.
//! Implementations can use SQLite, in-memory, etc.

use crate::domain::DomainResult;

/// Opaque key-value blob store
///
/// Values are raw bytes; the codec decides what they mean.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if never written
    fn get(&self, key: &str) -> DomainResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &[u8]) -> DomainResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> DomainResult<()> {
        (**self).set(key, value)
    }
}
