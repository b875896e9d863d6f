//! Key-value persistence
//!
//! The leaderboard and settings only need a synchronous string store.
//! The browser build uses LocalStorage (`platform::storage`); tests and the
//! native build use [`MemoryStore`].

mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;

/// Synchronous string key-value store
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a value
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }
}
