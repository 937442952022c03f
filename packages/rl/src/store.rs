//! Key-value store seam
//!
//! The agent persists its value table as a JSON blob under one key. Hosts
//! provide the backing store (browser `localStorage`, a file, ...);
//! [`MemoryStore`] covers tests and hosts without persistence.

use std::collections::HashMap;

use crate::error::StoreResult;

/// Synchronous get/set of string-keyed blobs
pub trait KeyValueStore {
    /// `Ok(None)` when nothing is stored under `key`
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()> {
        (**self).save(key, blob)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()> {
        (**self).save(key, blob)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, blob: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), blob.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), blob.to_string());
        self.writes += 1;
        Ok(())
    }
}
