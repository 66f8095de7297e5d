use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::StoreError;

/// Minimal key-value storage the engine persists its leaderboard into.
///
/// The engine is the only writer. Reads hand back owned copies, never views into the backing storage.
pub trait PersistentStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: PersistentStore + ?Sized> PersistentStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store, for native hosts and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    write_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl PersistentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_counts_writes() {
        let mut store = MemoryStore::new();

        assert_eq!(store.get("missing"), Ok(None));
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();

        assert_eq!(store.get("k"), Ok(Some("v2".to_string())));
        assert_eq!(store.write_count(), 2);
    }

    fn write_through<S: PersistentStore>(mut store: S) {
        store.set("k", "v").unwrap();
    }

    #[test]
    fn mutable_reference_forwards_to_store() {
        let mut store = MemoryStore::new();
        write_through(&mut store);

        assert_eq!(store.write_count(), 1);
    }
}
