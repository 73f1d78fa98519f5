use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fmt,
};

use serde::{de::DeserializeOwned, Serialize};

use fintrack_domain::{Category, Transaction};

use crate::{CoreError, CoreResult};

/// The two collections mirrored to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Transactions,
    Categories,
}

impl StoreKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Transactions => "transactions",
            StoreKey::Categories => "categories",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous key-value persistence holding serialized collections.
pub trait KeyValueStore {
    /// Returns the stored value, or `None` when nothing was ever saved.
    fn get(&self, key: StoreKey) -> CoreResult<Option<String>>;
    fn set(&self, key: StoreKey, value: &str) -> CoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: StoreKey) -> CoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: StoreKey, value: &str) -> CoreResult<()> {
        (**self).set(key, value)
    }
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> CoreResult<Option<String>> {
        Ok(self.entries.borrow().get(&key).cloned())
    }

    fn set(&self, key: StoreKey, value: &str) -> CoreResult<()> {
        self.entries.borrow_mut().insert(key, value.to_string());
        Ok(())
    }
}

/// Reads and decodes a collection. `Ok(None)` means the key was never written.
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StoreKey,
) -> CoreResult<Option<Vec<T>>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| CoreError::Serde(format!("{key}: {err}"))),
        None => Ok(None),
    }
}

pub fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: StoreKey,
    items: &[T],
) -> CoreResult<()> {
    let raw = serde_json::to_string(items)?;
    store.set(key, &raw)
}

/// Lists transaction labels that no longer match any category name.
pub fn dangling_labels(transactions: &[Transaction], categories: &[Category]) -> Vec<String> {
    let names: HashSet<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    let mut dangling: Vec<String> = transactions
        .iter()
        .map(|txn| txn.category.as_str())
        .filter(|label| !names.contains(label))
        .collect::<HashSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();
    dangling.sort();
    dangling
}
