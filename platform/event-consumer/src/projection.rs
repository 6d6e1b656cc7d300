//! Projection store: the effect target of event handlers
//!
//! Handlers see the store only through the [`ProjectionStore`] trait, so the
//! in-memory map can be swapped for a persistent store without touching
//! dispatch.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("projection entry not found: {0}")]
    NotFound(Uuid),

    #[error("projection store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value projection written by handlers
///
/// Implementations must tolerate concurrent calls from handlers running on
/// different subscriptions.
pub trait ProjectionStore: Send + Sync {
    /// Unconditional overwrite; no existence check, no concurrency token
    fn put(&self, key: Uuid, value: String) -> Result<(), StoreError>;

    fn get(&self, key: &Uuid) -> Result<String, StoreError>;
}

/// Process-lifetime store guarded by a single mutex
///
/// No eviction and no capacity bound.
#[derive(Debug)]
pub struct InMemoryProjectionStore {
    entries: Mutex<HashMap<Uuid, String>>,
}

impl InMemoryProjectionStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::with_capacity(1000)),
        }
    }

    /// Number of entries
    ///
    /// The inspection helpers read through a poisoned lock, so they still
    /// reflect what was written before the panic; `put` and `get` report the
    /// same condition as [`StoreError::Unavailable`].
    pub fn len(&self) -> usize {
        self.read_through_poison().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every entry, for inspection in tests and diagnostics
    ///
    /// Reads through a poisoned lock, like [`InMemoryProjectionStore::len`].
    pub fn snapshot(&self) -> HashMap<Uuid, String> {
        self.read_through_poison().clone()
    }

    fn read_through_poison(&self) -> MutexGuard<'_, HashMap<Uuid, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl Default for InMemoryProjectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectionStore for InMemoryProjectionStore {
    fn put(&self, key: Uuid, value: String) -> Result<(), StoreError> {
        self.lock()?.insert(key, value);
        Ok(())
    }

    fn get(&self, key: &Uuid) -> Result<String, StoreError> {
        self.lock()?
            .get(key)
            .cloned()
            .ok_or(StoreError::NotFound(*key))
    }
}
