// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory storage implementation using moka.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::ops::compute::{CompResult, Op};
use moka::sync::Cache;
use stockpile::{CasToken, Result, Storage};

use crate::builder::MemoryStorageBuilder;

/// A stored value together with the version it was written at.
#[derive(Clone, Debug)]
struct StoredItem<V> {
    value: V,
    version: u64,
}

/// An in-memory storage adapter backed by moka.
///
/// Every successful write stamps the item with a fresh version taken from a counter
/// shared by all clones; [`CasToken`]s carry that version. Conditional writes run inside
/// moka's per-key compute, so a check-and-set can never interleave with another write to
/// the same key.
///
/// Clones share the same underlying cache.
///
/// # Examples
///
/// ```
/// use stockpile::Storage;
/// use stockpile_memory::MemoryStorage;
///
/// let storage = MemoryStorage::<String>::new();
///
/// assert!(storage.add_item("key", &"first".to_string())?);
/// assert!(!storage.add_item("key", &"second".to_string())?);
/// assert_eq!(storage.get_item("key")?.as_deref(), Some("first"));
/// # Ok::<(), stockpile::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStorage<V>
where
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<String, StoredItem<V>>,
    versions: Arc<AtomicU64>,
}

impl<V> Default for MemoryStorage<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryStorage<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new unbounded in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new in-memory storage with a maximum capacity.
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self::builder().max_capacity(max_capacity).build()
    }

    /// Creates a new builder for configuring an in-memory storage.
    #[must_use]
    pub fn builder() -> MemoryStorageBuilder<V> {
        MemoryStorageBuilder::new()
    }

    pub(crate) fn from_builder(builder: &MemoryStorageBuilder<V>) -> Self {
        let mut moka_builder = Cache::builder();

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder.max_capacity(capacity);
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(ttl) = builder.time_to_live {
            moka_builder = moka_builder.time_to_live(ttl);
        }

        if let Some(tti) = builder.time_to_idle {
            moka_builder = moka_builder.time_to_idle(tti);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: moka_builder.build(),
            versions: Arc::new(AtomicU64::new(0)),
        }
    }

    fn stamp(&self, value: &V) -> StoredItem<V> {
        StoredItem {
            value: value.clone(),
            version: self.versions.fetch_add(1, Ordering::Relaxed) + 1,
        }
    }
}

fn written<V>(result: &CompResult<String, V>) -> bool {
    matches!(result, CompResult::Inserted(_) | CompResult::ReplacedWith(_))
}

impl<V> Storage<V> for MemoryStorage<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn has_item(&self, key: &str) -> Result<bool> {
        Ok(self.inner.contains_key(key))
    }

    fn get_item(&self, key: &str) -> Result<Option<V>> {
        Ok(self.inner.get(key).map(|item| item.value))
    }

    fn get_item_with_token(&self, key: &str) -> Result<Option<(V, CasToken)>> {
        Ok(self
            .inner
            .get(key)
            .map(|item| (item.value, CasToken::new(item.version))))
    }

    fn set_item(&self, key: &str, value: &V) -> Result<bool> {
        self.inner.insert(key.to_owned(), self.stamp(value));
        Ok(true)
    }

    fn add_item(&self, key: &str, value: &V) -> Result<bool> {
        let result = self.inner.entry_by_ref(key).and_compute_with(|existing| match existing {
            Some(_) => Op::Nop,
            None => Op::Put(self.stamp(value)),
        });
        Ok(written(&result))
    }

    fn replace_item(&self, key: &str, value: &V) -> Result<bool> {
        let result = self.inner.entry_by_ref(key).and_compute_with(|existing| match existing {
            Some(_) => Op::Put(self.stamp(value)),
            None => Op::Nop,
        });
        Ok(written(&result))
    }

    fn check_and_set_item(&self, token: &CasToken, key: &str, value: &V) -> Result<bool> {
        let result = self.inner.entry_by_ref(key).and_compute_with(|existing| match existing {
            Some(entry) if entry.value().version == token.version() => Op::Put(self.stamp(value)),
            _ => Op::Nop,
        });
        Ok(written(&result))
    }

    fn touch_item(&self, key: &str) -> Result<bool> {
        // Re-inserting the same item restarts its time-to-live and keeps its version.
        let result = self.inner.entry_by_ref(key).and_compute_with(|existing| match existing {
            Some(entry) => Op::Put(entry.into_value()),
            None => Op::Nop,
        });
        Ok(written(&result))
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        Ok(self.inner.remove(key).is_some())
    }

    fn len(&self) -> Option<u64> {
        self.inner.run_pending_tasks();
        Some(self.inner.entry_count())
    }
}
