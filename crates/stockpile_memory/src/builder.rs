// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring in-memory storages.
//!
//! This module provides a builder API for `MemoryStorage` that abstracts the underlying
//! moka configuration, providing a stable API surface without exposing moka's types.

use std::marker::PhantomData;
use std::time::Duration;

use crate::storage::MemoryStorage;

/// Builder for configuring a `MemoryStorage`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use stockpile_memory::MemoryStorage;
///
/// let storage = MemoryStorage::<i32>::builder()
///     .max_capacity(1000)
///     .time_to_live(Duration::from_secs(300))
///     .time_to_idle(Duration::from_secs(60))
///     .initial_capacity(100)
///     .name("bench-storage")
///     .build();
/// ```
#[derive(Debug)]
pub struct MemoryStorageBuilder<V> {
    pub(crate) max_capacity: Option<u64>,
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) time_to_live: Option<Duration>,
    pub(crate) time_to_idle: Option<Duration>,
    pub(crate) name: Option<String>,
    _phantom: PhantomData<V>,
}

impl<V> Default for MemoryStorageBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryStorageBuilder<V> {
    /// Creates a new builder with default settings.
    ///
    /// The default configuration creates an unbounded storage with no time-based
    /// expiration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_capacity: None,
            initial_capacity: None,
            time_to_live: None,
            time_to_idle: None,
            name: None,
            _phantom: PhantomData,
        }
    }

    /// Sets the maximum number of items.
    ///
    /// Once the capacity is reached, items are evicted using moka's `TinyLFU` policy.
    /// If not set, the storage is unbounded.
    #[must_use]
    pub fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Sets the initial capacity (pre-allocation hint).
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets the time-to-live for all items.
    ///
    /// Items expire this long after their last write. Touching an item counts as a write
    /// and restarts the clock.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use stockpile_memory::MemoryStorage;
    ///
    /// let storage = MemoryStorage::<i32>::builder()
    ///     .time_to_live(Duration::from_secs(300))
    ///     .build();
    /// ```
    #[must_use]
    pub fn time_to_live(mut self, duration: Duration) -> Self {
        self.time_to_live = Some(duration);
        self
    }

    /// Sets the time-to-idle for all items.
    ///
    /// Items expire after this duration without reads or writes.
    #[must_use]
    pub fn time_to_idle(mut self, duration: Duration) -> Self {
        self.time_to_idle = Some(duration);
        self
    }

    /// Sets a name for the storage.
    ///
    /// This name may appear in debugging output from the underlying cache.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the configured `MemoryStorage`.
    #[must_use]
    pub fn build(self) -> MemoryStorage<V>
    where
        V: Clone + Send + Sync + 'static,
    {
        MemoryStorage::from_builder(&self)
    }
}
