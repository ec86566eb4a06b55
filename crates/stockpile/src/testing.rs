// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock storage implementation for testing.
//!
//! This module provides `MockStorage`, a deterministic in-memory storage that records
//! every operation and supports failure injection for testing error paths.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{CasToken, Error, Result, Storage};

/// Recorded storage operation with full context.
///
/// Bulk operations that rely on the default [`Storage`] implementations are recorded
/// as the sequence of single-item operations they expand to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp<V> {
    /// An existence check for the given key.
    Has(String),
    /// A read of the given key.
    Get(String),
    /// A read of the given key that also asked for a token.
    GetWithToken(String),
    /// An unconditional write.
    Set {
        /// The key that was written.
        key: String,
        /// The value that was written.
        value: V,
    },
    /// A write-if-absent.
    Add {
        /// The key that was written.
        key: String,
        /// The value that was written.
        value: V,
    },
    /// A write-if-present.
    Replace {
        /// The key that was written.
        key: String,
        /// The value that was written.
        value: V,
    },
    /// A write gated by a token.
    CheckAndSet {
        /// The token the write was gated by.
        token: CasToken,
        /// The key that was written.
        key: String,
        /// The value that was written.
        value: V,
    },
    /// An expiry refresh of the given key.
    Touch(String),
    /// A removal of the given key.
    Remove(String),
}

type FailPredicate<V> = Box<dyn Fn(&StorageOp<V>) -> bool + Send + Sync>;

#[derive(Debug)]
struct State<V> {
    items: HashMap<String, (V, u64)>,
    next_version: u64,
}

impl<V> State<V> {
    fn write(&mut self, key: &str, value: V) {
        self.next_version += 1;
        self.items.insert(key.to_owned(), (value, self.next_version));
    }
}

/// A deterministic mock storage for testing.
///
/// Items live in a plain `HashMap`; every successful write bumps a version counter that
/// backs the [`CasToken`]s handed out by reads. All operations are recorded for later
/// verification, and any of them can be made to fail on demand.
///
/// Clones share the same state, so a test can hand one clone to the code under test and
/// keep another for assertions.
///
/// # Examples
///
/// ```
/// use stockpile::{Storage, testing::{MockStorage, StorageOp}};
///
/// let storage = MockStorage::<i32>::new();
///
/// storage.set_item("key", &42).unwrap();
/// assert_eq!(storage.get_item("key").unwrap(), Some(42));
///
/// assert_eq!(storage.operations(), vec![
///     StorageOp::Set { key: "key".to_string(), value: 42 },
///     StorageOp::Get("key".to_string()),
/// ]);
/// ```
///
/// # Failure Injection
///
/// ```
/// use stockpile::{Storage, testing::{MockStorage, StorageOp}};
///
/// let storage = MockStorage::<i32>::new();
///
/// // Fail removals of one key
/// storage.fail_when(|op| matches!(op, StorageOp::Remove(k) if k == "pinned"));
/// assert!(storage.remove_item("pinned").is_err());
/// assert!(storage.remove_item("other").is_ok());
/// ```
pub struct MockStorage<V> {
    state: Arc<Mutex<State<V>>>,
    operations: Arc<Mutex<Vec<StorageOp<V>>>>,
    fail_when: Arc<Mutex<Option<FailPredicate<V>>>>,
}

impl<V> std::fmt::Debug for MockStorage<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStorage")
            .field("state", &self.state)
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl<V> Clone for MockStorage<V> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            operations: Arc::clone(&self.operations),
            fail_when: Arc::clone(&self.fail_when),
        }
    }
}

impl<V> Default for MockStorage<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MockStorage<V> {
    /// Creates a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                items: HashMap::new(),
                next_version: 0,
            })),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Creates a mock storage pre-populated with `items`.
    ///
    /// Pre-populated items are not recorded as operations.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = (String, V)>) -> Self {
        let storage = Self::new();
        {
            let mut state = storage.state.lock();
            for (key, value) in items {
                state.write(&key, value);
            }
        }
        storage
    }

    /// Returns the number of stored items.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Returns true if the storage contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.state.lock().items.contains_key(key)
    }

    /// Sets a predicate that determines when operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should fail. A failing
    /// operation is still recorded but leaves the stored items untouched.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&StorageOp<V>) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    fn should_fail(&self, op: &StorageOp<V>) -> bool {
        self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(op))
    }
}

impl<V> MockStorage<V>
where
    V: Clone,
{
    /// Returns the value stored under `key` without recording an operation.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<V> {
        self.state.lock().items.get(key).map(|(value, _)| value.clone())
    }

    /// Returns a copy of all stored items without recording an operation.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, V> {
        self.state
            .lock()
            .items
            .iter()
            .map(|(key, (value, _))| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<StorageOp<V>> {
        self.operations.lock().clone()
    }

    /// Records `op` and returns an error if the failure predicate matches it.
    fn check(&self, op: StorageOp<V>, name: &'static str) -> Result<()> {
        let fail = self.should_fail(&op);
        self.operations.lock().push(op);
        if fail {
            return Err(Error::caused_by(format!("mock: {name} failed")));
        }
        Ok(())
    }
}

impl<V> Storage<V> for MockStorage<V>
where
    V: Clone + Send + Sync,
{
    fn has_item(&self, key: &str) -> Result<bool> {
        self.check(StorageOp::Has(key.to_owned()), "has")?;
        Ok(self.contains_key(key))
    }

    fn get_item(&self, key: &str) -> Result<Option<V>> {
        self.check(StorageOp::Get(key.to_owned()), "get")?;
        Ok(self.value(key))
    }

    fn get_item_with_token(&self, key: &str) -> Result<Option<(V, CasToken)>> {
        self.check(StorageOp::GetWithToken(key.to_owned()), "get")?;
        Ok(self
            .state
            .lock()
            .items
            .get(key)
            .map(|(value, version)| (value.clone(), CasToken::new(*version))))
    }

    fn set_item(&self, key: &str, value: &V) -> Result<bool> {
        self.check(
            StorageOp::Set {
                key: key.to_owned(),
                value: value.clone(),
            },
            "set",
        )?;
        self.state.lock().write(key, value.clone());
        Ok(true)
    }

    fn add_item(&self, key: &str, value: &V) -> Result<bool> {
        self.check(
            StorageOp::Add {
                key: key.to_owned(),
                value: value.clone(),
            },
            "add",
        )?;
        let mut state = self.state.lock();
        if state.items.contains_key(key) {
            return Ok(false);
        }
        state.write(key, value.clone());
        Ok(true)
    }

    fn replace_item(&self, key: &str, value: &V) -> Result<bool> {
        self.check(
            StorageOp::Replace {
                key: key.to_owned(),
                value: value.clone(),
            },
            "replace",
        )?;
        let mut state = self.state.lock();
        if !state.items.contains_key(key) {
            return Ok(false);
        }
        state.write(key, value.clone());
        Ok(true)
    }

    fn check_and_set_item(&self, token: &CasToken, key: &str, value: &V) -> Result<bool> {
        self.check(
            StorageOp::CheckAndSet {
                token: *token,
                key: key.to_owned(),
                value: value.clone(),
            },
            "check-and-set",
        )?;
        let mut state = self.state.lock();
        match state.items.get(key) {
            Some((_, version)) if *version == token.version() => {
                state.write(key, value.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn touch_item(&self, key: &str) -> Result<bool> {
        self.check(StorageOp::Touch(key.to_owned()), "touch")?;
        Ok(self.contains_key(key))
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        self.check(StorageOp::Remove(key.to_owned()), "remove")?;
        Ok(self.state.lock().items.remove(key).is_some())
    }

    fn len(&self) -> Option<u64> {
        Some(self.entry_count() as u64)
    }
}
