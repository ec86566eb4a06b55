// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for key-value cache storage adapters.
//!
//! [`Storage`] defines the operations every adapter offers. It is designed for
//! composition: a decorator such as a serializer is just another `Storage` wrapping an
//! inner one, so consumers never need to know how deep the chain is.

use std::collections::HashMap;

use crate::{CasToken, Result};

/// Trait for key-value cache storage adapters.
///
/// The single-item operations are required. The bulk operations have default
/// implementations that loop over their single-item counterparts:
/// - `has_items` returns the keys that exist
/// - `get_items` returns the items that were found
/// - the bulk writes, `touch_items` and `remove_items` return the keys that were *not*
///   processed (absent for touch/remove/replace, present for add)
///
/// An absent key is never an error. `remove_item` on an absent key returns `Ok(false)`,
/// which keeps bulk removal idempotent.
pub trait Storage<V>: Send + Sync {
    /// Returns `true` if the key exists.
    fn has_item(&self, key: &str) -> Result<bool>;

    /// Reads the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<V>>;

    /// Reads the value stored under `key` together with a token for a later
    /// [`check_and_set_item`](Self::check_and_set_item).
    fn get_item_with_token(&self, key: &str) -> Result<Option<(V, CasToken)>>;

    /// Stores `value` under `key` unconditionally.
    fn set_item(&self, key: &str, value: &V) -> Result<bool>;

    /// Stores `value` under `key` only if the key is absent.
    fn add_item(&self, key: &str, value: &V) -> Result<bool>;

    /// Stores `value` under `key` only if the key is present.
    fn replace_item(&self, key: &str, value: &V) -> Result<bool>;

    /// Stores `value` under `key` only if the item is unchanged since `token` was issued.
    ///
    /// Returns `Ok(false)` for a stale token or an absent key.
    fn check_and_set_item(&self, token: &CasToken, key: &str, value: &V) -> Result<bool>;

    /// Refreshes the expiry metadata of `key` without changing its value.
    fn touch_item(&self, key: &str) -> Result<bool>;

    /// Removes `key`. Returns `Ok(false)` if it was absent.
    fn remove_item(&self, key: &str) -> Result<bool>;

    /// Returns the subset of `keys` that exist.
    fn has_items(&self, keys: &[String]) -> Result<Vec<String>> {
        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            if self.has_item(key)? {
                found.push(key.clone());
            }
        }
        Ok(found)
    }

    /// Reads all of `keys`, returning only the items that were found.
    fn get_items(&self, keys: &[String]) -> Result<HashMap<String, V>> {
        let mut items = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.get_item(key)? {
                items.insert(key.clone(), value);
            }
        }
        Ok(items)
    }

    /// Stores all `items` unconditionally, returning the keys that were not stored.
    fn set_items(&self, items: &[(String, V)]) -> Result<Vec<String>> {
        let mut rejected = Vec::new();
        for (key, value) in items {
            if !self.set_item(key, value)? {
                rejected.push(key.clone());
            }
        }
        Ok(rejected)
    }

    /// Stores the absent ones among `items`, returning the keys that were already present.
    fn add_items(&self, items: &[(String, V)]) -> Result<Vec<String>> {
        let mut rejected = Vec::new();
        for (key, value) in items {
            if !self.add_item(key, value)? {
                rejected.push(key.clone());
            }
        }
        Ok(rejected)
    }

    /// Overwrites the present ones among `items`, returning the keys that were absent.
    fn replace_items(&self, items: &[(String, V)]) -> Result<Vec<String>> {
        let mut rejected = Vec::new();
        for (key, value) in items {
            if !self.replace_item(key, value)? {
                rejected.push(key.clone());
            }
        }
        Ok(rejected)
    }

    /// Touches all of `keys`, returning the keys that were absent.
    fn touch_items(&self, keys: &[String]) -> Result<Vec<String>> {
        let mut rejected = Vec::new();
        for key in keys {
            if !self.touch_item(key)? {
                rejected.push(key.clone());
            }
        }
        Ok(rejected)
    }

    /// Removes all of `keys`, returning the keys that were absent.
    fn remove_items(&self, keys: &[String]) -> Result<Vec<String>> {
        let mut rejected = Vec::new();
        for key in keys {
            if !self.remove_item(key)? {
                rejected.push(key.clone());
            }
        }
        Ok(rejected)
    }

    /// Returns the number of entries, if supported.
    ///
    /// Returns `None` for implementations that don't track size.
    fn len(&self) -> Option<u64> {
        None
    }

    /// Returns `true` if the storage contains no entries.
    ///
    /// Returns `None` for implementations that don't track size.
    fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }
}
