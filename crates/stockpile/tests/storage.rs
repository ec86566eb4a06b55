// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `Storage` trait default implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use pretty_assertions::assert_eq;
use stockpile::{CasToken, Error, Result, Storage};

/// Minimal implementation that only provides required methods
struct MinimalStorage {
    data: Mutex<HashMap<String, (String, u64)>>,
    offline: bool,
}

impl MinimalStorage {
    fn new() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            offline: false,
        }
    }

    fn offline() -> Self {
        Self {
            data: Mutex::new(HashMap::new()),
            offline: true,
        }
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline {
            return Err(Error::from_message("storage offline"));
        }
        Ok(())
    }

    fn write(&self, key: &str, value: &str) {
        let mut data = self.data.lock().expect("lock poisoned");
        let version = data.get(key).map_or(0, |(_, version)| version + 1);
        data.insert(key.to_owned(), (value.to_owned(), version));
    }
}

impl Storage<String> for MinimalStorage {
    fn has_item(&self, key: &str) -> Result<bool> {
        self.ensure_online()?;
        Ok(self.data.lock().expect("lock poisoned").contains_key(key))
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.ensure_online()?;
        Ok(self.data.lock().expect("lock poisoned").get(key).map(|(value, _)| value.clone()))
    }

    fn get_item_with_token(&self, key: &str) -> Result<Option<(String, CasToken)>> {
        self.ensure_online()?;
        Ok(self
            .data
            .lock()
            .expect("lock poisoned")
            .get(key)
            .map(|(value, version)| (value.clone(), CasToken::new(*version))))
    }

    fn set_item(&self, key: &str, value: &String) -> Result<bool> {
        self.ensure_online()?;
        self.write(key, value);
        Ok(true)
    }

    fn add_item(&self, key: &str, value: &String) -> Result<bool> {
        if self.has_item(key)? {
            return Ok(false);
        }
        self.set_item(key, value)
    }

    fn replace_item(&self, key: &str, value: &String) -> Result<bool> {
        if !self.has_item(key)? {
            return Ok(false);
        }
        self.set_item(key, value)
    }

    fn check_and_set_item(&self, token: &CasToken, key: &str, value: &String) -> Result<bool> {
        match self.get_item_with_token(key)? {
            Some((_, current)) if current == *token => self.set_item(key, value),
            _ => Ok(false),
        }
    }

    fn touch_item(&self, key: &str) -> Result<bool> {
        self.has_item(key)
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        self.ensure_online()?;
        Ok(self.data.lock().expect("lock poisoned").remove(key).is_some())
    }
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn items(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

#[test]
fn minimal_storage_len_is_unknown() {
    let storage = MinimalStorage::new();
    assert_eq!(storage.len(), None);
    assert_eq!(storage.is_empty(), None);
}

#[test]
fn default_has_items_returns_existing_keys() {
    let storage = MinimalStorage::new();
    storage.set_item("a", &"1".to_string()).expect("set failed");

    let found = storage.has_items(&keys(&["a", "b"])).expect("has_items failed");
    assert_eq!(found, keys(&["a"]));
}

#[test]
fn default_get_items_skips_missing_keys() {
    let storage = MinimalStorage::new();
    storage.set_items(&items(&[("a", "1"), ("b", "2")])).expect("set_items failed");

    let found = storage.get_items(&keys(&["a", "b", "c"])).expect("get_items failed");
    assert_eq!(
        found,
        HashMap::from([("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())])
    );
}

#[test]
fn default_set_items_stores_everything() {
    let storage = MinimalStorage::new();
    let rejected = storage.set_items(&items(&[("a", "1"), ("b", "2")])).expect("set_items failed");

    assert!(rejected.is_empty());
    assert_eq!(storage.get_item("b").expect("get failed"), Some("2".to_string()));
}

#[test]
fn default_add_items_reports_present_keys() {
    let storage = MinimalStorage::new();
    storage.set_item("a", &"old".to_string()).expect("set failed");

    let rejected = storage.add_items(&items(&[("a", "new"), ("b", "new")])).expect("add_items failed");

    assert_eq!(rejected, keys(&["a"]));
    assert_eq!(storage.get_item("a").expect("get failed"), Some("old".to_string()));
    assert_eq!(storage.get_item("b").expect("get failed"), Some("new".to_string()));
}

#[test]
fn default_replace_items_reports_absent_keys() {
    let storage = MinimalStorage::new();
    storage.set_item("a", &"old".to_string()).expect("set failed");

    let rejected = storage
        .replace_items(&items(&[("a", "new"), ("b", "new")]))
        .expect("replace_items failed");

    assert_eq!(rejected, keys(&["b"]));
    assert_eq!(storage.get_item("a").expect("get failed"), Some("new".to_string()));
    assert!(!storage.has_item("b").expect("has failed"));
}

#[test]
fn default_touch_items_reports_absent_keys() {
    let storage = MinimalStorage::new();
    storage.set_item("a", &"1".to_string()).expect("set failed");

    let rejected = storage.touch_items(&keys(&["a", "b"])).expect("touch_items failed");
    assert_eq!(rejected, keys(&["b"]));
}

#[test]
fn default_remove_items_is_idempotent() {
    let storage = MinimalStorage::new();
    storage.set_items(&items(&[("a", "1"), ("b", "2")])).expect("set_items failed");

    let rejected = storage.remove_items(&keys(&["a", "b"])).expect("remove_items failed");
    assert!(rejected.is_empty());

    let rejected = storage.remove_items(&keys(&["a", "b"])).expect("second remove_items failed");
    assert_eq!(rejected, keys(&["a", "b"]));
}

#[test]
fn default_bulk_operations_propagate_errors() {
    let storage = MinimalStorage::offline();

    assert!(storage.has_items(&keys(&["a"])).is_err());
    assert!(storage.get_items(&keys(&["a"])).is_err());
    assert!(storage.set_items(&items(&[("a", "1")])).is_err());
    assert!(storage.remove_items(&keys(&["a"])).is_err());
}

#[test]
fn default_bulk_operations_on_empty_input_do_nothing() {
    let storage = MinimalStorage::offline();

    assert!(storage.has_items(&[]).expect("empty has_items failed").is_empty());
    assert!(storage.remove_items(&[]).expect("empty remove_items failed").is_empty());
}
