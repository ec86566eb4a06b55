// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Integration tests for `MemoryStorage`.

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use stockpile::{CasToken, Storage};
use stockpile_memory::{MemoryStorage, MemoryStorageBuilder};

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn new_creates_empty_storage() {
    let storage = MemoryStorage::<i32>::new();
    assert_eq!(storage.len(), Some(0));
    assert_eq!(storage.is_empty(), Some(true));
}

#[test]
fn with_capacity_creates_empty_storage() {
    let storage = MemoryStorage::<i32>::with_capacity(100);
    assert_eq!(storage.len(), Some(0));
}

#[test]
fn builder_with_all_options_builds() {
    let storage = MemoryStorageBuilder::<i32>::new()
        .max_capacity(100)
        .initial_capacity(10)
        .time_to_live(Duration::from_secs(60))
        .time_to_idle(Duration::from_secs(30))
        .name("test-storage")
        .build();

    storage.set_item("key", &1).expect("set failed");
    assert_eq!(storage.get_item("key").expect("get failed"), Some(1));
}

#[test]
fn get_returns_none_for_missing_key() {
    let storage = MemoryStorage::<i32>::new();
    assert_eq!(storage.get_item("missing").expect("get failed"), None);
    assert!(!storage.has_item("missing").expect("has failed"));
}

#[test]
fn set_overwrites_existing_value() {
    let storage = MemoryStorage::<i32>::new();
    assert!(storage.set_item("key", &1).expect("set failed"));
    assert!(storage.set_item("key", &2).expect("set failed"));

    assert_eq!(storage.get_item("key").expect("get failed"), Some(2));
    assert_eq!(storage.len(), Some(1));
}

#[test]
fn add_only_writes_absent_keys() {
    let storage = MemoryStorage::<i32>::new();
    assert!(storage.add_item("key", &1).expect("add failed"));
    assert!(!storage.add_item("key", &2).expect("add failed"));

    assert_eq!(storage.get_item("key").expect("get failed"), Some(1));
}

#[test]
fn replace_only_writes_present_keys() {
    let storage = MemoryStorage::<i32>::new();
    assert!(!storage.replace_item("key", &1).expect("replace failed"));
    assert!(!storage.has_item("key").expect("has failed"));

    storage.set_item("key", &1).expect("set failed");
    assert!(storage.replace_item("key", &2).expect("replace failed"));
    assert_eq!(storage.get_item("key").expect("get failed"), Some(2));
}

#[test]
fn check_and_set_succeeds_with_fresh_token() {
    let storage = MemoryStorage::<i32>::new();
    storage.set_item("key", &1).expect("set failed");

    let (_, token) = storage
        .get_item_with_token("key")
        .expect("get failed")
        .expect("item should exist");
    assert!(storage.check_and_set_item(&token, "key", &2).expect("cas failed"));
    assert_eq!(storage.get_item("key").expect("get failed"), Some(2));

    // The token is spent: the write above bumped the version.
    assert!(!storage.check_and_set_item(&token, "key", &3).expect("cas failed"));
    assert_eq!(storage.get_item("key").expect("get failed"), Some(2));
}

#[test]
fn check_and_set_on_missing_key_is_rejected() {
    let storage = MemoryStorage::<i32>::new();
    assert!(!storage.check_and_set_item(&CasToken::new(1), "missing", &1).expect("cas failed"));
    assert!(!storage.has_item("missing").expect("has failed"));
}

#[test]
fn touch_reports_presence() {
    let storage = MemoryStorage::<i32>::new();
    storage.set_item("key", &1).expect("set failed");

    assert!(storage.touch_item("key").expect("touch failed"));
    assert!(!storage.touch_item("missing").expect("touch failed"));
    assert!(!storage.has_item("missing").expect("has failed"));
    assert_eq!(storage.get_item("key").expect("get failed"), Some(1));
}

#[test]
fn touch_restarts_time_to_live() {
    let storage = MemoryStorage::<i32>::builder()
        .time_to_live(Duration::from_millis(400))
        .build();
    storage.set_item("key", &1).expect("set failed");

    thread::sleep(Duration::from_millis(250));
    assert!(storage.touch_item("key").expect("touch failed"));

    // Past the deadline of the original write, but not of the touch.
    thread::sleep(Duration::from_millis(250));
    assert!(storage.has_item("key").expect("has failed"));
    assert_eq!(storage.get_item("key").expect("get failed"), Some(1));

    thread::sleep(Duration::from_millis(300));
    assert!(!storage.has_item("key").expect("has failed"));
    assert_eq!(storage.get_item("key").expect("get failed"), None);
}

#[test]
fn remove_is_idempotent() {
    let storage = MemoryStorage::<i32>::new();
    storage.set_item("key", &1).expect("set failed");

    assert!(storage.remove_item("key").expect("remove failed"));
    assert!(!storage.remove_item("key").expect("remove failed"));
    assert_eq!(storage.len(), Some(0));
}

#[test]
fn bulk_operations_follow_single_semantics() {
    let storage = MemoryStorage::<i32>::new();
    let items = vec![("a".to_string(), 1), ("b".to_string(), 2)];

    assert!(storage.set_items(&items).expect("set_items failed").is_empty());
    assert_eq!(storage.has_items(&keys(&["a", "b", "c"])).expect("has_items failed").len(), 2);
    assert_eq!(
        storage.get_items(&keys(&["a", "c"])).expect("get_items failed"),
        HashMap::from([("a".to_string(), 1)])
    );

    let rejected = storage
        .add_items(&[("a".to_string(), 10), ("c".to_string(), 3)])
        .expect("add_items failed");
    assert_eq!(rejected, keys(&["a"]));

    let rejected = storage
        .replace_items(&[("b".to_string(), 20), ("d".to_string(), 4)])
        .expect("replace_items failed");
    assert_eq!(rejected, keys(&["d"]));

    let rejected = storage.touch_items(&keys(&["a", "d"])).expect("touch_items failed");
    assert_eq!(rejected, keys(&["d"]));

    assert_eq!(
        storage.get_items(&keys(&["a", "b", "c", "d"])).expect("get_items failed"),
        HashMap::from([("a".to_string(), 1), ("b".to_string(), 20), ("c".to_string(), 3)])
    );

    let rejected = storage.remove_items(&keys(&["a", "b", "c", "d"])).expect("remove_items failed");
    assert_eq!(rejected, keys(&["d"]));
    assert_eq!(storage.len(), Some(0));
}

#[test]
fn clones_share_items() {
    let storage = MemoryStorage::<i32>::new();
    let clone = storage.clone();

    storage.set_item("key", &1).expect("set failed");
    assert_eq!(clone.get_item("key").expect("get failed"), Some(1));
}
