// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Fixture generation.
//!
//! A benchmark run works on two fixed sets of items: *warm* items that setup writes before
//! every case, and *cold* items that no case expects to find. Both are generated by index
//! so every run, and every case of a run, sees exactly the same data.

use std::collections::BTreeMap;

use crate::{BenchError, Phase, Value};

/// Key prefix of the items expected to be present.
pub const WARM_PREFIX: &str = "warm";

/// Key prefix of the items expected to be absent.
pub const COLD_PREFIX: &str = "cold";

/// Number of items in each standard fixture.
pub const FIXTURE_SIZE: u64 = 10;

/// Generates `count` entries `{prefix}{i} -> i`.
///
/// # Examples
///
/// ```
/// use stockpile_bench::generate;
///
/// let items = generate("warm", 3);
/// assert_eq!(items.get("warm0"), Some(&0));
/// assert_eq!(items.get("warm2"), Some(&2));
/// assert_eq!(items.len(), 3);
/// ```
#[must_use]
pub fn generate(prefix: &str, count: u64) -> BTreeMap<String, u64> {
    (0..count).map(|i| (format!("{prefix}{i}"), i)).collect()
}

/// An immutable set of fixture items with its derived payloads.
///
/// Keys, raw values and transformed values are computed once at construction, so the
/// timed part of a case never formats or allocates keys.
#[derive(Clone, Debug)]
pub struct Fixture {
    prefix: String,
    entries: BTreeMap<String, u64>,
    keys: Vec<String>,
    items: Vec<(String, Value)>,
    transformed: Vec<(String, Value)>,
}

impl Fixture {
    /// Generates a fixture of `count` items under `prefix`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `prefix` is empty or `count` is zero.
    pub fn new(prefix: impl Into<String>, count: u64) -> Result<Self, BenchError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(BenchError::caused_by(Phase::Configuration, "fixture prefix must not be empty"));
        }
        if count == 0 {
            return Err(BenchError::caused_by(
                Phase::Configuration,
                format!("fixture `{prefix}` must contain at least one item"),
            ));
        }
        Ok(Self::generated(prefix, count))
    }

    pub(crate) fn generated(prefix: String, count: u64) -> Self {
        let entries = generate(&prefix, count);
        let keys = entries.keys().cloned().collect();
        let items = entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::Int(*value)))
            .collect();
        let transformed = entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::transformed(key, *value)))
            .collect();

        Self {
            prefix,
            entries,
            keys,
            items,
            transformed,
        }
    }

    /// Returns the key prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the generated entries.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, u64> {
        &self.entries
    }

    /// Returns all keys.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the items with their fixture values.
    #[must_use]
    pub fn items(&self) -> &[(String, Value)] {
        &self.items
    }

    /// Returns the items with their transformed values.
    #[must_use]
    pub fn transformed_items(&self) -> &[(String, Value)] {
        &self.transformed
    }

    /// Returns true if `key` belongs to this fixture.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns true if any key belongs to both fixtures.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.keys.iter().any(|key| other.contains_key(key))
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the fixture has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
