// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value written by the benchmark cases.
///
/// Fixture values are small integers. Cases that write "new" data use the transformed
/// form, the key followed by the integer, as text.
///
/// # Examples
///
/// ```
/// use stockpile_bench::Value;
///
/// assert_eq!(Value::transformed("cold3", 3), Value::Text("cold33".to_string()));
/// assert_eq!(Value::from(3_u64).to_string(), "3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// A fixture value.
    Int(u64),
    /// A transformed value.
    Text(String),
}

impl Value {
    /// Builds the transformed value for a fixture entry.
    #[must_use]
    pub fn transformed(key: &str, value: u64) -> Self {
        Self::Text(format!("{key}{value}"))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}
