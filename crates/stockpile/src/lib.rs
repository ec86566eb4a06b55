// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Key-value cache storage capability.
//!
//! This crate defines the [`Storage`] trait that every stockpile adapter implements, along
//! with the opaque [`CasToken`] used for optimistic concurrency and the [`Error`] type for
//! fallible operations.
//!
//! # Overview
//!
//! [`Storage`] exposes the classic cache operations in single-item and bulk form: `has`,
//! `get`, `set`, `add`, `replace`, `touch` and `remove`, plus `check_and_set` gated by a
//! token obtained from [`Storage::get_item_with_token`]. Only the single-item operations
//! are required; bulk operations default to a loop over them and adapters override the
//! ones they can do better.
//!
//! Absent keys and already-present keys are never errors: they are reported through the
//! boolean (or key list) results. [`Error`] is reserved for genuine failures such as an
//! unavailable backend or a value that cannot be encoded.
//!
//! # Implementing a Storage
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Mutex;
//!
//! use stockpile::{CasToken, Result, Storage};
//!
//! struct SimpleStorage(Mutex<HashMap<String, (i32, u64)>>);
//!
//! impl Storage<i32> for SimpleStorage {
//!     fn has_item(&self, key: &str) -> Result<bool> {
//!         Ok(self.0.lock().unwrap().contains_key(key))
//!     }
//!
//!     fn get_item(&self, key: &str) -> Result<Option<i32>> {
//!         Ok(self.0.lock().unwrap().get(key).map(|(value, _)| *value))
//!     }
//!
//!     fn get_item_with_token(&self, key: &str) -> Result<Option<(i32, CasToken)>> {
//!         Ok(self.0.lock().unwrap().get(key).map(|(value, version)| (*value, CasToken::new(*version))))
//!     }
//!
//!     fn set_item(&self, key: &str, value: &i32) -> Result<bool> {
//!         let mut data = self.0.lock().unwrap();
//!         let version = data.get(key).map_or(0, |(_, version)| version + 1);
//!         data.insert(key.to_owned(), (*value, version));
//!         Ok(true)
//!     }
//!
//!     fn add_item(&self, key: &str, value: &i32) -> Result<bool> {
//!         if self.has_item(key)? {
//!             return Ok(false);
//!         }
//!         self.set_item(key, value)
//!     }
//!
//!     fn replace_item(&self, key: &str, value: &i32) -> Result<bool> {
//!         if !self.has_item(key)? {
//!             return Ok(false);
//!         }
//!         self.set_item(key, value)
//!     }
//!
//!     fn check_and_set_item(&self, token: &CasToken, key: &str, value: &i32) -> Result<bool> {
//!         match self.get_item_with_token(key)? {
//!             Some((_, current)) if current == *token => self.set_item(key, value),
//!             _ => Ok(false),
//!         }
//!     }
//!
//!     fn touch_item(&self, key: &str) -> Result<bool> {
//!         self.has_item(key)
//!     }
//!
//!     fn remove_item(&self, key: &str) -> Result<bool> {
//!         Ok(self.0.lock().unwrap().remove(key).is_some())
//!     }
//! }
//! ```
//!
//! # Testing
//!
//! Enable the `test-util` feature for [`testing::MockStorage`], a deterministic in-memory
//! storage that records every operation and supports failure injection.

pub mod error;
pub(crate) mod storage;
#[cfg(any(feature = "test-util", test))]
pub mod testing;
mod token;

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use token::CasToken;
