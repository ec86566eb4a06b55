// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(docsrs, feature(doc_cfg))]

//! Micro-benchmarks for stockpile storage adapters.
//!
//! This crate times every storage operation (has, set, add, replace, touch, get, remove,
//! and the get-check-and-set sequence) in single-item and bulk form, against items that
//! exist and items that do not. It is a timing tool: return values are never checked.
//!
//! # Overview
//!
//! - [`generate`] and [`Fixture`] build the two datasets: *warm* items that are present
//!   before every case, and *cold* items that are absent.
//! - [`Driver`] owns a storage and the fixtures and runs one [`Case`] at a time, with an
//!   untimed setup before and an untimed teardown after.
//! - [`BenchProfile`] maps sample counts and warm-up rounds onto a criterion
//!   configuration.
//!
//! The `benches/` targets run the whole catalog against the memory adapter, with and
//! without the serializer plugin.
//!
//! # Examples
//!
//! ```
//! use stockpile::Storage;
//! use stockpile_bench::{Case, Driver, Value};
//! use stockpile_memory::MemoryStorage;
//!
//! let driver = Driver::new(MemoryStorage::new());
//!
//! driver.set_up()?;
//! driver.run(Case::AddItemsBulk)?;
//! assert_eq!(driver.storage().get_item("cold3")?, Some(Value::Text("cold33".to_string())));
//!
//! driver.tear_down()?;
//! assert!(!driver.storage().has_item("cold3")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod case;
mod driver;
mod error;
mod fixture;
mod profile;
mod value;

#[cfg(test)]
mod testing;

pub use case::{Case, Operation, Shape, Target};
pub use driver::{Driver, DriverBuilder};
pub use error::{BenchError, Phase};
pub use fixture::{COLD_PREFIX, FIXTURE_SIZE, Fixture, WARM_PREFIX, generate};
pub use profile::{BenchProfile, ITERATIONS_VAR, MEASUREMENT_MS_VAR, WARMUP_VAR};
pub use value::Value;
