// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-memory storage adapter backed by moka.
//!
//! This crate provides [`MemoryStorage`], a [`Storage`](stockpile::Storage) implementation
//! on top of moka's synchronous concurrent cache. Use [`MemoryStorageBuilder`] to configure
//! capacity, TTL and TTI without exposing moka types directly.
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//!
//! use stockpile::Storage;
//! use stockpile_memory::MemoryStorageBuilder;
//!
//! let storage = MemoryStorageBuilder::<i32>::new()
//!     .max_capacity(1000)
//!     .time_to_live(Duration::from_secs(300))
//!     .build();
//!
//! storage.set_item("key", &42)?;
//! assert_eq!(storage.get_item("key")?, Some(42));
//! # Ok::<(), stockpile::Error>(())
//! ```
//!
//! # Features
//!
//! - **Atomic conditional writes**: add, replace, check-and-set and touch are evaluated
//!   under moka's per-key compute lock
//! - **Capacity limits**: Set maximum entry count with automatic eviction
//! - **TTL/TTI**: Configure time-to-live and time-to-idle expiration; touching an item
//!   restarts its time-to-live
//! - **Zero external types**: Builder API avoids exposing moka in your public API

pub mod builder;
pub mod storage;

#[doc(inline)]
pub use builder::MemoryStorageBuilder;
#[doc(inline)]
pub use storage::MemoryStorage;
