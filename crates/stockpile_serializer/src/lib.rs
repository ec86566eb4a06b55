// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Serializer plugin for stockpile storages.
//!
//! [`Serializer`] decorates any [`Storage<Vec<u8>>`](stockpile::Storage) and exposes it as a
//! `Storage<V>` for every serde-serializable `V`: values are encoded with a [`Codec`] on the
//! way in and decoded on the way out. Keys, existence checks, touches, removals and
//! check-and-set tokens pass through untouched, so the decorated storage keeps the exact
//! semantics of the inner one.
//!
//! The decorator is built explicitly from the codec the caller hands in; there is no
//! registry of codecs to look anything up from.
//!
//! # Examples
//!
//! ```
//! use stockpile::Storage;
//! use stockpile_memory::MemoryStorage;
//! use stockpile_serializer::{JsonCodec, SerializerExt};
//!
//! let storage = MemoryStorage::<Vec<u8>>::new().with_serializer(JsonCodec);
//!
//! storage.set_item("numbers", &vec![1, 2, 3])?;
//! let numbers: Option<Vec<i32>> = storage.get_item("numbers")?;
//! assert_eq!(numbers, Some(vec![1, 2, 3]));
//! # Ok::<(), stockpile::Error>(())
//! ```
//!
//! # Features
//!
//! - `json` (default): [`JsonCodec`] backed by `serde_json`
//! - `bincode` (default): [`BincodeCodec`] backed by `bincode`

mod codec;
mod serializer;

#[cfg(feature = "bincode")]
#[doc(inline)]
pub use codec::BincodeCodec;
#[doc(inline)]
pub use codec::Codec;
#[cfg(feature = "json")]
#[doc(inline)]
pub use codec::JsonCodec;
#[doc(inline)]
pub use serializer::{Serializer, SerializerExt};
