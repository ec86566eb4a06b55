// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The serializing storage decorator.

use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};
use stockpile::{CasToken, Result, Storage};

use crate::Codec;

/// A storage decorator that encodes values before they reach the inner storage.
///
/// The inner storage only ever sees bytes. Reads decode, writes encode, and everything
/// that does not carry a value (existence checks, touches, removals, tokens) is forwarded
/// as-is.
///
/// # Examples
///
/// ```
/// use stockpile::Storage;
/// use stockpile_memory::MemoryStorage;
/// use stockpile_serializer::{BincodeCodec, Serializer};
///
/// let storage = Serializer::new(MemoryStorage::<Vec<u8>>::new(), BincodeCodec);
///
/// storage.set_item("answer", &42_u64)?;
/// let answer: Option<u64> = storage.get_item("answer")?;
/// assert_eq!(answer, Some(42));
/// # Ok::<(), stockpile::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Serializer<S, C> {
    inner: S,
    codec: C,
}

impl<S, C> Serializer<S, C> {
    /// Decorates `inner` with `codec`.
    #[must_use]
    pub fn new(inner: S, codec: C) -> Self {
        Self { inner, codec }
    }

    /// Returns a reference to the decorated storage.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns a reference to the codec.
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Consumes the decorator and returns the inner storage.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, C> Serializer<S, C>
where
    C: Codec,
{
    fn encode_items<V: Serialize>(&self, items: &[(String, V)]) -> Result<Vec<(String, Vec<u8>)>> {
        items
            .iter()
            .map(|(key, value)| Ok((key.clone(), self.codec.encode(value)?)))
            .collect()
    }
}

impl<S, C, V> Storage<V> for Serializer<S, C>
where
    S: Storage<Vec<u8>>,
    C: Codec,
    V: Serialize + DeserializeOwned,
{
    fn has_item(&self, key: &str) -> Result<bool> {
        self.inner.has_item(key)
    }

    fn get_item(&self, key: &str) -> Result<Option<V>> {
        self.inner
            .get_item(key)?
            .map(|bytes| self.codec.decode(&bytes))
            .transpose()
    }

    fn get_item_with_token(&self, key: &str) -> Result<Option<(V, CasToken)>> {
        self.inner
            .get_item_with_token(key)?
            .map(|(bytes, token)| Ok((self.codec.decode(&bytes)?, token)))
            .transpose()
    }

    fn set_item(&self, key: &str, value: &V) -> Result<bool> {
        self.inner.set_item(key, &self.codec.encode(value)?)
    }

    fn add_item(&self, key: &str, value: &V) -> Result<bool> {
        self.inner.add_item(key, &self.codec.encode(value)?)
    }

    fn replace_item(&self, key: &str, value: &V) -> Result<bool> {
        self.inner.replace_item(key, &self.codec.encode(value)?)
    }

    fn check_and_set_item(&self, token: &CasToken, key: &str, value: &V) -> Result<bool> {
        self.inner.check_and_set_item(token, key, &self.codec.encode(value)?)
    }

    fn touch_item(&self, key: &str) -> Result<bool> {
        self.inner.touch_item(key)
    }

    fn remove_item(&self, key: &str) -> Result<bool> {
        self.inner.remove_item(key)
    }

    fn has_items(&self, keys: &[String]) -> Result<Vec<String>> {
        self.inner.has_items(keys)
    }

    fn get_items(&self, keys: &[String]) -> Result<HashMap<String, V>> {
        self.inner
            .get_items(keys)?
            .into_iter()
            .map(|(key, bytes)| Ok((key, self.codec.decode(&bytes)?)))
            .collect()
    }

    fn set_items(&self, items: &[(String, V)]) -> Result<Vec<String>> {
        self.inner.set_items(&self.encode_items(items)?)
    }

    fn add_items(&self, items: &[(String, V)]) -> Result<Vec<String>> {
        self.inner.add_items(&self.encode_items(items)?)
    }

    fn replace_items(&self, items: &[(String, V)]) -> Result<Vec<String>> {
        self.inner.replace_items(&self.encode_items(items)?)
    }

    fn touch_items(&self, keys: &[String]) -> Result<Vec<String>> {
        self.inner.touch_items(keys)
    }

    fn remove_items(&self, keys: &[String]) -> Result<Vec<String>> {
        self.inner.remove_items(keys)
    }

    fn len(&self) -> Option<u64> {
        self.inner.len()
    }
}

/// Extension trait for decorating any byte storage with a serializer.
///
/// This trait is automatically implemented for all types that implement
/// `Storage<Vec<u8>>`.
///
/// # Examples
///
/// ```
/// use stockpile::Storage;
/// use stockpile_memory::MemoryStorage;
/// use stockpile_serializer::{JsonCodec, SerializerExt};
///
/// let storage = MemoryStorage::<Vec<u8>>::new().with_serializer(JsonCodec);
/// storage.set_item("greeting", &"hello".to_string())?;
/// assert_eq!(storage.inner().get_item("greeting")?, Some(b"\"hello\"".to_vec()));
/// # Ok::<(), stockpile::Error>(())
/// ```
pub trait SerializerExt: Sized {
    /// Wraps this storage in a [`Serializer`] using `codec`.
    fn with_serializer<C: Codec>(self, codec: C) -> Serializer<Self, C>;
}

impl<S> SerializerExt for S
where
    S: Storage<Vec<u8>>,
{
    fn with_serializer<C: Codec>(self, codec: C) -> Serializer<Self, C> {
        Serializer::new(self, codec)
    }
}
