// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Value encodings used by the serializer plugin.

use serde::{Serialize, de::DeserializeOwned};
use stockpile::{Error, Result};

/// Encodes values to bytes and back.
///
/// Failures are reported as [`stockpile::Error`] so they flow through storage operations
/// unchanged.
pub trait Codec: Send + Sync {
    /// Returns a short, stable name for this encoding.
    fn name(&self) -> &'static str;

    /// Encodes `value` to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented in this encoding.
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized;

    /// Decodes a value from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a valid encoding of `T`.
    fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned;
}

/// JSON encoding backed by `serde_json`.
///
/// # Examples
///
/// ```
/// use stockpile_serializer::{Codec, JsonCodec};
///
/// let bytes = JsonCodec.encode(&[1, 2])?;
/// assert_eq!(bytes, b"[1,2]");
/// # Ok::<(), stockpile::Error>(())
/// ```
#[cfg(feature = "json")]
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_vec(value).map_err(Error::from_message)
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(bytes).map_err(Error::from_message)
    }
}

/// Compact binary encoding backed by `bincode`.
///
/// Bincode is not self-describing: decoding needs the exact type that was encoded.
#[cfg(feature = "bincode")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodec;

#[cfg(feature = "bincode")]
impl Codec for BincodeCodec {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        bincode::serialize(value).map_err(Error::from_message)
    }

    fn decode<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        bincode::deserialize(bytes).map_err(Error::from_message)
    }
}
