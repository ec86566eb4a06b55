// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for storage operations.

/// An error from a storage operation.
///
/// This is an opaque error type that can wrap any underlying failure of a storage
/// adapter. Absent or already-present keys are not errors; they are reported through the
/// operation results. Use [`std::error::Error::source()`] to access the underlying cause
/// if needed.
///
/// # Example
///
/// ```
/// use stockpile::Error;
///
/// let error = Error::from_message("backend unavailable");
/// ```
#[ohno::error]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    ///
    /// This is the public API for creating storage errors from adapter crates.
    ///
    /// # Examples
    ///
    /// ```
    /// use stockpile::Error;
    ///
    /// let error = Error::from_message("backend unavailable");
    /// assert!(error.to_string().contains("backend unavailable"));
    /// ```
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for storage operations.
pub type Result<T> = std::result::Result<T, Error>;
