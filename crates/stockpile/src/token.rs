// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// An opaque token identifying the version of an item at the time it was read.
///
/// Tokens are handed out by [`Storage::get_item_with_token`](crate::Storage::get_item_with_token)
/// and consumed by [`Storage::check_and_set_item`](crate::Storage::check_and_set_item), which
/// only writes if the item has not been written since the token was issued.
///
/// Adapters decide what the inner number means; the only contract is that two tokens for the
/// same key compare equal exactly when no write happened in between.
///
/// # Examples
///
/// ```
/// use stockpile::CasToken;
///
/// let token = CasToken::new(7);
/// assert_eq!(token.version(), 7);
/// assert_ne!(token, CasToken::new(8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CasToken(u64);

impl CasToken {
    /// Creates a token for the given item version.
    #[must_use]
    pub const fn new(version: u64) -> Self {
        Self(version)
    }

    /// Returns the item version this token was issued for.
    #[must_use]
    pub const fn version(self) -> u64 {
        self.0
    }
}
