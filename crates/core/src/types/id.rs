//! Newtype IDs for type-safe entity references.
//!
//! The three ID kinds here have nothing in common beyond being identifiers:
//! product IDs are numeric and assigned by the catalog API, the user ID is a
//! fixed local sentinel, and order IDs are synthesized from a timestamp. Each
//! gets its own shape instead of a shared wrapper.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the device-local account.
///
/// The storefront supports exactly one stored account at a time, so the ID is
/// the fixed string `"1"`. It stays string-typed because it round-trips
/// through the persisted session blob as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// The ID of the single local account.
    #[must_use]
    pub fn local() -> Self {
        Self("1".to_owned())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::local()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog product ID, assigned by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// A synthetic order confirmation ID.
///
/// Checkout mints one when simulated processing completes: the literal prefix
/// `ORD` followed by the last six digits of the confirmation time as an epoch
/// millisecond count, zero-padded. Unique enough for a demo receipt, and
/// deterministic under an injected clock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Prefix carried by every order ID.
    pub const PREFIX: &'static str = "ORD";

    /// Mint an order ID from an epoch-millisecond timestamp.
    #[must_use]
    pub fn from_timestamp_millis(millis: i64) -> Self {
        let suffix = millis.rem_euclid(1_000_000);
        Self(format!("{}{suffix:06}", Self::PREFIX))
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
