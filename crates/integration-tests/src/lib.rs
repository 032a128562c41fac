//! Integration tests for Cartwheel.
//!
//! The storefront takes its storage and its clock by injection, so these
//! tests run whole user journeys in-process: every launch is an
//! [`AppState`] over shared in-memory storage and a manual clock, and a
//! "relaunch" is simply a second state over the same backends.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//!
//! # Include the tests that hit the live catalog API
//! cargo test -p cartwheel-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Signup, login, lockout, and session restore journeys
//! - `checkout_flow` - The purchase flow end to end
//! - `session_persistence` - Persisted store shapes across relaunches
//! - `live_catalog` - Ignored by default; requires network access

use std::sync::Arc;

use cartwheel_storefront::catalog::types::Product;
use cartwheel_storefront::clock::ManualClock;
use cartwheel_storefront::config::AppConfig;
use cartwheel_storefront::state::AppState;
use cartwheel_storefront::storage::{MemoryStorage, Storage};

use chrono::DateTime;

/// Virtual start of every test timeline: 2023-11-14 22:13:20 UTC.
pub const TEST_EPOCH_MILLIS: i64 = 1_700_000_000_000;

/// One simulated app launch with inspectable backends.
pub struct TestContext {
    pub state: AppState,
    pub storage: MemoryStorage,
    pub clock: ManualClock,
}

impl TestContext {
    /// A fresh launch: empty storage, clock at [`TEST_EPOCH_MILLIS`].
    #[must_use]
    pub fn new() -> Self {
        let storage = MemoryStorage::new();
        let clock = ManualClock::starting_at(
            DateTime::from_timestamp_millis(TEST_EPOCH_MILLIS).unwrap_or_default(),
        );
        Self::over(storage, clock)
    }

    /// A second launch of the app: same storage and timeline, but fresh
    /// in-memory state (no session, clean attempt limiter).
    #[must_use]
    pub fn relaunch(&self) -> Self {
        Self::over(self.storage.clone(), self.clock.clone())
    }

    fn over(storage: MemoryStorage, clock: ManualClock) -> Self {
        let state = AppState::with_backends(
            AppConfig::default(),
            Arc::new(storage.clone()) as Arc<dyn Storage>,
            Arc::new(clock.clone()),
        );
        Self {
            state,
            storage,
            clock,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A realistic catalog product, shaped like the live API response.
///
/// # Panics
///
/// Panics if the fixture JSON stops matching the product schema.
#[must_use]
pub fn sample_product() -> Product {
    serde_json::from_value(serde_json::json!({
        "id": 78,
        "title": "Apple MacBook Pro 14 Inch Space Grey",
        "description": "The MacBook Pro 14 Inch in Space Grey is a powerful and sleek laptop.",
        "category": "laptops",
        "price": 1999.99,
        "discountPercentage": 9.25,
        "rating": 3.13,
        "stock": 39,
        "brand": "Apple",
        "thumbnail": "https://cdn.dummyjson.com/products/images/laptops/1.png",
    }))
    .expect("sample product fixture matches the product schema")
}
