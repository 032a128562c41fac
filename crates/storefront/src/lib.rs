//! Cartwheel Storefront library.
//!
//! The core of a simulated mobile storefront: a device-local session and
//! credential store, a login attempt limiter, a step-by-step checkout flow,
//! and a read-only client for a public product catalog. Everything stateful
//! takes its storage and its clock by injection, so the whole surface runs
//! deterministically under tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod config;
pub mod session;
pub mod state;
pub mod storage;
