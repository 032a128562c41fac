//! On-device key-value storage.
//!
//! The session store persists two small JSON blobs (the credential record and
//! the session mirror) under string keys. This module is the seam that keeps
//! the rest of the crate ignorant of where those blobs live: a real file on
//! disk in the binary, a `HashMap` in tests.
//!
//! The contract is deliberately thin. Each call is its own atomic unit; there
//! are no transactions across keys, and callers that write related keys must
//! tolerate one write landing without the other.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying I/O failed.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing data was not the expected JSON shape.
    #[error("storage format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Async key-value store for small JSON blobs.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
