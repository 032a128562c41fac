//! Session error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during session operations.
///
/// Rejected input and rejected credentials are ordinary outcomes here, not
/// faults: the screens render them inline. Only [`SessionError::Storage`]
/// represents something actually going wrong underneath.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] cartwheel_core::EmailError),

    /// An account with this email is already stored.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Invalid credentials (no stored account, or email/password mismatch).
    ///
    /// The two causes are deliberately indistinguishable to the caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Key-value storage failed in a way the operation cannot absorb.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
