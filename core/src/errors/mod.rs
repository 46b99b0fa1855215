//! Error types for the session core.
//!
//! [`DomainError`] is what stores and the revocation manager report;
//! [`TokenError`] and [`AuthError`] describe token and request failures.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Store-facing failures
#[derive(Error, Debug)]
pub enum DomainError {
    /// A store rejected the arguments it was given
    #[error("Invalid store input: {message}")]
    Validation { message: String },

    /// No identity record for the subject
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// The store failed or did not answer within its time limit
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    /// Misconfiguration or another failure that retrying will not fix
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Whether the failure came from an unreachable or slow store
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable { .. })
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
