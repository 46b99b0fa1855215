//! Token module for signed credentials
//!
//! This module handles the stateless half of the session model:
//! - Issuing access + refresh token pairs signed with separate secrets
//! - Verifying tokens and classifying failures
//! - Digesting refresh tokens for storage

mod config;
mod issuer;
mod verifier;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use issuer::{digests_match, token_digest, CredentialIssuer};
pub use verifier::TokenVerifier;
