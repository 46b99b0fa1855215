//! # SessionKeeper Core
//!
//! Core session logic for the SessionKeeper backend.
//! This crate contains the credential entities, the issuer and verifier for
//! signed tokens, the refresh-store and identity-store interfaces, and the
//! services that authenticate requests and revoke sessions.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::{Claims, IdentityRecord, RefreshRecord, Subject, TokenKind, TokenPair};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{IdentityStore, RefreshStore};
pub use services::{
    CredentialIssuer, PresentedCredentials, RevocationManager, SessionOutcome, SessionService,
    TokenVerifier,
};
