//! Business services containing session logic and use cases.

mod bounded;
pub mod revocation;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use revocation::RevocationManager;
pub use session::{PresentedCredentials, SessionOutcome, SessionService};
pub use token::{digests_match, token_digest, CredentialIssuer, TokenServiceConfig, TokenVerifier};
