//! Domain entities representing subjects and their credentials.

pub mod subject;
pub mod token;

// Re-export commonly used types
pub use subject::{IdentityRecord, Subject};
pub use token::{Claims, RefreshRecord, TokenKind, TokenPair};
