//! Request-time session handling
//!
//! Verifies the presented access token and, when it has merely expired,
//! rotates the session through the refresh token.

mod service;

#[cfg(test)]
mod tests;

pub use service::{PresentedCredentials, SessionOutcome, SessionService};
