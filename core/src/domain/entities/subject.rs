//! Subject identity and the identity-store record attached to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an authenticated principal
///
/// This is the only identity carried inside signed claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Wrap a raw subject id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is blank
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Subject {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for Subject {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// What the identity store knows about a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// The subject this record describes
    pub subject: Subject,

    /// Last password change or reset, if any
    pub credentials_changed_at: Option<DateTime<Utc>>,
}

impl IdentityRecord {
    /// Creates a record for a subject that never changed credentials
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            credentials_changed_at: None,
        }
    }

    /// Whether credentials changed after a token with `issued_at` (seconds) was minted
    ///
    /// Compared at whole-second resolution; a token issued in the same
    /// second as the change is still accepted.
    pub fn credentials_changed_after(&self, issued_at: i64) -> bool {
        match self.credentials_changed_at {
            Some(changed_at) => issued_at < changed_at.timestamp(),
            None => false,
        }
    }
}
