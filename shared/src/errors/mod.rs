//! Shared error response structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Timestamp when the error occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Some(Utc::now()),
        }
    }

    /// The single body returned for every authentication failure
    ///
    /// Byte-identical across failures, so it carries no timestamp.
    pub fn not_authenticated() -> Self {
        Self {
            error: error_codes::NOT_AUTHENTICATED.to_string(),
            message: "Not authenticated".to_string(),
            timestamp: None,
        }
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const NOT_AUTHENTICATED: &str = "not_authenticated";
    pub const NOT_FOUND: &str = "not_found";
    pub const SERVICE_UNAVAILABLE: &str = "service_unavailable";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authenticated_body_is_fixed() {
        let body = serde_json::to_value(ErrorResponse::not_authenticated()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "not_authenticated", "message": "Not authenticated"})
        );
    }

    #[test]
    fn test_error_response_carries_timestamp() {
        let response = ErrorResponse::new(error_codes::NOT_FOUND, "missing");
        assert!(response.timestamp.is_some());
        assert!(serde_json::to_string(&response).unwrap().contains("timestamp"));
    }
}
