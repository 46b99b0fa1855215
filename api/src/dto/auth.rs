use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub status: String,
    pub message: String,
}

impl LogoutResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: "Logged out successfully".to_string(),
        }
    }
}
