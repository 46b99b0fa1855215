pub mod auth;

pub use auth::{LogoutResponse, SessionResponse};
