//! Database module - MySQL implementations using SQLx
//!
//! This module provides the identity store over the `users` table:
//! - Connection pool management
//! - Subject lookup and the credentials-changed timestamp

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::MySqlIdentityStore;
