//! In-process stores
//!
//! Used when no Redis/MySQL is configured (development) and by the HTTP
//! tests. Records expire against the injected clock on read.

mod identity;
mod refresh;

pub use identity::InMemoryIdentityStore;
pub use refresh::InMemoryRefreshStore;
