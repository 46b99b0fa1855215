pub mod identity;
pub mod refresh;

pub use identity::IdentityStore;
pub use refresh::{refresh_key, RefreshStore, REFRESH_KEY_PREFIX};

#[cfg(test)]
pub use identity::MockIdentityStore;
#[cfg(test)]
pub use refresh::MockRefreshStore;
