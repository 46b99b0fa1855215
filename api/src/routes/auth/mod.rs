//! Session route handlers
//!
//! Both endpoints sit behind the session middleware:
//! - Current session subject
//! - Logout

pub mod logout;
pub mod session;
