//! Auth Service Library
//!
//! Account registration, login and JWT issuance/verification. Accounts are
//! read and written through the user service's repository.

pub mod service;

pub use service::{AuthService, Authenticator, Claims};
