//! User Service Library
//!
//! Account persistence. The auth service consumes it through the
//! [`repository::UserRepository`] trait.

pub mod repository;

pub use repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockUserRepository;
