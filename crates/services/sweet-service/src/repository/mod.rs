//! Repository layer for data access.

pub mod entities;
mod sweet_repository;

pub use sweet_repository::{SweetRepository, SweetStore};

#[cfg(any(test, feature = "test-utils"))]
pub use sweet_repository::MockSweetRepository;
