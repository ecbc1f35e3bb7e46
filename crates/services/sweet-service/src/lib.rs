//! Sweet Service Library
//!
//! Catalog and stock management: persistence of sweets and the business
//! rules around adding, updating, deleting, purchasing and restocking them.

pub mod repository;
pub mod service;

pub use repository::{SweetRepository, SweetStore};
pub use service::{SweetManager, SweetService};

#[cfg(any(test, feature = "test-utils"))]
pub use repository::MockSweetRepository;
