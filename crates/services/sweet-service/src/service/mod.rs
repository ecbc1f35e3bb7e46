//! Sweet service business logic.

mod sweet_service;

#[cfg(test)]
mod tests;

pub use sweet_service::{SweetManager, SweetService};
