//! Common utilities shared across the services and the gateway.
//!
//! This crate provides:
//! - Unified boundary error handling for HTTP
//! - Configuration structures
//! - The shared database handle and schema migrations (feature `database`)

pub mod config;
pub mod error;

#[cfg(feature = "database")]
pub mod db;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};

#[cfg(feature = "database")]
pub use db::Database;
