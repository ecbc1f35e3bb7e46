//! Domain layer - Core business entities, value objects and validation.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared by the services and the gateway.

pub mod constants;
pub mod error;
pub mod password;
pub mod sweet;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult, ErrorCode};
pub use password::Password;
pub use sweet::{
    DeleteOutcome, DeletedSweet, InventoryRequest, NewSweet, PurchaseOutcome, RestockOutcome,
    Sweet, SweetChanges, SweetFilter, SweetInput, SweetList, SweetSearch,
};
pub use user::{LoginOutcome, Registration, User, UserCredentials, UserRole};
