//! SeaORM entities.

pub mod sweet;
