//! HTTP handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod sweet_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health_routes;
pub use sweet_handler::sweet_routes;
