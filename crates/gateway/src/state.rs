//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::AuthService;
use common::Database;
use sweet_service_lib::SweetService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub sweet_service: Arc<dyn SweetService>,
    pub database: Database,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        sweet_service: Arc<dyn SweetService>,
        database: Database,
    ) -> Self {
        Self {
            auth_service,
            sweet_service,
            database,
        }
    }
}
