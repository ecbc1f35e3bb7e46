//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{LoginRequest, RegisterRequest};
use domain::{
    DeleteOutcome, DeletedSweet, InventoryRequest, LoginOutcome, PurchaseOutcome, RestockOutcome,
    Sweet, SweetInput, SweetList, User, UserRole,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(title = "Sweet Shop API", description = "Sweet shop inventory management"),
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::sweet_handler::add_sweet,
        crate::handlers::sweet_handler::list_sweets,
        crate::handlers::sweet_handler::search_sweets,
        crate::handlers::sweet_handler::update_sweet,
        crate::handlers::sweet_handler::delete_sweet,
        crate::handlers::sweet_handler::purchase_sweet,
        crate::handlers::sweet_handler::restock_sweet,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            LoginOutcome,
            User,
            UserRole,
            Sweet,
            SweetInput,
            SweetList,
            InventoryRequest,
            PurchaseOutcome,
            RestockOutcome,
            DeleteOutcome,
            DeletedSweet,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Sweets", description = "Catalog and stock management"),
        (name = "Health", description = "Liveness and dependency checks"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
