//! Sweet catalog and stock handlers.
//!
//! All routes sit behind the auth middleware; the caller's role is passed
//! to the service, which decides what it may do.

use axum::{
    extract::{Extension, Path, State},
    routing::{get, post, put},
    Router,
};

use common::AppResult;
use domain::{
    DeleteOutcome, InventoryRequest, PurchaseOutcome, RestockOutcome, Sweet, SweetInput,
    SweetList, SweetSearch,
};

use crate::extractors::{JsonBody, QueryParams};
use crate::middleware::CurrentUser;
use crate::response::{ApiResponse, Created, SweetData};
use crate::state::AppState;

/// Create sweet routes
pub fn sweet_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(add_sweet).get(list_sweets))
        .route("/search", get(search_sweets))
        .route("/:id", put(update_sweet).delete(delete_sweet))
        .route("/:id/purchase", post(purchase_sweet))
        .route("/:id/restock", post(restock_sweet))
}

/// Add a new sweet
#[utoipa::path(
    post,
    path = "/api/sweets",
    tag = "Sweets",
    security(("bearer_auth" = [])),
    request_body = SweetInput,
    responses(
        (status = 201, description = "Sweet added successfully", body = Sweet),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Missing or invalid token"),
        (status = 409, description = "Sweet with this name already exists")
    )
)]
pub async fn add_sweet(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SweetInput>,
) -> AppResult<Created<SweetData>> {
    let sweet = state.sweet_service.add_sweet(payload).await?;
    Ok(Created(ApiResponse::with_message(
        SweetData { sweet },
        "Sweet added successfully",
    )))
}

/// List all sweets
#[utoipa::path(
    get,
    path = "/api/sweets",
    tag = "Sweets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sweets retrieved successfully", body = SweetList),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_sweets(State(state): State<AppState>) -> AppResult<ApiResponse<SweetList>> {
    let list = state.sweet_service.list_all().await?;
    Ok(ApiResponse::with_message(list, "Sweets retrieved successfully"))
}

/// Search sweets by name, category and price range
#[utoipa::path(
    get,
    path = "/api/sweets/search",
    tag = "Sweets",
    security(("bearer_auth" = [])),
    params(SweetSearch),
    responses(
        (status = 200, description = "Search completed successfully", body = SweetList),
        (status = 400, description = "Invalid price filter"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn search_sweets(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SweetSearch>,
) -> AppResult<ApiResponse<SweetList>> {
    let list = state.sweet_service.search(query).await?;
    Ok(ApiResponse::with_message(list, "Search completed successfully"))
}

/// Update a sweet's details
#[utoipa::path(
    put,
    path = "/api/sweets/{id}",
    tag = "Sweets",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Sweet ID (UUID)")
    ),
    request_body = SweetInput,
    responses(
        (status = 200, description = "Sweet updated successfully", body = Sweet),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Sweet not found"),
        (status = 409, description = "Sweet with this name already exists")
    )
)]
pub async fn update_sweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<SweetInput>,
) -> AppResult<ApiResponse<SweetData>> {
    let sweet = state.sweet_service.update_sweet(&id, payload).await?;
    Ok(ApiResponse::with_message(
        SweetData { sweet },
        "Sweet updated successfully",
    ))
}

/// Delete a sweet (admin only)
#[utoipa::path(
    delete,
    path = "/api/sweets/{id}",
    tag = "Sweets",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Sweet ID (UUID)")
    ),
    responses(
        (status = 200, description = "Sweet deleted successfully", body = DeleteOutcome),
        (status = 403, description = "Only admins can delete sweets"),
        (status = 404, description = "Sweet not found")
    )
)]
pub async fn delete_sweet(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<DeleteOutcome>> {
    let outcome = state
        .sweet_service
        .delete_sweet(&id, current_user.role)
        .await?;
    let message = outcome.message.clone();
    Ok(ApiResponse::with_message(outcome, message))
}

/// Purchase a sweet (decreases quantity)
#[utoipa::path(
    post,
    path = "/api/sweets/{id}/purchase",
    tag = "Sweets",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Sweet ID (UUID)")
    ),
    request_body = InventoryRequest,
    responses(
        (status = 200, description = "Purchase successful", body = PurchaseOutcome),
        (status = 400, description = "Invalid quantity or insufficient stock"),
        (status = 404, description = "Sweet not found")
    )
)]
pub async fn purchase_sweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<InventoryRequest>,
) -> AppResult<ApiResponse<PurchaseOutcome>> {
    let outcome = state.sweet_service.purchase(&id, payload.quantity).await?;
    Ok(ApiResponse::with_message(outcome, "Purchase successful"))
}

/// Restock a sweet (admin only)
#[utoipa::path(
    post,
    path = "/api/sweets/{id}/restock",
    tag = "Sweets",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Sweet ID (UUID)")
    ),
    request_body = InventoryRequest,
    responses(
        (status = 200, description = "Restock successful", body = RestockOutcome),
        (status = 400, description = "Invalid quantity"),
        (status = 403, description = "Only admins can restock sweets"),
        (status = 404, description = "Sweet not found")
    )
)]
pub async fn restock_sweet(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<InventoryRequest>,
) -> AppResult<ApiResponse<RestockOutcome>> {
    let outcome = state
        .sweet_service
        .restock(&id, payload.quantity, current_user.role)
        .await?;
    Ok(ApiResponse::with_message(outcome, "Restock successful"))
}
