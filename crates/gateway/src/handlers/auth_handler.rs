//! Authentication handlers.

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use common::AppResult;
use domain::{LoginOutcome, User};

use crate::extractors::JsonBody;
use crate::response::{ApiResponse, Created, UserData};
use crate::state::AppState;

/// User registration request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    /// User display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// User email address
    #[schema(example = "john@example.com")]
    pub email: String,
    /// User password (minimum 6 characters)
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
}

/// User login request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// User email address
    #[schema(example = "john@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "secret123")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppResult<Created<UserData>> {
    let user = state
        .auth_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok(Created(ApiResponse::with_message(
        UserData { user },
        "User registered successfully",
    )))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginOutcome),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppResult<ApiResponse<LoginOutcome>> {
    let outcome = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(ApiResponse::with_message(outcome, "Login successful"))
}
