//! Authentication service - Handles registration, login and tokens.
//!
//! Uses the domain Password value object for hashing. Argon2 is CPU-bound,
//! so hashing and verification run on the blocking pool.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::validation::{validate_login_input, validate_register_input};
use domain::{DomainError, ErrorCode, LoginOutcome, Password, User};
use user_service_lib::UserRepository;

/// Verified against when the account does not exist, so both failure paths
/// cost one Argon2 verification.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$ZHVtbXloYXNoMTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMg";

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account with the `user` role
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User>;

    /// Check credentials and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<LoginOutcome>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService backed by a user repository.
pub struct Authenticator {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    jwt_expiration_hours: i64,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt_secret: impl Into<String>,
        jwt_expiration_hours: i64,
    ) -> Self {
        Self {
            user_repo,
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours,
        }
    }

    fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Generate JWT token for a user
    pub(crate) fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        sign_claims(&Header::default(), &claims, self.jwt_secret_bytes())
    }
}

/// Signing failures are server faults, not bad credentials.
pub(crate) fn sign_claims(header: &Header, claims: &Claims, secret: &[u8]) -> AppResult<String> {
    encode(header, claims, &EncodingKey::from_secret(secret))
        .map_err(|e| AppError::internal(format!("Failed to sign token: {}", e)))
}

async fn hash_password(plain: String) -> AppResult<Password> {
    let password = tokio::task::spawn_blocking(move || Password::new(&plain))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))??;
    Ok(password)
}

async fn verify_password(stored: Password, plain: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || stored.verify(&plain))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {}", e)))
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User> {
        let registration = validate_register_input(&name, &email, &password)?;

        if self
            .user_repo
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(ErrorCode::DuplicateEmail, "Email already exists").into());
        }

        let password_hash = hash_password(registration.password).await?.into_string();

        let user = self
            .user_repo
            .create(registration.name, registration.email, password_hash)
            .await?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginOutcome> {
        let email = validate_login_input(&email, &password)?;

        let credentials = self.user_repo.find_by_email_with_password(&email).await?;

        // Verify even when the account is missing so response timing does
        // not reveal which emails are registered.
        let (user, stored) = match credentials {
            Some(creds) => (Some(creds.user), creds.password),
            None => (None, Password::from_hash(DUMMY_HASH)),
        };
        let password_valid = verify_password(stored, password).await?;

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                debug!("Rejected login attempt");
                return Err(DomainError::invalid_credentials().into());
            }
        };

        let token = self.generate_token(&user)?;
        let is_admin = user.is_admin();
        info!(user_id = %user.id, "User logged in");

        Ok(LoginOutcome {
            user,
            token,
            is_admin,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("Token rejected: {}", e);
            AppError::unauthorized("INVALID_TOKEN", "Invalid or expired token")
        })
    }
}
