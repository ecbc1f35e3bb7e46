//! User repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{User, UserCredentials, ROLE_USER};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Emails are expected already normalized (trimmed, lowercased).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by email together with the stored password hash
    async fn find_by_email_with_password(&self, email: &str) -> AppResult<Option<UserCredentials>>;

    /// Create a new user with the `user` role
    async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email_with_password(&self, email: &str) -> AppResult<Option<UserCredentials>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(UserCredentials::from))
    }

    async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(ROLE_USER.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(AppError::from)?;
        tracing::debug!(user_id = %model.id, "User row inserted");
        Ok(User::from(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::UserRole;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn row(email: &str, role: &str) -> user::Model {
        let now = Utc::now();
        user::Model {
            id: Uuid::new_v4(),
            name: "John".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: role.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_email_maps_role() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("john@x.com", "admin")]])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let user = store.find_by_email("john@x.com").await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.email, "john@x.com");
    }

    #[tokio::test]
    async fn test_find_with_password_keeps_hash() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row("john@x.com", "user")]])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        let creds = store
            .find_by_email_with_password("john@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(creds.password.as_str(), "$argon2id$stub");
        assert_eq!(creds.user.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();
        let store = UserStore::new(Arc::new(db));

        assert!(store.find_by_email("nobody@x.com").await.unwrap().is_none());
    }
}
