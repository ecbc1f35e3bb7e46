//! Sweet repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::sweet::{self, ActiveModel, Entity as SweetEntity};
use common::{AppError, AppResult};
use domain::{NewSweet, Sweet, SweetChanges, SweetFilter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Sweet repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SweetRepository: Send + Sync {
    /// Find a sweet whose name equals `name` ignoring case
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Sweet>>;

    /// Find sweet by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Sweet>>;

    /// List every sweet, oldest first
    async fn find_all(&self) -> AppResult<Vec<Sweet>>;

    /// List sweets matching a sanitized filter
    async fn search(&self, filter: &SweetFilter) -> AppResult<Vec<Sweet>>;

    /// Insert a new sweet
    async fn create(&self, sweet: NewSweet) -> AppResult<Sweet>;

    /// Apply supplied fields. `None` if the sweet is gone.
    async fn update(&self, id: Uuid, changes: SweetChanges) -> AppResult<Option<Sweet>>;

    /// Delete by ID. `false` if nothing was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Overwrite the stock level. `None` if the sweet is gone.
    async fn update_quantity(&self, id: Uuid, quantity: i64) -> AppResult<Option<Sweet>>;
}

/// Concrete implementation of SweetRepository
pub struct SweetStore {
    db: Arc<DatabaseConnection>,
}

impl SweetStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<Option<sweet::Model>> {
        SweetEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)
    }
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn lower_name() -> Expr {
    Expr::expr(Func::lower(Expr::col(sweet::Column::Name)))
}

fn lower_category() -> Expr {
    Expr::expr(Func::lower(Expr::col(sweet::Column::Category)))
}

#[async_trait]
impl SweetRepository for SweetStore {
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Sweet>> {
        let result = SweetEntity::find()
            .filter(lower_name().eq(name.to_lowercase()))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Sweet::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Sweet>> {
        Ok(self.find_model(id).await?.map(Sweet::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Sweet>> {
        let models = SweetEntity::find()
            .order_by_asc(sweet::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Sweet::from).collect())
    }

    async fn search(&self, filter: &SweetFilter) -> AppResult<Vec<Sweet>> {
        let mut query = SweetEntity::find();

        if let Some(name) = &filter.name {
            let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
            query = query.filter(lower_name().like(pattern));
        }
        if let Some(category) = &filter.category {
            query = query.filter(lower_category().eq(category.to_lowercase()));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(sweet::Column::Price.gte(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(sweet::Column::Price.lte(max));
        }

        let models = query
            .order_by_asc(sweet::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Sweet::from).collect())
    }

    async fn create(&self, sweet: NewSweet) -> AppResult<Sweet> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(sweet.name),
            category: Set(sweet.category),
            price: Set(sweet.price),
            quantity: Set(sweet.quantity),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(Sweet::from(model))
    }

    async fn update(&self, id: Uuid, changes: SweetChanges) -> AppResult<Option<Sweet>> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(quantity) = changes.quantity {
            active.quantity = Set(quantity);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(Some(Sweet::from(model)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = SweetEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn update_quantity(&self, id: Uuid, quantity: i64) -> AppResult<Option<Sweet>> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();
        active.quantity = Set(quantity);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(self.db.as_ref()).await.map_err(AppError::from)?;
        Ok(Some(Sweet::from(model)))
    }
}
