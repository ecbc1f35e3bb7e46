//! Sweet service - Catalog and stock business rules.
//!
//! Every operation validates before it reads and reads before it writes.
//! Admin-only operations check the role before anything else.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppResult, OptionExt};
use domain::validation::{
    validate_inventory_quantity, validate_search_query, validate_sweet_id, validate_sweet_input,
    validate_sweet_update_input,
};
use domain::{
    DeleteOutcome, DeletedSweet, DomainError, ErrorCode, PurchaseOutcome, RestockOutcome, Sweet,
    SweetInput, SweetList, SweetSearch, UserRole, MAX_QUANTITY,
};

use crate::repository::SweetRepository;

const SWEET_NOT_FOUND: &str = "Sweet not found";

/// Sweet service trait for dependency injection.
#[async_trait]
pub trait SweetService: Send + Sync {
    /// Add a new sweet to the catalog
    async fn add_sweet(&self, input: SweetInput) -> AppResult<Sweet>;

    /// Update the supplied fields of an existing sweet
    async fn update_sweet(&self, id: &str, input: SweetInput) -> AppResult<Sweet>;

    /// Remove a sweet (admin only)
    async fn delete_sweet(&self, id: &str, role: UserRole) -> AppResult<DeleteOutcome>;

    /// Take stock out
    async fn purchase(&self, id: &str, quantity: Option<f64>) -> AppResult<PurchaseOutcome>;

    /// Put stock back in (admin only)
    async fn restock(
        &self,
        id: &str,
        quantity: Option<f64>,
        role: UserRole,
    ) -> AppResult<RestockOutcome>;

    /// Every sweet in the catalog
    async fn list_all(&self) -> AppResult<SweetList>;

    /// Sweets matching the given filters
    async fn search(&self, query: SweetSearch) -> AppResult<SweetList>;
}

/// Concrete implementation of SweetService using repository.
pub struct SweetManager {
    repo: Arc<dyn SweetRepository>,
}

impl SweetManager {
    /// Create new sweet service instance with repository
    pub fn new(repo: Arc<dyn SweetRepository>) -> Self {
        Self { repo }
    }

    async fn find_existing(&self, id: uuid::Uuid) -> AppResult<Sweet> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_not_found(ErrorCode::SweetNotFound, SWEET_NOT_FOUND)
    }
}

fn duplicate_name() -> DomainError {
    DomainError::conflict(ErrorCode::DuplicateSweet, "Sweet with this name already exists")
}

fn require_admin(role: UserRole, action: &str) -> Result<(), DomainError> {
    if role.is_admin() {
        return Ok(());
    }
    warn!(%role, "Rejected admin-only {}", action);
    Err(DomainError::forbidden(format!("Only admins can {} sweets", action)))
}

#[async_trait]
impl SweetService for SweetManager {
    async fn add_sweet(&self, input: SweetInput) -> AppResult<Sweet> {
        let new_sweet = validate_sweet_input(&input)?;

        if self.repo.find_by_name(&new_sweet.name).await?.is_some() {
            return Err(duplicate_name().into());
        }

        let sweet = self.repo.create(new_sweet).await?;
        info!(sweet_id = %sweet.id, name = %sweet.name, "Sweet added");
        Ok(sweet)
    }

    async fn update_sweet(&self, id: &str, input: SweetInput) -> AppResult<Sweet> {
        let id = validate_sweet_id(id)?;
        let existing = self.find_existing(id).await?;

        let changes = validate_sweet_update_input(&input)?;

        if let Some(name) = &changes.name {
            if let Some(other) = self.repo.find_by_name(name).await? {
                if other.id != existing.id {
                    return Err(duplicate_name().into());
                }
            }
        }

        if changes.is_empty() {
            debug!(sweet_id = %id, "Update with no fields, nothing to persist");
            return Ok(existing);
        }

        let sweet = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_not_found(ErrorCode::SweetNotFound, SWEET_NOT_FOUND)?;
        info!(sweet_id = %sweet.id, "Sweet updated");
        Ok(sweet)
    }

    async fn delete_sweet(&self, id: &str, role: UserRole) -> AppResult<DeleteOutcome> {
        require_admin(role, "delete")?;

        let id = validate_sweet_id(id)?;
        let existing = self.find_existing(id).await?;

        if !self.repo.delete(id).await? {
            return Err(
                DomainError::operation(ErrorCode::DeleteFailed, "Failed to delete sweet").into(),
            );
        }

        info!(sweet_id = %id, name = %existing.name, "Sweet deleted");
        Ok(DeleteOutcome {
            success: true,
            message: "Sweet deleted successfully".to_string(),
            deleted: DeletedSweet {
                id: existing.id,
                name: existing.name,
            },
        })
    }

    async fn purchase(&self, id: &str, quantity: Option<f64>) -> AppResult<PurchaseOutcome> {
        let requested = validate_inventory_quantity(quantity)?;
        let id = validate_sweet_id(id)?;
        let existing = self.find_existing(id).await?;

        if requested > existing.quantity {
            return Err(DomainError::validation(
                ErrorCode::InsufficientStock,
                format!("Insufficient stock. Only {} available", existing.quantity),
            )
            .into());
        }

        let remaining = existing.quantity - requested;
        let sweet = self
            .repo
            .update_quantity(id, remaining)
            .await?
            .ok_or_not_found(ErrorCode::SweetNotFound, SWEET_NOT_FOUND)?;

        info!(sweet_id = %id, purchased = requested, remaining, "Sweet purchased");
        Ok(PurchaseOutcome {
            sweet,
            purchased: requested,
            remaining,
        })
    }

    async fn restock(
        &self,
        id: &str,
        quantity: Option<f64>,
        role: UserRole,
    ) -> AppResult<RestockOutcome> {
        require_admin(role, "restock")?;

        let added = validate_inventory_quantity(quantity)?;
        let id = validate_sweet_id(id)?;
        let existing = self.find_existing(id).await?;

        let previous_quantity = existing.quantity;
        let new_quantity = previous_quantity
            .checked_add(added)
            .filter(|total| *total as f64 <= MAX_QUANTITY)
            .ok_or_else(|| {
                DomainError::validation(ErrorCode::InvalidQuantity, "Quantity is too large")
            })?;

        let sweet = self
            .repo
            .update_quantity(id, new_quantity)
            .await?
            .ok_or_not_found(ErrorCode::SweetNotFound, SWEET_NOT_FOUND)?;

        info!(sweet_id = %id, added, new_quantity, "Sweet restocked");
        Ok(RestockOutcome {
            sweet,
            added,
            previous_quantity,
            new_quantity,
        })
    }

    async fn list_all(&self) -> AppResult<SweetList> {
        Ok(SweetList::from(self.repo.find_all().await?))
    }

    async fn search(&self, query: SweetSearch) -> AppResult<SweetList> {
        let filter = validate_search_query(&query)?;
        debug!(?filter, "Searching sweets");
        Ok(SweetList::from(self.repo.search(&filter).await?))
    }
}
