//! Sweet domain entity, inputs and operation outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Sweet {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw create/update payload as received from a caller.
///
/// Every field is optional so that the validator, not the deserializer,
/// decides which rule was broken. Quantity is read as a number so that
/// fractional values can be rejected with their own code.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct SweetInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
}

/// Validated, trimmed fields for a new sweet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSweet {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
}

/// Validated partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i64>,
}

impl SweetChanges {
    /// True when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
    }
}

/// Raw search query.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(default, rename_all = "camelCase")]
pub struct SweetSearch {
    /// Substring of the name, case-insensitive
    pub name: Option<String>,
    /// Exact category, case-insensitive
    pub category: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
}

/// Sanitized search filter handed to the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweetFilter {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Body of purchase and restock requests.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct InventoryRequest {
    pub quantity: Option<f64>,
}

/// All matching sweets and their count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SweetList {
    pub sweets: Vec<Sweet>,
    pub count: usize,
}

impl From<Vec<Sweet>> for SweetList {
    fn from(sweets: Vec<Sweet>) -> Self {
        let count = sweets.len();
        Self { sweets, count }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PurchaseOutcome {
    pub sweet: Sweet,
    pub purchased: i64,
    pub remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RestockOutcome {
    pub sweet: Sweet,
    pub added: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeletedSweet {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
    pub deleted: DeletedSweet,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(quantity: i64) -> Sweet {
        let now = Utc::now();
        Sweet {
            id: Uuid::new_v4(),
            name: "Ladoo".to_string(),
            category: "Indian".to_string(),
            price: 10.0,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_list_count_matches_len() {
        let list = SweetList::from(vec![sample(1), sample(2), sample(3)]);
        assert_eq!(list.count, 3);
        assert_eq!(list.sweets.len(), 3);
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(SweetChanges::default().is_empty());
        let changes = SweetChanges {
            price: Some(1.0),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_restock_outcome_uses_camel_case() {
        let outcome = RestockOutcome {
            sweet: sample(50),
            added: 30,
            previous_quantity: 20,
            new_quantity: 50,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["previousQuantity"], 20);
        assert_eq!(json["newQuantity"], 50);
        assert_eq!(json["sweet"]["quantity"], 50);
    }

    #[test]
    fn test_input_accepts_partial_body() {
        let input: SweetInput = serde_json::from_str(r#"{"price": 3.5}"#).unwrap();
        assert_eq!(input.price, Some(3.5));
        assert!(input.name.is_none());
        assert!(input.quantity.is_none());
    }

    #[test]
    fn test_search_reads_camel_case() {
        let search: SweetSearch =
            serde_json::from_str(r#"{"minPrice": 1, "maxPrice": 9.5}"#).unwrap();
        assert_eq!(search.min_price, Some(1.0));
        assert_eq!(search.max_price, Some(9.5));
    }
}
