use std::sync::{Arc, Mutex};

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use common::AppError;
use domain::{NewSweet, Sweet, SweetInput, SweetSearch, UserRole, MAX_QUANTITY};

use super::{SweetManager, SweetService};
use crate::repository::MockSweetRepository;

fn sweet(name: &str, quantity: i64) -> Sweet {
    let now = Utc::now();
    Sweet {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: "Indian".to_string(),
        price: 25.5,
        quantity,
        created_at: now,
        updated_at: now,
    }
}

fn with_quantity(mut sweet: Sweet, quantity: i64) -> Sweet {
    sweet.quantity = quantity;
    sweet
}

fn input(name: &str, category: &str, price: f64, quantity: f64) -> SweetInput {
    SweetInput {
        name: Some(name.to_string()),
        category: Some(category.to_string()),
        price: Some(price),
        quantity: Some(quantity),
    }
}

fn service(repo: MockSweetRepository) -> SweetManager {
    SweetManager::new(Arc::new(repo))
}

fn created_from(new: NewSweet) -> Sweet {
    let now = Utc::now();
    Sweet {
        id: Uuid::new_v4(),
        name: new.name,
        category: new.category,
        price: new.price,
        quantity: new.quantity,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// add_sweet
// =============================================================================

#[tokio::test]
async fn test_add_sweet_trims_and_creates() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_name()
        .with(eq("Gulab Jamun"))
        .times(1)
        .returning(|_| Ok(None));
    repo.expect_create()
        .times(1)
        .returning(|new| Ok(created_from(new)));

    let created = service(repo)
        .add_sweet(input("  Gulab Jamun ", " Indian ", 25.5, 100.0))
        .await
        .unwrap();

    assert_eq!(created.name, "Gulab Jamun");
    assert_eq!(created.category, "Indian");
    assert_eq!(created.price, 25.5);
    assert_eq!(created.quantity, 100);
}

#[tokio::test]
async fn test_add_sweet_rejects_name_differing_only_in_case() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_name()
        .with(eq("GULAB JAMUN"))
        .returning(|_| Ok(Some(sweet("Gulab Jamun", 100))));
    repo.expect_create().times(0);

    let err = service(repo)
        .add_sweet(input("GULAB JAMUN", "Indian", 25.5, 100.0))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
    assert_eq!(err.code(), "DUPLICATE_SWEET");
}

#[tokio::test]
async fn test_add_sweet_validation_never_reaches_repository() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_name().times(0);
    repo.expect_create().times(0);
    let svc = service(repo);

    let err = svc
        .add_sweet(input("Ladoo", "Indian", -1.0, 10.0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "NEGATIVE_PRICE");

    let err = svc
        .add_sweet(input("Ladoo", "Indian", 1.0, 2.5))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_QUANTITY");
}

#[tokio::test]
async fn test_add_sweet_allows_zero_quantity() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_name().returning(|_| Ok(None));
    repo.expect_create().returning(|new| Ok(created_from(new)));

    let created = service(repo)
        .add_sweet(input("Kaju Katli", "Indian", 40.0, 0.0))
        .await
        .unwrap();
    assert_eq!(created.quantity, 0);
}

// =============================================================================
// update_sweet
// =============================================================================

#[tokio::test]
async fn test_update_sweet_not_found() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_update().times(0);

    let err = service(repo)
        .update_sweet(&Uuid::new_v4().to_string(), SweetInput::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { .. }));
    assert_eq!(err.code(), "SWEET_NOT_FOUND");
}

#[tokio::test]
async fn test_update_sweet_without_fields_returns_existing() {
    let existing = sweet("Barfi", 10);
    let id = existing.id;
    let returned = existing.clone();

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .with(eq(id))
        .returning(move |_| Ok(Some(returned.clone())));
    repo.expect_update().times(0);

    let result = service(repo)
        .update_sweet(&id.to_string(), SweetInput::default())
        .await
        .unwrap();
    assert_eq!(result, existing);
}

#[tokio::test]
async fn test_update_sweet_conflicts_with_other_sweet_name() {
    let existing = sweet("Barfi", 10);
    let id = existing.id;

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_find_by_name()
        .with(eq("Ladoo"))
        .returning(|_| Ok(Some(sweet("ladoo", 3))));
    repo.expect_update().times(0);

    let err = service(repo)
        .update_sweet(
            &id.to_string(),
            SweetInput {
                name: Some("Ladoo".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_SWEET");
}

#[tokio::test]
async fn test_update_sweet_may_keep_its_own_name() {
    let existing = sweet("Barfi", 10);
    let id = existing.id;
    let same = existing.clone();
    let found_by_name = existing.clone();

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(same.clone())));
    repo.expect_find_by_name()
        .returning(move |_| Ok(Some(found_by_name.clone())));
    repo.expect_update()
        .withf(move |uid, changes| {
            *uid == id && changes.name.as_deref() == Some("BARFI") && changes.price == Some(12.0)
        })
        .times(1)
        .returning(move |_, changes| {
            let mut updated = existing.clone();
            updated.name = changes.name.unwrap();
            updated.price = changes.price.unwrap();
            Ok(Some(updated))
        });

    let updated = service(repo)
        .update_sweet(
            &id.to_string(),
            SweetInput {
                name: Some(" BARFI ".into()),
                price: Some(12.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "BARFI");
    assert_eq!(updated.price, 12.0);
}

#[tokio::test]
async fn test_update_sweet_rejects_empty_name() {
    let existing = sweet("Barfi", 10);
    let id = existing.id;

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_update().times(0);

    let err = service(repo)
        .update_sweet(
            &id.to_string(),
            SweetInput {
                name: Some("".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_NAME");
}

// =============================================================================
// delete_sweet
// =============================================================================

#[tokio::test]
async fn test_delete_sweet_as_user_is_forbidden_without_touching_repository() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().times(0);
    repo.expect_delete().times(0);

    let svc = service(repo);
    for id in [Uuid::new_v4().to_string(), "garbage".to_string(), String::new()] {
        let err = svc.delete_sweet(&id, UserRole::User).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
        assert_eq!(err.code(), "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_delete_sweet_not_found() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_delete().times(0);

    let err = service(repo)
        .delete_sweet(&Uuid::new_v4().to_string(), UserRole::Admin)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SWEET_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_sweet_invalid_id() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().times(0);

    let err = service(repo)
        .delete_sweet("not-a-uuid", UserRole::Admin)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_ID");
}

#[tokio::test]
async fn test_delete_sweet_reports_store_failure() {
    let existing = sweet("Jalebi", 4);
    let id = existing.id;

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_delete().with(eq(id)).returning(|_| Ok(false));

    let err = service(repo)
        .delete_sweet(&id.to_string(), UserRole::Admin)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "DELETE_FAILED");
    assert_eq!(err.status().as_u16(), 500);
}

#[tokio::test]
async fn test_delete_sweet_as_admin() {
    let existing = sweet("Jalebi", 4);
    let id = existing.id;

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_delete().with(eq(id)).times(1).returning(|_| Ok(true));

    let outcome = service(repo)
        .delete_sweet(&id.to_string(), UserRole::Admin)
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.message, "Sweet deleted successfully");
    assert_eq!(outcome.deleted.id, id);
    assert_eq!(outcome.deleted.name, "Jalebi");
}

// =============================================================================
// purchase
// =============================================================================

#[tokio::test]
async fn test_purchase_beyond_stock_never_updates() {
    let existing = sweet("Rasgulla", 50);
    let id = existing.id;

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_update_quantity().times(0);

    let err = service(repo)
        .purchase(&id.to_string(), Some(60.0))
        .await
        .unwrap_err();

    assert_eq!(err.code(), "INSUFFICIENT_STOCK");
    assert_eq!(err.status().as_u16(), 400);
    assert!(err.to_string().contains("50"));
}

#[tokio::test]
async fn test_purchase_entire_stock_leaves_zero() {
    let existing = sweet("Rasgulla", 50);
    let id = existing.id;
    let stored = existing.clone();

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_quantity()
        .with(eq(id), eq(0_i64))
        .times(1)
        .returning(move |_, q| Ok(Some(with_quantity(existing.clone(), q))));

    let outcome = service(repo)
        .purchase(&id.to_string(), Some(50.0))
        .await
        .unwrap();

    assert_eq!(outcome.purchased, 50);
    assert_eq!(outcome.remaining, 0);
    assert_eq!(outcome.sweet.quantity, 0);
}

#[tokio::test]
async fn test_purchase_validates_quantity_before_lookup() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().times(0);
    let svc = service(repo);
    let id = Uuid::new_v4().to_string();

    for bad in [None, Some(0.0), Some(-3.0), Some(1.5), Some(f64::NAN)] {
        let err = svc.purchase(&id, bad).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_QUANTITY");
    }
}

#[tokio::test]
async fn test_purchase_missing_sweet() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_update_quantity().times(0);

    let err = service(repo)
        .purchase(&Uuid::new_v4().to_string(), Some(1.0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SWEET_NOT_FOUND");
}

// =============================================================================
// restock
// =============================================================================

#[tokio::test]
async fn test_restock_as_admin_adds_to_stock() {
    let existing = sweet("Peda", 20);
    let id = existing.id;
    let stored = existing.clone();

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_quantity()
        .with(eq(id), eq(50_i64))
        .times(1)
        .returning(move |_, q| Ok(Some(with_quantity(existing.clone(), q))));

    let outcome = service(repo)
        .restock(&id.to_string(), Some(30.0), UserRole::Admin)
        .await
        .unwrap();

    assert_eq!(outcome.added, 30);
    assert_eq!(outcome.previous_quantity, 20);
    assert_eq!(outcome.new_quantity, 50);
    assert_eq!(outcome.sweet.quantity, 50);
}

#[tokio::test]
async fn test_restock_as_user_is_forbidden_before_validation() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().times(0);
    repo.expect_update_quantity().times(0);

    let err = service(repo)
        .restock("whatever", Some(-1.0), UserRole::User)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "FORBIDDEN");
}

#[tokio::test]
async fn test_restock_non_positive_never_looks_up() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().times(0);
    let svc = service(repo);
    let id = Uuid::new_v4().to_string();

    for bad in [Some(0.0), Some(-1.0)] {
        let err = svc.restock(&id, bad, UserRole::Admin).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_QUANTITY");
    }
}

#[tokio::test]
async fn test_restock_past_max_quantity_never_persists() {
    let max = MAX_QUANTITY as i64;
    let existing = sweet("Kaju Katli", max);
    let id = existing.id;

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(existing.clone())));
    repo.expect_update_quantity().times(0);

    let err = service(repo)
        .restock(&id.to_string(), Some(1.0), UserRole::Admin)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_QUANTITY");
}

#[tokio::test]
async fn test_restock_up_to_max_quantity() {
    let max = MAX_QUANTITY as i64;
    let existing = sweet("Kaju Katli", max - 1);
    let id = existing.id;
    let stored = existing.clone();

    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_quantity()
        .with(eq(id), eq(max))
        .times(1)
        .returning(move |_, q| Ok(Some(with_quantity(existing.clone(), q))));

    let outcome = service(repo)
        .restock(&id.to_string(), Some(1.0), UserRole::Admin)
        .await
        .unwrap();
    assert_eq!(outcome.new_quantity, max);
}

#[tokio::test]
async fn test_restock_missing_sweet() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let err = service(repo)
        .restock(&Uuid::new_v4().to_string(), Some(5.0), UserRole::Admin)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SWEET_NOT_FOUND");
}

#[tokio::test]
async fn test_purchase_then_restock_restores_quantity() {
    let original = sweet("Sandesh", 37);
    let id = original.id;
    let stock = Arc::new(Mutex::new(original.clone()));

    let mut repo = MockSweetRepository::new();
    let reader = Arc::clone(&stock);
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(reader.lock().unwrap().clone())));
    let writer = Arc::clone(&stock);
    repo.expect_update_quantity().returning(move |_, q| {
        let mut current = writer.lock().unwrap();
        current.quantity = q;
        Ok(Some(current.clone()))
    });

    let svc = service(repo);
    let bought = svc.purchase(&id.to_string(), Some(12.0)).await.unwrap();
    assert_eq!(bought.remaining, 25);

    let restocked = svc
        .restock(&id.to_string(), Some(12.0), UserRole::Admin)
        .await
        .unwrap();
    assert_eq!(restocked.new_quantity, original.quantity);
}

// =============================================================================
// list_all / search
// =============================================================================

#[tokio::test]
async fn test_list_all_counts_results() {
    let mut repo = MockSweetRepository::new();
    repo.expect_find_all()
        .returning(|| Ok(vec![sweet("A1", 1), sweet("B2", 2)]));

    let list = service(repo).list_all().await.unwrap();
    assert_eq!(list.count, 2);
    assert_eq!(list.sweets.len(), 2);
}

#[tokio::test]
async fn test_search_passes_sanitized_filter() {
    let mut repo = MockSweetRepository::new();
    repo.expect_search()
        .withf(|filter| {
            filter.name.is_none()
                && filter.category.as_deref() == Some("Indian")
                && filter.min_price == Some(10.0)
                && filter.max_price == Some(30.0)
        })
        .times(1)
        .returning(|_| Ok(vec![sweet("Ladoo", 8)]));

    let list = service(repo)
        .search(SweetSearch {
            name: Some("   ".into()),
            category: Some(" Indian ".into()),
            min_price: Some(10.0),
            max_price: Some(30.0),
        })
        .await
        .unwrap();
    assert_eq!(list.count, 1);
}

#[tokio::test]
async fn test_search_rejects_inverted_range() {
    let mut repo = MockSweetRepository::new();
    repo.expect_search().times(0);

    let err = service(repo)
        .search(SweetSearch {
            min_price: Some(30.0),
            max_price: Some(10.0),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_PRICE_RANGE");
}
