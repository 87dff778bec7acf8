//! Category soft-delete handler tests against the in-memory store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use clinic_commerce_api::db::{CommerceStore, MemoryStore};
use clinic_commerce_api::error::AppError;
use clinic_commerce_api::handlers::{CommandHandler, DeleteCategoryCommand, DeleteCategoryHandler};
use clinic_commerce_core::CategoryId;

fn handler(store: &MemoryStore) -> DeleteCategoryHandler {
    DeleteCategoryHandler::new(Arc::new(store.clone()))
}

#[tokio::test]
async fn missing_category_returns_not_found_without_writing() {
    let store = MemoryStore::new();
    let seeded = store.seed_category("Supplements").await;

    let result = handler(&store)
        .handle(DeleteCategoryCommand {
            id: CategoryId::new(999),
            status: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    // the only category is untouched
    let unchanged = store.find_category(seeded.id).await.unwrap().unwrap();
    assert!(!unchanged.is_deleted);
}

#[tokio::test]
async fn existing_category_is_flagged_and_id_returned() {
    let store = MemoryStore::new();
    let seeded = store.seed_category("Supplements").await;

    let id = handler(&store)
        .handle(DeleteCategoryCommand {
            id: seeded.id,
            status: None,
        })
        .await
        .unwrap();

    assert_eq!(id, seeded.id);
    let deleted = store.find_category(seeded.id).await.unwrap().unwrap();
    assert!(deleted.is_deleted);

    // deleted categories drop out of the active listing
    assert!(store.list_active_categories().await.unwrap().is_empty());
}

#[tokio::test]
async fn repeated_delete_is_idempotent_in_effect() {
    let store = MemoryStore::new();
    let seeded = store.seed_category("Supplements").await;
    let handler = handler(&store);

    let first = handler
        .handle(DeleteCategoryCommand {
            id: seeded.id,
            status: None,
        })
        .await
        .unwrap();
    let second = handler
        .handle(DeleteCategoryCommand {
            id: seeded.id,
            status: None,
        })
        .await
        .unwrap();

    assert_eq!(first, second);
    let category = store.find_category(seeded.id).await.unwrap().unwrap();
    assert!(category.is_deleted);
}
