//! Category soft delete.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use clinic_commerce_core::{CategoryId, EntityStatus};

use super::CommandHandler;
use crate::db::CommerceStore;
use crate::error::AppError;

/// Soft-delete a category by id.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCategoryCommand {
    pub id: CategoryId,
    /// Accepted with the request but not consulted by the delete.
    #[serde(default)]
    pub status: Option<EntityStatus>,
}

/// Handler for [`DeleteCategoryCommand`].
pub struct DeleteCategoryHandler {
    store: Arc<dyn CommerceStore>,
}

impl DeleteCategoryHandler {
    /// Create a new handler.
    #[must_use]
    pub fn new(store: Arc<dyn CommerceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommandHandler<DeleteCategoryCommand> for DeleteCategoryHandler {
    type Output = CategoryId;

    /// Flags the category as deleted and returns its id.
    ///
    /// Deletion is one-way and logical only; no dependent rows are touched.
    /// Deleting an already-deleted category succeeds again with the flag
    /// unchanged.
    async fn handle(&self, command: DeleteCategoryCommand) -> Result<CategoryId, AppError> {
        let Some(category) = self.store.find_category(command.id).await? else {
            return Err(AppError::NotFound(format!("category {}", command.id)));
        };

        self.store.set_category_deleted(category.id).await?;
        tracing::info!(category_id = %category.id, "category soft-deleted");

        Ok(category.id)
    }
}
