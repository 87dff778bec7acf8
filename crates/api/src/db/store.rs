//! The storage contract handlers and routes are written against.

use async_trait::async_trait;

use clinic_commerce_core::{CategoryId, CustomerId, OrderId, ProductItemId};

use super::RepositoryError;
use crate::models::{
    Category, Customer, Order, OrderDraft, OrderWithItems, PlacedOrder, ProductItem,
};

/// Queryable access to the commerce tables plus atomic order placement.
///
/// All implementations must be thread-safe (`Send + Sync`). Multi-row writes
/// commit as one unit: [`CommerceStore::place_order`] persists the order, its
/// lines, and a provisionally created customer in a single transaction.
#[async_trait]
pub trait CommerceStore: Send + Sync {
    /// Fetch the catalog items matching `ids`. Unknown ids are simply absent
    /// from the result; callers decide what that means.
    async fn product_items_by_ids(
        &self,
        ids: &[ProductItemId],
    ) -> Result<Vec<ProductItem>, RepositoryError>;

    /// List the whole product catalog.
    async fn list_product_items(&self) -> Result<Vec<ProductItem>, RepositoryError>;

    /// Fetch a customer by id.
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Fetch the first customer with this email address.
    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Fetch the first customer with this phone number.
    async fn find_customer_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Persist a resolved order draft atomically.
    ///
    /// Assigns the order id and composes the order number from it inside the
    /// same transaction, so concurrent placements cannot collide on numbers.
    async fn place_order(&self, draft: OrderDraft) -> Result<PlacedOrder, RepositoryError>;

    /// Fetch an order and its lines.
    async fn get_order(&self, id: OrderId) -> Result<Option<OrderWithItems>, RepositoryError>;

    /// List the most recent orders, newest first.
    async fn list_orders(&self, limit: i64) -> Result<Vec<Order>, RepositoryError>;

    /// Fetch a category by id, deleted or not.
    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;

    /// Flag a category as deleted. Idempotent.
    async fn set_category_deleted(&self, id: CategoryId) -> Result<(), RepositoryError>;

    /// List categories that have not been soft-deleted.
    async fn list_active_categories(&self) -> Result<Vec<Category>, RepositoryError>;
}
