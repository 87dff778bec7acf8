//! In-memory [`CommerceStore`] implementation for testing.
//!
//! Stores all rows in memory behind an async `RwLock` and provides the same
//! contract as the `PostgreSQL` implementation, including atomic order
//! placement (the write lock spans the whole operation).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use clinic_commerce_core::{
    CategoryId, CustomerId, Gender, OrderId, OrderItemId, OrderNumber, ProductItemId,
};

use super::RepositoryError;
use super::store::CommerceStore;
use crate::models::{
    Category, Customer, CustomerSelector, Order, OrderDraft, OrderItem, OrderWithItems,
    PlacedOrder, ProductItem,
};

#[derive(Default)]
struct Inner {
    customers: Vec<Customer>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    product_items: Vec<ProductItem>,
    categories: Vec<Category>,
    next_customer_id: i32,
    next_order_id: i32,
    next_order_item_id: i32,
    next_product_item_id: i32,
    next_category_id: i32,
}

/// In-memory commerce store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product item, returning the stored row.
    pub async fn seed_product_item(&self, name: &str, price: Decimal, unit: &str) -> ProductItem {
        let mut inner = self.inner.write().await;
        inner.next_product_item_id += 1;
        let item = ProductItem {
            id: ProductItemId::new(inner.next_product_item_id),
            name: name.to_owned(),
            price,
            unit: unit.to_owned(),
        };
        inner.product_items.push(item.clone());
        item
    }

    /// Seed a category, returning the stored row.
    pub async fn seed_category(&self, name: &str) -> Category {
        let mut inner = self.inner.write().await;
        inner.next_category_id += 1;
        let category = Category {
            id: CategoryId::new(inner.next_category_id),
            name: name.to_owned(),
            is_deleted: false,
        };
        inner.categories.push(category.clone());
        category
    }

    /// Seed a customer with contact fields only, returning the stored row.
    pub async fn seed_customer(
        &self,
        phone: &str,
        email: Option<&str>,
        full_name: &str,
    ) -> Customer {
        let mut inner = self.inner.write().await;
        inner.next_customer_id += 1;
        let customer = Customer {
            id: CustomerId::new(inner.next_customer_id),
            uid: Uuid::new_v4(),
            phone: phone.to_owned(),
            email: email.map(ToOwned::to_owned),
            full_name: full_name.to_owned(),
            first_name: full_name.to_owned(),
            gender: Gender::default(),
            password_hash: None,
            created_at: Utc::now(),
        };
        inner.customers.push(customer.clone());
        customer
    }

    /// Snapshot of all customer rows.
    pub async fn customers(&self) -> Vec<Customer> {
        self.inner.read().await.customers.clone()
    }
}

#[async_trait]
impl CommerceStore for MemoryStore {
    async fn product_items_by_ids(
        &self,
        ids: &[ProductItemId],
    ) -> Result<Vec<ProductItem>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .product_items
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list_product_items(&self) -> Result<Vec<ProductItem>, RepositoryError> {
        Ok(self.inner.read().await.product_items.clone())
    }

    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .customers
            .iter()
            .find(|c| c.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_customer_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.customers.iter().find(|c| c.phone == phone).cloned())
    }

    async fn place_order(&self, draft: OrderDraft) -> Result<PlacedOrder, RepositoryError> {
        let mut inner = self.inner.write().await;

        let customer_id = match draft.customer {
            CustomerSelector::Existing(id) => id,
            CustomerSelector::New(new) => {
                inner.next_customer_id += 1;
                let id = CustomerId::new(inner.next_customer_id);
                inner.customers.push(Customer {
                    id,
                    uid: new.uid,
                    phone: new.phone,
                    email: new.email,
                    full_name: new.full_name,
                    first_name: new.first_name,
                    gender: new.gender,
                    password_hash: Some(new.password_hash),
                    created_at: Utc::now(),
                });
                id
            }
        };

        let now = Utc::now();
        inner.next_order_id += 1;
        let order_id = OrderId::new(inner.next_order_id);
        let order_no = OrderNumber::compose(i64::from(inner.next_order_id), now);

        inner.orders.push(Order {
            id: order_id,
            order_no: order_no.clone(),
            status: draft.status,
            total_price: draft.total_price,
            customer_id,
            address_line: draft.address_line,
            remarks: draft.remarks,
            created_at: now,
        });

        for line in draft.lines {
            inner.next_order_item_id += 1;
            let item_id = OrderItemId::new(inner.next_order_item_id);
            inner.order_items.push(OrderItem {
                id: item_id,
                order_id,
                product_item_id: line.product_item_id,
                name: line.name,
                price: line.price,
                quantity: line.quantity,
                total_price: line.total_price,
            });
        }

        Ok(PlacedOrder {
            id: order_id,
            order_no,
            customer_id,
        })
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<OrderWithItems>, RepositoryError> {
        let inner = self.inner.read().await;
        let Some(order) = inner.orders.iter().find(|o| o.id == id).cloned() else {
            return Ok(None);
        };
        let items = inner
            .order_items
            .iter()
            .filter(|i| i.order_id == id)
            .cloned()
            .collect();

        Ok(Some(OrderWithItems { order, items }))
    }

    async fn list_orders(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let inner = self.inner.read().await;
        let mut orders = inner.orders.clone();
        orders.sort_by(|a, b| b.id.as_i32().cmp(&a.id.as_i32()));
        orders.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(orders)
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn set_category_deleted(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        if let Some(category) = inner.categories.iter_mut().find(|c| c.id == id) {
            category.is_deleted = true;
        }
        Ok(())
    }

    async fn list_active_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let inner = self.inner.read().await;
        Ok(inner
            .categories
            .iter()
            .filter(|c| !c.is_deleted)
            .cloned()
            .collect())
    }
}
