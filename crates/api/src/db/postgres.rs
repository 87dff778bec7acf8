//! `PostgreSQL` implementation of [`CommerceStore`].
//!
//! Queries use the runtime sqlx API with internal row types converted via
//! `TryFrom`, so corrupt rows surface as `RepositoryError::DataCorruption`
//! instead of panics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use clinic_commerce_core::{
    CategoryId, CustomerId, Gender, OrderId, OrderItemId, OrderNumber, OrderStatus, ProductItemId,
};

use super::RepositoryError;
use super::store::CommerceStore;
use crate::models::{
    Category, Customer, CustomerSelector, Order, OrderDraft, OrderItem, OrderWithItems,
    PlacedOrder, ProductItem,
};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    uid: Uuid,
    phone: String,
    email: Option<String>,
    full_name: String,
    first_name: String,
    gender: String,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let gender: Gender = row.gender.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid gender in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            uid: row.uid,
            phone: row.phone,
            email: row.email,
            full_name: row.full_name,
            first_name: row.first_name,
            gender,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    order_no: Option<String>,
    status: String,
    total_price: Decimal,
    customer_id: i32,
    address_line: Option<String>,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        // order_no is only NULL inside the placement transaction; a committed
        // row without one is corrupt.
        let order_no = row.order_no.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("order {} has no order number", row.id))
        })?;
        let status: OrderStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            order_no: OrderNumber::from_string(order_no),
            status,
            total_price: row.total_price,
            customer_id: CustomerId::new(row.customer_id),
            address_line: row.address_line,
            remarks: row.remarks,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_item_id: i32,
    name: String,
    price: Decimal,
    quantity: i32,
    total_price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_item_id: ProductItemId::new(row.product_item_id),
            name: row.name,
            price: row.price,
            quantity: row.quantity,
            total_price: row.total_price,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductItemRow {
    id: i32,
    name: String,
    price: Decimal,
    unit: String,
}

impl From<ProductItemRow> for ProductItem {
    fn from(row: ProductItemRow) -> Self {
        Self {
            id: ProductItemId::new(row.id),
            name: row.name,
            price: row.price,
            unit: row.unit,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: i32,
    name: String,
    is_deleted: bool,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            is_deleted: row.is_deleted,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

const CUSTOMER_COLUMNS: &str =
    "id, uid, phone, email, full_name, first_name, gender, password_hash, created_at";
const ORDER_COLUMNS: &str =
    "id, order_no, status, total_price, customer_id, address_line, remarks, created_at";

/// `PostgreSQL`-backed commerce store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_customer_where(
        &self,
        condition: &str,
        value: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE {condition} ORDER BY id LIMIT 1"
        );
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }
}

#[async_trait]
impl CommerceStore for PgStore {
    async fn product_items_by_ids(
        &self,
        ids: &[ProductItemId],
    ) -> Result<Vec<ProductItem>, RepositoryError> {
        let raw_ids: Vec<i32> = ids.iter().map(ProductItemId::as_i32).collect();
        let rows = sqlx::query_as::<_, ProductItemRow>(
            "SELECT id, name, price, unit FROM product_items WHERE id = ANY($1) ORDER BY id",
        )
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_product_items(&self) -> Result<Vec<ProductItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductItemRow>(
            "SELECT id, name, price, unit FROM product_items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let sql = format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1");
        let row = sqlx::query_as::<_, CustomerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_customer_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        self.find_customer_where("email = $1", email).await
    }

    async fn find_customer_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<Customer>, RepositoryError> {
        self.find_customer_where("phone = $1", phone).await
    }

    async fn place_order(&self, draft: OrderDraft) -> Result<PlacedOrder, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let customer_id = match &draft.customer {
            CustomerSelector::Existing(id) => *id,
            CustomerSelector::New(new) => {
                let row = sqlx::query(
                    "INSERT INTO customers \
                         (uid, phone, email, full_name, first_name, gender, password_hash) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7) \
                     RETURNING id",
                )
                .bind(new.uid)
                .bind(&new.phone)
                .bind(&new.email)
                .bind(&new.full_name)
                .bind(&new.first_name)
                .bind(new.gender.to_string())
                .bind(&new.password_hash)
                .fetch_one(&mut *tx)
                .await?;

                CustomerId::new(row.try_get("id")?)
            }
        };

        let now = Utc::now();

        // order_no stays NULL until the id is known; both are written inside
        // this transaction.
        let row = sqlx::query(
            "INSERT INTO orders \
                 (order_no, status, total_price, customer_id, address_line, remarks, created_at) \
             VALUES (NULL, $1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(draft.status.to_string())
        .bind(draft.total_price)
        .bind(customer_id)
        .bind(&draft.address_line)
        .bind(&draft.remarks)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        let order_id: i32 = row.try_get("id")?;

        let order_no = OrderNumber::compose(i64::from(order_id), now);
        sqlx::query("UPDATE orders SET order_no = $1 WHERE id = $2")
            .bind(order_no.as_str())
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        for line in &draft.lines {
            sqlx::query(
                "INSERT INTO order_items \
                     (order_id, product_item_id, name, price, quantity, total_price) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(order_id)
            .bind(line.product_item_id)
            .bind(&line.name)
            .bind(line.price)
            .bind(line.quantity)
            .bind(line.total_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(PlacedOrder {
            id: OrderId::new(order_id),
            order_no,
            customer_id,
        })
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<OrderWithItems>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };
        let order: Order = row.try_into()?;

        let items = sqlx::query_as::<_, OrderItemRow>(
            "SELECT id, order_id, product_item_id, name, price, quantity, total_price \
             FROM order_items WHERE order_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(OrderWithItems {
            order,
            items: items.into_iter().map(Into::into).collect(),
        }))
    }

    async fn list_orders(&self, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id DESC LIMIT $1");
        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, is_deleted FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn set_category_deleted(&self, id: CategoryId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE categories SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_active_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, is_deleted FROM categories WHERE is_deleted = FALSE ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
