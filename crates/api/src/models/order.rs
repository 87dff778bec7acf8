//! Orders and order drafts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use clinic_commerce_core::{
    CustomerId, OrderId, OrderItemId, OrderNumber, OrderStatus, ProductItemId,
};

use super::customer::NewCustomer;

/// A persisted order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub order_no: OrderNumber,
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub customer_id: CustomerId,
    pub address_line: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A persisted order line.
///
/// `name` and `price` are snapshots of the product item at order time; later
/// catalog changes do not rewrite history.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_item_id: ProductItemId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}

/// An order together with its lines.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// The customer an order draft attaches to.
#[derive(Debug, Clone)]
pub enum CustomerSelector {
    /// Attach to an existing customer row.
    Existing(CustomerId),
    /// Provision this customer in the same transaction as the order.
    New(NewCustomer),
}

/// A line of an order draft, already resolved against the catalog.
#[derive(Debug, Clone)]
pub struct OrderLineDraft {
    pub product_item_id: ProductItemId,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}

/// A fully-resolved order ready to persist.
///
/// Persisting a draft is atomic: the order row, its lines, and the new
/// customer (when [`CustomerSelector::New`]) commit or roll back together.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub address_line: Option<String>,
    pub remarks: Option<String>,
    pub customer: CustomerSelector,
    pub lines: Vec<OrderLineDraft>,
}

/// Identifiers of a just-persisted order.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub order_no: OrderNumber,
    pub customer_id: CustomerId,
}
