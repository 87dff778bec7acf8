//! Order placement.
//!
//! Resolves requested line items against the catalog, attaches or provisions
//! a customer, persists everything as one transaction, then sends a receipt
//! email on a best-effort basis.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use clinic_commerce_core::{CustomerId, Email, Gender, OrderStatus, ProductItemId};

use super::CommandHandler;
use crate::db::CommerceStore;
use crate::error::AppError;
use crate::models::{CustomerSelector, NewCustomer, OrderDraft, OrderLineDraft, PlacedOrder};
use crate::services::email::{OrderReceipt, Recipient, ReceiptLine, ReceiptMailer};
use crate::services::password;

/// One requested order line.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLineRequest {
    pub product_item_id: ProductItemId,
    pub quantity: i32,
}

/// Place a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderCommand {
    /// Existing customer to attach, if the caller knows one.
    pub customer_id: Option<CustomerId>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address_line: Option<String>,
    pub remarks: Option<String>,
    pub items: Vec<OrderLineRequest>,
}

/// Handler for [`PlaceOrderCommand`].
pub struct PlaceOrderHandler {
    store: Arc<dyn CommerceStore>,
    mailer: Arc<dyn ReceiptMailer>,
}

impl PlaceOrderHandler {
    /// Create a new handler.
    #[must_use]
    pub fn new(store: Arc<dyn CommerceStore>, mailer: Arc<dyn ReceiptMailer>) -> Self {
        Self { store, mailer }
    }

    /// Resolve the customer the order attaches to.
    ///
    /// Priority, first match wins: explicit id → existing by email →
    /// existing by phone → a newly provisioned customer whose initial
    /// password is derived from the phone number and hashed before storage.
    async fn resolve_customer(
        &self,
        command: &PlaceOrderCommand,
    ) -> Result<CustomerSelector, AppError> {
        if let Some(id) = command.customer_id
            && let Some(existing) = self.store.find_customer(id).await?
        {
            return Ok(CustomerSelector::Existing(existing.id));
        }

        if let Some(email) = command.email.as_deref()
            && !email.is_empty()
            && let Some(existing) = self.store.find_customer_by_email(email).await?
        {
            return Ok(CustomerSelector::Existing(existing.id));
        }

        if let Some(existing) = self.store.find_customer_by_phone(&command.phone).await? {
            return Ok(CustomerSelector::Existing(existing.id));
        }

        let password = password::initial_password(&command.phone, Utc::now());
        let password_hash = password::hash_password(&password)
            .map_err(|e| AppError::Internal(format!("failed to hash generated password: {e}")))?;

        Ok(CustomerSelector::New(NewCustomer {
            uid: Uuid::new_v4(),
            phone: command.phone.clone(),
            email: command.email.clone().filter(|e| !e.is_empty()),
            full_name: command.full_name.clone(),
            first_name: command.full_name.clone(),
            gender: Gender::Male,
            password_hash,
        }))
    }

    /// Send the receipt email. Failures are logged and swallowed: the order
    /// is already committed and its outcome must not depend on delivery.
    async fn notify(
        &self,
        command: &PlaceOrderCommand,
        placed: &PlacedOrder,
        lines: Vec<ReceiptLine>,
        total: Decimal,
    ) {
        let Some(address) = command.email.as_deref().filter(|e| !e.is_empty()) else {
            return;
        };

        let email = match Email::parse(address) {
            Ok(email) => email,
            Err(err) => {
                tracing::warn!(
                    order_id = %placed.id,
                    error = %err,
                    "skipping order receipt: invalid email address"
                );
                return;
            }
        };

        let now = Utc::now();
        let total_quantity = lines.iter().map(|l| l.quantity).sum();
        let receipt = OrderReceipt {
            order_no: placed.order_no.to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            printed_at: now.format("%H:%M").to_string(),
            customer_name: command.full_name.clone(),
            phone: command.phone.clone(),
            address_line: command.address_line.clone().unwrap_or_default(),
            remarks: command.remarks.clone().unwrap_or_default(),
            lines,
            total_quantity,
            total,
        };
        let recipient = Recipient {
            address: email,
            name: command.full_name.clone(),
        };

        if let Err(err) = self.mailer.send_order_receipt(&recipient, &receipt).await {
            tracing::error!(
                order_id = %placed.id,
                error = %err,
                "failed to send order receipt"
            );
        }
    }
}

#[async_trait]
impl CommandHandler<PlaceOrderCommand> for PlaceOrderHandler {
    type Output = PlacedOrder;

    async fn handle(&self, command: PlaceOrderCommand) -> Result<PlacedOrder, AppError> {
        let requested: Vec<ProductItemId> =
            command.items.iter().map(|i| i.product_item_id).collect();
        let catalog = self.store.product_items_by_ids(&requested).await?;

        // Requested ids with no catalog match are skipped, not rejected.
        let mut lines = Vec::with_capacity(catalog.len());
        let mut receipt_lines = Vec::with_capacity(catalog.len());
        for product in &catalog {
            let Some(request) = command
                .items
                .iter()
                .find(|i| i.product_item_id == product.id)
            else {
                continue;
            };

            let line_total = product.price * Decimal::from(request.quantity);
            lines.push(OrderLineDraft {
                product_item_id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: request.quantity,
                total_price: line_total,
            });
            receipt_lines.push(ReceiptLine {
                name: product.name.clone(),
                quantity: request.quantity,
                unit: product.unit.clone(),
                unit_price: product.price,
                line_total,
            });
        }

        let total_price: Decimal = lines.iter().map(|l| l.total_price).sum();
        let customer = self.resolve_customer(&command).await?;

        let draft = OrderDraft {
            status: OrderStatus::Pending,
            total_price,
            address_line: command.address_line.clone(),
            remarks: command.remarks.clone(),
            customer,
            lines,
        };
        let placed = self.store.place_order(draft).await?;

        tracing::info!(
            order_id = %placed.id,
            order_no = %placed.order_no,
            total = %total_price,
            "order placed"
        );

        self.notify(&command, &placed, receipt_lines, total_price)
            .await;

        Ok(placed)
    }
}
