//! Order placement handler tests against the in-memory store.

#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use clinic_commerce_api::db::{CommerceStore, MemoryStore};
use clinic_commerce_api::handlers::{
    CommandHandler, OrderLineRequest, PlaceOrderCommand, PlaceOrderHandler,
};
use clinic_commerce_api::services::password;
use clinic_commerce_core::{OrderStatus, ProductItemId};

use common::FakeMailer;

fn handler_with(store: &MemoryStore, mailer: Arc<FakeMailer>) -> PlaceOrderHandler {
    PlaceOrderHandler::new(Arc::new(store.clone()), mailer)
}

fn command(items: Vec<OrderLineRequest>) -> PlaceOrderCommand {
    PlaceOrderCommand {
        customer_id: None,
        full_name: "Jordan Reyes".to_owned(),
        phone: "0899136868".to_owned(),
        email: None,
        address_line: Some("7 Elm Street".to_owned()),
        remarks: None,
        items,
    }
}

#[tokio::test]
async fn order_totals_and_lines_snapshot_the_catalog() {
    let store = MemoryStore::new();
    let item_a = store
        .seed_product_item("Vitamin C 500mg", Decimal::from(100), "box")
        .await;
    let item_b = store
        .seed_product_item("Elastic bandage", Decimal::from(50), "roll")
        .await;
    let mailer = Arc::new(FakeMailer::new());
    let handler = handler_with(&store, Arc::clone(&mailer));

    let placed = handler
        .handle(command(vec![
            OrderLineRequest {
                product_item_id: item_a.id,
                quantity: 2,
            },
            OrderLineRequest {
                product_item_id: item_b.id,
                quantity: 1,
            },
        ]))
        .await
        .unwrap();

    let persisted = store.get_order(placed.id).await.unwrap().unwrap();
    assert_eq!(persisted.order.status, OrderStatus::Pending);
    assert_eq!(persisted.order.total_price, Decimal::from(250));
    assert_eq!(persisted.order.order_no, placed.order_no);
    assert_eq!(persisted.items.len(), 2);

    let line_a = persisted
        .items
        .iter()
        .find(|i| i.product_item_id == item_a.id)
        .unwrap();
    assert_eq!(line_a.name, "Vitamin C 500mg");
    assert_eq!(line_a.price, Decimal::from(100));
    assert_eq!(line_a.quantity, 2);
    assert_eq!(line_a.total_price, Decimal::from(200));

    // no email address supplied, so no notification attempt
    assert!(mailer.sent.lock().await.is_empty());
}

#[tokio::test]
async fn unknown_product_items_are_skipped_silently() {
    let store = MemoryStore::new();
    let item = store
        .seed_product_item("Vitamin C 500mg", Decimal::from(100), "box")
        .await;
    let handler = handler_with(&store, Arc::new(FakeMailer::new()));

    let placed = handler
        .handle(command(vec![
            OrderLineRequest {
                product_item_id: item.id,
                quantity: 1,
            },
            OrderLineRequest {
                product_item_id: ProductItemId::new(999),
                quantity: 5,
            },
        ]))
        .await
        .unwrap();

    let persisted = store.get_order(placed.id).await.unwrap().unwrap();
    assert_eq!(persisted.items.len(), 1);
    assert_eq!(persisted.order.total_price, Decimal::from(100));
}

#[tokio::test]
async fn existing_customer_matched_by_email_is_attached() {
    let store = MemoryStore::new();
    let existing = store
        .seed_customer("0111222333", Some("jordan@example.com"), "Jordan Reyes")
        .await;
    let handler = handler_with(&store, Arc::new(FakeMailer::new()));

    let mut cmd = command(Vec::new());
    cmd.email = Some("jordan@example.com".to_owned());
    // different phone on the request; the email match wins
    cmd.phone = "0999888777".to_owned();

    let placed = handler.handle(cmd).await.unwrap();

    assert_eq!(placed.customer_id, existing.id);
    assert_eq!(store.customers().await.len(), 1);
}

#[tokio::test]
async fn explicit_customer_id_takes_priority() {
    let store = MemoryStore::new();
    let first = store
        .seed_customer("0111222333", Some("first@example.com"), "First Customer")
        .await;
    let second = store
        .seed_customer("0444555666", Some("second@example.com"), "Second Customer")
        .await;
    let handler = handler_with(&store, Arc::new(FakeMailer::new()));

    let mut cmd = command(Vec::new());
    cmd.customer_id = Some(first.id);
    cmd.email = Some("second@example.com".to_owned());

    let placed = handler.handle(cmd).await.unwrap();

    assert_eq!(placed.customer_id, first.id);
    assert_ne!(placed.customer_id, second.id);
    assert_eq!(store.customers().await.len(), 2);
}

#[tokio::test]
async fn unmatched_customer_is_provisioned_with_hashed_password() {
    let store = MemoryStore::new();
    let handler = handler_with(&store, Arc::new(FakeMailer::new()));

    let placed = handler.handle(command(Vec::new())).await.unwrap();

    let customers = store.customers().await;
    assert_eq!(customers.len(), 1);
    let customer = &customers[0];
    assert_eq!(placed.customer_id, customer.id);
    assert_eq!(customer.phone, "0899136868");
    assert_eq!(customer.full_name, "Jordan Reyes");

    let expected_password = password::initial_password("0899136868", Utc::now());
    let hash = customer.password_hash.as_deref().unwrap();
    assert_ne!(hash, expected_password);
    assert!(password::verify_password(&expected_password, hash).is_ok());
}

#[tokio::test]
async fn receipt_is_sent_when_email_supplied() {
    let store = MemoryStore::new();
    let item = store
        .seed_product_item("Vitamin C 500mg", Decimal::from(100), "box")
        .await;
    let mailer = Arc::new(FakeMailer::new());
    let handler = handler_with(&store, Arc::clone(&mailer));

    let mut cmd = command(vec![OrderLineRequest {
        product_item_id: item.id,
        quantity: 2,
    }]);
    cmd.email = Some("jordan@example.com".to_owned());

    let placed = handler.handle(cmd).await.unwrap();

    let sent = mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    let (to, receipt) = &sent[0];
    assert_eq!(to, "jordan@example.com");
    assert_eq!(receipt.order_no, placed.order_no.to_string());
    assert_eq!(receipt.total, Decimal::from(200));
    assert_eq!(receipt.total_quantity, 2);
    assert_eq!(receipt.lines.len(), 1);
}

#[tokio::test]
async fn mailer_failure_does_not_fail_the_order() {
    let store = MemoryStore::new();
    let item = store
        .seed_product_item("Vitamin C 500mg", Decimal::from(100), "box")
        .await;
    let handler = handler_with(&store, Arc::new(FakeMailer::failing()));

    let mut cmd = command(vec![OrderLineRequest {
        product_item_id: item.id,
        quantity: 1,
    }]);
    cmd.email = Some("jordan@example.com".to_owned());

    let placed = handler.handle(cmd).await.unwrap();

    // the order is committed even though the notification failed
    assert!(store.get_order(placed.id).await.unwrap().is_some());
}
