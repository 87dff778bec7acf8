//! Order route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use clinic_commerce_core::{CustomerId, OrderId, ProductItemId};

use crate::error::AppError;
use crate::handlers::{CommandHandler, OrderLineRequest, PlaceOrderCommand};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 50;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list).post(create))
        .route("/api/orders/{id}", get(show))
}

/// Request body for order placement.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderBody {
    pub customer_id: Option<i32>,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address_line: Option<String>,
    pub remarks: Option<String>,
    pub items: Vec<OrderLineBody>,
}

/// One requested line in the order placement body.
#[derive(Debug, Deserialize)]
pub struct OrderLineBody {
    pub product_item_id: i32,
    pub quantity: i32,
}

/// Query parameters for the order list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderBody>,
) -> Result<impl IntoResponse, AppError> {
    let command = PlaceOrderCommand {
        customer_id: body.customer_id.map(CustomerId::new),
        full_name: body.full_name,
        phone: body.phone,
        email: body.email,
        address_line: body.address_line,
        remarks: body.remarks,
        items: body
            .items
            .into_iter()
            .map(|line| OrderLineRequest {
                product_item_id: ProductItemId::new(line.product_item_id),
                quantity: line.quantity,
            })
            .collect(),
    };

    let placed = state.place_order().handle(command).await?;

    Ok((StatusCode::CREATED, Json(placed)))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, 500);
    let orders = state.store().list_orders(limit).await?;

    Ok(Json(orders))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = state
        .store()
        .get_order(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(order))
}
