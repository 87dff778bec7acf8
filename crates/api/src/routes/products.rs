//! Product catalog route handlers.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use crate::error::AppError;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/products", get(list))
}

async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state.store().list_product_items().await?;

    Ok(Json(products))
}
