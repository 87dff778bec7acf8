//! HTTP routes for the ordering service.

pub mod categories;
pub mod customers;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the combined API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(orders::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(customers::router())
}
