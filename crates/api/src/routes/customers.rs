//! Customer route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use uuid::Uuid;

use clinic_commerce_core::{CustomerId, Gender};

use crate::error::AppError;
use crate::models::Customer;
use crate::state::AppState;

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/customers/{id}", get(show))
}

/// Customer contact fields exposed over the API. The password hash never
/// leaves the service.
#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub id: CustomerId,
    pub uid: Uuid,
    pub phone: String,
    pub email: Option<String>,
    pub full_name: String,
    pub first_name: String,
    pub gender: Gender,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            uid: customer.uid,
            phone: customer.phone,
            email: customer.email,
            full_name: customer.full_name,
            first_name: customer.first_name,
            gender: customer.gender,
        }
    }
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .store()
        .find_customer(CustomerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;

    Ok(Json(CustomerView::from(customer)))
}
