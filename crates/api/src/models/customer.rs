//! Customer records.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use clinic_commerce_core::{CustomerId, Gender};

/// A customer.
///
/// `password_hash` is the Argon2id PHC string for customers provisioned
/// through order placement or registration; it never leaves the service.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub uid: Uuid,
    pub phone: String,
    pub email: Option<String>,
    pub full_name: String,
    pub first_name: String,
    pub gender: Gender,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A customer to be provisioned alongside an order.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub uid: Uuid,
    pub phone: String,
    pub email: Option<String>,
    pub full_name: String,
    pub first_name: String,
    pub gender: Gender,
    pub password_hash: String,
}
