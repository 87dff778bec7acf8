//! Product category.

use serde::Serialize;

use clinic_commerce_core::CategoryId;

/// A product category.
///
/// Deletion is logical: `is_deleted` is flipped to true and the row stays in
/// place. Active listings exclude flagged rows.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub is_deleted: bool,
}
