//! Product catalog items.

use rust_decimal::Decimal;
use serde::Serialize;

use clinic_commerce_core::ProductItemId;

/// A sellable product item.
///
/// `unit` is the display unit shown in the receipt's unit column.
#[derive(Debug, Clone, Serialize)]
pub struct ProductItem {
    pub id: ProductItemId,
    pub name: String,
    pub price: Decimal,
    pub unit: String,
}
