//! Domain models for the ordering service.

pub mod category;
pub mod customer;
pub mod order;
pub mod product;

pub use category::Category;
pub use customer::{Customer, NewCustomer};
pub use order::{
    CustomerSelector, Order, OrderDraft, OrderItem, OrderLineDraft, OrderWithItems, PlacedOrder,
};
pub use product::ProductItem;
