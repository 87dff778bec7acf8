//! Command handlers.
//!
//! Each inbound command type is dispatched to exactly one handler
//! implementing [`CommandHandler`]. Handlers receive their collaborators
//! (store, mailer) at construction time and return a uniform
//! `Result<Output, AppError>`.
//!
//! Cancellation rides on future drop: when the client disconnects, the
//! runtime stops polling the handler future. Persistence is a single
//! database transaction, so an abandoned request either commits fully or
//! leaves nothing behind.

pub mod delete_category;
pub mod place_order;

use async_trait::async_trait;

use crate::error::AppError;

pub use delete_category::{DeleteCategoryCommand, DeleteCategoryHandler};
pub use place_order::{OrderLineRequest, PlaceOrderCommand, PlaceOrderHandler};

/// Handler for command `C`.
#[async_trait]
pub trait CommandHandler<C>: Send + Sync {
    /// Success payload produced by the handler.
    type Output;

    /// Execute the command.
    async fn handle(&self, command: C) -> Result<Self::Output, AppError>;
}
