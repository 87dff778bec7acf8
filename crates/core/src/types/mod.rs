//! Core types for Clinic Commerce.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod order_no;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::format_amount;
pub use order_no::OrderNumber;
pub use status::*;
