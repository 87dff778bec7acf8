//! Clinic Commerce ordering service library.
//!
//! Exposes the service as a library so handlers can be tested against the
//! in-memory store and reused by the CLI.
//!
//! # Architecture
//!
//! - Axum routes build command objects and dispatch them to exactly one
//!   [`handlers::CommandHandler`]
//! - Handlers talk to storage through [`db::CommerceStore`] and to SMTP
//!   through [`services::email::ReceiptMailer`]
//! - `PostgreSQL` persistence via sqlx; askama templates render receipt
//!   emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
