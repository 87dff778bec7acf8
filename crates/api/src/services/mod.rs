//! Service collaborators used by the command handlers.
//!
//! - [`crypto`] - Symmetric encryption of short text values
//! - [`email`] - SMTP delivery of transactional emails
//! - [`password`] - Password generation and Argon2id hashing

pub mod crypto;
pub mod email;
pub mod password;

pub use crypto::{CryptoError, EncryptionService};
pub use email::{EmailError, EmailKind, OrderReceipt, Recipient, ReceiptLine, ReceiptMailer, SmtpMailer};
pub use password::{hash_password, initial_password, verify_password};
