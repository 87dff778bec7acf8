//! Email delivery for transactional notifications.
//!
//! Uses SMTP via lettre with Askama templates for the HTML and plain-text
//! bodies. Callers that treat notifications as best-effort (order placement
//! does) log and discard the returned error.

use askama::Template;
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use thiserror::Error;

use clinic_commerce_core::Email;

use crate::config::{EmailConfig, StoreInfo};
use crate::filters;

/// Classification of an outgoing email, recorded in the send log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailKind {
    OrderReceipt,
}

impl std::fmt::Display for EmailKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OrderReceipt => write!(f, "order_receipt"),
        }
    }
}

/// An email recipient.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub address: Email,
    pub name: String,
}

/// One line of a rendered receipt.
#[derive(Debug, Clone)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i32,
    pub unit: String,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// View model for the order receipt email.
///
/// The grand total is restated for the merchandise, total, and bank-transfer
/// rows; the promotion row is always empty (no discounts are modeled).
#[derive(Debug, Clone)]
pub struct OrderReceipt {
    pub order_no: String,
    pub date: String,
    pub printed_at: String,
    pub customer_name: String,
    pub phone: String,
    pub address_line: String,
    pub remarks: String,
    pub lines: Vec<ReceiptLine>,
    pub total_quantity: i32,
    pub total: Decimal,
}

/// HTML template for the order receipt email.
#[derive(Template)]
#[template(path = "email/order_receipt.html")]
struct OrderReceiptHtml<'a> {
    store: &'a StoreInfo,
    receipt: &'a OrderReceipt,
}

/// Plain text template for the order receipt email.
#[derive(Template)]
#[template(path = "email/order_receipt.txt")]
struct OrderReceiptText<'a> {
    store: &'a StoreInfo,
    receipt: &'a OrderReceipt,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// The email collaborator order placement talks to.
#[async_trait]
pub trait ReceiptMailer: Send + Sync {
    /// Render and send an order receipt.
    async fn send_order_receipt(
        &self,
        to: &Recipient,
        receipt: &OrderReceipt,
    ) -> Result<(), EmailError>;
}

/// SMTP-backed mailer for transactional emails.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    store: StoreInfo,
}

impl SmtpMailer {
    /// Create a new mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig, store: StoreInfo) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            store,
        })
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &Recipient,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .address
                .as_str()
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.address.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;
        Ok(())
    }
}

#[async_trait]
impl ReceiptMailer for SmtpMailer {
    async fn send_order_receipt(
        &self,
        to: &Recipient,
        receipt: &OrderReceipt,
    ) -> Result<(), EmailError> {
        let html = OrderReceiptHtml {
            store: &self.store,
            receipt,
        }
        .render()?;
        let text = OrderReceiptText {
            store: &self.store,
            receipt,
        }
        .render()?;
        let subject = format!("[{}] Order {}", self.store.name, receipt.order_no);

        self.send_multipart_email(to, &subject, &text, &html).await?;

        tracing::info!(
            to = %to.address,
            kind = %EmailKind::OrderReceipt,
            order_no = %receipt.order_no,
            "Email sent successfully"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_store() -> StoreInfo {
        StoreInfo {
            name: "Harborview Family Clinic".to_owned(),
            address_line: "12 Dockside Avenue, Portsmouth".to_owned(),
            phone: "0123 456 789".to_owned(),
            website_url: "https://clinic.example.com".to_owned(),
            cashier: "Front Desk".to_owned(),
            currency_symbol: "$".to_owned(),
        }
    }

    fn sample_receipt() -> OrderReceipt {
        OrderReceipt {
            order_no: "ORD26080001".to_owned(),
            date: "2026-08-07".to_owned(),
            printed_at: "14:05".to_owned(),
            customer_name: "Jordan Reyes".to_owned(),
            phone: "0899136868".to_owned(),
            address_line: "7 Elm Street".to_owned(),
            remarks: "leave at reception".to_owned(),
            lines: vec![
                ReceiptLine {
                    name: "Vitamin C 500mg".to_owned(),
                    quantity: 2,
                    unit: "box".to_owned(),
                    unit_price: Decimal::from(100),
                    line_total: Decimal::from(200),
                },
                ReceiptLine {
                    name: "Thermometer".to_owned(),
                    quantity: 1,
                    unit: "pc".to_owned(),
                    unit_price: Decimal::from(1_050),
                    line_total: Decimal::from(1_050),
                },
            ],
            total_quantity: 3,
            total: Decimal::from(1_250),
        }
    }

    #[test]
    fn test_html_receipt_renders_order_details() {
        let store = sample_store();
        let receipt = sample_receipt();
        let html = OrderReceiptHtml {
            store: &store,
            receipt: &receipt,
        }
        .render()
        .unwrap();

        assert!(html.contains("ORD26080001"));
        assert!(html.contains("Harborview Family Clinic"));
        assert!(html.contains("Jordan Reyes"));
        assert!(html.contains("Vitamin C 500mg"));
        // grouped money formatting via the `money` filter
        assert!(html.contains("1,050"));
        // grand total restated for the total and bank-transfer rows
        assert!(html.matches("1,250").count() >= 3);
        assert!(html.contains("do not reply"));
    }

    #[test]
    fn test_text_receipt_renders_lines_and_totals() {
        let store = sample_store();
        let receipt = sample_receipt();
        let text = OrderReceiptText {
            store: &store,
            receipt: &receipt,
        }
        .render()
        .unwrap();

        assert!(text.contains("ORD26080001"));
        assert!(text.contains("Thermometer"));
        assert!(text.contains("Total quantity: 3"));
        assert!(text.contains("1,250"));
    }
}
