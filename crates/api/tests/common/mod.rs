//! Shared test doubles for handler tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use clinic_commerce_api::services::email::{EmailError, OrderReceipt, Recipient, ReceiptMailer};

/// Recording fake mailer. `failing()` makes every send return an error so
/// tests can check that notification failures stay invisible to callers.
pub struct FakeMailer {
    fail: bool,
    pub sent: Mutex<Vec<(String, OrderReceipt)>>,
}

impl FakeMailer {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ReceiptMailer for FakeMailer {
    async fn send_order_receipt(
        &self,
        to: &Recipient,
        receipt: &OrderReceipt,
    ) -> Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::InvalidAddress("forced failure".to_owned()));
        }
        self.sent
            .lock()
            .await
            .push((to.address.to_string(), receipt.clone()));
        Ok(())
    }
}
