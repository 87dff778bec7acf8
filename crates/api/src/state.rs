//! Application state shared across routes.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db::{CommerceStore, PgStore};
use crate::handlers::{DeleteCategoryHandler, PlaceOrderHandler};
use crate::services::crypto::EncryptionService;
use crate::services::email::{ReceiptMailer, SmtpMailer};

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    store: Arc<dyn CommerceStore>,
    crypto: EncryptionService,
    place_order: PlaceOrderHandler,
    delete_category: DeleteCategoryHandler,
}

impl AppState {
    /// Build the state and wire the command handlers to their collaborators.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, lettre::transport::smtp::Error> {
        let store: Arc<dyn CommerceStore> = Arc::new(PgStore::new(pool.clone()));
        let mailer: Arc<dyn ReceiptMailer> =
            Arc::new(SmtpMailer::new(&config.email, config.store.clone())?);
        let crypto = EncryptionService::new(&config.security.encryption_key);

        let place_order = PlaceOrderHandler::new(Arc::clone(&store), mailer);
        let delete_category = DeleteCategoryHandler::new(Arc::clone(&store));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                store,
                crypto,
                place_order,
                delete_category,
            }),
        })
    }

    /// Returns the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Returns the database pool (readiness checks).
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Returns the commerce store for read paths.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CommerceStore> {
        &self.inner.store
    }

    /// Returns the encryption helper.
    #[must_use]
    pub fn crypto(&self) -> &EncryptionService {
        &self.inner.crypto
    }

    /// Returns the order placement handler.
    #[must_use]
    pub fn place_order(&self) -> &PlaceOrderHandler {
        &self.inner.place_order
    }

    /// Returns the category delete handler.
    #[must_use]
    pub fn delete_category(&self) -> &DeleteCategoryHandler {
        &self.inner.delete_category
    }
}
