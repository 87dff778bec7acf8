//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `ENCRYPTION_KEY` - Secret for the encryption helper (min 16 chars)
//! - `SMTP_HOST` - SMTP server hostname
//! - `SMTP_USERNAME` - SMTP authentication username
//! - `SMTP_PASSWORD` - SMTP authentication password
//! - `SMTP_FROM` - Email sender address
//!
//! ## Optional
//! - `APP_HOST` - Bind address (default: 127.0.0.1)
//! - `APP_PORT` - Listen port (default: 3000)
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `STORE_NAME`, `STORE_ADDRESS`, `STORE_PHONE`, `STORE_WEBSITE`,
//!   `STORE_CASHIER`, `STORE_CURRENCY_SYMBOL` - Receipt header fields
//! - `JWT_KEY`, `JWT_ISSUER`, `JWT_AUDIENCE`, `JWT_EXPIRY_MINUTES` - Token
//!   settings (declared for future token issuance; all four together)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_SECRET_LENGTH: usize = 16;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Email (SMTP) configuration
    pub email: EmailConfig,
    /// Store identity shown on receipts
    pub store: StoreInfo,
    /// Secrets for the encryption helper and (declared) token issuance
    pub security: SecurityConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Email (SMTP) configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username
    pub smtp_username: String,
    /// SMTP authentication password
    pub smtp_password: SecretString,
    /// Email sender address (From header)
    pub from_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// Store identity rendered into receipt emails.
#[derive(Debug, Clone)]
pub struct StoreInfo {
    pub name: String,
    pub address_line: String,
    pub phone: String,
    pub website_url: String,
    /// Cashier name printed on receipts.
    pub cashier: String,
    pub currency_symbol: String,
}

/// Security-related secrets.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret the encryption helper derives its key material from.
    pub encryption_key: SecretString,
    /// JWT settings. Declared for token issuance; no handler exercises them
    /// yet.
    pub jwt: Option<JwtConfig>,
}

/// JWT token settings.
///
/// Implements `Debug` manually to redact the signing key.
#[derive(Clone)]
pub struct JwtConfig {
    /// Signing key
    pub key: SecretString,
    /// Token issuer
    pub issuer: String,
    /// Token audience
    pub audience: String,
    /// Token lifetime in minutes
    pub expiry_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiry_minutes", &self.expiry_minutes)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, minimum length).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = SecretString::from(get_required_env("DATABASE_URL")?);
        let host = get_env_or_default("APP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("APP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("APP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("APP_PORT".to_string(), e.to_string()))?;

        let email = EmailConfig::from_env()?;
        let store = StoreInfo::from_env();
        let security = SecurityConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            email,
            store,
            security,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let smtp_port = get_env_or_default("SMTP_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            smtp_host: get_required_env("SMTP_HOST")?,
            smtp_port,
            smtp_username: get_required_env("SMTP_USERNAME")?,
            smtp_password: SecretString::from(get_required_env("SMTP_PASSWORD")?),
            from_address: get_required_env("SMTP_FROM")?,
        })
    }
}

impl StoreInfo {
    fn from_env() -> Self {
        Self {
            name: get_env_or_default("STORE_NAME", "Harborview Family Clinic"),
            address_line: get_env_or_default("STORE_ADDRESS", "12 Dockside Avenue, Portsmouth"),
            phone: get_env_or_default("STORE_PHONE", "0123 456 789"),
            website_url: get_env_or_default("STORE_WEBSITE", "https://clinic.example.com"),
            cashier: get_env_or_default("STORE_CASHIER", "Front Desk"),
            currency_symbol: get_env_or_default("STORE_CURRENCY_SYMBOL", "$"),
        }
    }
}

impl SecurityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            encryption_key: get_validated_secret("ENCRYPTION_KEY")?,
            jwt: JwtConfig::from_env()?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let key = get_optional_env("JWT_KEY");
        let issuer = get_optional_env("JWT_ISSUER");
        let audience = get_optional_env("JWT_AUDIENCE");
        let expiry = get_optional_env("JWT_EXPIRY_MINUTES");

        match (key, issuer, audience, expiry) {
            (Some(key), Some(issuer), Some(audience), Some(expiry)) => {
                validate_secret_strength(&key, "JWT_KEY")?;
                let expiry_minutes = expiry.parse::<i64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("JWT_EXPIRY_MINUTES".to_string(), e.to_string())
                })?;
                Ok(Some(Self {
                    key: SecretString::from(key),
                    issuer,
                    audience,
                    expiry_minutes,
                }))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "JWT_*".to_string(),
                "JWT_KEY, JWT_ISSUER, JWT_AUDIENCE and JWT_EXPIRY_MINUTES must be set together"
                    .to_string(),
            )),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn get_optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn get_env_or_default(name: &str, default: &str) -> String {
    get_optional_env(name).unwrap_or_else(|| default.to_string())
}

fn get_validated_secret(name: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(name)?;
    validate_secret_strength(&value, name)?;
    Ok(SecretString::from(value))
}

/// Reject obviously weak secrets: too short or matching a known placeholder
/// pattern.
fn validate_secret_strength(value: &str, name: &str) -> Result<(), ConfigError> {
    if value.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            name.to_string(),
            format!("must be at least {MIN_SECRET_LENGTH} characters"),
        ));
    }

    let lowered = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                name.to_string(),
                format!("looks like a placeholder (contains \"{pattern}\")"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_rejects_short_values() {
        assert!(validate_secret_strength("short", "TEST_KEY").is_err());
    }

    #[test]
    fn test_validate_secret_rejects_placeholders() {
        assert!(validate_secret_strength("your-encryption-key-here", "TEST_KEY").is_err());
        assert!(validate_secret_strength("changeme-changeme-changeme", "TEST_KEY").is_err());
    }

    #[test]
    fn test_validate_secret_accepts_strong_values() {
        assert!(validate_secret_strength("fK93mQ27xLp0vR4tWz8a", "TEST_KEY").is_ok());
    }

    #[test]
    fn test_email_config_debug_redacts_password() {
        let config = EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "mailer".to_string(),
            smtp_password: SecretString::from("fK93mQ27xLp0vR4tWz8a".to_string()),
            from_address: "no-reply@clinic.example.com".to_string(),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("fK93mQ27xLp0vR4tWz8a"));
    }
}
