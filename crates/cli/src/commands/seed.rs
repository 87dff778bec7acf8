//! Catalog seeding command.
//!
//! Inserts a small demo catalog (categories and product items) so a fresh
//! database can take orders immediately. Refuses to run against a non-empty
//! catalog.

use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use thiserror::Error;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Catalog is not empty; refusing to seed")]
    NotEmpty,
}

const DEMO_CATEGORIES: &[&str] = &["Supplements", "Devices", "First aid"];

const DEMO_ITEMS: &[(&str, i64, &str)] = &[
    ("Vitamin C 500mg", 100, "box"),
    ("Digital thermometer", 1_050, "pc"),
    ("Elastic bandage", 50, "roll"),
    ("Blood pressure monitor", 2_400, "pc"),
];

/// Seed the demo catalog.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or already has catalog
/// rows.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| SeedError::MissingEnvVar("DATABASE_URL"))?;

    let pool = PgPool::connect(&database_url).await?;

    let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM product_items")
        .fetch_one(&pool)
        .await?
        .try_get("count")?;
    if count > 0 {
        return Err(SeedError::NotEmpty);
    }

    for name in DEMO_CATEGORIES {
        sqlx::query("INSERT INTO categories (name) VALUES ($1)")
            .bind(name)
            .execute(&pool)
            .await?;
    }

    for (name, price, unit) in DEMO_ITEMS {
        sqlx::query("INSERT INTO product_items (name, price, unit) VALUES ($1, $2, $3)")
            .bind(name)
            .bind(Decimal::from(*price))
            .bind(unit)
            .execute(&pool)
            .await?;
    }

    tracing::info!(
        categories = DEMO_CATEGORIES.len(),
        items = DEMO_ITEMS.len(),
        "Catalog seeded"
    );
    Ok(())
}
