//! Database access for the local multi-tenant store.
//!
//! # Tables
//!
//! - `tenants` - registered storefront accounts (read-only to the sync core)
//! - `products` / `customers` / `orders` - synced entity rows, upserted by
//!   their remote Shopify identifier
//!
//! Migrations live in `migrations/` and are applied with `sqlx migrate run`.

pub mod analytics;
pub mod records;
pub mod tenants;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use records::PgStore;
pub use tenants::TenantRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool is created once at process start and shared through `AppState`;
/// nothing re-creates it mid-pass.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
