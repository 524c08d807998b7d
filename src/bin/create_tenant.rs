//! Tenant provisioning CLI.
//!
//! # Usage
//!
//! ```bash
//! create-tenant owner@example.com 's3cret-pass'
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `SHOPIFY_STORE_DOMAIN` - Store domain for the new tenant
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token for the store
//!
//! Upserts by account email, so re-running rotates the credential and
//! password of an existing tenant.

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopmetrics::auth::{AuthError, hash_password};
use shopmetrics::db::{self, TenantRepository};

/// Errors that can occur during provisioning.
#[derive(Debug, Error)]
enum ProvisionError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Required command-line argument is missing.
    #[error("Usage: create-tenant <email> <password>")]
    MissingArg,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Database error: {0}")]
    Repository(#[from] db::RepositoryError),

    /// Password hashing failed.
    #[error("Password hashing error: {0}")]
    Hash(#[from] AuthError),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "create_tenant=info,shopmetrics=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Tenant provisioning failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ProvisionError> {
    let mut args = std::env::args().skip(1);
    let email = args.next().ok_or(ProvisionError::MissingArg)?;
    let password = args.next().ok_or(ProvisionError::MissingArg)?;

    let database_url = require_env("DATABASE_URL")?;
    let shop_domain = require_env("SHOPIFY_STORE_DOMAIN")?;
    let access_token = require_env("SHOPIFY_ACCESS_TOKEN")?;

    tracing::info!("Connecting to database");
    let pool = db::create_pool(&SecretString::from(database_url)).await?;

    let password_hash = hash_password(&password)?;

    let tenant = TenantRepository::new(&pool)
        .upsert(&email, &password_hash, &shop_domain, &access_token)
        .await?;

    tracing::info!(
        email = %tenant.email,
        shop_domain = %tenant.shop_domain,
        "Tenant provisioned"
    );

    Ok(())
}

fn require_env(name: &'static str) -> Result<String, ProvisionError> {
    std::env::var(name).map_err(|_| ProvisionError::MissingEnvVar(name))
}
