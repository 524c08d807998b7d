//! Application state shared across handlers and the scheduler.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::db::PgStore;
use crate::shopify::{ShopifyClient, ShopifyError};
use crate::sync::SyncEngine;

/// The production sync engine: Postgres store plus the real Shopify client.
pub type SyncService = SyncEngine<PgStore, ShopifyClient>;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; the pool and sync engine are created once
/// at process start and never re-created mid-pass.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    sync: SyncService,
}

impl AppState {
    /// Create the application state.
    ///
    /// # Errors
    ///
    /// Returns `ShopifyError` if the HTTP client fails to build.
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, ShopifyError> {
        let remote = ShopifyClient::new(&config.shopify_api_version)?;
        let sync = SyncEngine::new(PgStore::new(pool.clone()), remote);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pool, sync }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn sync(&self) -> &SyncService {
        &self.inner.sync
    }
}
