//! Multi-tenant synchronization engine.
//!
//! One pass iterates every registered tenant and, per tenant, syncs the
//! three entity kinds in order: Products, then Customers, then Orders. The
//! kind ordering is correctness-relevant: the order synchronizer resolves
//! each order's embedded remote customer id against already-synced customer
//! rows, so customers must land first.
//!
//! Failures are contained at the tenant+kind boundary: a fetch or upsert
//! error is recorded as a failed [`SyncOutcome`] and iteration continues
//! with the next kind or tenant. Only a tenant registry failure aborts the
//! whole pass. A mid-collection upsert error abandons the remaining records
//! of that tenant+kind; the next pass re-attempts everything from scratch,
//! which is safe because upserts are idempotent.
//!
//! The engine is generic over its store and remote client so the scheduled
//! path, the HTTP trigger surface and the tests all drive the exact same
//! logic.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::db::RepositoryError;
use crate::models::{Customer, NewCustomer, NewOrder, NewProduct, Order, Product, Tenant};
use crate::shopify::{RemoteCustomer, RemoteOrder, RemoteProduct, ShopifyError, StorefrontApi};

/// Fallback for absent monetary fields.
const ZERO_MONEY: &str = "0.00";

/// Tenant registry plus upsert-by-remote-identifier record store.
///
/// Implemented by [`crate::db::PgStore`] for production and by an in-memory
/// fake in the tests below.
#[async_trait]
pub trait SyncStore: Send + Sync {
    /// List all registered tenants in stable order.
    async fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError>;

    /// Insert or overwrite a product, keyed by its remote identifier.
    async fn upsert_product(&self, record: NewProduct) -> Result<Product, RepositoryError>;

    /// Insert or overwrite a customer, keyed by its remote identifier.
    async fn upsert_customer(&self, record: NewCustomer) -> Result<Customer, RepositoryError>;

    /// Insert or overwrite an order, keyed by its remote identifier.
    ///
    /// The update path must leave the stored `created_at` untouched; it is
    /// set only when the row is first created.
    async fn upsert_order(&self, record: NewOrder) -> Result<Order, RepositoryError>;

    /// Look up a customer row by its remote identifier.
    async fn find_customer_by_shopify_id(
        &self,
        shopify_id: i64,
    ) -> Result<Option<Customer>, RepositoryError>;
}

/// The three synced entity kinds, in sync order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Products,
    Customers,
    Orders,
}

impl EntityKind {
    /// All kinds in the order a full pass runs them.
    pub const ALL: [Self; 3] = [Self::Products, Self::Customers, Self::Orders];
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Products => "products",
            Self::Customers => "customers",
            Self::Orders => "orders",
        };
        f.write_str(name)
    }
}

/// Outcome status for one tenant+kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Success,
    Failed,
}

/// Result of syncing one entity kind for one tenant.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    /// Shop domain of the tenant.
    pub shop: String,
    /// Entity kind this outcome covers.
    pub entity: EntityKind,
    pub status: SyncStatus,
    /// Number of remote records fetched, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Failure message, on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncOutcome {
    fn success(shop: &str, entity: EntityKind, count: usize) -> Self {
        Self {
            shop: shop.to_owned(),
            entity,
            status: SyncStatus::Success,
            count: Some(count),
            error: None,
        }
    }

    fn failed(shop: &str, entity: EntityKind, error: String) -> Self {
        Self {
            shop: shop.to_owned(),
            entity,
            status: SyncStatus::Failed,
            count: None,
            error: Some(error),
        }
    }
}

/// Result of one sync pass (or one per-kind trigger).
///
/// An empty registry is a distinct signal rather than an empty success
/// list, so callers can tell "nothing registered" from "all synced".
#[derive(Debug)]
pub enum SyncReport {
    /// No tenants are registered; nothing was attempted.
    NoTenants,
    /// Per-tenant-per-kind outcomes, in stable tenant order.
    Completed(Vec<SyncOutcome>),
}

/// Failure of one tenant+kind sync, contained by the orchestrator.
#[derive(Debug, thiserror::Error)]
enum SyncFailure {
    #[error("{0}")]
    Remote(#[from] ShopifyError),
    #[error("{0}")]
    Store(#[from] RepositoryError),
}

/// The synchronization engine: orchestrator plus per-entity synchronizers.
pub struct SyncEngine<S, A> {
    store: S,
    remote: A,
}

impl<S: SyncStore, A: StorefrontApi> SyncEngine<S, A> {
    /// Create a new engine over the given store and remote client.
    pub const fn new(store: S, remote: A) -> Self {
        Self { store, remote }
    }

    /// Run one full pass: every tenant, every entity kind, in order.
    ///
    /// Tenants are loaded once at the start; the list is not re-read
    /// mid-pass. Returns one outcome per tenant per kind even when every
    /// tenant failed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only when the tenant registry itself is
    /// unreachable; per-tenant failures are contained in the report.
    pub async fn run_pass(&self) -> Result<SyncReport, RepositoryError> {
        let tenants = self.store.list_tenants().await?;
        if tenants.is_empty() {
            return Ok(SyncReport::NoTenants);
        }

        let mut outcomes = Vec::with_capacity(tenants.len() * EntityKind::ALL.len());
        for tenant in &tenants {
            for kind in EntityKind::ALL {
                outcomes.push(self.sync_tenant(tenant, kind).await);
            }
        }

        Ok(SyncReport::Completed(outcomes))
    }

    /// Run one entity kind across every tenant (the on-demand trigger path).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` only when the tenant registry itself is
    /// unreachable.
    pub async fn run_collection(&self, kind: EntityKind) -> Result<SyncReport, RepositoryError> {
        let tenants = self.store.list_tenants().await?;
        if tenants.is_empty() {
            return Ok(SyncReport::NoTenants);
        }

        let mut outcomes = Vec::with_capacity(tenants.len());
        for tenant in &tenants {
            outcomes.push(self.sync_tenant(tenant, kind).await);
        }

        Ok(SyncReport::Completed(outcomes))
    }

    /// Sync one kind for one tenant, containing any failure in the outcome.
    async fn sync_tenant(&self, tenant: &Tenant, kind: EntityKind) -> SyncOutcome {
        info!(shop = %tenant.shop_domain, entity = %kind, "Syncing collection");

        match self.sync_tenant_inner(tenant, kind).await {
            Ok(count) => {
                info!(shop = %tenant.shop_domain, entity = %kind, count, "Collection synced");
                SyncOutcome::success(&tenant.shop_domain, kind, count)
            }
            Err(e) => {
                warn!(shop = %tenant.shop_domain, entity = %kind, error = %e, "Sync failed");
                SyncOutcome::failed(&tenant.shop_domain, kind, e.to_string())
            }
        }
    }

    async fn sync_tenant_inner(
        &self,
        tenant: &Tenant,
        kind: EntityKind,
    ) -> Result<usize, SyncFailure> {
        match kind {
            EntityKind::Products => self.sync_products(tenant).await,
            EntityKind::Customers => self.sync_customers(tenant).await,
            EntityKind::Orders => self.sync_orders(tenant).await,
        }
    }

    async fn sync_products(&self, tenant: &Tenant) -> Result<usize, SyncFailure> {
        let records = self
            .remote
            .fetch_products(&tenant.shop_domain, &tenant.access_token)
            .await?;

        for record in &records {
            self.store
                .upsert_product(project_product(&tenant.shop_domain, record))
                .await?;
        }

        Ok(records.len())
    }

    async fn sync_customers(&self, tenant: &Tenant) -> Result<usize, SyncFailure> {
        let records = self
            .remote
            .fetch_customers(&tenant.shop_domain, &tenant.access_token)
            .await?;

        for record in &records {
            self.store
                .upsert_customer(project_customer(&tenant.shop_domain, record))
                .await?;
        }

        Ok(records.len())
    }

    async fn sync_orders(&self, tenant: &Tenant) -> Result<usize, SyncFailure> {
        let records = self
            .remote
            .fetch_orders(&tenant.shop_domain, &tenant.access_token)
            .await?;

        for record in &records {
            // Best-effort join: unresolved references stay null and are not
            // retried until the order itself is re-synced.
            let customer_id = match &record.customer {
                Some(remote_customer) => self
                    .store
                    .find_customer_by_shopify_id(remote_customer.id)
                    .await?
                    .map(|customer| customer.id),
                None => None,
            };

            self.store
                .upsert_order(project_order(&tenant.shop_domain, record, customer_id))
                .await?;
        }

        Ok(records.len())
    }
}

/// Project a remote product onto the local schema.
///
/// The price comes from the first price-bearing variant, defaulting to
/// `0.00` when no variant carries one.
fn project_product(shop_id: &str, remote: &RemoteProduct) -> NewProduct {
    let price = remote
        .variants
        .iter()
        .find_map(|variant| variant.price.clone())
        .unwrap_or_else(|| ZERO_MONEY.to_owned());

    NewProduct {
        shopify_id: remote.id,
        title: remote.title.clone(),
        price,
        shop_id: shop_id.to_owned(),
    }
}

/// Project a remote customer onto the local schema.
fn project_customer(shop_id: &str, remote: &RemoteCustomer) -> NewCustomer {
    let address = remote.default_address.as_ref();

    NewCustomer {
        shopify_id: remote.id,
        first_name: remote.first_name.clone(),
        last_name: remote.last_name.clone(),
        email: remote.email.clone(),
        city: address.and_then(|a| a.city.clone()),
        country: address.and_then(|a| a.country.clone()),
        total_spent: remote
            .total_spent
            .clone()
            .unwrap_or_else(|| ZERO_MONEY.to_owned()),
        shop_id: shop_id.to_owned(),
    }
}

/// Project a remote order onto the local schema.
fn project_order(shop_id: &str, remote: &RemoteOrder, customer_id: Option<i32>) -> NewOrder {
    NewOrder {
        shopify_id: remote.id,
        total_price: remote
            .total_price
            .clone()
            .unwrap_or_else(|| ZERO_MONEY.to_owned()),
        status: remote.financial_status.clone(),
        customer_id,
        shop_id: shop_id.to_owned(),
        created_at: remote.created_at.unwrap_or_else(chrono::Utc::now),
    }
}
