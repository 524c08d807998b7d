//! Tenant registry backed by the `tenants` table.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Tenant;

/// Repository for tenant registry operations.
pub struct TenantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TenantRepository<'a> {
    /// Create a new tenant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all registered tenants in stable provisioning order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Tenant>, RepositoryError> {
        let tenants = sqlx::query_as::<_, Tenant>(
            r"
            SELECT id, email, password_hash, shop_domain, access_token, created_at
            FROM tenants
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(tenants)
    }

    /// Look up a tenant by account email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Tenant>, RepositoryError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r"
            SELECT id, email, password_hash, shop_domain, access_token, created_at
            FROM tenants
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(tenant)
    }

    /// Insert or refresh a tenant, keyed by account email.
    ///
    /// Used only by the provisioning binary; the sync core never writes to
    /// the registry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(
        &self,
        email: &str,
        password_hash: &str,
        shop_domain: &str,
        access_token: &str,
    ) -> Result<Tenant, RepositoryError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r"
            INSERT INTO tenants (email, password_hash, shop_domain, access_token)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET
                password_hash = EXCLUDED.password_hash,
                shop_domain = EXCLUDED.shop_domain,
                access_token = EXCLUDED.access_token
            RETURNING id, email, password_hash, shop_domain, access_token, created_at
            ",
        )
        .bind(email)
        .bind(password_hash)
        .bind(shop_domain)
        .bind(access_token)
        .fetch_one(self.pool)
        .await?;

        Ok(tenant)
    }
}
