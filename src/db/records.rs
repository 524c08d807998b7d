//! Postgres-backed record store for the sync engine.
//!
//! Every upsert is keyed by the remote Shopify identifier and is its own
//! atomic unit; no transaction spans a tenant's sync. The update path
//! overwrites all mapped fields except `orders.created_at`, which is set
//! only when the row is first inserted.

use async_trait::async_trait;
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{Customer, NewCustomer, NewOrder, NewProduct, Order, Product, Tenant};
use crate::sync::SyncStore;

/// Record store and tenant registry backed by the shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over the shared pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncStore for PgStore {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, RepositoryError> {
        super::TenantRepository::new(&self.pool).list_all().await
    }

    async fn upsert_product(&self, record: NewProduct) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (shopify_id, title, price, shop_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (shopify_id) DO UPDATE SET
                title = EXCLUDED.title,
                price = EXCLUDED.price,
                shop_id = EXCLUDED.shop_id
            RETURNING id, shopify_id, title, price, shop_id
            ",
        )
        .bind(record.shopify_id)
        .bind(&record.title)
        .bind(&record.price)
        .bind(&record.shop_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    async fn upsert_customer(&self, record: NewCustomer) -> Result<Customer, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            INSERT INTO customers
                (shopify_id, first_name, last_name, email, city, country, total_spent, shop_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (shopify_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                city = EXCLUDED.city,
                country = EXCLUDED.country,
                total_spent = EXCLUDED.total_spent,
                shop_id = EXCLUDED.shop_id
            RETURNING id, shopify_id, first_name, last_name, email, city, country,
                      total_spent, shop_id
            ",
        )
        .bind(record.shopify_id)
        .bind(&record.first_name)
        .bind(&record.last_name)
        .bind(&record.email)
        .bind(&record.city)
        .bind(&record.country)
        .bind(&record.total_spent)
        .bind(&record.shop_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn upsert_order(&self, record: NewOrder) -> Result<Order, RepositoryError> {
        // created_at is absent from the update set: set once on create.
        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO orders
                (shopify_id, total_price, status, customer_id, shop_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (shopify_id) DO UPDATE SET
                total_price = EXCLUDED.total_price,
                status = EXCLUDED.status,
                customer_id = EXCLUDED.customer_id,
                shop_id = EXCLUDED.shop_id
            RETURNING id, shopify_id, total_price, status, customer_id, shop_id, created_at
            ",
        )
        .bind(record.shopify_id)
        .bind(&record.total_price)
        .bind(&record.status)
        .bind(record.customer_id)
        .bind(&record.shop_id)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_customer_by_shopify_id(
        &self,
        shopify_id: i64,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, shopify_id, first_name, last_name, email, city, country,
                   total_spent, shop_id
            FROM customers
            WHERE shopify_id = $1
            ",
        )
        .bind(shopify_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }
}
