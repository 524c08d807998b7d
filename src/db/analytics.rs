//! Read-side aggregation queries over already-synced rows.
//!
//! These back the dashboard endpoints and never touch the remote API.
//! Monetary columns are text, so summation happens in Rust with lenient
//! decimal parsing rather than in SQL.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Customer;

/// Creation time and total of one order, for the sales chart.
#[derive(Debug, sqlx::FromRow)]
pub struct SalesRow {
    pub created_at: DateTime<Utc>,
    pub total_price: String,
}

/// Count customers belonging to one shop.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn customer_count(pool: &PgPool, shop_id: &str) -> Result<i64, RepositoryError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers WHERE shop_id = $1")
        .bind(shop_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Count orders belonging to one shop.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn order_count(pool: &PgPool, shop_id: &str) -> Result<i64, RepositoryError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE shop_id = $1")
        .bind(shop_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// All order totals for one shop, as stored (text).
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn order_total_prices(
    pool: &PgPool,
    shop_id: &str,
) -> Result<Vec<String>, RepositoryError> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT total_price FROM orders WHERE shop_id = $1")
        .bind(shop_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(total,)| total).collect())
}

/// Order creation times and totals for one shop, oldest first.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn sales_rows(pool: &PgPool, shop_id: &str) -> Result<Vec<SalesRow>, RepositoryError> {
    let rows = sqlx::query_as::<_, SalesRow>(
        r"
        SELECT created_at, total_price
        FROM orders
        WHERE shop_id = $1
        ORDER BY created_at ASC
        ",
    )
    .bind(shop_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// All customers belonging to one shop.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn customers_for_shop(
    pool: &PgPool,
    shop_id: &str,
) -> Result<Vec<Customer>, RepositoryError> {
    let customers = sqlx::query_as::<_, Customer>(
        r"
        SELECT id, shopify_id, first_name, last_name, email, city, country,
               total_spent, shop_id
        FROM customers
        WHERE shop_id = $1
        ",
    )
    .bind(shop_id)
    .fetch_all(pool)
    .await?;

    Ok(customers)
}
