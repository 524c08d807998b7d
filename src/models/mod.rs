//! Domain types for tenants and synced entities.
//!
//! The synced entities (`Product`, `Customer`, `Order`) mirror the local
//! Postgres rows. Each carries the remote Shopify identifier it is upserted
//! by, plus the owning shop domain as a plain attribute. The `New*` types
//! are the projected insert/update payloads produced by the sync engine.

use chrono::{DateTime, Utc};

/// One onboarded storefront account with its own remote credential.
///
/// Tenants are provisioned by the `create-tenant` binary and are read-only
/// to the sync core.
#[derive(Clone, sqlx::FromRow)]
pub struct Tenant {
    /// Internal tenant ID.
    pub id: i32,
    /// Unique account email used for dashboard login.
    pub email: String,
    /// Argon2 hash of the dashboard password.
    pub password_hash: String,
    /// Shopify store domain (e.g., `your-store.myshopify.com`).
    pub shop_domain: String,
    /// Shopify Admin API access token for this store.
    pub access_token: String,
    /// When the tenant was provisioned.
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Tenant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tenant")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("shop_domain", &self.shop_domain)
            .field("access_token", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A synced product row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    /// Internal row ID.
    pub id: i32,
    /// Remote Shopify product ID (upsert key).
    pub shopify_id: i64,
    /// Product title.
    pub title: String,
    /// Price of the first price-bearing variant, as text.
    pub price: String,
    /// Owning shop domain.
    pub shop_id: String,
}

/// A synced customer row.
#[derive(Debug, Clone, serde::Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Internal row ID (target of `Order::customer_id`).
    pub id: i32,
    /// Remote Shopify customer ID (upsert key).
    #[serde(with = "id_as_string")]
    pub shopify_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// City of the default address, when present.
    pub city: Option<String>,
    /// Country of the default address, when present.
    pub country: Option<String>,
    /// Lifetime spend as reported by Shopify, as text.
    pub total_spent: String,
    /// Owning shop domain.
    pub shop_id: String,
}

/// A synced order row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    /// Internal row ID.
    pub id: i32,
    /// Remote Shopify order ID (upsert key).
    pub shopify_id: i64,
    /// Order total as text.
    pub total_price: String,
    /// Shopify financial status (`paid`, `pending`, ...).
    pub status: Option<String>,
    /// Resolved internal customer reference, null when the remote customer
    /// was absent or not yet synced.
    pub customer_id: Option<i32>,
    /// Owning shop domain.
    pub shop_id: String,
    /// Remote-reported creation time, set once on insert.
    pub created_at: DateTime<Utc>,
}

/// Projected product fields for one upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub shopify_id: i64,
    pub title: String,
    pub price: String,
    pub shop_id: String,
}

/// Projected customer fields for one upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub shopify_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub total_spent: String,
    pub shop_id: String,
}

/// Projected order fields for one upsert.
///
/// `created_at` applies only to the create path; the update path leaves the
/// stored creation time untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub shopify_id: i64,
    pub total_price: String,
    pub status: Option<String>,
    pub customer_id: Option<i32>,
    pub shop_id: String,
    pub created_at: DateTime<Utc>,
}

/// Serialize an `i64` remote identifier as a string.
///
/// Shopify IDs exceed the integer range JavaScript consumers handle safely.
mod id_as_string {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_debug_redacts_credentials() {
        let tenant = Tenant {
            id: 1,
            email: "owner@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            shop_domain: "demo.myshopify.com".to_string(),
            access_token: "shpat_abc123".to_string(),
            created_at: Utc::now(),
        };

        let debug = format!("{tenant:?}");
        assert!(!debug.contains("shpat_abc123"));
        assert!(!debug.contains("argon2id"));
        assert!(debug.contains("demo.myshopify.com"));
    }

    #[test]
    fn customer_serializes_shopify_id_as_string() {
        let customer = Customer {
            id: 7,
            shopify_id: 9_007_199_254_740_995,
            first_name: Some("Ada".to_string()),
            last_name: None,
            email: None,
            city: None,
            country: None,
            total_spent: "120.00".to_string(),
            shop_id: "demo.myshopify.com".to_string(),
        };

        let json = serde_json::to_value(&customer).expect("serialize");
        assert_eq!(json["shopifyId"], "9007199254740995");
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["totalSpent"], "120.00");
    }
}
