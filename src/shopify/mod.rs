//! Shopify Admin REST API client.
//!
//! One credential-bearing GET per collection against
//! `https://{shop_domain}/admin/api/{version}/{collection}.json` with the
//! `X-Shopify-Access-Token` header. Orders are fetched with `status=any` so
//! closed and cancelled orders are included.
//!
//! Failures are deliberately coarse: network errors, non-2xx statuses and
//! malformed bodies all surface as a single [`ShopifyError`] to the caller.
//! There is no retry, backoff or pagination; correctness under transient
//! failure relies on idempotent upserts and the next sync pass.

pub mod types;

pub use types::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Header carrying the per-tenant Admin API access token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Errors that can occur when fetching a remote collection.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to decode the response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Read access to a tenant's storefront collections.
///
/// Implemented by [`ShopifyClient`] for production and by in-memory stubs in
/// the sync engine tests.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Fetch all products for the given store.
    async fn fetch_products(
        &self,
        shop_domain: &str,
        access_token: &str,
    ) -> Result<Vec<RemoteProduct>, ShopifyError>;

    /// Fetch all customers for the given store.
    async fn fetch_customers(
        &self,
        shop_domain: &str,
        access_token: &str,
    ) -> Result<Vec<RemoteCustomer>, ShopifyError>;

    /// Fetch all orders for the given store, regardless of status.
    async fn fetch_orders(
        &self,
        shop_domain: &str,
        access_token: &str,
    ) -> Result<Vec<RemoteOrder>, ShopifyError>;
}

/// Shopify Admin REST API client.
///
/// Holds one shared HTTP connection pool; the per-tenant access token is
/// attached per request since every tenant has its own credential.
#[derive(Clone)]
pub struct ShopifyClient {
    client: reqwest::Client,
    api_version: String,
}

impl ShopifyClient {
    /// Create a new client for the given Admin API version (e.g., `2025-01`).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the HTTP client fails to build.
    pub fn new(api_version: &str) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            api_version: api_version.to_owned(),
        })
    }

    /// Execute one authenticated GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
    ) -> Result<T, ShopifyError> {
        let response = self
            .client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ShopifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ShopifyError::Parse(format!("Failed to decode response: {e}")))
    }

    fn collection_url(&self, shop_domain: &str, collection: &str) -> String {
        format!(
            "https://{shop_domain}/admin/api/{}/{collection}",
            self.api_version
        )
    }
}

#[async_trait]
impl StorefrontApi for ShopifyClient {
    async fn fetch_products(
        &self,
        shop_domain: &str,
        access_token: &str,
    ) -> Result<Vec<RemoteProduct>, ShopifyError> {
        let url = self.collection_url(shop_domain, "products.json");
        let envelope: ProductsEnvelope = self.get_json(&url, access_token).await?;
        Ok(envelope.products)
    }

    async fn fetch_customers(
        &self,
        shop_domain: &str,
        access_token: &str,
    ) -> Result<Vec<RemoteCustomer>, ShopifyError> {
        let url = self.collection_url(shop_domain, "customers.json");
        let envelope: CustomersEnvelope = self.get_json(&url, access_token).await?;
        Ok(envelope.customers)
    }

    async fn fetch_orders(
        &self,
        shop_domain: &str,
        access_token: &str,
    ) -> Result<Vec<RemoteOrder>, ShopifyError> {
        let url = self.collection_url(shop_domain, "orders.json?status=any");
        let envelope: OrdersEnvelope = self.get_json(&url, access_token).await?;
        Ok(envelope.orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_url_includes_version_and_domain() {
        let client = ShopifyClient::new("2025-01").expect("client");
        assert_eq!(
            client.collection_url("demo.myshopify.com", "orders.json?status=any"),
            "https://demo.myshopify.com/admin/api/2025-01/orders.json?status=any"
        );
    }

    #[test]
    fn shopify_error_display() {
        let err = ShopifyError::Api {
            status: 401,
            message: "Invalid API key or access token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API error: 401 - Invalid API key or access token"
        );
    }
}
