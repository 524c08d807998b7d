//! Remote payload types for the Shopify Admin REST API.
//!
//! Shopify returns collections under a top-level key (`products`,
//! `customers`, `orders`) with snake_case field names. Only the fields the
//! sync engine projects are modeled; everything else is ignored on decode.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level body of `GET .../products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<RemoteProduct>,
}

/// Top-level body of `GET .../customers.json`.
#[derive(Debug, Deserialize)]
pub struct CustomersEnvelope {
    pub customers: Vec<RemoteCustomer>,
}

/// Top-level body of `GET .../orders.json`.
#[derive(Debug, Deserialize)]
pub struct OrdersEnvelope {
    pub orders: Vec<RemoteOrder>,
}

/// A product as returned by the Admin REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProduct {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub variants: Vec<RemoteVariant>,
}

/// A product variant; only the price is of interest.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteVariant {
    pub price: Option<String>,
}

/// A customer as returned by the Admin REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCustomer {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub total_spent: Option<String>,
    pub default_address: Option<RemoteAddress>,
}

/// The default address attached to a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAddress {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// An order as returned by the Admin REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteOrder {
    pub id: i64,
    pub total_price: Option<String>,
    pub financial_status: Option<String>,
    /// Embedded customer reference, resolved to a local row at sync time.
    pub customer: Option<RemoteOrderCustomer>,
    pub created_at: Option<DateTime<Utc>>,
}

/// The customer stub embedded in an order payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteOrderCustomer {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_product_with_variants() {
        let body = r#"{
            "products": [
                {
                    "id": 632910392,
                    "title": "IPod Nano - 8GB",
                    "body_html": "<p>Ignored</p>",
                    "variants": [
                        {"id": 808950810, "price": "199.00", "sku": "IPOD2008PINK"}
                    ]
                }
            ]
        }"#;

        let envelope: ProductsEnvelope = serde_json::from_str(body).expect("decode");
        assert_eq!(envelope.products.len(), 1);
        let product = envelope.products.first().expect("one product");
        assert_eq!(product.id, 632_910_392);
        assert_eq!(product.title, "IPod Nano - 8GB");
        assert_eq!(
            product.variants.first().and_then(|v| v.price.as_deref()),
            Some("199.00")
        );
    }

    #[test]
    fn deserializes_customer_without_default_address() {
        let body = r#"{
            "customers": [
                {"id": 207119551, "first_name": "Bob", "last_name": null, "email": "bob@example.com"}
            ]
        }"#;

        let envelope: CustomersEnvelope = serde_json::from_str(body).expect("decode");
        let customer = envelope.customers.first().expect("one customer");
        assert_eq!(customer.first_name.as_deref(), Some("Bob"));
        assert!(customer.last_name.is_none());
        assert!(customer.default_address.is_none());
        assert!(customer.total_spent.is_none());
    }

    #[test]
    fn deserializes_order_with_offset_timestamp() {
        let body = r#"{
            "orders": [
                {
                    "id": 450789469,
                    "total_price": "409.94",
                    "financial_status": "paid",
                    "customer": {"id": 207119551},
                    "created_at": "2024-01-15T10:30:00-05:00"
                }
            ]
        }"#;

        let envelope: OrdersEnvelope = serde_json::from_str(body).expect("decode");
        let order = envelope.orders.first().expect("one order");
        assert_eq!(order.customer.as_ref().map(|c| c.id), Some(207_119_551));
        let created_at = order.created_at.expect("created_at");
        assert_eq!(created_at.to_rfc3339(), "2024-01-15T15:30:00+00:00");
    }
}
