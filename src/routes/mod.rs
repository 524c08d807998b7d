//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST /api/login                    - Tenant dashboard login
//!
//! # Ingest triggers (no request body; same engine as the scheduler)
//! POST /api/ingest/products          - Sync products for all tenants
//! POST /api/ingest/customers         - Sync customers for all tenants
//! POST /api/ingest/orders            - Sync orders for all tenants
//!
//! # Dashboard (tenant selected via x-shop-id header)
//! GET  /api/dashboard/stats          - Customer/order counts and revenue
//! GET  /api/dashboard/chart          - Sales totals grouped by day
//! GET  /api/dashboard/top-customers  - Top 5 customers by lifetime spend
//! ```

pub mod auth;
pub mod dashboard;
pub mod ingest;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Assemble all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/ingest/products", post(ingest::sync_products))
        .route("/api/ingest/customers", post(ingest::sync_customers))
        .route("/api/ingest/orders", post(ingest::sync_orders))
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route("/api/dashboard/chart", get(dashboard::sales_chart))
        .route("/api/dashboard/top-customers", get(dashboard::top_customers))
}
