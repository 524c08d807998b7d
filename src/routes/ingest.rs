//! On-demand sync triggers, one per entity kind.
//!
//! Each handler runs the shared engine for a single collection across all
//! tenants and returns the structured per-tenant results. The scheduled pass
//! runs the same engine; the only difference is that these handlers return
//! the report instead of logging it. An unreachable tenant registry aborts
//! the trigger with a 500 carrying `success: false`.

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::sync::{EntityKind, SyncReport};

/// `POST /api/ingest/products`
pub async fn sync_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    trigger(&state, EntityKind::Products).await
}

/// `POST /api/ingest/customers`
pub async fn sync_customers(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    trigger(&state, EntityKind::Customers).await
}

/// `POST /api/ingest/orders`
pub async fn sync_orders(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    trigger(&state, EntityKind::Orders).await
}

async fn trigger(state: &AppState, kind: EntityKind) -> Result<Json<serde_json::Value>, AppError> {
    let report = state.sync().run_collection(kind).await?;

    let body = match report {
        SyncReport::NoTenants => json!({ "message": "No tenants found." }),
        SyncReport::Completed(results) => json!({ "success": true, "results": results }),
    };

    Ok(Json(body))
}
