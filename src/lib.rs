//! shopmetrics - multi-tenant Shopify ingestion and analytics.
//!
//! Pulls products, customers and orders from every registered tenant's
//! Shopify Admin REST API into a local Postgres store via idempotent
//! upserts, and serves aggregated dashboard analytics over the synced data.
//!
//! # Architecture
//!
//! - Axum web framework with JSON endpoints
//! - [`sync::SyncEngine`] drives both the fixed-interval scheduler and the
//!   on-demand ingest triggers
//! - `PostgreSQL` for tenants and synced entity rows
//! - Shopify Admin REST API, one credential per tenant

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod scheduler;
pub mod shopify;
pub mod state;
pub mod sync;
