//! Dashboard analytics endpoints.
//!
//! Pure aggregation over already-synced rows; the remote API is never
//! touched here. The tenant is selected by the required `x-shop-id` header.
//! Monetary columns are text, so totals are computed with lenient decimal
//! parsing: a non-numeric value counts as zero rather than failing the
//! request.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::{Json, extract::State, http::HeaderMap};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::db::analytics::{self, SalesRow};
use crate::error::AppError;
use crate::models::Customer;
use crate::state::AppState;

/// Header naming the shop whose data is being queried.
const SHOP_ID_HEADER: &str = "x-shop-id";

/// How many customers the top-customers endpoint returns.
const TOP_CUSTOMER_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    total_customers: i64,
    total_orders: i64,
    /// Revenue with two decimal places, as text.
    total_revenue: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChartPoint {
    /// Calendar day, `YYYY-MM-DD`.
    date: String,
    /// Day total as a JSON number, matching what chart consumers plot.
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
}

/// `GET /api/dashboard/stats`
///
/// # Errors
///
/// Returns 400 when the `x-shop-id` header is missing.
pub async fn stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, AppError> {
    let shop_id = require_shop_id(&headers)?;

    let total_customers = analytics::customer_count(state.pool(), &shop_id).await?;
    let total_orders = analytics::order_count(state.pool(), &shop_id).await?;
    let totals = analytics::order_total_prices(state.pool(), &shop_id).await?;

    Ok(Json(StatsResponse {
        total_customers,
        total_orders,
        total_revenue: format!("{:.2}", total_revenue(&totals)),
    }))
}

/// `GET /api/dashboard/chart`
///
/// # Errors
///
/// Returns 400 when the `x-shop-id` header is missing.
pub async fn sales_chart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ChartPoint>>, AppError> {
    let shop_id = require_shop_id(&headers)?;
    let rows = analytics::sales_rows(state.pool(), &shop_id).await?;

    Ok(Json(chart_points(&rows)))
}

/// `GET /api/dashboard/top-customers`
///
/// # Errors
///
/// Returns 400 when the `x-shop-id` header is missing.
pub async fn top_customers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Customer>>, AppError> {
    let shop_id = require_shop_id(&headers)?;
    let customers = analytics::customers_for_shop(state.pool(), &shop_id).await?;

    Ok(Json(rank_customers(customers)))
}

fn require_shop_id(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(SHOP_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| AppError::BadRequest("No Shop ID provided in headers".to_string()))
}

/// Parse a stored monetary value, treating anything non-numeric as zero.
fn parse_money(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Total revenue across all order totals.
fn total_revenue(totals: &[String]) -> Decimal {
    totals.iter().map(|raw| parse_money(raw)).sum()
}

/// Group order totals by calendar day, oldest day first.
fn chart_points(rows: &[SalesRow]) -> Vec<ChartPoint> {
    let mut by_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for row in rows {
        *by_date.entry(row.created_at.date_naive()).or_default() += parse_money(&row.total_price);
    }

    by_date
        .into_iter()
        .map(|(date, amount)| ChartPoint {
            date: date.to_string(),
            amount,
        })
        .collect()
}

/// Sort customers by parsed lifetime spend, descending, and keep the top 5.
fn rank_customers(mut customers: Vec<Customer>) -> Vec<Customer> {
    customers.sort_by(|a, b| parse_money(&b.total_spent).cmp(&parse_money(&a.total_spent)));
    customers.truncate(TOP_CUSTOMER_LIMIT);
    customers
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn customer(id: i32, total_spent: &str) -> Customer {
        Customer {
            id,
            shopify_id: i64::from(id),
            first_name: None,
            last_name: None,
            email: None,
            city: None,
            country: None,
            total_spent: total_spent.to_string(),
            shop_id: "demo.myshopify.com".to_string(),
        }
    }

    #[test]
    fn revenue_treats_non_numeric_as_zero() {
        let totals = vec![
            "10.00".to_string(),
            "5.50".to_string(),
            "invalid".to_string(),
        ];
        let revenue = total_revenue(&totals);
        assert_eq!(format!("{revenue:.2}"), "15.50");
    }

    #[test]
    fn revenue_of_no_orders_is_zero() {
        assert_eq!(format!("{:.2}", total_revenue(&[])), "0.00");
    }

    #[test]
    fn chart_groups_orders_by_day() {
        let jan_1_morning = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single().expect("ts");
        let jan_1_evening = Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).single().expect("ts");
        let jan_3 = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).single().expect("ts");

        let rows = vec![
            SalesRow {
                created_at: jan_1_morning,
                total_price: "10.00".to_string(),
            },
            SalesRow {
                created_at: jan_1_evening,
                total_price: "2.50".to_string(),
            },
            SalesRow {
                created_at: jan_3,
                total_price: "bogus".to_string(),
            },
        ];

        let points = chart_points(&rows);
        assert_eq!(points.len(), 2);
        assert_eq!(
            points,
            vec![
                ChartPoint {
                    date: "2024-01-01".to_string(),
                    amount: Decimal::from_str("12.50").expect("decimal"),
                },
                ChartPoint {
                    date: "2024-01-03".to_string(),
                    amount: Decimal::ZERO,
                },
            ]
        );
    }

    #[test]
    fn chart_point_amount_serializes_as_number() {
        let point = ChartPoint {
            date: "2024-01-01".to_string(),
            amount: Decimal::from_str("12.50").expect("decimal"),
        };

        let json = serde_json::to_value(&point).expect("serialize");
        assert!(json["amount"].is_number());
        assert_eq!(json, serde_json::json!({ "date": "2024-01-01", "amount": 12.5 }));
    }

    #[test]
    fn top_customers_sorts_by_spend_and_caps_at_five() {
        let customers = vec![
            customer(1, "10.00"),
            customer(2, "not-a-number"),
            customer(3, "300.00"),
            customer(4, "50.00"),
            customer(5, "40.00"),
            customer(6, "200.00"),
            customer(7, "0.99"),
        ];

        let ranked = rank_customers(customers);
        let ids: Vec<i32> = ranked.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 6, 4, 5, 1]);
    }

    #[test]
    fn missing_shop_id_is_a_bad_request() {
        let err = require_shop_id(&HeaderMap::new()).expect_err("missing header");
        assert!(matches!(err, AppError::BadRequest(_)));

        let mut headers = HeaderMap::new();
        headers.insert(SHOP_ID_HEADER, "demo.myshopify.com".parse().expect("value"));
        assert_eq!(
            require_shop_id(&headers).expect("present"),
            "demo.myshopify.com"
        );
    }
}
