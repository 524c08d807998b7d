//! Tenant dashboard login.
//!
//! A lookup-and-compare credential check: find the tenant by account email
//! and verify the password against the stored Argon2 hash. Unknown email and
//! wrong password produce the same response.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::verify_password;
use crate::db::TenantRepository;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    success: bool,
    email: String,
    shop_domain: String,
}

/// `POST /api/login`
///
/// # Errors
///
/// Returns 400 when email or password is missing, 401 on any credential
/// mismatch.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(AppError::BadRequest(
            "Please provide email and password".to_string(),
        ));
    };

    let tenant = TenantRepository::new(state.pool())
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

    verify_password(&password, &tenant.password_hash)?;

    Ok(Json(LoginResponse {
        success: true,
        email: tenant.email,
        shop_domain: tenant.shop_domain,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_uses_camel_case() {
        let response = LoginResponse {
            success: true,
            email: "owner@example.com".to_string(),
            shop_domain: "demo.myshopify.com".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["shopDomain"], "demo.myshopify.com");
    }
}
