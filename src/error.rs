//! Unified error handling for the HTTP surface.
//!
//! Server-side failures are redacted and carry a `success: false` flag so
//! trigger callers can distinguish a failed pass from a completed one;
//! client errors carry their message verbatim.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::db::RepositoryError;

/// Application-level error type for request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Bad request from client (e.g., missing `x-shop-id`).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Credential check failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => {
                Self::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::PasswordHash => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        };

        // Don't expose internal details to clients.
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal Server Error".to_string(),
            Self::BadRequest(m) | Self::Unauthorized(m) => m.clone(),
        };

        let body = if status.is_server_error() {
            json!({ "success": false, "error": message })
        } else {
            json!({ "error": message })
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display() {
        let err = AppError::BadRequest("No Shop ID provided in headers".to_string());
        assert_eq!(
            err.to_string(),
            "Bad request: No Shop ID provided in headers"
        );
    }

    #[test]
    fn app_error_status_codes() {
        fn status_of(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            status_of(AppError::BadRequest("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_credentials_map_to_unauthorized() {
        let err = AppError::from(AuthError::InvalidCredentials);
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn server_error_body_carries_success_flag() {
        let err = AppError::Database(RepositoryError::Database(sqlx::Error::PoolClosed));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn client_error_body_has_no_success_flag() {
        let err = AppError::BadRequest("No Shop ID provided in headers".to_string());
        let response = err.into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body["error"], "No Shop ID provided in headers");
        assert!(body.get("success").is_none());
    }
}
