//! # Error Handling
//!
//! Application error type and its conversion into HTTP responses.
//!
//! | Variant | Status | Body |
//! |---|---|---|
//! | `Database` | 500 | generic message, details logged |
//! | `Auth` | 401 (500 when the session backend fails) | gate message |
//! | `BadRequest` | 400 | message |
//!
//! Every 401 also carries `WWW-Authenticate: Basic realm="Realm"` so clients
//! know they can retry with Basic credentials.

use crate::auth::gate::{AuthError, BASIC_REALM};
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type
///
/// `#[from]` lets handlers use `?` on sqlx and gate results directly.
#[derive(Error, Debug)]
pub enum AppError {
    /// Reservation store failures
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Authentication/authorization failures raised by the auth gate
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Bad request errors (400), e.g. a missing required header
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Database(e) => {
                // Log detailed error for debugging (not shown to user)
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Auth(AuthError::Session(e)) => {
                tracing::error!("Session error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session error".to_string())
            }
            AppError::Auth(AuthError::SessionNotPersisted) => {
                tracing::error!("Session was not persisted");
                (StatusCode::INTERNAL_SERVER_ERROR, "Session error".to_string())
            }
            AppError::Auth(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        // Format: { "error": "error message here" }
        let body = Json(json!({
            "error": error_message,
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            let challenge = format!("Basic realm=\"{BASIC_REALM}\"");
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
            }
        }
        response
    }
}

/// Convenience alias: `AppResult<Json<Greeting>>` instead of `Result<Json<Greeting>, AppError>`
pub type AppResult<T> = Result<T, AppError>;
