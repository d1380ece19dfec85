//! # Health Check Handler
//!
//! Simple endpoint to check if the server is running.

use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health (public)
///
/// ## Response
/// ```json
/// {
///   "status": "healthy",
///   "service": "secure-greeting-server"
/// }
/// ```
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "secure-greeting-server"
    }))
}
