//! # Greeting Handlers
//!
//! `GET /` and `GET /header`. Whether they sit behind the auth gate is
//! decided when the router is built.

use crate::error::{AppError, AppResult};
use crate::greeting::Greeting;
use crate::state::AppState;
use axum::{extract::State, http::HeaderMap, Json};

/// Header echoed by `/header`
pub const ECHO_HEADER: &str = "x-header";

/// GET / → `{"message": "hi!"}`
pub async fn greet(State(state): State<AppState>) -> Json<Greeting> {
    Json(state.greetings.greet().await)
}

/// GET /header → `{"message": "<x-header value>"}`
///
/// The header is required: absent (or not valid UTF-8) is a 400, never a
/// default message.
pub async fn greet_with_header(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Greeting>> {
    let value = headers
        .get(ECHO_HEADER)
        .ok_or_else(|| {
            AppError::BadRequest(format!("Required request header '{ECHO_HEADER}' is not present"))
        })?;
    // `HeaderValue::to_str` only admits visible ASCII; any UTF-8 is echoed.
    let value = std::str::from_utf8(value.as_bytes())
        .map_err(|_| AppError::BadRequest(format!("Request header '{ECHO_HEADER}' is not valid UTF-8")))?;

    Ok(Json(state.greetings.greet_with_header(value).await))
}
