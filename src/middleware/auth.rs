use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

/// Let the request through only if the gate recognizes it.
///
/// The resulting [`Principal`](crate::auth::gate::Principal) is placed in the
/// request extensions for handlers that care who is calling.
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = state
        .gate
        .authorize(&session, request.headers())
        .await
        .inspect_err(|e| {
            tracing::debug!(path = %request.uri().path(), "request refused: {}", e);
        })?;

    tracing::debug!(
        path = %request.uri().path(),
        username = %principal.username,
        method = ?principal.method,
        "request authorized"
    );
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
