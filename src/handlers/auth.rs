use crate::auth::gate::AuthError;
use crate::auth::types::{LoginForm, LoginPageParams};
use crate::error::AppResult;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde_json::{json, Value};
use tower_sessions::Session;

pub const LOGIN_SUCCESS_URL: &str = "/";
pub const LOGIN_FAILURE_URL: &str = "/login?error";
pub const LOGOUT_SUCCESS_URL: &str = "/login?logout";

fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

// Login page

pub async fn login_page(Query(params): Query<LoginPageParams>) -> Html<String> {
    let notice = if params.error.is_some() {
        r#"<p class="error">Invalid username and password.</p>"#
    } else if params.logout.is_some() {
        r#"<p class="notice">You have been signed out.</p>"#
    } else {
        ""
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Please sign in</title></head>
<body>
<form method="post" action="/login">
<h2>Please sign in</h2>
{notice}
<p><label for="username">Username</label> <input type="text" id="username" name="username" required autofocus></p>
<p><label for="password">Password</label> <input type="password" id="password" name="password" required></p>
<button type="submit">Sign in</button>
</form>
</body>
</html>
"#
    ))
}

// Form login / logout

/// POST /login
///
/// Wrong credentials are not an error response: the browser is sent back to
/// the login page with `?error`, and no session is created.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match state.gate.login(&session, &form.username, &form.password).await {
        Ok(_) => Ok(found(LOGIN_SUCCESS_URL)),
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %form.username, "login rejected");
            Ok(found(LOGIN_FAILURE_URL))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    state.gate.logout(&session).await?;
    Ok(found(LOGOUT_SUCCESS_URL))
}

/// GET /session: report whether the caller holds an authenticated session
pub async fn session_info(State(state): State<AppState>, session: Session) -> AppResult<Json<Value>> {
    match state.gate.current_principal(&session).await? {
        Some(principal) => Ok(Json(json!({
            "authenticated": true,
            "username": principal.username,
            "roles": principal.roles,
        }))),
        None => Ok(Json(json!({
            "authenticated": false
        }))),
    }
}
