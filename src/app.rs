//! # Route Table
//!
//! The one place where (method, path) pairs are bound to handlers and the
//! middleware stack is assembled. `main` and the HTTP tests both build the
//! service through [`router`].
//!
//! | Method | Path | Auth |
//! |---|---|---|
//! | GET | `/` | gate, when `protect_greetings` |
//! | GET | `/header` | gate, when `protect_greetings` |
//! | GET | `/reservations` | public |
//! | GET, POST | `/login` | public |
//! | POST | `/logout` | public |
//! | GET | `/session` | public |
//! | GET | `/health` | public |

use crate::handlers::auth::{login, login_page, logout, session_info};
use crate::handlers::greetings::{greet, greet_with_header};
use crate::handlers::health::health_check;
use crate::handlers::reservations::list_reservations;
use crate::middleware::auth::require_auth;
use crate::state::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let greetings = Router::new()
        .route("/", get(greet))
        .route("/header", get(greet_with_header));

    let greetings = if state.protect_greetings {
        greetings.route_layer(axum_middleware::from_fn_with_state(state.clone(), require_auth))
    } else {
        greetings
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Layers apply bottom-up: tracing sees every request first, the session
    // layer runs before any handler or the auth middleware.
    Router::new()
        .route("/health", get(health_check))
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/session", get(session_info))
        .route("/reservations", get(list_reservations))
        .merge(greetings)
        .layer(state.gate.session_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
