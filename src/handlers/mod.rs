//! # HTTP Request Handlers
//!
//! ## Submodules
//! - `health`: Health check endpoint
//! - `auth`: Login page, form login, logout, session introspection
//! - `greetings`: `/` and `/header`
//! - `reservations`: `/reservations`
//!
//! ## Handler Pattern
//! Handlers are async functions that:
//! 1. Extract data from the request (state, session, headers, form body)
//! 2. Call into the gate, the greeting service or the repository
//! 3. Return a response (JSON, HTML, or a redirect)

pub mod auth;
pub mod greetings;
pub mod health;
pub mod reservations;
