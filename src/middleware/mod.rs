//! # Middleware Module
//!
//! Middleware functions run before the route handlers and can short-circuit
//! the request.
//!
//! ## Our Middleware
//! - `auth`: Asks the auth gate whether the caller may reach a protected route
//!   (session cookie or Basic credentials), otherwise answers 401

pub mod auth;
