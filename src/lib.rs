//! # Secure Greeting Server
//!
//! A small HTTP service with three parts:
//! - **Credential store**: one in-memory username/password/roles tuple
//! - **Auth gate**: form login, logout, session cookies and HTTP Basic
//! - **Greeting service** and **reservation lookup** behind it
//!
//! See [`app::router`] for the route table.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod greeting;
pub mod handlers;
pub mod middleware;
pub mod state;
