//! # Authentication
//!
//! Everything the service needs to tell an authenticated caller from an
//! anonymous one.
//!
//! ## Submodules
//! - `credentials`: The single stored username/password/roles tuple
//! - `gate`: Login, logout and the per-request authorization decision
//! - `types`: Form and query types for the login endpoints
//!
//! ## Login Flow
//! 1. Browser fetches the form → `GET /login`
//! 2. Browser posts `username`/`password` → `POST /login`
//! 3. Gate compares them with the stored credential
//! 4. Match: session id rotated, username stored, redirect to `/`
//! 5. No match: redirect to `/login?error`, session untouched

pub mod credentials;
pub mod gate;
pub mod types;
