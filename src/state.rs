//! # Application State
//!
//! Shared resources handed to every handler through axum's `State`
//! extractor. Everything is wired explicitly here at startup; there are no
//! hidden globals.
//!
//! ## What lives here
//! - The auth gate, which owns the credential store and the session table
//! - The greeting service
//! - The reservation repository (a SQLite pool underneath)
//! - Whether the greeting routes are protected

use crate::auth::credentials::CredentialStore;
use crate::auth::gate::{AuthGate, SessionSettings};
use crate::config::{check_idle_minutes, Config};
use crate::db::{self, reservations::ReservationRepository};
use crate::greeting::GreetingService;
use anyhow::Result;
use std::sync::Arc;
use tower_sessions::MemoryStore;

/// Shared application state
///
/// `Clone` is required by axum; every field is either `Copy`, an `Arc`, or a
/// pool handle, so cloning per request only copies pointers.
#[derive(Clone)]
pub struct AppState {
    /// Login, logout and authorization decisions
    pub gate: Arc<AuthGate>,

    /// Produces greeting payloads
    pub greetings: GreetingService,

    /// Reads the reservation table
    pub reservations: ReservationRepository,

    /// `true`: `/` and `/header` require authentication
    pub protect_greetings: bool,
}

impl AppState {
    /// Initialize application state
    ///
    /// This function:
    /// 1. Builds the credential store from configuration
    /// 2. Creates the in-memory session table and hands it to the gate
    /// 3. Connects to SQLite and runs migrations
    ///
    /// # Errors
    /// Returns an error if the idle timeout is out of range or the database
    /// cannot be opened or migrated.
    pub async fn new(config: &Config) -> Result<Self> {
        let credentials = CredentialStore::from_config(config);
        let settings = SessionSettings {
            cookie_secure: config.session_cookie_secure,
            idle_timeout: check_idle_minutes(config.session_idle_minutes)?.map(time::Duration::minutes),
        };
        let gate = Arc::new(AuthGate::new(credentials, MemoryStore::default(), settings));

        let pool = db::connect(&config.database_url, config.database_max_connections).await?;

        Ok(AppState {
            gate,
            greetings: GreetingService::new(config.greeting_delay_ms),
            reservations: ReservationRepository::new(pool),
            protect_greetings: config.protect_greetings,
        })
    }
}
