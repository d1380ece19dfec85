//! # Auth Gate
//!
//! Decides whether a request may reach a protected route.
//!
//! ## State machine
//! ```text
//! Anonymous --(valid credentials)----> Authenticated
//! Anonymous --(invalid credentials)--> Anonymous        (redirect back to /login?error)
//! Authenticated --(logout)-----------> Anonymous
//! ```
//!
//! The session table is a `tower_sessions::MemoryStore` handed to the gate at
//! construction. The gate is the only component that writes to it; the
//! [`SessionManagerLayer`] it builds only moves session ids in and out of
//! cookies.
//!
//! ## Expiry
//! With an idle timeout configured, an expired record no longer loads, so
//! it cannot authorize anything. `MemoryStore` has no sweeper though: records
//! of sessions that expire without a logout stay in memory until the process
//! exits. Deployments with many abandoned logins should use a store that
//! implements `ExpiredDeletion` instead.

use crate::auth::credentials::{Credential, CredentialStore};
use axum::http::{header, HeaderMap, HeaderValue};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::collections::BTreeSet;
use thiserror::Error;
use tower_sessions::{session::Id, Expiry, MemoryStore, Session, SessionManagerLayer};

/// Session key holding the authenticated username
pub const USERNAME_KEY: &str = "username";

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "SESSION";

/// Realm advertised in `WWW-Authenticate` challenges
pub const BASIC_REALM: &str = "Realm";

/// Why the gate refused a request
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username/password did not match the stored credential
    #[error("Bad credentials")]
    InvalidCredentials,

    /// No authenticated session and no usable Basic header
    #[error("Full authentication is required to access this resource")]
    NotAuthenticated,

    /// An `Authorization: Basic` header that could not be decoded
    #[error("Invalid basic authentication token: {0}")]
    MalformedAuthorization(&'static str),

    /// The session backend failed
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A session was saved but came back without an id
    #[error("Session was not persisted")]
    SessionNotPersisted,
}

/// How a request proved who it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Session,
    Basic,
}

/// The identity attached to an authorized request
///
/// Inserted into request extensions by the `require_auth` middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: BTreeSet<String>,
    pub method: AuthMethod,
}

impl Principal {
    fn new(credential: &Credential, method: AuthMethod) -> Self {
        Self {
            username: credential.username().to_string(),
            roles: credential.roles().clone(),
            method,
        }
    }
}

/// Result of a successful login: the session record as the gate sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub session_id: Id,
    pub authenticated_username: String,
}

/// Cookie and lifetime settings for the session layer
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    pub cookie_secure: bool,
    /// `None` keeps sessions until logout or process exit
    pub idle_timeout: Option<time::Duration>,
}

pub struct AuthGate {
    credentials: CredentialStore,
    sessions: MemoryStore,
    settings: SessionSettings,
}

impl AuthGate {
    pub fn new(credentials: CredentialStore, sessions: MemoryStore, settings: SessionSettings) -> Self {
        Self {
            credentials,
            sessions,
            settings,
        }
    }

    /// Session middleware bound to this gate's session table
    pub fn session_layer(&self) -> SessionManagerLayer<MemoryStore> {
        let expiry = match self.settings.idle_timeout {
            Some(idle) => Expiry::OnInactivity(idle),
            None => Expiry::OnSessionEnd,
        };

        SessionManagerLayer::new(self.sessions.clone())
            .with_name(SESSION_COOKIE)
            .with_secure(self.settings.cookie_secure)
            .with_http_only(true)
            .with_expiry(expiry)
    }

    /// Check a username/password pair against the stored credential.
    ///
    /// Exact, case-sensitive comparison. Creates nothing.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<&Credential, AuthError> {
        self.credentials
            .verify(username, password)
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Authenticate and bind the result to `session`.
    ///
    /// The session id is rotated first so a cookie issued before login never
    /// becomes an authenticated one. On failure the session is left as it was.
    pub async fn login(
        &self,
        session: &Session,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        let credential = self.authenticate(username, password)?;

        session.cycle_id().await?;
        session.insert(USERNAME_KEY, credential.username()).await?;
        session.save().await?;

        let session_id = session.id().ok_or(AuthError::SessionNotPersisted)?;
        tracing::info!(username = credential.username(), "login succeeded");

        Ok(AuthenticatedSession {
            session_id,
            authenticated_username: credential.username().to_string(),
        })
    }

    /// Drop the session record; a no-op for sessions that were never saved.
    pub async fn logout(&self, session: &Session) -> Result<(), AuthError> {
        session.flush().await?;
        Ok(())
    }

    /// The principal bound to `session`, if it is still valid.
    ///
    /// A session is valid only while its username matches the stored credential.
    pub async fn current_principal(&self, session: &Session) -> Result<Option<Principal>, AuthError> {
        let username: Option<String> = session.get(USERNAME_KEY).await?;
        let credential = self.credentials.credential();

        match username {
            Some(name) if name == credential.username() => {
                Ok(Some(Principal::new(credential, AuthMethod::Session)))
            }
            Some(name) => {
                tracing::debug!(username = %name, "session bound to unknown user, ignoring");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Decide whether a request to a protected route may proceed.
    ///
    /// Order: authenticated session, then `Authorization: Basic`, else refuse.
    /// Basic credentials authorize this request only and create no session.
    pub async fn authorize(&self, session: &Session, headers: &HeaderMap) -> Result<Principal, AuthError> {
        if let Some(principal) = self.current_principal(session).await? {
            return Ok(principal);
        }

        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Err(AuthError::NotAuthenticated);
        };
        let Some((username, password)) = parse_basic(value)? else {
            return Err(AuthError::NotAuthenticated);
        };

        let credential = self.authenticate(&username, &password).inspect_err(|_| {
            tracing::warn!(username = %username, "basic authentication rejected");
        })?;

        Ok(Principal::new(credential, AuthMethod::Basic))
    }
}

/// Decode `Basic base64(username:password)`.
///
/// Returns `Ok(None)` for other schemes so they fall through to a plain 401.
fn parse_basic(value: &HeaderValue) -> Result<Option<(String, String)>, AuthError> {
    let raw = value
        .to_str()
        .map_err(|_| AuthError::MalformedAuthorization("header is not visible ASCII"))?
        .trim();

    let Some((scheme, token)) = raw.split_once(' ') else {
        return Ok(None);
    };
    if !scheme.eq_ignore_ascii_case("basic") {
        return Ok(None);
    }

    let decoded = STANDARD
        .decode(token.trim())
        .map_err(|_| AuthError::MalformedAuthorization("token is not base64"))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::MalformedAuthorization("token is not UTF-8"))?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedAuthorization("missing ':' separator"))?;

    Ok(Some((username.to_string(), password.to_string())))
}
