//! # Configuration Management
//!
//! Configuration comes from the environment ("12-factor app"), with a `.env`
//! file loaded first for local development.
//!
//! ## Environment Variables
//! - `HOST`: Server bind address (default: 127.0.0.1)
//! - `PORT`: Server port (default: 8080)
//! - `DATABASE_URL`: SQLite connection string for the reservation store
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `APP_USERNAME` / `APP_PASSWORD` / `APP_ROLES`: The single in-memory credential
//! - `PROTECT_GREETINGS`: Whether `/` and `/header` sit behind the auth gate (default: true)
//! - `GREETING_DELAY_MS`: Artificial suspension before a greeting is produced (default: 10)
//! - `SESSION_COOKIE_SECURE`: Set the `Secure` flag on the session cookie (default: false)
//! - `SESSION_IDLE_MINUTES`: Optional idle expiry for sessions (default: never expire)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Application configuration
///
/// All fields are public so tests can build a configuration literally
/// (usually starting from [`Config::default`]).
#[derive(Clone)]
pub struct Config {
    /// Server host/IP address to bind to
    /// Examples: "127.0.0.1" (localhost only), "0.0.0.0" (all interfaces)
    pub host: String,

    /// Server port number
    pub port: u16,

    /// SQLite database connection URL for reservations
    /// Format: "sqlite:filename.db?mode=rwc" or "sqlite::memory:"
    pub database_url: String,

    /// Maximum number of pooled database connections
    pub database_max_connections: u32,

    /// Username of the single stored credential
    pub username: String,

    /// Password of the single stored credential, compared verbatim
    pub password: String,

    /// Roles granted to the stored credential
    pub roles: Vec<String>,

    /// `true` puts the greeting routes behind the auth gate,
    /// `false` serves them anonymously
    pub protect_greetings: bool,

    /// Milliseconds the greeting handlers yield before answering (0 disables)
    pub greeting_delay_ms: u64,

    /// Whether the session cookie is marked `Secure` (HTTPS only)
    pub session_cookie_secure: bool,

    /// Idle timeout for sessions; `None` keeps them until logout or restart
    pub session_idle_minutes: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite:reservations.db?mode=rwc".to_string(),
            database_max_connections: 5,
            username: "user".to_string(),
            password: "password".to_string(),
            roles: vec!["USER".to_string()],
            protect_greetings: true,
            greeting_delay_ms: 10,
            session_cookie_secure: false,
            session_idle_minutes: None,
        }
    }
}

// Hand-written so the password never ends up in the startup log line.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("database_max_connections", &self.database_max_connections)
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("roles", &self.roles)
            .field("protect_greetings", &self.protect_greetings)
            .field("greeting_delay_ms", &self.greeting_delay_ms)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("session_idle_minutes", &self.session_idle_minutes)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads variables from .env file (if present) using dotenvy
    /// 2. Overrides each default in [`Config::default`] that is set in the environment
    /// 3. Returns an error naming the variable when a value fails to parse
    ///
    /// ## Example .env file
    /// ```text
    /// PORT=8080
    /// APP_USERNAME=user
    /// APP_PASSWORD=password
    /// PROTECT_GREETINGS=true
    /// ```
    pub fn from_env() -> Result<Self> {
        // dotenvy doesn't error if the file is missing
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(defaults.database_max_connections),
            username: env::var("APP_USERNAME").unwrap_or(defaults.username),
            password: env::var("APP_PASSWORD").unwrap_or(defaults.password),
            roles: env::var("APP_ROLES")
                .map(|raw| parse_roles(&raw))
                .unwrap_or(defaults.roles),
            protect_greetings: parse_var("PROTECT_GREETINGS")?
                .unwrap_or(defaults.protect_greetings),
            greeting_delay_ms: parse_var("GREETING_DELAY_MS")?
                .unwrap_or(defaults.greeting_delay_ms),
            session_cookie_secure: parse_var("SESSION_COOKIE_SECURE")?
                .unwrap_or(defaults.session_cookie_secure),
            session_idle_minutes: check_idle_minutes(parse_var("SESSION_IDLE_MINUTES")?)?
                .or(defaults.session_idle_minutes),
        })
    }

    /// Socket address to bind the server to, e.g. "127.0.0.1:8080"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and parse an optional variable; unset means `None`, garbage is an error.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {name}: {raw:?}")),
        Err(_) => Ok(None),
    }
}

/// Longest accepted idle timeout: one year.
pub const MAX_SESSION_IDLE_MINUTES: i64 = 60 * 24 * 365;

/// Idle timeouts must be positive and small enough for `time::Duration`.
pub fn check_idle_minutes(minutes: Option<i64>) -> Result<Option<i64>> {
    match minutes {
        Some(m) if !(1..=MAX_SESSION_IDLE_MINUTES).contains(&m) => anyhow::bail!(
            "invalid value for SESSION_IDLE_MINUTES: {m} (expected 1..={MAX_SESSION_IDLE_MINUTES})"
        ),
        other => Ok(other),
    }
}

/// Split a comma-separated role list, dropping blanks.
pub fn parse_roles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}
