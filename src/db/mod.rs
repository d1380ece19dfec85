//! # Database Module
//!
//! - `models`: Row types (Reservation)
//! - `reservations`: Read operations for reservations
//!
//! The schema and seed rows live in `./migrations` and are embedded at
//! compile time.

pub mod models;
pub mod reservations;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Open the pool and bring the schema up to date.
///
/// `sqlite::memory:` works too; sqlx shares one in-memory database across the
/// pool's connections.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .with_context(|| format!("failed to open database {database_url}"))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    Ok(pool)
}
