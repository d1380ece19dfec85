use crate::db::models::Reservation;
use crate::error::AppResult;
use futures_util::stream::BoxStream;
use futures_util::TryStreamExt;
use sqlx::SqlitePool;

/// Read-only access to the reservation table
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lazily stream every reservation in storage order.
    ///
    /// Nothing is read until the stream is polled; each call runs a fresh query.
    pub fn stream(&self) -> BoxStream<'_, Result<Reservation, sqlx::Error>> {
        sqlx::query_as::<_, Reservation>("SELECT id, name FROM reservations ORDER BY id")
            .fetch(&self.pool)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self.stream().try_collect().await?;
        Ok(reservations)
    }
}
