//! # Database Models
//!
//! Row types for the reservation store. They double as the JSON shape
//! returned by the API.

use serde::Serialize;

/// A named reservation
///
/// `id` is optional to match records that have not been stored yet;
/// rows read back from SQLite always carry one.
///
/// ## Example JSON
/// ```json
/// { "id": 1, "name": "Madhura" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: Option<i64>,
    pub name: String,
}
