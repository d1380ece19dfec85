use crate::db::models::Reservation;
use crate::error::AppResult;
use crate::state::AppState;
use axum::{extract::State, Json};

/// GET /reservations → every reservation, in storage order (public)
pub async fn list_reservations(State(state): State<AppState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservations.find_all().await?;
    Ok(Json(reservations))
}
