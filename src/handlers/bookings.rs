use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::calendar::BookingFilters;
use crate::state::AppState;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<serde_json::Value>, AppError> {
    let bookings = state.calendar.list_bookings(&filters).await?;
    Ok(Json(bookings))
}

#[derive(Deserialize, Default)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<CancelRequest>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let confirmation = state
        .calendar
        .cancel_booking(&id, payload.reason.as_deref())
        .await?;
    Ok(Json(confirmation))
}
