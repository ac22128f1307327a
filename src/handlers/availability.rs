//! Slot availability handlers

use crate::availability::AvailabilityQuery;
use crate::error::EngineError;
use crate::models::ApiResponse;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotsQuery {
    pub date: Option<NaiveDate>,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
    #[serde(default)]
    pub priority: bool,
    #[serde(default)]
    pub show_all: bool,
}

/// Get per-slot availability for a hall and date
///
/// A pre-submission hint only; `POST /api/bookings` re-validates conflicts
/// at write time.
pub async fn get_time_slots(
    State(state): State<AppState>,
    Path(hall_id): Path<Uuid>,
    Query(query): Query<TimeSlotsQuery>,
) -> Result<impl IntoResponse, EngineError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());

    let statuses = state
        .resolver
        .resolve(
            hall_id,
            &AvailabilityQuery {
                date,
                user_email: query.user_email,
                user_phone: query.user_phone,
                priority: query.priority,
                show_all: query.show_all,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(statuses))))
}
