//! Booking submission and lookup handlers

use crate::error::EngineError;
use crate::ledger::NewBooking;
use crate::models::{ApiResponse, Booking, CreateBookingRequest};
use crate::validation::validate_create_booking;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::AppState;

/// Submit an ordinary booking request
pub async fn create_booking(
    State(state): State<AppState>,
    Json(input): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, EngineError> {
    validate_create_booking(&input)?;

    let booking = state
        .ledger
        .create(NewBooking {
            hall_id: input.hall_id,
            time_slot_id: input.time_slot_id,
            booking_date: input.booking_date,
            name: input.requester_name,
            email: input.email,
            phone: input.phone,
            organization: input.organization,
            event_title: input.event_title,
            description: input.purpose,
            attendees: input.attendees,
            priority: false,
            approved_by: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(booking))))
}

/// List all bookings, newest first (admin view)
pub async fn list_bookings(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, EngineError> {
    let bookings: Vec<Booking> = state.ledger.list_all().await?;
    Ok((StatusCode::OK, Json(ApiResponse::success(bookings))))
}

/// Get booking details by business key
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let booking = state
        .ledger
        .find_by_business_key(&booking_id)
        .await?
        .ok_or(EngineError::NotFound("Booking"))?;

    Ok((StatusCode::OK, Json(ApiResponse::success(booking))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBookingsQuery {
    pub date: NaiveDate,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
}

/// A requester's active bookings for a date, matched by email or phone
pub async fn get_user_bookings(
    State(state): State<AppState>,
    Query(query): Query<UserBookingsQuery>,
) -> Result<impl IntoResponse, EngineError> {
    if query.user_email.is_none() && query.user_phone.is_none() {
        return Err(EngineError::Validation(
            crate::validation::ValidationError::Required {
                field: "userEmail or userPhone".to_string(),
            },
        ));
    }

    let bookings = state
        .ledger
        .user_active_bookings(
            query.date,
            query.user_email.as_deref(),
            query.user_phone.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(bookings))))
}
