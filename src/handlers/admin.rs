//! Administrative handlers: priority bookings, approval workflow, dashboard

use crate::error::EngineError;
use crate::ledger::NewBooking;
use crate::models::{ApiResponse, CreatePriorityBookingRequest, RejectBookingRequest};
use crate::validation::validate_create_priority_booking;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::AppState;

const DEFAULT_PRIORITY_ATTENDEES: i64 = 50;

/// Create a priority booking (auto-approved)
///
/// Goes through the same atomic creation path as ordinary bookings: an
/// occupied slot yields a 409, never a second active booking.
pub async fn create_priority_booking(
    State(state): State<AppState>,
    Json(input): Json<CreatePriorityBookingRequest>,
) -> Result<impl IntoResponse, EngineError> {
    validate_create_priority_booking(&input)?;

    let booking = state
        .ledger
        .create(NewBooking {
            hall_id: input.hall_id,
            time_slot_id: input.time_slot_id,
            booking_date: input.booking_date,
            name: input.requester_name,
            email: input
                .requester_email
                .unwrap_or_else(|| "admin@booking.local".to_string()),
            phone: input.requester_phone,
            organization: Some(input.department),
            event_title: input.purpose,
            description: input.notes,
            attendees: input.attendees.unwrap_or(DEFAULT_PRIORITY_ATTENDEES),
            priority: true,
            approved_by: Some("Admin (Priority)".to_string()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(booking))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBookingRequest {
    pub approved_by: Option<String>,
}

/// Approve a pending booking
pub async fn approve_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    body: Option<Json<ApproveBookingRequest>>,
) -> Result<impl IntoResponse, EngineError> {
    let approver = body
        .and_then(|Json(b)| b.approved_by)
        .unwrap_or_else(|| "Admin".to_string());

    let booking = state.approvals.approve(&booking_id, &approver).await?;
    state.notifier.booking_confirmed(&booking);

    Ok((StatusCode::OK, Json(ApiResponse::success(booking))))
}

/// Reject a pending booking
pub async fn reject_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    body: Option<Json<RejectBookingRequest>>,
) -> Result<impl IntoResponse, EngineError> {
    let reason = body.and_then(|Json(b)| b.reason);

    let booking = state
        .approvals
        .reject(&booking_id, reason.as_deref())
        .await?;
    state
        .notifier
        .booking_rejected(&booking, booking.rejection_reason.as_deref().unwrap_or(""));

    Ok((StatusCode::OK, Json(ApiResponse::success(booking))))
}

/// Booking counts for the admin dashboard
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, EngineError> {
    let stats = state
        .ledger
        .dashboard_stats(Utc::now().date_naive())
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::success(stats))))
}
