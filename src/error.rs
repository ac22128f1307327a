//! Engine error taxonomy and its HTTP mapping
//!
//! Every failure a handler can surface is one of these variants; the
//! `IntoResponse` impl is the single place where they become status codes
//! and `ApiResponse` envelopes. The engine never retries on its own: each
//! error is a terminal outcome for the attempt that produced it.

use crate::models::{ApiResponse, BookingStatus};
use crate::validation::ValidationError;
use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// The (hall, slot, date) key is already held by an active booking.
    #[error("time slot is already booked (booking {existing_booking_id})")]
    Conflict {
        existing_booking_id: String,
        /// The existing booking belongs to the same requester.
        own_booking: bool,
    },

    /// Weekday blackout policy forbids this date/slot for ordinary requests.
    #[error("{0}")]
    Blackout(String),

    /// Hall-level operational gate. Applies to priority bookings too.
    #[error("hall is currently unavailable")]
    HallUnavailable,

    #[error("booking {booking_id} is already {current}")]
    InvalidTransition {
        booking_id: String,
        current: BookingStatus,
    },

    #[error("database error")]
    Database(#[from] sqlx::Error),
}

impl EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Conflict { .. } => StatusCode::CONFLICT,
            EngineError::Blackout(_) => StatusCode::FORBIDDEN,
            EngineError::HallUnavailable => StatusCode::CONFLICT,
            EngineError::InvalidTransition { .. } => StatusCode::CONFLICT,
            EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            EngineError::Conflict { own_booking, .. } if *own_booking => {
                "You already have a booking for this time slot".to_string()
            }
            // Storage failures must never leak detail or read as success.
            EngineError::Database(_) => "Database error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        if let EngineError::Database(ref e) = self {
            tracing::error!("Database error: {}", e);
        }
        let status = self.status_code();
        let body = Json(ApiResponse::<()>::error(self.public_message()));
        (status, body).into_response()
    }
}
