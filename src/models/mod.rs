//! Data models for the booking engine

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Lifecycle state of a booking. Transitions are owned by the approval
/// state machine: pending -> approved, pending -> rejected, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    /// Pending and approved bookings occupy their (hall, slot, date) key.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    /// Lowercase wire form, matching the stored and serialized value.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Hall
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub capacity: i64,
    pub description: Option<String>,
    /// Operational flag: when false no slot in the hall is bookable,
    /// including by priority bookings.
    pub is_available: bool,
    /// Soft-delete flag: hidden halls are excluded from all listings.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Time slot
// =============================================================================

/// A named interval within a day. The catalog is global, shared by all
/// halls, and ordered by `slot_order` (the lowest orders are the "early"
/// slots restricted on Saturdays).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub label: String,
    pub start_time: String,
    pub end_time: String,
    pub slot_order: i64,
    pub is_active: bool,
}

// =============================================================================
// Maintenance window
// =============================================================================

/// Admin-declared blackout for a hall and date. A missing `time_slot_id`
/// means the whole day is covered.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindow {
    pub id: Uuid,
    pub hall_id: Uuid,
    pub maintenance_date: NaiveDate,
    pub time_slot_id: Option<Uuid>,
    pub reason: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Booking
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Storage identity.
    pub id: Uuid,
    /// Human-facing business key ("BK..."/"PR..."), globally unique.
    pub booking_id: String,
    pub hall_id: Uuid,
    pub time_slot_id: Uuid,
    pub booking_date: NaiveDate,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub event_title: String,
    pub description: Option<String>,
    pub attendees: i64,
    pub status: BookingStatus,
    pub priority_booking: bool,
    pub submitted_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
    pub rejection_reason: Option<String>,
}

/// Ordinary booking submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub hall_id: Uuid,
    pub time_slot_id: Uuid,
    pub booking_date: NaiveDate,
    pub requester_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub event_title: String,
    pub purpose: Option<String>,
    pub attendees: i64,
}

/// Administrator-originated priority booking. Auto-approved on creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriorityBookingRequest {
    pub hall_id: Uuid,
    pub time_slot_id: Uuid,
    pub booking_date: NaiveDate,
    pub requester_name: String,
    pub department: String,
    pub purpose: String,
    pub attendees: Option<i64>,
    pub requester_email: Option<String>,
    pub requester_phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RejectBookingRequest {
    pub reason: Option<String>,
}

// =============================================================================
// Availability
// =============================================================================

/// Per-slot availability verdict for one hall and date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotStatus {
    pub id: Uuid,
    pub label: String,
    pub start_time: String,
    pub end_time: String,
    pub slot_order: i64,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Business key of the occupying booking, exposed only to `showAll`
    /// diagnostic queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_booking_id: Option<String>,
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub approved_bookings: i64,
    pub rejected_bookings: i64,
    pub todays_bookings: i64,
    pub total_halls: i64,
}

// =============================================================================
// API Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
