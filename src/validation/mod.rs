//! Input validation module

use crate::models::{CreateBookingRequest, CreatePriorityBookingRequest};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required")]
    Required { field: String },

    #[error("Field '{field}' is too long (max {max} characters)")]
    TooLong { field: String, max: usize },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Attendees must be a positive number")]
    InvalidAttendees,
}

const MAX_FIELD_LEN: usize = 255;
const MAX_TEXT_LEN: usize = 2000;

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn cap(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validate an ordinary booking submission
pub fn validate_create_booking(input: &CreateBookingRequest) -> Result<(), ValidationError> {
    require("requesterName", &input.requester_name)?;
    cap("requesterName", &input.requester_name, MAX_FIELD_LEN)?;

    require("email", &input.email)?;
    if !is_valid_email(&input.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if let Some(ref phone) = input.phone {
        if !phone.trim().is_empty() && !is_valid_phone(phone) {
            return Err(ValidationError::InvalidPhone);
        }
    }

    if let Some(ref org) = input.organization {
        cap("organization", org, MAX_FIELD_LEN)?;
    }

    require("eventTitle", &input.event_title)?;
    cap("eventTitle", &input.event_title, MAX_FIELD_LEN)?;

    if let Some(ref purpose) = input.purpose {
        cap("purpose", purpose, MAX_TEXT_LEN)?;
    }

    if input.attendees <= 0 {
        return Err(ValidationError::InvalidAttendees);
    }

    Ok(())
}

/// Validate a priority booking submission
pub fn validate_create_priority_booking(
    input: &CreatePriorityBookingRequest,
) -> Result<(), ValidationError> {
    require("requesterName", &input.requester_name)?;
    cap("requesterName", &input.requester_name, MAX_FIELD_LEN)?;

    require("department", &input.department)?;
    cap("department", &input.department, MAX_FIELD_LEN)?;

    require("purpose", &input.purpose)?;
    cap("purpose", &input.purpose, MAX_TEXT_LEN)?;

    if let Some(ref email) = input.requester_email {
        if !email.is_empty() && !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
    }

    if let Some(attendees) = input.attendees {
        if attendees <= 0 {
            return Err(ValidationError::InvalidAttendees);
        }
    }

    Ok(())
}

/// Simple email validation
fn is_valid_email(email: &str) -> bool {
    // Basic check: contains @ and at least one .
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);

    !local.is_empty() && !domain.is_empty() && domain.contains('.') && domain.len() > 2
}

/// Digits, spaces and a few separators; at least 7 digits overall
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'));
    allowed && digits >= 7 && phone.len() <= 20
}
