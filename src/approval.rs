//! Approval state machine for booking lifecycle transitions
//!
//! pending -> approved and pending -> rejected are the only legal moves;
//! both terminal states are immutable. Transitions run as conditional
//! updates guarded on the pending status, so a concurrent double-approve
//! resolves to one success and one InvalidTransition.

use crate::error::EngineError;
use crate::ledger::BookingLedger;
use crate::models::Booking;
use chrono::Utc;

pub const DEFAULT_REJECTION_REASON: &str = "No reason provided";

#[derive(Clone)]
pub struct ApprovalStateMachine {
    ledger: BookingLedger,
}

impl ApprovalStateMachine {
    pub fn new(ledger: BookingLedger) -> Self {
        Self { ledger }
    }

    /// Approve a pending booking, stamping approver and time.
    ///
    /// Re-approving is an error, not a silent success: a duplicate approve
    /// usually means two administrators acted on the same request.
    pub async fn approve(&self, booking_id: &str, approver: &str) -> Result<Booking, EngineError> {
        let updated = self
            .ledger
            .mark_approved(booking_id, approver, Utc::now())
            .await?;

        match updated {
            Some(booking) => {
                tracing::info!("Booking {} approved by {}", booking_id, approver);
                Ok(booking)
            }
            None => Err(self.explain_failed_transition(booking_id).await?),
        }
    }

    /// Reject a pending booking with a reason.
    pub async fn reject(
        &self,
        booking_id: &str,
        reason: Option<&str>,
    ) -> Result<Booking, EngineError> {
        let reason = match reason {
            Some(r) if !r.trim().is_empty() => r,
            _ => DEFAULT_REJECTION_REASON,
        };

        let updated = self.ledger.mark_rejected(booking_id, reason).await?;

        match updated {
            Some(booking) => {
                tracing::info!("Booking {} rejected: {}", booking_id, reason);
                Ok(booking)
            }
            None => Err(self.explain_failed_transition(booking_id).await?),
        }
    }

    /// A guarded update that matched no row either had no such booking or
    /// found it outside the pending state; a follow-up read tells which.
    async fn explain_failed_transition(
        &self,
        booking_id: &str,
    ) -> Result<EngineError, EngineError> {
        match self.ledger.find_by_business_key(booking_id).await? {
            Some(existing) => Ok(EngineError::InvalidTransition {
                booking_id: booking_id.to_string(),
                current: existing.status,
            }),
            None => Ok(EngineError::NotFound("Booking")),
        }
    }
}
