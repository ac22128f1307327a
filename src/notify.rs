//! Outbound notification seam
//!
//! The real mailer is an external collaborator; the engine only needs a
//! place to announce outcomes. The shipped implementation logs through
//! tracing so deployments without SMTP still leave an operator trail.

use crate::models::Booking;

pub trait Notifier: Send + Sync {
    fn booking_confirmed(&self, booking: &Booking);
    fn booking_rejected(&self, booking: &Booking, reason: &str);
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn booking_confirmed(&self, booking: &Booking) {
        tracing::info!(
            "Confirmation notice for booking {} to {} ({} on {})",
            booking.booking_id,
            booking.email,
            booking.event_title,
            booking.booking_date
        );
    }

    fn booking_rejected(&self, booking: &Booking, reason: &str) {
        tracing::info!(
            "Rejection notice for booking {} to {}: {}",
            booking.booking_id,
            booking.email,
            reason
        );
    }
}
