//! HTTP request handlers

pub mod admin;
pub mod availability;
pub mod bookings;
pub mod halls;

use crate::approval::ApprovalStateMachine;
use crate::availability::AvailabilityResolver;
use crate::catalog::Catalog;
use crate::ledger::BookingLedger;
use crate::notify::Notifier;
use std::sync::Arc;

pub use admin::*;
pub use availability::*;
pub use bookings::*;
pub use halls::*;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub ledger: BookingLedger,
    pub resolver: AvailabilityResolver,
    pub approvals: ApprovalStateMachine,
    pub notifier: Arc<dyn Notifier>,
}
