//! AvailabilityResolver: per-slot bookability for one hall and date
//!
//! A point-in-time read composed from the catalog, the maintenance index
//! and the booking ledger. Never mutates state and never blocks the create
//! path; `BookingLedger::create` re-validates everything that matters at
//! write time, so a stale answer here costs the caller at most a 409.

use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::ledger::BookingLedger;
use crate::models::SlotStatus;
use crate::policy::{self, WeekdayRestriction};
use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub user_email: Option<String>,
    pub user_phone: Option<String>,
    /// Priority mode: only hall-level unavailability can block a slot;
    /// bookings and maintenance become advisory notes.
    pub priority: bool,
    /// Diagnostic mode: attach the occupying booking's business key to
    /// conflicted slots instead of hiding it.
    pub show_all: bool,
}

/// Hall-level gate, evaluated once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HallGate {
    Missing,
    Inactive,
    Unavailable,
    Open,
}

/// What is known about one slot before the rules run.
#[derive(Debug, Default)]
struct SlotFacts {
    /// Business key of the active booking holding this slot, if any.
    occupied_by: Option<String>,
    /// That booking belongs to the requester identified in the query.
    own_booking: bool,
    under_maintenance: bool,
}

#[derive(Debug, PartialEq)]
struct SlotDecision {
    available: bool,
    reason: Option<String>,
    existing_booking_id: Option<String>,
}

/// Ordered rule evaluation; first match wins.
fn evaluate(
    gate: HallGate,
    facts: &SlotFacts,
    date: NaiveDate,
    slot_order: i64,
    priority: bool,
    show_all: bool,
) -> SlotDecision {
    let blocked = |reason: &str| SlotDecision {
        available: false,
        reason: Some(reason.to_string()),
        existing_booking_id: None,
    };

    match gate {
        HallGate::Missing => return blocked("Hall not found"),
        HallGate::Inactive => return blocked("Hall is inactive"),
        // The one restriction priority cannot bypass.
        HallGate::Unavailable => return blocked("Hall is currently unavailable"),
        HallGate::Open => {}
    }

    let diagnostic_key = if show_all {
        facts.occupied_by.clone()
    } else {
        None
    };

    if priority {
        let reason = if facts.occupied_by.is_some() {
            Some("Currently booked (can be overridden)".to_string())
        } else if facts.under_maintenance {
            Some("Maintenance scheduled (can be overridden)".to_string())
        } else {
            None
        };
        return SlotDecision {
            available: true,
            reason,
            existing_booking_id: diagnostic_key,
        };
    }

    if facts.own_booking {
        return SlotDecision {
            available: false,
            reason: Some("You already have a booking for this time slot".to_string()),
            existing_booking_id: diagnostic_key,
        };
    }
    if facts.occupied_by.is_some() {
        return SlotDecision {
            available: false,
            reason: Some("Already booked".to_string()),
            existing_booking_id: diagnostic_key,
        };
    }
    if facts.under_maintenance {
        return blocked("Maintenance scheduled");
    }
    match policy::weekday_restriction(date) {
        Some(WeekdayRestriction::FullDay) => {
            return blocked("Regular bookings are not available on Sundays");
        }
        Some(WeekdayRestriction::EarlySlots) if policy::is_early_slot(slot_order) => {
            return blocked("Early slots are unavailable on Saturdays");
        }
        _ => {}
    }

    SlotDecision {
        available: true,
        reason: None,
        existing_booking_id: None,
    }
}

#[derive(Clone)]
pub struct AvailabilityResolver {
    catalog: Catalog,
    ledger: BookingLedger,
}

impl AvailabilityResolver {
    pub fn new(catalog: Catalog, ledger: BookingLedger) -> Self {
        Self { catalog, ledger }
    }

    /// Status of every active slot in `hall_id` on the query date.
    ///
    /// Fails closed: a missing or inactive hall yields the full slot list
    /// marked unavailable rather than an error, matching the listing shape
    /// clients already consume.
    pub async fn resolve(
        &self,
        hall_id: Uuid,
        query: &AvailabilityQuery,
    ) -> Result<Vec<SlotStatus>, EngineError> {
        let slots = self.catalog.active_time_slots().await?;

        let gate = match self.catalog.hall(hall_id).await? {
            None => HallGate::Missing,
            Some(h) if !h.is_active => HallGate::Inactive,
            Some(h) if !h.is_available => HallGate::Unavailable,
            Some(_) => HallGate::Open,
        };

        // Per-slot facts are only worth gathering when the hall gate is
        // open; every other gate blankets the whole listing.
        let mut facts_by_slot: HashMap<Uuid, SlotFacts> = HashMap::new();
        if gate == HallGate::Open {
            let bookings = self
                .ledger
                .active_bookings_for_hall_date(hall_id, query.date)
                .await?;
            for booking in bookings {
                let own_booking = query
                    .user_email
                    .as_deref()
                    .is_some_and(|e| e == booking.email)
                    || (booking.phone.is_some()
                        && query.user_phone.as_deref() == booking.phone.as_deref());
                facts_by_slot.insert(
                    booking.time_slot_id,
                    SlotFacts {
                        occupied_by: Some(booking.booking_id),
                        own_booking,
                        under_maintenance: false,
                    },
                );
            }

            let maintenance = self.catalog.maintenance_for(hall_id, query.date).await?;
            for slot in &slots {
                if maintenance.covers(slot.id) {
                    facts_by_slot.entry(slot.id).or_default().under_maintenance = true;
                }
            }
        }

        let empty = SlotFacts::default();
        let statuses = slots
            .into_iter()
            .map(|slot| {
                let facts = facts_by_slot.get(&slot.id).unwrap_or(&empty);
                let decision = evaluate(
                    gate,
                    facts,
                    query.date,
                    slot.slot_order,
                    query.priority,
                    query.show_all,
                );
                SlotStatus {
                    id: slot.id,
                    label: slot.label,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    slot_order: slot.slot_order,
                    available: decision.available,
                    reason: decision.reason,
                    existing_booking_id: decision.existing_booking_id,
                }
            })
            .collect();

        Ok(statuses)
    }
}
