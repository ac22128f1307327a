//! Weekday blackout policy for ordinary bookings
//!
//! Sundays are fully closed to ordinary requests; on Saturdays only the
//! early-morning slots are closed. Priority bookings bypass both rules.

use chrono::{Datelike, NaiveDate, Weekday};

/// Slots with `slot_order` at or below this value count as early-morning.
pub const EARLY_SLOT_MAX_ORDER: i64 = 2;

/// Restriction a weekday places on the ordinary booking path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayRestriction {
    /// No slot may be booked (Sunday).
    FullDay,
    /// Only early-morning slots are blocked (Saturday).
    EarlySlots,
}

/// Restriction applying to `date`, if any.
pub fn weekday_restriction(date: NaiveDate) -> Option<WeekdayRestriction> {
    match date.weekday() {
        Weekday::Sun => Some(WeekdayRestriction::FullDay),
        Weekday::Sat => Some(WeekdayRestriction::EarlySlots),
        _ => None,
    }
}

pub fn is_early_slot(slot_order: i64) -> bool {
    slot_order <= EARLY_SLOT_MAX_ORDER
}

/// Whether the ordinary path may book `slot_order` on `date` at all,
/// considering only the weekday policy.
pub fn slot_blocked_by_weekday(date: NaiveDate, slot_order: i64) -> bool {
    match weekday_restriction(date) {
        Some(WeekdayRestriction::FullDay) => true,
        Some(WeekdayRestriction::EarlySlots) => is_early_slot(slot_order),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn sunday_is_fully_blocked() {
        // 2025-03-16 is a Sunday
        assert_eq!(
            weekday_restriction(date("2025-03-16")),
            Some(WeekdayRestriction::FullDay)
        );
        assert!(slot_blocked_by_weekday(date("2025-03-16"), 1));
        assert!(slot_blocked_by_weekday(date("2025-03-16"), 4));
    }

    #[test]
    fn saturday_blocks_only_early_slots() {
        // 2025-03-15 is a Saturday
        assert_eq!(
            weekday_restriction(date("2025-03-15")),
            Some(WeekdayRestriction::EarlySlots)
        );
        assert!(slot_blocked_by_weekday(date("2025-03-15"), 1));
        assert!(slot_blocked_by_weekday(date("2025-03-15"), 2));
        assert!(!slot_blocked_by_weekday(date("2025-03-15"), 3));
        assert!(!slot_blocked_by_weekday(date("2025-03-15"), 4));
    }

    #[test]
    fn weekdays_are_unrestricted() {
        // 2025-03-10 is a Monday
        assert_eq!(weekday_restriction(date("2025-03-10")), None);
        assert!(!slot_blocked_by_weekday(date("2025-03-10"), 1));
    }
}
