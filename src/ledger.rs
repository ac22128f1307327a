//! BookingLedger: the single mutable store of booking records
//!
//! All conflict enforcement lives here. Occupancy uniqueness (at most one
//! pending/approved booking per hall, slot and date) is guaranteed by a
//! partial unique index, so `create` is a single insert whose unique
//! violation maps to a conflict error. There is no check-then-insert
//! window: concurrent submissions race on the index and exactly one wins.

use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::models::{Booking, BookingStatus, DashboardStats};
use crate::policy;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Fully validated input to `BookingLedger::create`.
#[derive(Debug, Clone)]
pub struct NewBooking {
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
    /// Administrator-originated booking: bypasses the weekday blackout
    /// policy and is persisted already approved.
    pub priority: bool,
    pub approved_by: Option<String>,
}

#[derive(Clone)]
pub struct BookingLedger {
    pool: SqlitePool,
    catalog: Catalog,
}

impl BookingLedger {
    pub fn new(pool: SqlitePool, catalog: Catalog) -> Self {
        Self { pool, catalog }
    }

    /// Create a booking, enforcing occupancy uniqueness atomically.
    ///
    /// Preconditions checked here, not trusted from any earlier
    /// availability read: hall exists, is active and operationally
    /// available; slot exists and is active; the weekday blackout policy
    /// permits the date/slot for ordinary requests.
    pub async fn create(&self, req: NewBooking) -> Result<Booking, EngineError> {
        let hall = self
            .catalog
            .hall(req.hall_id)
            .await?
            .filter(|h| h.is_active)
            .ok_or(EngineError::NotFound("Hall"))?;

        // Rule 2 of the availability policy: the one gate priority cannot
        // bypass.
        if !hall.is_available {
            return Err(EngineError::HallUnavailable);
        }

        let slot = self
            .catalog
            .time_slot(req.time_slot_id)
            .await?
            .filter(|s| s.is_active)
            .ok_or(EngineError::NotFound("Time slot"))?;

        if !req.priority && policy::slot_blocked_by_weekday(req.booking_date, slot.slot_order) {
            let msg = match policy::weekday_restriction(req.booking_date) {
                Some(policy::WeekdayRestriction::FullDay) => {
                    "Regular bookings are not available on Sundays"
                }
                _ => "Early slots are unavailable on Saturdays",
            };
            return Err(EngineError::Blackout(msg.to_string()));
        }

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            booking_id: generate_booking_id(req.priority, now),
            hall_id: req.hall_id,
            time_slot_id: req.time_slot_id,
            booking_date: req.booking_date,
            name: req.name,
            email: req.email,
            phone: req.phone,
            organization: req.organization,
            event_title: req.event_title,
            description: req.description,
            attendees: req.attendees,
            status: if req.priority {
                BookingStatus::Approved
            } else {
                BookingStatus::Pending
            },
            priority_booking: req.priority,
            submitted_at: now,
            approved_at: req.priority.then_some(now),
            approved_by: if req.priority { req.approved_by } else { None },
            rejection_reason: None,
        };

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (
                id, booking_id, hall_id, time_slot_id, booking_date,
                name, email, phone, organization, event_title, description,
                attendees, status, priority_booking, submitted_at,
                approved_at, approved_by, rejection_reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(booking.id)
        .bind(&booking.booking_id)
        .bind(booking.hall_id)
        .bind(booking.time_slot_id)
        .bind(booking.booking_date)
        .bind(&booking.name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.organization)
        .bind(&booking.event_title)
        .bind(&booking.description)
        .bind(booking.attendees)
        .bind(booking.status)
        .bind(booking.priority_booking)
        .bind(booking.submitted_at)
        .bind(booking.approved_at)
        .bind(&booking.approved_by)
        .bind(&booking.rejection_reason)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::info!(
                    "Booking {} created for hall {} slot {} on {} (priority: {})",
                    booking.booking_id,
                    booking.hall_id,
                    booking.time_slot_id,
                    booking.booking_date,
                    booking.priority_booking
                );
                Ok(booking)
            }
            Err(e) => self.map_insert_error(e, &booking).await,
        }
    }

    /// Turn a unique violation on the occupancy index into a `Conflict`
    /// naming the booking that holds the key.
    async fn map_insert_error(
        &self,
        e: sqlx::Error,
        attempted: &Booking,
    ) -> Result<Booking, EngineError> {
        let is_occupancy_conflict = matches!(
            &e,
            sqlx::Error::Database(db)
                if db.is_unique_violation() && db.message().contains("hall_id")
        );
        if !is_occupancy_conflict {
            return Err(EngineError::Database(e));
        }

        let existing = self
            .active_booking_for(attempted.hall_id, attempted.time_slot_id, attempted.booking_date)
            .await?;
        match existing {
            Some(existing) => {
                let own_booking = existing.email == attempted.email
                    || (existing.phone.is_some() && existing.phone == attempted.phone);
                Err(EngineError::Conflict {
                    existing_booking_id: existing.booking_id,
                    own_booking,
                })
            }
            // The holder vanished between our insert and this read; the
            // attempt itself still failed, so report it as a conflict.
            None => Err(EngineError::Conflict {
                existing_booking_id: "unknown".to_string(),
                own_booking: false,
            }),
        }
    }

    /// The active booking occupying (hall, slot, date), if any.
    pub async fn active_booking_for(
        &self,
        hall_id: Uuid,
        time_slot_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE hall_id = $1 AND time_slot_id = $2 AND booking_date = $3
              AND status IN ('pending', 'approved')
            "#,
        )
        .bind(hall_id)
        .bind(time_slot_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
    }

    /// Active bookings for a hall and date, keyed by slot in the resolver.
    pub async fn active_bookings_for_hall_date(
        &self,
        hall_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE hall_id = $1 AND booking_date = $2
              AND status IN ('pending', 'approved')
            "#,
        )
        .bind(hall_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
    }

    /// A requester's active bookings on a date, matched by email or phone.
    pub async fn user_active_bookings(
        &self,
        date: NaiveDate,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE booking_date = $1
              AND status IN ('pending', 'approved')
              AND (($2 IS NOT NULL AND email = $2) OR ($3 IS NOT NULL AND phone = $3))
            "#,
        )
        .bind(date)
        .bind(email)
        .bind(phone)
        .fetch_all(&self.pool)
        .await
    }

    /// Booking by business key.
    pub async fn find_by_business_key(
        &self,
        booking_id: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// All bookings, newest first (admin listing).
    pub async fn list_all(&self) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY submitted_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    /// Conditional transition to approved; `None` when no pending booking
    /// carries the key.
    pub(crate) async fn mark_approved(
        &self,
        booking_id: &str,
        approver: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'approved', approved_at = $1, approved_by = $2
            WHERE booking_id = $3 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(at)
        .bind(approver)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Conditional transition to rejected; `None` when no pending booking
    /// carries the key.
    pub(crate) async fn mark_rejected(
        &self,
        booking_id: &str,
        reason: &str,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = 'rejected', rejection_reason = $1
            WHERE booking_id = $2 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(reason)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats, sqlx::Error> {
        let count = |sql: &'static str| {
            let pool = self.pool.clone();
            async move {
                sqlx::query_scalar::<_, i64>(sql)
                    .fetch_one(&pool)
                    .await
            }
        };

        let total_bookings = count("SELECT COUNT(*) FROM bookings").await?;
        let pending_bookings =
            count("SELECT COUNT(*) FROM bookings WHERE status = 'pending'").await?;
        let approved_bookings =
            count("SELECT COUNT(*) FROM bookings WHERE status = 'approved'").await?;
        let rejected_bookings =
            count("SELECT COUNT(*) FROM bookings WHERE status = 'rejected'").await?;
        let todays_bookings =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE booking_date = $1")
                .bind(today)
                .fetch_one(&self.pool)
                .await?;
        let total_halls =
            count("SELECT COUNT(*) FROM halls WHERE is_active = 1").await?;

        Ok(DashboardStats {
            total_bookings,
            pending_bookings,
            approved_bookings,
            rejected_bookings,
            todays_bookings,
            total_halls,
        })
    }
}

/// Business key: role prefix + UTC date + random suffix. The random part
/// carries uniqueness (backed by a UNIQUE column); the date is only there
/// for humans reading the key.
fn generate_booking_id(priority: bool, now: DateTime<Utc>) -> String {
    let prefix = if priority { "PR" } else { "BK" };
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}-{}", prefix, now.format("%Y%m%d"), &suffix[..8])
}
