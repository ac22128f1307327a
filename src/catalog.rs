//! Read-only catalog of halls, time slots and maintenance windows
//!
//! Hall and time-slot records are owned by the excluded admin collaborator;
//! the engine only ever reads them. Maintenance windows likewise.

use crate::models::{Hall, MaintenanceWindow, TimeSlot};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Clone)]
pub struct Catalog {
    pool: SqlitePool,
}

/// Maintenance blackout cover for one hall and date.
#[derive(Debug, Default)]
pub struct MaintenanceCover {
    /// A window without a slot id covers the whole day.
    pub whole_day: bool,
    pub slots: HashSet<Uuid>,
}

impl MaintenanceCover {
    pub fn covers(&self, slot_id: Uuid) -> bool {
        self.whole_day || self.slots.contains(&slot_id)
    }
}

impl Catalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Hall by id, regardless of flags; the caller decides how to treat
    /// inactive or unavailable halls.
    pub async fn hall(&self, hall_id: Uuid) -> Result<Option<Hall>, sqlx::Error> {
        sqlx::query_as::<_, Hall>("SELECT * FROM halls WHERE id = $1")
            .bind(hall_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Active (non-deleted) halls, for listings.
    pub async fn active_halls(&self) -> Result<Vec<Hall>, sqlx::Error> {
        sqlx::query_as::<_, Hall>("SELECT * FROM halls WHERE is_active = 1 ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    /// Global slot catalog in display order.
    pub async fn active_time_slots(&self) -> Result<Vec<TimeSlot>, sqlx::Error> {
        sqlx::query_as::<_, TimeSlot>(
            "SELECT * FROM time_slots WHERE is_active = 1 ORDER BY slot_order",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn time_slot(&self, slot_id: Uuid) -> Result<Option<TimeSlot>, sqlx::Error> {
        sqlx::query_as::<_, TimeSlot>("SELECT * FROM time_slots WHERE id = $1")
            .bind(slot_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Active maintenance windows for a hall and date, folded into a cover.
    pub async fn maintenance_for(
        &self,
        hall_id: Uuid,
        date: NaiveDate,
    ) -> Result<MaintenanceCover, sqlx::Error> {
        let windows = sqlx::query_as::<_, MaintenanceWindow>(
            r#"
            SELECT * FROM maintenance_windows
            WHERE hall_id = $1 AND maintenance_date = $2 AND is_active = 1
            "#,
        )
        .bind(hall_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        let mut cover = MaintenanceCover::default();
        for window in windows {
            match window.time_slot_id {
                Some(id) => {
                    cover.slots.insert(id);
                }
                None => cover.whole_day = true,
            }
        }
        Ok(cover)
    }
}
