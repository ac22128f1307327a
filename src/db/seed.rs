//! First-run catalog seed
//!
//! Populates the hall and time-slot catalog on an empty database so the
//! API is usable out of the box. Never touches a non-empty catalog.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

pub async fn seed_catalog(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let hall_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM halls")
        .fetch_one(pool)
        .await?;

    if hall_count == 0 {
        let halls = [
            ("Hall A", "FET Ground Floor", 100, "Ground floor hall for presentations and seminars"),
            ("Hall B", "FET 1st Floor", 150, "Spacious hall for conferences and large gatherings"),
            ("Hall C", "Core Block", 200, "Premium hall for major events and conferences"),
        ];
        let now = Utc::now();
        for (name, location, capacity, description) in halls {
            sqlx::query(
                r#"
                INSERT INTO halls (id, name, location, capacity, description, is_available, is_active, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, 1, 1, $6, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(location)
            .bind(capacity)
            .bind(description)
            .bind(now)
            .execute(pool)
            .await?;
        }
        tracing::info!("Seeded {} halls", halls.len());
    }

    let slot_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM time_slots")
        .fetch_one(pool)
        .await?;

    if slot_count == 0 {
        let slots = [
            ("8:45 AM - 10:45 AM", "08:45", "10:45", 1),
            ("11:00 AM - 01:00 PM", "11:00", "13:00", 2),
            ("01:00 PM - 03:45 PM", "13:00", "15:45", 3),
            ("Full Day", "08:45", "17:00", 4),
        ];
        for (label, start, end, order) in slots {
            sqlx::query(
                r#"
                INSERT INTO time_slots (id, label, start_time, end_time, slot_order, is_active)
                VALUES ($1, $2, $3, $4, $5, 1)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(label)
            .bind(start)
            .bind(end)
            .bind(order)
            .execute(pool)
            .await?;
        }
        tracing::info!("Seeded {} time slots", slots.len());
    }

    Ok(())
}
