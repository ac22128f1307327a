//! Shared fixtures for integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use hallbook::approval::ApprovalStateMachine;
use hallbook::availability::{AvailabilityQuery, AvailabilityResolver};
use hallbook::catalog::Catalog;
use hallbook::db;
use hallbook::ledger::{BookingLedger, NewBooking};
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

pub struct TestApp {
    pub pool: SqlitePool,
    pub catalog: Catalog,
    pub ledger: BookingLedger,
    pub resolver: AvailabilityResolver,
    pub approvals: ApprovalStateMachine,
    // Keeps the database file alive for the test's duration.
    _dir: TempDir,
}

/// Fresh file-backed database with migrations applied and no catalog rows.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}", dir.path().join("hallbook-test.db").display());

    let pool = db::create_pool(&url).await.expect("create pool");
    db::run_migrations(&pool).await.expect("run migrations");

    let catalog = Catalog::new(pool.clone());
    let ledger = BookingLedger::new(pool.clone(), catalog.clone());
    let resolver = AvailabilityResolver::new(catalog.clone(), ledger.clone());
    let approvals = ApprovalStateMachine::new(ledger.clone());

    TestApp {
        pool,
        catalog,
        ledger,
        resolver,
        approvals,
        _dir: dir,
    }
}

pub async fn insert_hall(pool: &SqlitePool, name: &str, is_available: bool) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO halls (id, name, location, capacity, is_available, is_active, created_at, updated_at)
        VALUES ($1, $2, 'Main Campus', 100, $3, 1, $4, $4)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(is_available)
    .bind(Utc::now())
    .execute(pool)
    .await
    .expect("insert hall");
    id
}

pub async fn insert_slot(pool: &SqlitePool, label: &str, slot_order: i64) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO time_slots (id, label, start_time, end_time, slot_order, is_active)
        VALUES ($1, $2, '08:45', '10:45', $3, 1)
        "#,
    )
    .bind(id)
    .bind(label)
    .bind(slot_order)
    .execute(pool)
    .await
    .expect("insert time slot");
    id
}

pub async fn insert_maintenance(
    pool: &SqlitePool,
    hall_id: Uuid,
    date: NaiveDate,
    time_slot_id: Option<Uuid>,
) {
    sqlx::query(
        r#"
        INSERT INTO maintenance_windows (id, hall_id, maintenance_date, time_slot_id, reason, is_active, created_at)
        VALUES ($1, $2, $3, $4, 'Scheduled maintenance', 1, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(hall_id)
    .bind(date)
    .bind(time_slot_id)
    .bind(Utc::now())
    .execute(pool)
    .await
    .expect("insert maintenance window");
}

/// Standard fixture: one available hall plus four slots (orders 1..=4).
pub struct Fixture {
    pub hall_id: Uuid,
    pub slot_ids: Vec<Uuid>,
}

pub async fn seed_fixture(pool: &SqlitePool) -> Fixture {
    let hall_id = insert_hall(pool, "Hall A", true).await;
    let mut slot_ids = Vec::new();
    for order in 1..=4 {
        slot_ids.push(insert_slot(pool, &format!("Slot {order}"), order).await);
    }
    Fixture { hall_id, slot_ids }
}

pub fn ordinary_request(hall_id: Uuid, slot_id: Uuid, date: NaiveDate, email: &str) -> NewBooking {
    NewBooking {
        hall_id,
        time_slot_id: slot_id,
        booking_date: date,
        name: "Asha Rao".to_string(),
        email: email.to_string(),
        phone: None,
        organization: Some("Robotics Club".to_string()),
        event_title: "Tech Talk".to_string(),
        description: None,
        attendees: 80,
        priority: false,
        approved_by: None,
    }
}

pub fn priority_request(hall_id: Uuid, slot_id: Uuid, date: NaiveDate) -> NewBooking {
    NewBooking {
        hall_id,
        time_slot_id: slot_id,
        booking_date: date,
        name: "Dean's Office".to_string(),
        email: "dean@booking.local".to_string(),
        phone: None,
        organization: Some("Administration".to_string()),
        event_title: "Convocation rehearsal".to_string(),
        description: None,
        attendees: 200,
        priority: true,
        approved_by: Some("Admin (Priority)".to_string()),
    }
}

pub fn ordinary_query(date: NaiveDate) -> AvailabilityQuery {
    AvailabilityQuery {
        date,
        user_email: None,
        user_phone: None,
        priority: false,
        show_all: false,
    }
}

pub fn priority_query(date: NaiveDate) -> AvailabilityQuery {
    AvailabilityQuery {
        priority: true,
        ..ordinary_query(date)
    }
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

/// 2025-03-10 is a Monday: no weekday restriction applies.
pub fn monday() -> NaiveDate {
    date("2025-03-10")
}

pub fn saturday() -> NaiveDate {
    date("2025-03-15")
}

pub fn sunday() -> NaiveDate {
    date("2025-03-16")
}
