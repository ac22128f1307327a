//! Booking creation, conflict enforcement and the approval workflow

mod common;

use common::*;
use hallbook::error::EngineError;
use hallbook::models::BookingStatus;
use tokio::task::JoinSet;

#[tokio::test]
async fn create_persists_a_pending_booking() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let booking = app
        .ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[0], monday(), "asha@example.com"))
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert!(booking.booking_id.starts_with("BK"));
    assert!(!booking.priority_booking);
    assert!(booking.approved_at.is_none());

    let stored = app
        .ledger
        .find_by_business_key(&booking.booking_id)
        .await
        .unwrap()
        .expect("booking persisted");
    assert_eq!(stored.email, "asha@example.com");
    assert_eq!(stored.booking_date, monday());
}

#[tokio::test]
async fn second_booking_for_same_key_conflicts() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;
    let slot = fx.slot_ids[0];

    let first = app
        .ledger
        .create(ordinary_request(fx.hall_id, slot, monday(), "asha@example.com"))
        .await
        .unwrap();

    let second = app
        .ledger
        .create(ordinary_request(fx.hall_id, slot, monday(), "vikram@example.com"))
        .await;

    match second {
        Err(EngineError::Conflict {
            existing_booking_id,
            own_booking,
        }) => {
            assert_eq!(existing_booking_id, first.booking_id);
            assert!(!own_booking);
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_creates_yield_exactly_one_winner() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;
    let slot = fx.slot_ids[0];

    let mut tasks = JoinSet::new();
    for i in 0..8 {
        let ledger = app.ledger.clone();
        let hall_id = fx.hall_id;
        tasks.spawn(async move {
            ledger
                .create(ordinary_request(
                    hall_id,
                    slot,
                    monday(),
                    &format!("user{i}@example.com"),
                ))
                .await
        });
    }

    let mut successes = 0;
    let mut conflicts = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => successes += 1,
            Err(EngineError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error under contention: {other:?}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);

    // Exactly one row made it into the ledger.
    let all = app.ledger.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn same_requester_same_slot_is_flagged_as_own_conflict() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;
    let slot = fx.slot_ids[0];

    app.ledger
        .create(ordinary_request(fx.hall_id, slot, monday(), "asha@example.com"))
        .await
        .unwrap();

    let repeat = app
        .ledger
        .create(ordinary_request(fx.hall_id, slot, monday(), "asha@example.com"))
        .await;

    assert!(matches!(
        repeat,
        Err(EngineError::Conflict {
            own_booking: true,
            ..
        })
    ));
}

#[tokio::test]
async fn same_requester_may_book_another_hall_that_day() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;
    let other_hall = insert_hall(&app.pool, "Hall B", true).await;
    let slot = fx.slot_ids[0];

    app.ledger
        .create(ordinary_request(fx.hall_id, slot, monday(), "asha@example.com"))
        .await
        .unwrap();

    let elsewhere = app
        .ledger
        .create(ordinary_request(other_hall, slot, monday(), "asha@example.com"))
        .await;
    assert!(elsewhere.is_ok());
}

#[tokio::test]
async fn sunday_create_is_blacked_out_for_ordinary_only() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;
    let slot = fx.slot_ids[2];

    let ordinary = app
        .ledger
        .create(ordinary_request(fx.hall_id, slot, sunday(), "asha@example.com"))
        .await;
    assert!(matches!(ordinary, Err(EngineError::Blackout(_))));

    let priority = app
        .ledger
        .create(priority_request(fx.hall_id, slot, sunday()))
        .await
        .unwrap();
    assert_eq!(priority.status, BookingStatus::Approved);
}

#[tokio::test]
async fn saturday_create_blocks_early_slots_only() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let early = app
        .ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[0], saturday(), "asha@example.com"))
        .await;
    assert!(matches!(early, Err(EngineError::Blackout(_))));

    let late = app
        .ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[2], saturday(), "asha@example.com"))
        .await;
    assert!(late.is_ok());
}

#[tokio::test]
async fn unavailable_hall_rejects_even_priority_creation() {
    let app = spawn_app().await;
    seed_fixture(&app.pool).await;
    let closed_hall = insert_hall(&app.pool, "Hall B", false).await;
    let slot = insert_slot(&app.pool, "Extra", 5).await;

    let result = app
        .ledger
        .create(priority_request(closed_hall, slot, monday()))
        .await;
    assert!(matches!(result, Err(EngineError::HallUnavailable)));
}

#[tokio::test]
async fn unknown_hall_or_slot_is_not_found() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let bad_hall = app
        .ledger
        .create(ordinary_request(
            uuid::Uuid::new_v4(),
            fx.slot_ids[0],
            monday(),
            "asha@example.com",
        ))
        .await;
    assert!(matches!(bad_hall, Err(EngineError::NotFound("Hall"))));

    let bad_slot = app
        .ledger
        .create(ordinary_request(
            fx.hall_id,
            uuid::Uuid::new_v4(),
            monday(),
            "asha@example.com",
        ))
        .await;
    assert!(matches!(bad_slot, Err(EngineError::NotFound("Time slot"))));
}

#[tokio::test]
async fn priority_booking_is_auto_approved_with_metadata() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let booking = app
        .ledger
        .create(priority_request(fx.hall_id, fx.slot_ids[0], monday()))
        .await
        .unwrap();

    assert!(booking.booking_id.starts_with("PR"));
    assert!(booking.priority_booking);
    assert_eq!(booking.status, BookingStatus::Approved);
    assert!(booking.approved_at.is_some());
    assert_eq!(booking.approved_by.as_deref(), Some("Admin (Priority)"));
}

#[tokio::test]
async fn priority_creation_still_conflicts_on_occupied_slot() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;
    let slot = fx.slot_ids[0];

    let first = app
        .ledger
        .create(ordinary_request(fx.hall_id, slot, monday(), "asha@example.com"))
        .await
        .unwrap();

    let priority = app
        .ledger
        .create(priority_request(fx.hall_id, slot, monday()))
        .await;

    match priority {
        Err(EngineError::Conflict {
            existing_booking_id, ..
        }) => assert_eq!(existing_booking_id, first.booking_id),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn approve_sets_metadata_and_is_single_shot() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let booking = app
        .ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[0], monday(), "asha@example.com"))
        .await
        .unwrap();

    let approved = app
        .approvals
        .approve(&booking.booking_id, "registrar")
        .await
        .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);
    assert_eq!(approved.approved_by.as_deref(), Some("registrar"));
    assert!(approved.approved_at.is_some());

    // Second approve surfaces the workflow bug instead of succeeding.
    let repeat = app.approvals.approve(&booking.booking_id, "registrar").await;
    assert!(matches!(
        repeat,
        Err(EngineError::InvalidTransition {
            current: BookingStatus::Approved,
            ..
        })
    ));

    // State is unchanged.
    let stored = app
        .ledger
        .find_by_business_key(&booking.booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Approved);
}

#[tokio::test]
async fn reject_records_reason_and_defaults_when_missing() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let first = app
        .ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[0], monday(), "asha@example.com"))
        .await
        .unwrap();
    let rejected = app
        .approvals
        .reject(&first.booking_id, Some("Hall needed for exams"))
        .await
        .unwrap();
    assert_eq!(rejected.status, BookingStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Hall needed for exams")
    );

    let second = app
        .ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[1], monday(), "asha@example.com"))
        .await
        .unwrap();
    let defaulted = app.approvals.reject(&second.booking_id, None).await.unwrap();
    assert_eq!(
        defaulted.rejection_reason.as_deref(),
        Some("No reason provided")
    );
}

#[tokio::test]
async fn rejected_booking_frees_its_slot() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;
    let slot = fx.slot_ids[0];

    let first = app
        .ledger
        .create(ordinary_request(fx.hall_id, slot, monday(), "asha@example.com"))
        .await
        .unwrap();
    app.approvals.reject(&first.booking_id, None).await.unwrap();

    // The key is free again: a new booking may claim it.
    let retaken = app
        .ledger
        .create(ordinary_request(fx.hall_id, slot, monday(), "vikram@example.com"))
        .await;
    assert!(retaken.is_ok());
}

#[tokio::test]
async fn transitions_on_missing_or_terminal_bookings_fail_precisely() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let missing = app.approvals.approve("BK00000000-deadbeef", "Admin").await;
    assert!(matches!(missing, Err(EngineError::NotFound("Booking"))));

    let booking = app
        .ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[0], monday(), "asha@example.com"))
        .await
        .unwrap();
    app.approvals.reject(&booking.booking_id, None).await.unwrap();

    let approve_rejected = app.approvals.approve(&booking.booking_id, "Admin").await;
    assert!(matches!(
        approve_rejected,
        Err(EngineError::InvalidTransition {
            current: BookingStatus::Rejected,
            ..
        })
    ));
}

#[tokio::test]
async fn user_active_bookings_match_by_email_or_phone() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let mut request = ordinary_request(fx.hall_id, fx.slot_ids[0], monday(), "asha@example.com");
    request.phone = Some("+91 98765 43210".to_string());
    let booking = app.ledger.create(request).await.unwrap();

    let by_email = app
        .ledger
        .user_active_bookings(monday(), Some("asha@example.com"), None)
        .await
        .unwrap();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].booking_id, booking.booking_id);

    let by_phone = app
        .ledger
        .user_active_bookings(monday(), None, Some("+91 98765 43210"))
        .await
        .unwrap();
    assert_eq!(by_phone.len(), 1);

    let nobody = app
        .ledger
        .user_active_bookings(monday(), Some("someone-else@example.com"), None)
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn dashboard_counts_reflect_status_changes() {
    let app = spawn_app().await;
    let fx = seed_fixture(&app.pool).await;

    let a = app
        .ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[0], monday(), "a@example.com"))
        .await
        .unwrap();
    app.ledger
        .create(ordinary_request(fx.hall_id, fx.slot_ids[1], monday(), "b@example.com"))
        .await
        .unwrap();
    app.approvals.approve(&a.booking_id, "Admin").await.unwrap();

    let stats = app.ledger.dashboard_stats(monday()).await.unwrap();
    assert_eq!(stats.total_bookings, 2);
    assert_eq!(stats.approved_bookings, 1);
    assert_eq!(stats.pending_bookings, 1);
    assert_eq!(stats.rejected_bookings, 0);
    assert_eq!(stats.todays_bookings, 2);
    assert_eq!(stats.total_halls, 1);
}
