mod common;

use chrono::{TimeZone, Utc};
use spot_reservations::{Interval, IntervalStore, ReservationError};

use common::*;

#[tokio::test]
async fn reserve_conflict_then_partial_release() {
    let manager = seeded().await;
    let at = |d, hr| Utc.with_ymd_and_hms(2024, 1, d, hr, 0, 0).unwrap();

    manager
        .assign_finite(ALICE, "A1", at(1, 0), at(2, 0))
        .await
        .unwrap();
    let err = manager
        .assign_finite(BOB, "A1", at(1, 12), at(1, 18))
        .await
        .unwrap_err();
    assert!(matches!(err, ReservationError::Conflict(_)));

    let changed = manager
        .release(ALICE, "A1", at(1, 6), at(1, 8))
        .await
        .unwrap();
    assert_eq!(changed, 1);

    assert_eq!(
        manager.spot_timeline("A1").await.unwrap(),
        vec![
            Interval::finite("A1", ALICE, at(1, 0), at(1, 6)),
            Interval::finite("A1", ALICE, at(1, 8), at(2, 0)),
        ]
    );
    assert!(manager.occupant_at("A1", at(1, 7)).await.unwrap().is_none());
}

#[tokio::test]
async fn exact_release_deletes_the_interval() {
    let manager = seeded().await;
    manager.assign_finite(ALICE, "A1", h(2), h(6)).await.unwrap();

    assert_eq!(manager.release(ALICE, "A1", h(2), h(6)).await.unwrap(), 1);
    assert!(manager.spot_timeline("A1").await.unwrap().is_empty());
}

#[tokio::test]
async fn user_cannot_release_someone_elses_booking() {
    let manager = seeded().await;
    manager.assign_finite(ALICE, "A1", h(0), h(4)).await.unwrap();
    manager.assign_finite(BOB, "A1", h(4), h(8)).await.unwrap();

    let err = manager.release(ALICE, "A1", h(2), h(6)).await.unwrap_err();
    assert!(matches!(err, ReservationError::Unauthorized(_)));

    assert_eq!(
        manager.spot_timeline("A1").await.unwrap(),
        vec![finite(ALICE, 0, 4), finite(BOB, 4, 8)]
    );
}

#[tokio::test]
async fn admins_and_owners_release_anyones_booking() {
    let manager = seeded().await;
    manager.assign_finite(ALICE, "A1", h(0), h(10)).await.unwrap();

    manager.release(ADMIN, "A1", h(2), h(3)).await.unwrap();
    manager.release(OWNER, "A1", h(8), h(10)).await.unwrap();

    assert_eq!(
        manager.spot_timeline("A1").await.unwrap(),
        vec![finite(ALICE, 0, 2), finite(ALICE, 3, 8)]
    );
}

#[tokio::test]
async fn releasing_a_free_window_is_a_no_op() {
    let manager = seeded().await;
    manager.assign_finite(ALICE, "A1", h(0), h(4)).await.unwrap();

    assert_eq!(manager.release(BOB, "A1", h(4), h(8)).await.unwrap(), 0);
    assert_eq!(manager.release(BOB, "B2", h(0), h(8)).await.unwrap(), 0);
    assert_eq!(manager.spot_timeline("A1").await.unwrap(), vec![finite(ALICE, 0, 4)]);
}

#[tokio::test]
async fn unknown_requester_is_not_found() {
    let manager = seeded().await;
    let err = manager
        .release("mallory@example.com", "A1", h(0), h(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ReservationError::NotFound(_)));
}

#[tokio::test]
async fn release_rejects_empty_range() {
    let manager = seeded().await;
    manager.assign_finite(ALICE, "A1", h(0), h(4)).await.unwrap();

    let err = manager.release(ALICE, "A1", h(2), h(2)).await.unwrap_err();
    assert!(matches!(err, ReservationError::InvalidRange { .. }));
    assert_eq!(manager.spot_timeline("A1").await.unwrap(), vec![finite(ALICE, 0, 4)]);
}

#[tokio::test]
async fn release_spanning_several_bookings() {
    let manager = seeded().await;
    manager.assign_finite(ALICE, "A1", h(0), h(4)).await.unwrap();
    manager.assign_finite(BOB, "A1", h(4), h(8)).await.unwrap();
    manager.assign_finite(ALICE, "A1", h(8), h(12)).await.unwrap();

    assert_eq!(manager.release(OWNER, "A1", h(2), h(10)).await.unwrap(), 3);

    assert_eq!(
        manager.spot_timeline("A1").await.unwrap(),
        vec![finite(ALICE, 0, 2), finite(ALICE, 10, 12)]
    );
}

#[tokio::test]
async fn open_ended_bookings_are_trimmed_or_split_never_deleted() {
    let manager = seeded().await;
    manager.assign_infinite(ALICE, "A1", h(4)).await.unwrap();

    // Window covering the start pushes it forward.
    manager.release(ALICE, "A1", h(2), h(8)).await.unwrap();
    assert_eq!(manager.spot_timeline("A1").await.unwrap(), vec![open(ALICE, 8)]);

    // Window inside splits off an open-ended tail.
    manager.release(ALICE, "A1", h(10), h(12)).await.unwrap();
    assert_eq!(
        manager.spot_timeline("A1").await.unwrap(),
        vec![finite(ALICE, 8, 10), open(ALICE, 12)]
    );

    // A huge window still leaves a residual claim.
    manager.release(ALICE, "A1", h(0), h(10_000)).await.unwrap();
    assert_eq!(manager.spot_timeline("A1").await.unwrap(), vec![open(ALICE, 10_000)]);
}

#[tokio::test]
async fn failed_release_leaves_no_partial_mutation() {
    let manager = seeded().await;
    let store = manager.connection();
    // Overlapping legacy rows: splitting the first one collides with the second.
    store.insert_interval(&finite(ALICE, 0, 10)).await.unwrap();
    store.insert_interval(&finite(ALICE, 6, 8)).await.unwrap();

    let err = manager.release(ALICE, "A1", h(4), h(6)).await.unwrap_err();
    assert!(matches!(err, ReservationError::Conflict(_)));

    // The head trim ran before the failing tail insert and was rolled back.
    assert_eq!(
        manager.spot_timeline("A1").await.unwrap(),
        vec![finite(ALICE, 0, 10), finite(ALICE, 6, 8)]
    );
}

#[tokio::test]
async fn mixed_sequence_keeps_timeline_disjoint() {
    let manager = seeded().await;
    manager.assign_finite(ALICE, "A1", h(0), h(6)).await.unwrap();
    manager.assign_finite(BOB, "A1", h(6), h(9)).await.unwrap();
    manager.assign_infinite(ALICE, "A1", h(1)).await.unwrap();
    assert_non_overlapping(&manager, "A1").await;

    manager.release(OWNER, "A1", h(5), h(7)).await.unwrap();
    assert_non_overlapping(&manager, "A1").await;

    manager.assign_finite(BOB, "A1", h(5), h(7)).await.unwrap();
    manager.assign_infinite(BOB, "A1", h(3)).await.unwrap();
    assert_non_overlapping(&manager, "A1").await;

    manager.release(ADMIN, "A1", h(8), h(20)).await.unwrap();
    assert_non_overlapping(&manager, "A1").await;

    assert_eq!(
        manager.spot_timeline("A1").await.unwrap(),
        vec![
            finite(ALICE, 0, 5),
            finite(BOB, 5, 7),
            finite(BOB, 7, 8),
            open(BOB, 20),
        ]
    );
}
