#![allow(dead_code)]

use chrono::{TimeDelta, TimeZone, Utc};
use sea_orm::{ConnectOptions, Database};
use spot_reservations::{Interval, ReservationManager, Role, Timestamp};

pub const OWNER: &str = "olivia@example.com";
pub const ADMIN: &str = "carol@example.com";
pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";

/// Manager over a fresh in-memory SQLite database with the schema applied.
pub async fn manager() -> ReservationManager {
    // In-memory SQLite lives and dies with its connection: keep exactly one.
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(opt).await.expect("connect to sqlite");

    let manager = ReservationManager::new(conn);
    manager
        .initialize_schema()
        .await
        .expect("initialize schema");
    manager
}

/// Manager with an owner, an admin, two plain users and spots A1 and B2.
pub async fn seeded() -> ReservationManager {
    let manager = manager().await;
    manager.ensure_user(OWNER, "Olivia").await.unwrap();
    manager.ensure_user(ALICE, "Alice").await.unwrap();
    manager.ensure_user(BOB, "Bob").await.unwrap();
    manager.insert_user(ADMIN, "Carol", Role::Admin).await.unwrap();
    manager.create_spot(OWNER, "A1").await.unwrap();
    manager.create_spot(OWNER, "B2").await.unwrap();
    manager
}

/// `n` hours after 2024-01-01T00:00:00Z.
pub fn h(n: i64) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::hours(n)
}

/// Asserts that no two intervals on `spot_id` intersect.
pub async fn assert_non_overlapping(manager: &ReservationManager, spot_id: &str) {
    let timeline = manager.spot_timeline(spot_id).await.unwrap();
    for pair in timeline.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert!(prev.start <= next.start, "timeline not ordered: {timeline:?}");
        assert!(
            !prev.is_open_ended(),
            "open-ended {prev:?} is followed by {next:?} on {spot_id}"
        );
        assert!(
            !prev.overlaps(next.start, next.end),
            "{prev:?} overlaps {next:?} on {spot_id}"
        );
    }
}

pub fn finite(owner: &str, start: i64, end: i64) -> Interval {
    Interval::finite("A1", owner, h(start), h(end))
}

pub fn open(owner: &str, start: i64) -> Interval {
    Interval::open_ended("A1", owner, h(start))
}
