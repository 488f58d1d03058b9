//! Database entity models for spot-reservations.
//!
//! These Sea-ORM entities map the three tables created by the crate's
//! migration: spots, users and the per-spot reservation intervals.

/// Bookable spots.
pub mod spot;

/// Users and their roles.
pub mod user;

/// Reservation intervals, keyed by `(spot_id, start_time, user_email)`.
pub mod reservation;
