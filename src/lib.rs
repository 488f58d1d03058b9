//! # Spot reservations on Sea-ORM
//!
//! A reservation manager for a fixed set of named spots (parking stalls, desks,
//! ...). Spots are handed out to users over half-open time intervals
//! `[start, end)`, where an interval may also be open-ended. All state lives in
//! a relational database accessed through [Sea-ORM](https://crates.io/crates/sea-orm).
//!
//! ## Features
//!
//! - Finite and open-ended assignments with a per-spot non-overlap guarantee
//! - Partial releases that trim, split or delete existing intervals
//! - Role-gated release and administration (`user`, `admin`, `owner`)
//! - One serializable transaction per request; no in-process locks
//! - PostgreSQL by default, SQLite behind the `sqlite` feature
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use spot_reservations::{DatabaseConfig, ReservationManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = DatabaseConfig::from_env().connect().await?;
//! let manager = ReservationManager::new(conn);
//! manager.initialize_schema().await?;
//!
//! // The first user to show up owns the installation.
//! let owner = manager.ensure_user("olivia@example.com", "Olivia").await?;
//! manager.create_spot(&owner.email, "A1").await?;
//!
//! let monday = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let tuesday = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
//! manager.assign_finite(&owner.email, "A1", monday, tuesday).await?;
//!
//! // Give the morning back.
//! let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//! manager.release(&owner.email, "A1", monday, noon).await?;
//! # Ok(())
//! # }
//! ```

pub mod authz;
pub mod config;
pub mod entity;
mod error;
pub mod identity;
pub mod interval_store;
mod manager;
#[cfg(feature = "migration")]
pub mod migration;
mod model;
pub mod resolver;

pub use config::DatabaseConfig;
pub use error::{ReservationError, Result};
pub use identity::{Identity, IdentityResolver};
pub use interval_store::IntervalStore;
pub use manager::{ReservationManager, DEFAULT_MAX_ADVANCE_ATTEMPTS};
pub use model::{Interval, Occupant, SpotStatus, Timestamp};
pub use resolver::{Disposition, Mutation};

/// A user record. See [`entity::user::Model`].
pub type User = entity::user::Model;

/// A spot record. See [`entity::spot::Model`].
pub type Spot = entity::spot::Model;

pub use entity::user::Role;
