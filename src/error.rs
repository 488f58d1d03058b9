use chrono::{DateTime, Utc};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors surfaced by the reservation core.
///
/// Every variant except [`ReservationError::Storage`] and
/// [`ReservationError::Session`] is a local, recoverable condition. Nothing is
/// retried internally; whatever transaction was open when the error was raised
/// is dropped and therefore rolled back.
#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("start time {start} must be before end time {end}")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("no authenticated identity on the session")]
    Unauthenticated,

    #[error("spot {spot_id}: open-ended assignment did not settle within {attempts} advances")]
    AdvanceLimit { spot_id: String, attempts: usize },

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
}

pub type Result<T, E = ReservationError> = std::result::Result<T, E>;

impl ReservationError {
    /// Maps an insert failure, turning key violations into domain errors.
    pub(crate) fn from_insert(err: DbErr, what: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ReservationError::Conflict(format!("{} already exists", what.into()))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => ReservationError::NotFound(format!(
                "{} references an unknown spot or user",
                what.into()
            )),
            _ => ReservationError::Storage(err),
        }
    }
}
