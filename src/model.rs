use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::reservation;

/// Instants are UTC wall-clock timestamps throughout.
pub type Timestamp = DateTime<Utc>;

/// A half-open reservation interval `[start, end)` on one spot.
/// `end == None` means the interval is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub spot_id: String,
    pub owner_email: String,
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

impl Interval {
    pub fn finite(
        spot_id: impl Into<String>,
        owner_email: impl Into<String>,
        start: Timestamp,
        end: Timestamp,
    ) -> Self {
        Self {
            spot_id: spot_id.into(),
            owner_email: owner_email.into(),
            start,
            end: Some(end),
        }
    }

    pub fn open_ended(
        spot_id: impl Into<String>,
        owner_email: impl Into<String>,
        start: Timestamp,
    ) -> Self {
        Self {
            spot_id: spot_id.into(),
            owner_email: owner_email.into(),
            start,
            end: None,
        }
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// Overlap with `[start, end)`, where `end == None` is unbounded.
    pub fn overlaps(&self, start: Timestamp, end: Option<Timestamp>) -> bool {
        let starts_before_end = end.is_none_or(|end| self.start < end);
        let ends_after_start = self.end.is_none_or(|own_end| own_end > start);
        starts_before_end && ends_after_start
    }
}

impl From<reservation::Model> for Interval {
    fn from(model: reservation::Model) -> Self {
        Self {
            spot_id: model.spot_id,
            owner_email: model.user_email,
            start: model.start_time,
            end: model.end_time,
        }
    }
}

/// Who holds a spot at a given instant, and for which interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupant {
    pub email: String,
    pub name: String,
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

/// State of one spot at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpotStatus {
    pub spot_id: String,
    pub occupant: Option<Occupant>,
}
