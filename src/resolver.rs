//! Classification of an existing interval against a release window.
//!
//! The checks run in a fixed priority order and the first match wins. The
//! order decides the boundary-equality cases, so it must not be reshuffled.
//! Open-ended intervals never classify as [`Disposition::FullyContained`]
//! and are therefore never deleted by a release.

use crate::model::{Interval, Timestamp};

/// How an existing interval relates to a release window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Finite interval lying entirely inside the window.
    FullyContained,
    /// Interval starting before the window and ending after it (or never).
    Surrounds,
    /// Interval starting inside the window and running past its end.
    OverlapsStart,
    /// Finite interval starting before the window and ending inside it.
    OverlapsEnd,
    /// Open-ended interval starting inside the window.
    InfiniteStartsWithin,
}

/// Store mutation a disposition resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Delete,
    /// Trim the existing interval to end at `head_end` and insert `tail`.
    Split { head_end: Timestamp, tail: Interval },
    SetStart(Timestamp),
    SetEnd(Timestamp),
}

/// Returns `None` when `existing` does not intersect `[start, end)`.
pub fn classify(existing: &Interval, start: Timestamp, end: Timestamp) -> Option<Disposition> {
    if !existing.overlaps(start, Some(end)) {
        return None;
    }
    if existing.start >= start && existing.end.is_some_and(|e| e <= end) {
        return Some(Disposition::FullyContained);
    }
    if existing.start < start && existing.end.is_none_or(|e| e > end) {
        return Some(Disposition::Surrounds);
    }
    if existing.start < end && start <= existing.start {
        return Some(Disposition::OverlapsStart);
    }
    if existing
        .end
        .is_some_and(|e| e > start && end >= e && existing.start < start)
    {
        return Some(Disposition::OverlapsEnd);
    }
    if existing.end.is_none() && existing.start >= start && existing.start < end {
        return Some(Disposition::InfiniteStartsWithin);
    }
    None
}

impl Disposition {
    pub fn mutation(self, existing: &Interval, start: Timestamp, end: Timestamp) -> Mutation {
        match self {
            Disposition::FullyContained => Mutation::Delete,
            Disposition::Surrounds => Mutation::Split {
                head_end: start,
                tail: Interval {
                    spot_id: existing.spot_id.clone(),
                    owner_email: existing.owner_email.clone(),
                    start: end,
                    end: existing.end,
                },
            },
            Disposition::OverlapsStart | Disposition::InfiniteStartsWithin => {
                Mutation::SetStart(end)
            }
            Disposition::OverlapsEnd => Mutation::SetEnd(start),
        }
    }
}

/// Classifies `existing` and returns the mutation releasing `[start, end)` from it.
pub fn resolve(existing: &Interval, start: Timestamp, end: Timestamp) -> Option<Mutation> {
    classify(existing, start, end).map(|d| d.mutation(existing, start, end))
}
