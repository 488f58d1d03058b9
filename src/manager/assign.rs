use tracing::{debug, info, warn};

use crate::error::{ReservationError, Result};
use crate::interval_store::IntervalStore;
use crate::model::{Interval, Timestamp};

use super::ReservationManager;

impl ReservationManager {
    /// Reserves `spot_id` for `owner_email` over `[start, end)`.
    ///
    /// A finite assignment never displaces anything: any overlapping interval,
    /// finite or open-ended, makes it fail with [`ReservationError::Conflict`].
    pub async fn assign_finite(
        &self,
        owner_email: &str,
        spot_id: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Interval> {
        if start >= end {
            return Err(ReservationError::InvalidRange { start, end });
        }

        let txn = self.begin().await?;

        let overlapping = txn.find_overlapping(spot_id, start, Some(end)).await?;
        if !overlapping.is_empty() {
            warn!(
                spot_id,
                owner = owner_email,
                %start,
                %end,
                overlapping = overlapping.len(),
                "finite assignment rejected: window already reserved"
            );
            return Err(ReservationError::Conflict(format!(
                "spot {spot_id} is already reserved during the requested time period"
            )));
        }

        let interval = Interval::finite(spot_id, owner_email, start, end);
        txn.insert_interval(&interval).await?;
        txn.commit().await?;

        info!(spot_id, owner = owner_email, %start, %end, "assigned spot");
        Ok(interval)
    }

    /// Reserves `spot_id` for `owner_email` from `start` onwards, with no end.
    ///
    /// Finite bookings are never displaced: while any finite interval overlaps
    /// `[cursor, ∞)`, the cursor advances to the latest end among them. Once
    /// only open-ended claims remain, the newest claim wins: a prior open-ended
    /// interval starting before the cursor is trimmed to end at it, one
    /// starting at or after the cursor is removed. The returned interval
    /// starts at the settled cursor.
    pub async fn assign_infinite(
        &self,
        owner_email: &str,
        spot_id: &str,
        start: Timestamp,
    ) -> Result<Interval> {
        let txn = self.begin().await?;

        let mut cursor = start;
        // One overlap read per advance, plus the read that finds the spot settled.
        for attempt in 0..=self.max_advance_attempts {
            let overlapping = txn.find_overlapping(spot_id, cursor, None).await?;

            // Every overlapping finite interval ends after `cursor`, so this strictly advances.
            if let Some(latest_end) = overlapping.iter().filter_map(|i| i.end).max() {
                if attempt == self.max_advance_attempts {
                    break;
                }
                debug!(spot_id, attempt, %cursor, %latest_end, "advancing past finite reservations");
                cursor = latest_end;
                continue;
            }

            for prior in &overlapping {
                if prior.start < cursor {
                    txn.set_interval_end(prior, cursor).await?;
                    debug!(spot_id, owner = %prior.owner_email, end = %cursor, "truncated open-ended reservation");
                } else {
                    txn.delete_interval(prior).await?;
                    debug!(spot_id, owner = %prior.owner_email, start = %prior.start, "displaced open-ended reservation");
                }
            }

            let interval = Interval::open_ended(spot_id, owner_email, cursor);
            txn.insert_interval(&interval).await?;
            txn.commit().await?;

            info!(
                spot_id,
                owner = owner_email,
                requested = %start,
                start = %cursor,
                "assigned spot without end"
            );
            return Ok(interval);
        }

        warn!(spot_id, owner = owner_email, %start, "open-ended assignment did not settle");
        Err(ReservationError::AdvanceLimit {
            spot_id: spot_id.to_string(),
            attempts: self.max_advance_attempts,
        })
    }
}
