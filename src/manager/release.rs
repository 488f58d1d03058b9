use tracing::{debug, info};

use crate::authz::{authorize_release, resolve_role};
use crate::error::{ReservationError, Result};
use crate::interval_store::IntervalStore;
use crate::model::Timestamp;
use crate::resolver::{self, Mutation};

use super::ReservationManager;

impl ReservationManager {
    /// Frees `[start, end)` on `spot_id` on behalf of `requesting_email`.
    ///
    /// Every interval overlapping the window is trimmed, split or deleted, in
    /// start order. Plain users may only release their own intervals; admins
    /// and owners may release anyone's. Open-ended intervals are never
    /// deleted, only trimmed or split. Releasing a free window is a no-op.
    ///
    /// Returns the number of intervals that were changed.
    pub async fn release(
        &self,
        requesting_email: &str,
        spot_id: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<usize> {
        if start >= end {
            return Err(ReservationError::InvalidRange { start, end });
        }

        let txn = self.begin().await?;

        let overlapping = txn.find_overlapping(spot_id, start, Some(end)).await?;
        debug!(spot_id, %start, %end, ?overlapping, "releasing window");

        let role = resolve_role(&txn, requesting_email).await?;
        authorize_release(requesting_email, role, &overlapping)?;

        let mut changed = 0;
        for existing in &overlapping {
            let Some(mutation) = resolver::resolve(existing, start, end) else {
                continue;
            };
            match mutation {
                Mutation::Delete => {
                    txn.delete_interval(existing).await?;
                }
                Mutation::Split { head_end, tail } => {
                    txn.set_interval_end(existing, head_end).await?;
                    txn.insert_interval(&tail).await?;
                }
                Mutation::SetStart(new_start) => {
                    txn.set_interval_start(existing, new_start).await?;
                }
                Mutation::SetEnd(new_end) => {
                    txn.set_interval_end(existing, new_end).await?;
                }
            }
            changed += 1;
        }

        txn.commit().await?;

        info!(
            spot_id,
            requester = requesting_email,
            %start,
            %end,
            changed,
            "released spot reservation"
        );
        Ok(changed)
    }
}
