use std::collections::HashMap;

use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder};

use crate::entity::{reservation, spot, user};
use crate::error::Result;
use crate::interval_store::IntervalStore;
use crate::model::{Interval, Occupant, SpotStatus, Timestamp};

use super::ReservationManager;

impl ReservationManager {
    /// Status of every spot at `at`, ordered by spot id.
    ///
    /// A spot is occupied by the interval with `start <= at < end`. Should more
    /// than one interval be active, a finite one wins over an open-ended one
    /// and a later start wins over an earlier one.
    pub async fn spot_status(&self, at: Timestamp) -> Result<Vec<SpotStatus>> {
        let spots = spot::Entity::find()
            .order_by_asc(spot::Column::Id)
            .all(&self.conn)
            .await?;
        let mut occupants = self.occupants(at, None).await?;

        tracing::debug!(%at, spots = spots.len(), occupied = occupants.len(), "computed spot status");
        Ok(spots
            .into_iter()
            .map(|s| SpotStatus {
                occupant: occupants.remove(&s.id),
                spot_id: s.id,
            })
            .collect())
    }

    /// Occupant of a single spot at `at`; `None` when it is free or unknown.
    pub async fn occupant_at(&self, spot_id: &str, at: Timestamp) -> Result<Option<Occupant>> {
        Ok(self.occupants(at, Some(spot_id)).await?.remove(spot_id))
    }

    /// Every interval on `spot_id`, ordered by start.
    pub async fn spot_timeline(&self, spot_id: &str) -> Result<Vec<Interval>> {
        self.conn.spot_timeline(spot_id).await
    }

    /// Preferred active interval per spot at `at`, optionally for one spot only.
    async fn occupants(
        &self,
        at: Timestamp,
        spot_id: Option<&str>,
    ) -> Result<HashMap<String, Occupant>> {
        let mut query = reservation::Entity::find()
            .find_also_related(user::Entity)
            .filter(reservation::Column::StartTime.lte(at))
            .filter(
                Condition::any()
                    .add(reservation::Column::EndTime.is_null())
                    .add(reservation::Column::EndTime.gt(at)),
            );
        if let Some(spot_id) = spot_id {
            query = query.filter(reservation::Column::SpotId.eq(spot_id));
        }

        let mut chosen: HashMap<String, (Interval, String)> = HashMap::new();
        for (row, owner) in query.all(&self.conn).await? {
            let candidate = Interval::from(row);
            let replace = chosen
                .get(&candidate.spot_id)
                .is_none_or(|(current, _)| preferred(&candidate, current));
            if replace {
                let name = owner.map(|u| u.name).unwrap_or_default();
                chosen.insert(candidate.spot_id.clone(), (candidate, name));
            }
        }

        Ok(chosen
            .into_iter()
            .map(|(spot_id, (interval, name))| {
                let occupant = Occupant {
                    email: interval.owner_email,
                    name,
                    start: interval.start,
                    end: interval.end,
                };
                (spot_id, occupant)
            })
            .collect())
    }
}

fn preferred(candidate: &Interval, current: &Interval) -> bool {
    match (candidate.is_open_ended(), current.is_open_ended()) {
        (false, true) => true,
        (true, false) => false,
        _ => candidate.start > current.start,
    }
}
