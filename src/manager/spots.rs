use chrono::{SubsecRound, Utc};
use sea_orm::{EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::authz::{require_admin, resolve_role};
use crate::entity::spot::{self, ActiveModel as SpotActiveModel};
use crate::error::{ReservationError, Result};

use super::ReservationManager;

impl ReservationManager {
    /// Creates spot `id`. Admins and owners only.
    pub async fn create_spot(&self, acting_email: &str, id: &str) -> Result<spot::Model> {
        let txn = self.begin().await?;
        require_admin(acting_email, resolve_role(&txn, acting_email).await?)?;

        let spot = spot::Model {
            id: id.to_string(),
            created_at: Utc::now().trunc_subsecs(6),
        };
        let active = SpotActiveModel {
            id: Set(spot.id.clone()),
            created_at: Set(spot.created_at),
        };
        spot::Entity::insert(active)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| ReservationError::from_insert(e, format!("spot {id}")))?;
        txn.commit().await?;

        info!(acting = acting_email, spot_id = id, "created spot");
        Ok(spot)
    }

    /// Deletes spot `id` and every reservation on it. Admins and owners only.
    pub async fn delete_spot(&self, acting_email: &str, id: &str) -> Result<()> {
        let txn = self.begin().await?;
        require_admin(acting_email, resolve_role(&txn, acting_email).await?)?;

        let res = spot::Entity::delete_by_id(id.to_string()).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(ReservationError::NotFound(format!("spot {id}")));
        }
        txn.commit().await?;

        info!(acting = acting_email, spot_id = id, "deleted spot");
        Ok(())
    }

    /// All spots, ordered by id.
    pub async fn list_spots(&self) -> Result<Vec<spot::Model>> {
        Ok(spot::Entity::find()
            .order_by_asc(spot::Column::Id)
            .all(&self.conn)
            .await?)
    }
}
