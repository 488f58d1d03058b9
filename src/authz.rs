use sea_orm::{ConnectionTrait, EntityTrait};
use tracing::warn;

use crate::entity::user::{self, Role};
use crate::error::{ReservationError, Result};
use crate::model::Interval;

/// Looks up the role of `email`.
pub async fn resolve_role<C>(db: &C, email: &str) -> Result<Role>
where
    C: ConnectionTrait,
{
    user::Entity::find_by_id(email.to_string())
        .one(db)
        .await?
        .map(|u| u.role)
        .ok_or_else(|| ReservationError::NotFound(format!("user {email}")))
}

/// Plain users may only release their own intervals; admins and owners may
/// release anyone's.
pub fn authorize_release(requester: &str, role: Role, intervals: &[Interval]) -> Result<()> {
    if role.can_administer() {
        return Ok(());
    }
    if let Some(foreign) = intervals.iter().find(|i| i.owner_email != requester) {
        warn!(
            requester,
            owner = %foreign.owner_email,
            spot_id = %foreign.spot_id,
            "release rejected: interval owned by another user"
        );
        return Err(ReservationError::Unauthorized(
            "you can only release your own reservations".into(),
        ));
    }
    Ok(())
}

/// Gate for spot and user administration.
pub fn require_admin(acting: &str, role: Role) -> Result<()> {
    if role.can_administer() {
        Ok(())
    } else {
        warn!(acting, ?role, "administrative action rejected");
        Err(ReservationError::Unauthorized(format!(
            "{acting} is not an admin"
        )))
    }
}
