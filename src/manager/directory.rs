use chrono::{SubsecRound, Utc};
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

use crate::authz::{require_admin, resolve_role};
use crate::entity::user::{self, ActiveModel as UserActiveModel, Role};
use crate::error::{ReservationError, Result};
use crate::identity::IdentityResolver;

use super::ReservationManager;

impl ReservationManager {
    /// Creates a user with an explicit role. Fails with
    /// [`ReservationError::Conflict`] if the email is taken.
    pub async fn insert_user(&self, email: &str, name: &str, role: Role) -> Result<user::Model> {
        let user = insert_user_row(&self.conn, email, name, role).await?;
        info!(email, ?role, "inserted user");
        Ok(user)
    }

    /// Returns the directory record for `email`, creating it on first sight.
    ///
    /// The first user ever created becomes the [`Role::Owner`]; everyone after
    /// that starts as a plain [`Role::User`].
    pub async fn ensure_user(&self, email: &str, name: &str) -> Result<user::Model> {
        let txn = self.begin().await?;

        if let Some(existing) = user::Entity::find_by_id(email.to_string())
            .one(&txn)
            .await?
        {
            return Ok(existing);
        }

        let role = if user::Entity::find().one(&txn).await?.is_none() {
            Role::Owner
        } else {
            Role::User
        };
        let user = insert_user_row(&txn, email, name, role).await?;
        txn.commit().await?;

        info!(email, ?role, "registered user on first sight");
        Ok(user)
    }

    /// Resolves the caller through `resolver` and returns their directory
    /// record, registering them if needed.
    pub async fn current_user(&self, resolver: &impl IdentityResolver) -> Result<user::Model> {
        let identity = resolver
            .resolve_identity()
            .await?
            .ok_or(ReservationError::Unauthenticated)?;
        self.ensure_user(&identity.email, &identity.name).await
    }

    pub async fn get_user(&self, email: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find_by_id(email.to_string())
            .one(&self.conn)
            .await?)
    }

    pub async fn has_users(&self) -> Result<bool> {
        Ok(user::Entity::find().one(&self.conn).await?.is_some())
    }

    /// All users, newest first.
    pub async fn list_users(&self) -> Result<Vec<user::Model>> {
        Ok(user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.conn)
            .await?)
    }

    /// Deletes `email` and every reservation they own. Admins and owners only.
    pub async fn delete_user(&self, acting_email: &str, email: &str) -> Result<()> {
        let txn = self.begin().await?;
        require_admin(acting_email, resolve_role(&txn, acting_email).await?)?;

        let res = user::Entity::delete_by_id(email.to_string())
            .exec(&txn)
            .await?;
        if res.rows_affected == 0 {
            return Err(ReservationError::NotFound(format!("user {email}")));
        }
        txn.commit().await?;

        info!(acting = acting_email, email, "deleted user");
        Ok(())
    }
}

async fn insert_user_row<C>(db: &C, email: &str, name: &str, role: Role) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let user = user::Model {
        email: email.to_string(),
        name: name.to_string(),
        role,
        created_at: Utc::now().trunc_subsecs(6),
    };
    let active = UserActiveModel {
        email: Set(user.email.clone()),
        name: Set(user.name.clone()),
        role: Set(user.role),
        created_at: Set(user.created_at),
    };
    user::Entity::insert(active)
        .exec_without_returning(db)
        .await
        .map_err(|e| ReservationError::from_insert(e, format!("user {email}")))?;
    Ok(user)
}
