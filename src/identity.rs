//! Identity handed over by the external authentication collaborator.
//!
//! The login flow itself lives outside this crate. Once it has proven who the
//! caller is, it stores an [`Identity`] on the caller's `tower-sessions`
//! [`Session`] with [`sign_in`]; the reservation core only ever reads it back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Result;

/// Session key under which the resolved identity is stored.
pub const IDENTITY_KEY: &str = "spot_reservations.identity";

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
}

impl Identity {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Maps an authenticated request context to an [`Identity`].
#[async_trait]
pub trait IdentityResolver {
    /// `Ok(None)` means the caller is not authenticated.
    async fn resolve_identity(&self) -> Result<Option<Identity>>;
}

#[async_trait]
impl IdentityResolver for Session {
    async fn resolve_identity(&self) -> Result<Option<Identity>> {
        Ok(self.get::<Identity>(IDENTITY_KEY).await?)
    }
}

/// Fixed identity, for callers that authenticate without sessions.
#[async_trait]
impl IdentityResolver for Identity {
    async fn resolve_identity(&self) -> Result<Option<Identity>> {
        Ok(Some(self.clone()))
    }
}

/// Records `identity` on the session. Called by the authentication layer.
pub async fn sign_in(session: &Session, identity: &Identity) -> Result<()> {
    session.cycle_id().await?;
    session.insert(IDENTITY_KEY, identity).await?;
    Ok(())
}

pub async fn sign_out(session: &Session) -> Result<()> {
    session.flush().await?;
    Ok(())
}
