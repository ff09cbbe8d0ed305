//! Login entry point and the session-minting seam.
//!
//! Session issuance belongs to the surrounding accounts framework. The crate
//! only needs something that turns a `SessionGrant` into a session, so that
//! step sits behind `SessionMinter`.

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::error::Result;
use super::issuer::generate_token;
use super::verifier::{SessionGrant, TokenVerifier};

#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub email: String,
    pub token: SecretString,
}

#[async_trait]
pub trait SessionMinter: Send + Sync {
    async fn mint(&self, grant: SessionGrant) -> AnyResult<Session>;
}

/// Mints opaque random session tokens without persisting them.
#[derive(Clone, Debug, Default)]
pub struct OpaqueSessionMinter;

#[async_trait]
impl SessionMinter for OpaqueSessionMinter {
    async fn mint(&self, grant: SessionGrant) -> AnyResult<Session> {
        Ok(Session {
            id: Uuid::new_v4(),
            email: grant.email,
            token: SecretString::from(generate_token()?),
        })
    }
}

/// Login capability used by the inbound route.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, email: &str, token: &str) -> Result<Session>;
}

/// Verifies the email token, then hands the grant to a `SessionMinter`.
#[derive(Clone)]
pub struct EmailTokenAuthenticator {
    verifier: TokenVerifier,
    minter: Arc<dyn SessionMinter>,
}

impl EmailTokenAuthenticator {
    #[must_use]
    pub fn new(verifier: TokenVerifier, minter: Arc<dyn SessionMinter>) -> Self {
        Self { verifier, minter }
    }
}

#[async_trait]
impl Authenticator for EmailTokenAuthenticator {
    async fn login(&self, email: &str, token: &str) -> Result<Session> {
        let grant = self.verifier.verify(email, token).await?;
        let session = self.minter.mint(grant).await?;
        info!(session_id = %session.id, "email token login succeeded");
        Ok(session)
    }
}
