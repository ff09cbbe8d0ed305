use anyhow::{Context, Result as AnyResult};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{RngCore, rngs::OsRng};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::error::{Error, Result};
use super::hasher;
use super::identity::{normalize_email, valid_email};
use super::state::ServiceState;
use super::store::DigestStore;

/// Random bytes per token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Create a new random token.
///
/// Returned token is only sent to the user; the store keeps a digest.
pub(crate) fn generate_token() -> AnyResult<String> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate email token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Issues single-use login tokens bound to an email address.
#[derive(Clone)]
pub struct TokenIssuer {
    state: Arc<ServiceState>,
    store: Arc<dyn DigestStore>,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(state: Arc<ServiceState>, store: Arc<dyn DigestStore>) -> Self {
        Self { state, store }
    }

    /// Issue a fresh token for `email`, superseding any pending one.
    ///
    /// The plaintext is returned for delivery and never stored.
    ///
    /// # Errors
    /// `ServiceDisabled` when the gate is off, `InvalidEmail` for malformed
    /// addresses, `Backend` when randomness or storage fails.
    #[instrument(skip_all)]
    pub async fn issue(&self, email: &str) -> Result<SecretString> {
        if !self.state.is_enabled() {
            return Err(Error::ServiceDisabled);
        }

        let email = normalize_email(email);
        if !valid_email(&email) {
            return Err(Error::InvalidEmail);
        }

        let token = generate_token()?;
        self.store.replace(&email, hasher::hash(&token)).await?;

        debug!("issued email login token");

        Ok(SecretString::from(token))
    }
}

#[cfg(test)]
mod tests {
    use super::super::store::MemoryDigestStore;
    use super::*;
    use secrecy::ExposeSecret;

    fn issuer(enabled: bool) -> (TokenIssuer, Arc<MemoryDigestStore>) {
        let state = Arc::new(ServiceState::new());
        if enabled {
            state.enable();
        }
        let store = Arc::new(MemoryDigestStore::new());
        (TokenIssuer::new(state, store.clone()), store)
    }

    #[test]
    fn generate_token_decodes_to_token_bytes() {
        let decoded_len = generate_token()
            .ok()
            .and_then(|token| Base64UrlUnpadded::decode_vec(&token).ok())
            .map(|bytes| bytes.len());
        assert_eq!(decoded_len, Some(TOKEN_BYTES));
    }

    #[test]
    fn generate_token_is_random() {
        assert_ne!(generate_token().ok(), generate_token().ok());
    }

    #[tokio::test]
    async fn issue_stores_digest_not_plaintext() -> anyhow::Result<()> {
        let (issuer, store) = issuer(true);
        let token = issuer.issue("a@b.com").await?;

        let pending = store.pending("a@b.com").await;
        assert_eq!(pending, Some(hasher::hash(token.expose_secret())));
        assert_ne!(
            pending.map(|digest| digest.digest),
            Some(token.expose_secret().to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn issue_normalizes_email() -> anyhow::Result<()> {
        let (issuer, store) = issuer(true);
        issuer.issue("  A@B.com ").await?;
        assert!(store.pending("a@b.com").await.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn reissue_replaces_digest() -> anyhow::Result<()> {
        let (issuer, store) = issuer(true);
        let first = issuer.issue("a@b.com").await?;
        let second = issuer.issue("a@b.com").await?;

        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.pending("a@b.com").await,
            Some(hasher::hash(second.expose_secret()))
        );
        assert_ne!(first.expose_secret(), second.expose_secret());
        Ok(())
    }

    #[tokio::test]
    async fn issue_refused_when_disabled() {
        let (issuer, store) = issuer(false);
        let result = issuer.issue("a@b.com").await;
        assert!(matches!(result, Err(Error::ServiceDisabled)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn issue_rejects_invalid_email() {
        let (issuer, store) = issuer(true);
        let result = issuer.issue("not-an-email").await;
        assert!(matches!(result, Err(Error::InvalidEmail)));
        assert!(store.is_empty().await);
    }
}
