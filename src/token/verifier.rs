use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::error::{Error, Result};
use super::hasher;
use super::identity::normalize_email;
use super::state::ServiceState;
use super::store::DigestStore;

/// Proof that a presented token matched; handed to session minting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionGrant {
    pub email: String,
}

/// Redeems tokens. Every attempt consumes the pending digest, match or not.
#[derive(Clone)]
pub struct TokenVerifier {
    state: Arc<ServiceState>,
    store: Arc<dyn DigestStore>,
}

impl TokenVerifier {
    #[must_use]
    pub fn new(state: Arc<ServiceState>, store: Arc<dyn DigestStore>) -> Self {
        Self { state, store }
    }

    /// Verify `presented` against the pending digest for `email`.
    ///
    /// # Errors
    /// `ServiceDisabled` when the gate is off, `NoPendingToken` when nothing is
    /// pending, `InvalidToken` on mismatch, `UnsupportedAlgorithm` when the
    /// stored digest names an unknown scheme, `Backend` on storage failure.
    #[instrument(skip_all)]
    pub async fn verify(&self, email: &str, presented: &str) -> Result<SessionGrant> {
        if !self.state.is_enabled() {
            return Err(Error::ServiceDisabled);
        }

        let email = normalize_email(email);

        // Taking the digest is the invalidation: the token is gone from here on.
        let Some(stored) = self.store.take(&email).await? else {
            debug!("no pending email login token");
            return Err(Error::NoPendingToken);
        };

        let computed = hasher::hash_with(&stored.algorithm, presented).inspect_err(|err| {
            warn!("stored email token digest is unusable: {err}");
        })?;

        if stored.matches(&computed) {
            debug!("email login token accepted");
            Ok(SessionGrant { email })
        } else {
            debug!("email login token rejected");
            Err(Error::InvalidToken)
        }
    }
}
