//! Digest storage.
//!
//! The store holds at most one digest per email. Both operations are atomic
//! per identity: `replace` supersedes any previous digest in one step, and
//! `take` removes and returns the digest in one step, so a verification can
//! never act on a digest that a concurrent issue has already replaced.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::hasher::TokenDigest;

#[async_trait]
pub trait DigestStore: Send + Sync {
    /// Upsert the pending digest for `email`.
    async fn replace(&self, email: &str, digest: TokenDigest) -> Result<()>;

    /// Remove and return the pending digest for `email`.
    async fn take(&self, email: &str) -> Result<Option<TokenDigest>>;

    /// Backend liveness check.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

/// Process-local store, used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryDigestStore {
    digests: Mutex<HashMap<String, TokenDigest>>,
}

impl MemoryDigestStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.digests.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.digests.lock().await.is_empty()
    }

    pub async fn pending(&self, email: &str) -> Option<TokenDigest> {
        self.digests.lock().await.get(email).cloned()
    }
}

#[async_trait]
impl DigestStore for MemoryDigestStore {
    async fn replace(&self, email: &str, digest: TokenDigest) -> Result<()> {
        self.digests.lock().await.insert(email.to_string(), digest);
        Ok(())
    }

    async fn take(&self, email: &str) -> Result<Option<TokenDigest>> {
        Ok(self.digests.lock().await.remove(email))
    }
}
