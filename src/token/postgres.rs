//! Postgres-backed digest store. Schema: `db/sql/email_tokens.sql`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row, postgres::PgPoolOptions};
use std::time::Duration;
use tracing::Instrument;

use super::hasher::TokenDigest;
use super::store::DigestStore;

const REPLACE_DIGEST: &str = r"
    INSERT INTO email_login_tokens (email, digest, algorithm, created_at)
    VALUES ($1, $2, $3, NOW())
    ON CONFLICT (email) DO UPDATE
    SET digest = EXCLUDED.digest,
        algorithm = EXCLUDED.algorithm,
        created_at = EXCLUDED.created_at
";

const TAKE_DIGEST: &str = r"
    DELETE FROM email_login_tokens
    WHERE email = $1
    RETURNING digest, algorithm
";

#[derive(Clone, Debug)]
pub struct PgDigestStore {
    pool: PgPool,
}

impl PgDigestStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a small pool with a bounded acquire timeout.
    ///
    /// # Errors
    /// Returns an error if the database is unreachable.
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .max_lifetime(Duration::from_secs(60 * 2))
            .acquire_timeout(Duration::from_secs(5))
            .test_before_acquire(true)
            .connect(dsn)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl DigestStore for PgDigestStore {
    async fn replace(&self, email: &str, digest: TokenDigest) -> Result<()> {
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPSERT",
            db.statement = REPLACE_DIGEST
        );
        sqlx::query(REPLACE_DIGEST)
            .bind(email)
            .bind(digest.digest)
            .bind(digest.algorithm)
            .execute(&self.pool)
            .instrument(span)
            .await
            .context("failed to store email token digest")?;
        Ok(())
    }

    async fn take(&self, email: &str) -> Result<Option<TokenDigest>> {
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = TAKE_DIGEST
        );
        let row = sqlx::query(TAKE_DIGEST)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .context("failed to consume email token digest")?;

        row.map(|row| -> Result<TokenDigest> {
            Ok(TokenDigest {
                digest: row.try_get("digest")?,
                algorithm: row.try_get("algorithm")?,
            })
        })
        .transpose()
    }

    async fn ping(&self) -> Result<()> {
        let span = tracing::info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("failed to acquire database connection")?;
        conn.ping()
            .instrument(span)
            .await
            .context("failed to ping database")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(sql: &str) -> String {
        sql.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn replace_upserts_on_email() {
        let sql = compact(REPLACE_DIGEST);
        assert!(sql.starts_with("INSERT INTO email_login_tokens (email, digest, algorithm"));
        assert!(sql.contains("ON CONFLICT (email) DO UPDATE"));
        assert!(sql.contains("digest = EXCLUDED.digest"));
        assert!(sql.contains("algorithm = EXCLUDED.algorithm"));
    }

    #[test]
    fn take_deletes_and_returns_both_columns() {
        let sql = compact(TAKE_DIGEST);
        assert!(sql.starts_with("DELETE FROM email_login_tokens WHERE email = $1"));
        assert!(sql.ends_with("RETURNING digest, algorithm"));
    }

    #[test]
    fn queries_match_schema() {
        let schema = compact(include_str!("../../db/sql/email_tokens.sql"));
        assert!(schema.contains("CREATE TABLE IF NOT EXISTS email_login_tokens"));
        assert!(schema.contains("email TEXT PRIMARY KEY"));
        for column in ["digest TEXT NOT NULL", "algorithm TEXT NOT NULL"] {
            assert!(schema.contains(column), "missing {column}");
        }
    }
}
