//! Runs against a live database when `EMAILTOKEN_TEST_DSN` is set; skipped otherwise.

use anyhow::Result;
use emailtoken::token::{
    DigestStore, Error, PgDigestStore, ServiceState, TokenIssuer, TokenVerifier, hasher,
};
use secrecy::ExposeSecret;
use std::sync::Arc;

const SCHEMA: &str = include_str!("../db/sql/email_tokens.sql");

async fn store() -> Result<Option<PgDigestStore>> {
    let Ok(dsn) = std::env::var("EMAILTOKEN_TEST_DSN") else {
        return Ok(None);
    };
    let pool = sqlx::PgPool::connect(&dsn).await?;
    sqlx::raw_sql(SCHEMA).execute(&pool).await?;
    Ok(Some(PgDigestStore::new(pool)))
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", uuid::Uuid::new_v4().simple())
}

#[tokio::test]
async fn replace_then_take_consumes_row() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };
    let email = unique_email("take");

    store.ping().await?;
    store.replace(&email, hasher::hash("first")).await?;
    store.replace(&email, hasher::hash("second")).await?;

    assert_eq!(store.take(&email).await?, Some(hasher::hash("second")));
    assert_eq!(store.take(&email).await?, None);
    Ok(())
}

#[tokio::test]
async fn issued_token_redeems_once_against_postgres() -> Result<()> {
    let Some(store) = store().await? else {
        return Ok(());
    };
    let store: Arc<dyn DigestStore> = Arc::new(store);
    let state = Arc::new(ServiceState::new());
    state.enable();
    let issuer = TokenIssuer::new(state.clone(), store.clone());
    let verifier = TokenVerifier::new(state, store);
    let email = unique_email("flow");

    let token = issuer.issue(&email).await?;
    let grant = verifier.verify(&email, token.expose_secret()).await?;
    assert_eq!(grant.email, email);

    let again = verifier.verify(&email, token.expose_secret()).await;
    assert!(matches!(again, Err(Error::NoPendingToken)));
    Ok(())
}
