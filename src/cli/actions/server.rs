use crate::{
    api::{
        self,
        email::LogEmailSender,
        handlers::{AuthConfig, AuthState},
    },
    token::{
        DigestStore, EmailTokenAuthenticator, LoginServiceRegistry, MemoryDigestStore,
        OpaqueSessionMinter, PgDigestStore, ServiceState, TokenVerifier,
    },
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: Option<String>,
    pub base_url: String,
    pub enabled: bool,
    pub session_ttl_seconds: i64,
}

/// Wire the token components and serve HTTP until shutdown.
///
/// # Errors
/// Returns an error if the database is unreachable or the server fails
pub async fn execute(args: Args) -> Result<()> {
    let store: Arc<dyn DigestStore> = match args.dsn.as_deref() {
        Some(dsn) => Arc::new(
            PgDigestStore::connect(dsn)
                .await
                .context("Failed to connect to database")?,
        ),
        None => {
            info!("No DSN given, pending tokens are kept in memory");
            Arc::new(MemoryDigestStore::new())
        }
    };

    let service = Arc::new(ServiceState::new());
    let registry = Arc::new(LoginServiceRegistry::new());
    service.subscribe(registry.clone());
    if args.enabled {
        service.enable();
    }
    debug!("Service state: {:?}", service);

    let verifier = TokenVerifier::new(service.clone(), store.clone());
    let authenticator = Arc::new(EmailTokenAuthenticator::new(
        verifier,
        Arc::new(OpaqueSessionMinter),
    ));

    let config = AuthConfig::new(args.base_url).with_session_ttl_seconds(args.session_ttl_seconds);

    let auth_state = Arc::new(AuthState::new(
        config,
        service,
        registry,
        store,
        authenticator,
        Arc::new(LogEmailSender),
    ));

    api::new(args.port, auth_state).await
}
