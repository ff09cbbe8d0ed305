//! Handler configuration and shared state.

use std::sync::Arc;

use crate::api::email::EmailSender;
use crate::token::{
    Authenticator, DigestStore, LoginServiceRegistry, ServiceState, TokenIssuer,
};

const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    base_url: String,
    session_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    /// Base URL that login links are built on.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    pub(super) fn session_cookie_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

pub struct AuthState {
    config: AuthConfig,
    service: Arc<ServiceState>,
    registry: Arc<LoginServiceRegistry>,
    issuer: TokenIssuer,
    authenticator: Arc<dyn Authenticator>,
    store: Arc<dyn DigestStore>,
    sender: Arc<dyn EmailSender>,
}

impl AuthState {
    /// Wire the handler state. The issuer shares `service` and `store`.
    pub fn new(
        config: AuthConfig,
        service: Arc<ServiceState>,
        registry: Arc<LoginServiceRegistry>,
        store: Arc<dyn DigestStore>,
        authenticator: Arc<dyn Authenticator>,
        sender: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            config,
            issuer: TokenIssuer::new(service.clone(), store.clone()),
            service,
            registry,
            authenticator,
            store,
            sender,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn service(&self) -> &ServiceState {
        &self.service
    }

    pub(super) fn registry(&self) -> &LoginServiceRegistry {
        &self.registry
    }

    pub(super) fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub(super) fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub(super) fn store(&self) -> &dyn DigestStore {
        self.store.as_ref()
    }

    pub(super) fn sender(&self) -> &dyn EmailSender {
        self.sender.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::AuthConfig;

    #[test]
    fn auth_config_defaults_and_overrides() {
        let config = AuthConfig::new("https://login.example.com".to_string());
        assert_eq!(config.base_url(), "https://login.example.com");
        assert_eq!(
            config.session_ttl_seconds(),
            super::DEFAULT_SESSION_TTL_SECONDS
        );
        assert!(config.session_cookie_secure());

        let config = config.with_session_ttl_seconds(60);
        assert_eq!(config.session_ttl_seconds(), 60);
    }

    #[test]
    fn plain_http_cookies_are_not_secure() {
        let config = AuthConfig::new("http://localhost:8080".to_string());
        assert!(!config.session_cookie_secure());
    }
}
