//! Auth configuration and shared handler state.

use std::sync::Arc;

use crate::auth::{CredentialAuthenticator, UserStore};

const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    frontend_base_url: String,
    session_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(frontend_base_url: String) -> Self {
        Self {
            frontend_base_url,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    pub(crate) fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    pub(crate) fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }
}

/// Everything the auth handlers need: the configuration, the user store, and
/// the authenticator built on top of it.
pub struct AuthState {
    config: AuthConfig,
    store: Arc<dyn UserStore>,
    authenticator: CredentialAuthenticator,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig, store: Arc<dyn UserStore>) -> Self {
        let authenticator = CredentialAuthenticator::new(store.clone());
        Self {
            config,
            store,
            authenticator,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    #[must_use]
    pub fn authenticator(&self) -> &CredentialAuthenticator {
        &self.authenticator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryUserStore;

    #[test]
    fn auth_config_defaults_and_overrides() {
        let config = AuthConfig::new("https://kleidi.dev".to_string());
        assert_eq!(config.frontend_base_url(), "https://kleidi.dev");
        assert_eq!(config.session_ttl_seconds(), DEFAULT_SESSION_TTL_SECONDS);
        assert!(config.session_cookie_secure());

        let config = config.with_session_ttl_seconds(60);
        assert_eq!(config.session_ttl_seconds(), 60);
    }

    #[test]
    fn plain_http_frontend_means_insecure_cookie() {
        let config = AuthConfig::new("http://localhost:3000".to_string());
        assert!(!config.session_cookie_secure());
    }

    #[test]
    fn auth_state_wires_the_store_through() {
        let config = AuthConfig::new("http://localhost:3000".to_string());
        let store = Arc::new(MemoryUserStore::new());
        let state = AuthState::new(config, store);
        assert_eq!(state.config().frontend_base_url(), "http://localhost:3000");
    }
}
