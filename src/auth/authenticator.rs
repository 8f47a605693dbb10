//! Credential authentication against the user store.

use std::sync::Arc;

use anyhow::anyhow;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::error::AuthError;
use crate::auth::models::Identity;
use crate::auth::password;
use crate::auth::store::UserStore;

/// Resolves email+password pairs to an [`Identity`].
///
/// Every failure shape (unknown email, account without a credential, wrong
/// password) returns the same [`AuthError::Unauthenticated`] and pays the
/// same key-derivation cost: when there is no stored hash to check, a
/// placeholder hash is verified and the result discarded, so the absent-user
/// path cannot be told apart by timing.
pub struct CredentialAuthenticator {
    store: Arc<dyn UserStore>,
}

impl CredentialAuthenticator {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Authenticate and return the identity with credential material
    /// stripped. Read-only; never mutates the store.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` for any credential failure; `StoreUnavailable` or
    /// `Internal` for faults unrelated to the credentials.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, AuthError> {
        let user = self.store.find_by_email(email).await?;

        // The KDF runs even when there is nothing real to verify against.
        let (encoded, identity) = match &user {
            Some(user) => match &user.password_hash {
                Some(encoded) => (encoded.clone(), Some(Identity::from(user))),
                None => (password::PLACEHOLDER_HASH.to_string(), None),
            },
            None => (password::PLACEHOLDER_HASH.to_string(), None),
        };

        // Deliberately expensive; keep it off the async worker threads.
        let supplied = password.expose_secret().to_string();
        let verified = tokio::task::spawn_blocking(move || password::verify(&supplied, &encoded))
            .await
            .map_err(|err| AuthError::Internal(anyhow!("password verification task: {err}")))?;

        match identity {
            Some(identity) if verified => Ok(identity),
            _ => {
                debug!("credential verification failed");
                Err(AuthError::Unauthenticated)
            }
        }
    }
}
