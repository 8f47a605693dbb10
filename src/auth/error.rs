//! Error taxonomy for the authentication and authorization core.
//!
//! Credential failures of any shape (unknown email, missing credential,
//! wrong password) collapse into `Unauthenticated` before they leave the
//! core; callers cannot tell them apart. Store and internal failures keep
//! their detail for logging but display as generic messages.

use thiserror::Error;

use crate::auth::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Bad credentials or unknown account; always merged into one outcome.
    #[error("invalid credentials")]
    Unauthenticated,

    /// Authenticated but below the required privilege level.
    #[error("insufficient privileges")]
    Unauthorized,

    /// Email or username already taken.
    #[error("email or username already in use")]
    Conflict,

    /// Malformed input rejected before any store or KDF work.
    #[error("{0}")]
    Validation(String),

    /// Persistence-layer failure. The source is logged, never displayed.
    #[error("storage unavailable")]
    StoreUnavailable(#[source] anyhow::Error),

    /// Any other internal fault (worker pool, entropy source).
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => Self::Conflict,
            // A missing row during authentication is a credential failure,
            // not a fault.
            StoreError::NotFound => Self::Unauthenticated,
            StoreError::Unavailable(source) => Self::StoreUnavailable(source),
        }
    }
}
