//! Principal extraction: session claim in, authorization decision out.
//!
//! Every protected handler goes through [`require_role`] (or its
//! [`require_auth`] shorthand), which is the only caller of the gate on the
//! HTTP side. Handlers never compare `role_id` themselves.

use axum::http::{HeaderMap, StatusCode};
use sqlx::PgPool;

use super::session::authenticate_session;
use crate::auth::{authorize, Decision, DenyReason, SessionClaim, ROLE_USER};

/// Resolve the session and check it against a privilege threshold.
///
/// # Errors
///
/// `401` for anonymous callers, `403` for authenticated callers below the
/// threshold, `500` when the session store fails.
pub async fn require_role(
    headers: &HeaderMap,
    pool: &PgPool,
    min_role: i32,
) -> Result<SessionClaim, StatusCode> {
    let claim = authenticate_session(headers, pool).await?;

    match authorize(claim.as_ref(), min_role) {
        Decision::Allowed => claim.ok_or(StatusCode::UNAUTHORIZED),
        Decision::Denied(DenyReason::InsufficientRole) => Err(StatusCode::FORBIDDEN),
        Decision::Denied(DenyReason::NotAuthenticated) => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Any authenticated account.
pub async fn require_auth(headers: &HeaderMap, pool: &PgPool) -> Result<SessionClaim, StatusCode> {
    require_role(headers, pool, ROLE_USER).await
}
