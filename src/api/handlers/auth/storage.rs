//! Database helpers for the session-claim carrier.
//!
//! Sessions live server-side: the browser holds a random token, rows key on
//! its SHA-256 hash and carry the [`SessionClaim`] fields denormalized from
//! `users` at issuance. `role_id` is written once here and never updated;
//! privilege changes only reach a session through a fresh login.

use anyhow::{anyhow, Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use super::utils::{generate_session_token, hash_session_token, is_unique_violation};
use crate::auth::SessionClaim;

/// Persist a new session for an issued claim and return the raw token so the
/// caller can set the cookie.
pub(crate) async fn insert_session(
    pool: &PgPool,
    claim: &SessionClaim,
    ttl_seconds: i64,
) -> Result<String> {
    let query = r"
        INSERT INTO user_sessions (session_hash, user_id, username, role_id, expires_at)
        VALUES ($1, $2, $3, $4, NOW() + ($5 * INTERVAL '1 second'))
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );

    for _ in 0..3 {
        let token = generate_session_token()?;
        let token_hash = hash_session_token(&token);
        let result = sqlx::query(query)
            .bind(token_hash)
            .bind(claim.id)
            .bind(&claim.username)
            .bind(claim.role_id)
            .bind(ttl_seconds)
            .execute(pool)
            .instrument(span.clone())
            .await;

        match result {
            Ok(_) => return Ok(token),
            Err(err) if is_unique_violation(&err) => {}
            Err(err) => return Err(err).context("failed to insert session"),
        }
    }

    Err(anyhow!("failed to generate unique session token"))
}

/// Resolve a token hash to the claim it carries, if the session is live.
/// The row itself holds the claim, so this is a single-table read.
pub(crate) async fn lookup_session(
    pool: &PgPool,
    token_hash: &[u8],
) -> Result<Option<SessionClaim>> {
    let query = r"
        SELECT user_id, username, role_id
        FROM user_sessions
        WHERE session_hash = $1
          AND expires_at > NOW()
        LIMIT 1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(token_hash)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup session")?;

    let Some(row) = row else {
        return Ok(None);
    };

    // Record activity for audit/visibility without extending the session TTL.
    let query = r"
        UPDATE user_sessions
        SET last_seen_at = NOW()
        WHERE session_hash = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(token_hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to update session last_seen_at")?;

    let user_id: Uuid = row.get("user_id");
    Ok(Some(SessionClaim {
        id: user_id,
        username: row.get("username"),
        role_id: row.get("role_id"),
    }))
}

/// Delete one session. Logout is idempotent; it's fine if no rows match.
pub(crate) async fn delete_session(pool: &PgPool, token_hash: &[u8]) -> Result<()> {
    let query = "DELETE FROM user_sessions WHERE session_hash = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(token_hash)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete session")?;
    Ok(())
}

/// Re-synchronize the denormalized username into every live session for an
/// account after a profile change. `role_id` is deliberately untouched.
pub(crate) async fn refresh_session_username(
    pool: &PgPool,
    user_id: Uuid,
    username: &str,
) -> Result<()> {
    let query = "UPDATE user_sessions SET username = $1 WHERE user_id = $2";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(username)
        .bind(user_id)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to refresh session username")?;
    Ok(())
}

/// Drop every session for an account. Called synchronously with account
/// deletion so no deleted-but-still-authenticated window exists; the FK
/// cascade in the schema backstops the same invariant.
pub(crate) async fn delete_sessions_for_user(pool: &PgPool, user_id: Uuid) -> Result<()> {
    let query = "DELETE FROM user_sessions WHERE user_id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(user_id)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete sessions for user")?;
    Ok(())
}
