//! Session endpoints for cookie and bearer auth.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::{
    state::{AuthConfig, AuthState},
    storage::{delete_session, lookup_session},
    types::SessionResponse,
    utils::hash_session_token,
};
use crate::auth::SessionClaim;

const SESSION_COOKIE_NAME: &str = "kleidi_session";

#[utoipa::path(
    get,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "auth"
)]
pub async fn session(headers: HeaderMap, pool: Extension<PgPool>) -> impl IntoResponse {
    // Missing cookies are treated as "no session" to avoid leaking auth state.
    let Some(token) = extract_session_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    // Only the hash is stored; never compare raw tokens against the database.
    let token_hash = hash_session_token(&token);
    match lookup_session(&pool, &token_hash).await {
        Ok(Some(claim)) => {
            let response = SessionResponse {
                user_id: claim.id.to_string(),
                username: claim.username,
                role_id: claim.role_id,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to lookup session: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Resolve a session cookie into the claim it carries, if present.
///
/// Returns `Ok(None)` when the cookie is missing, expired, or unknown.
pub(crate) async fn authenticate_session(
    headers: &HeaderMap,
    pool: &PgPool,
) -> Result<Option<SessionClaim>, StatusCode> {
    let Some(token) = extract_session_token(headers) else {
        return Ok(None);
    };
    let token_hash = hash_session_token(&token);
    match lookup_session(pool, &token_hash).await {
        Ok(claim) => Ok(claim),
        Err(err) => {
            error!("Failed to lookup session: {err}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        let token_hash = hash_session_token(&token);
        if let Err(err) = delete_session(&pool, &token_hash).await {
            error!("Failed to delete session: {err}");
        }
    }

    // Always clear the cookie, even if the session record was missing.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(auth_state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}

/// Build a secure `HttpOnly` cookie for the session token.
pub(super) fn session_cookie(
    auth_state: &AuthState,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = auth_state.config().session_ttl_seconds();
    // Only mark cookies secure when the frontend is served over HTTPS.
    let secure = auth_state.config().session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(crate) fn clear_session_cookie(
    auth_config: &AuthConfig,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = auth_config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(axum::http::header::COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryUserStore;
    use std::sync::Arc;

    fn state(frontend: &str) -> AuthState {
        AuthState::new(
            AuthConfig::new(frontend.to_string()),
            Arc::new(MemoryUserStore::new()),
        )
    }

    #[test]
    fn session_cookie_is_http_only_and_scoped() {
        let state = state("https://kleidi.dev");
        let cookie = session_cookie(&state, "tok123").expect("cookie");
        let value = cookie.to_str().expect("ascii");
        assert!(value.starts_with("kleidi_session=tok123;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Secure"));
    }

    #[test]
    fn cookie_skips_secure_on_plain_http() {
        let state = state("http://localhost:3000");
        let cookie = session_cookie(&state, "tok123").expect("cookie");
        assert!(!cookie.to_str().expect("ascii").contains("Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let config = AuthConfig::new("https://kleidi.dev".to_string());
        let cookie = clear_session_cookie(&config).expect("cookie");
        let value = cookie.to_str().expect("ascii");
        assert!(value.starts_with("kleidi_session=;"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn extract_prefers_bearer_then_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("other=1; kleidi_session=from-cookie"),
        );
        assert_eq!(
            extract_session_token(&headers),
            Some("from-cookie".to_string())
        );

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-auth"));
        assert_eq!(
            extract_session_token(&headers),
            Some("from-auth".to_string())
        );
    }

    #[test]
    fn extract_handles_missing_and_empty() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_session_token(&headers), None);
    }
}
