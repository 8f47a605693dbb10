//! Authenticated self-service endpoints.
//!
//! Flow Overview:
//! 1) Resolve the session claim.
//! 2) Apply the mutation through the user store.
//! 3) Keep live sessions in sync with the profile (or gone, on deletion).

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use super::auth::principal::require_auth;
use super::auth::session::clear_session_cookie;
use super::auth::{delete_sessions_for_user, refresh_session_username, AuthState};
use super::valid_username;
use crate::auth::{self, password, ClaimPatch, StoreError, UserPatch};

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MeUpdateRequest {
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MeDeleteRequest {
    #[schema(value_type = String)]
    pub password: SecretString,
}

#[utoipa::path(
    get,
    path = "/v1/me",
    responses(
        (status = 200, description = "Return the authenticated account's profile.", body = MeResponse),
        (status = 401, description = "Missing or invalid session."),
    ),
    tag = "me"
)]
pub async fn get_me(headers: HeaderMap, pool: Extension<PgPool>) -> impl IntoResponse {
    let claim = match require_auth(&headers, &pool).await {
        Ok(claim) => claim,
        Err(status) => return status.into_response(),
    };

    // The claim carries the username; no account lookup per request.
    (
        StatusCode::OK,
        Json(MeResponse {
            username: claim.username,
        }),
    )
        .into_response()
}

#[utoipa::path(
    patch,
    path = "/v1/me",
    request_body = MeUpdateRequest,
    responses(
        (status = 200, description = "Username updated.", body = MeResponse),
        (status = 400, description = "Invalid username."),
        (status = 401, description = "Missing or invalid session."),
        (status = 409, description = "Username already in use."),
    ),
    tag = "me"
)]
pub async fn patch_me(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<MeUpdateRequest>>,
) -> impl IntoResponse {
    let claim = match require_auth(&headers, &pool).await {
        Ok(claim) => claim,
        Err(status) => return status.into_response(),
    };

    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    if !valid_username(&request.username) {
        return (
            StatusCode::BAD_REQUEST,
            "Username must be at most 35 characters of Greek or Latin letters and spaces"
                .to_string(),
        )
            .into_response();
    }

    let updated = auth_state
        .store()
        .update(
            claim.id,
            UserPatch {
                username: Some(request.username),
            },
        )
        .await;

    let user = match updated {
        Ok(user) => user,
        Err(StoreError::Conflict) => {
            return (
                StatusCode::CONFLICT,
                "Username already in use".to_string(),
            )
                .into_response();
        }
        Err(StoreError::NotFound) => return StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("Failed to update username: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // Re-issue the claim with the new username and push it into every live
    // session for the account. The role is untouched by construction.
    let refreshed = auth::refresh(
        &claim,
        &ClaimPatch {
            username: Some(user.username.clone()),
        },
    );
    if let Err(err) = refresh_session_username(&pool, refreshed.id, &refreshed.username).await {
        error!("Failed to refresh sessions after username change: {err}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    (
        StatusCode::OK,
        Json(MeResponse {
            username: refreshed.username,
        }),
    )
        .into_response()
}

#[utoipa::path(
    delete,
    path = "/v1/me",
    request_body = MeDeleteRequest,
    responses(
        (status = 204, description = "Account deleted; session cleared."),
        (status = 400, description = "Missing password."),
        (status = 401, description = "Missing session or incorrect password."),
    ),
    tag = "me"
)]
pub async fn delete_me(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<MeDeleteRequest>>,
) -> impl IntoResponse {
    let claim = match require_auth(&headers, &pool).await {
        Ok(claim) => claim,
        Err(status) => return status.into_response(),
    };

    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    if request.password.expose_secret().is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing password".to_string()).into_response();
    }

    let user = match auth_state.store().find_by_id(claim.id).await {
        Ok(Some(user)) => user,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("Failed to load account for deletion: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // Accounts without a credential cannot confirm deletion this way; the
    // placeholder keeps the cost identical either way.
    let encoded = user
        .password_hash
        .unwrap_or_else(|| password::PLACEHOLDER_HASH.to_string());
    let supplied = request.password.expose_secret().to_string();
    let verified = match tokio::task::spawn_blocking(move || password::verify(&supplied, &encoded))
        .await
    {
        Ok(verified) => verified,
        Err(err) => {
            error!("Password verification task failed: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if !verified {
        return (StatusCode::UNAUTHORIZED, "Incorrect password".to_string()).into_response();
    }

    // Delete the account, then invalidate its sessions before responding so
    // there is no window where the account is gone but a claim still works.
    if let Err(err) = auth_state.store().delete(claim.id).await {
        error!("Failed to delete account: {err}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if let Err(err) = delete_sessions_for_user(&pool, claim.id).await {
        error!("Failed to invalidate sessions after deletion: {err}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie(auth_state.config()) {
        response_headers.insert(SET_COOKIE, cookie);
    }
    (StatusCode::NO_CONTENT, response_headers).into_response()
}
