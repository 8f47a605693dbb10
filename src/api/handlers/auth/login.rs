//! Credential login: email+password in, session cookie out.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error};

use super::{
    session::session_cookie,
    state::AuthState,
    storage::insert_session,
    types::{LoginRequest, SessionResponse},
};
use crate::api::handlers::valid_email;
use crate::auth::{self, AuthError};

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 400, description = "Malformed payload"),
        (status = 401, description = "Unauthorized"),
    ),
    tag = "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    if !valid_email(&request.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    if request.password.expose_secret().is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing password".to_string()).into_response();
    }

    let identity = match auth_state
        .authenticator()
        .authenticate(&request.email, &request.password)
        .await
    {
        Ok(identity) => identity,
        Err(AuthError::Unauthenticated) => {
            debug!("login rejected");
            return (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()).into_response();
        }
        Err(err) => {
            error!("Login failed: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let claim = auth::issue(&identity);
    let ttl_seconds = auth_state.config().session_ttl_seconds();
    let token = match insert_session(&pool, &claim, ttl_seconds).await {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to create session: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut response_headers = HeaderMap::new();
    match session_cookie(&auth_state, &token) {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    let response = SessionResponse {
        user_id: claim.id.to_string(),
        username: claim.username,
        role_id: claim.role_id,
    };

    (StatusCode::OK, response_headers, Json(response)).into_response()
}
