//! Account registration.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::error;

use super::{
    state::AuthState,
    types::{SignupRequest, SignupResponse},
};
use crate::api::handlers::{valid_email, valid_password, valid_username};
use crate::auth::{password, NewUser, StoreError};

#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Malformed payload"),
        (status = 409, description = "Email or username already in use"),
    ),
    tag = "auth"
)]
pub async fn signup(
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<SignupRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    if !valid_email(&request.email) {
        return (StatusCode::BAD_REQUEST, "Invalid email".to_string()).into_response();
    }

    if !valid_username(&request.username) {
        return (
            StatusCode::BAD_REQUEST,
            "Username must be at most 35 characters of Greek or Latin letters and spaces"
                .to_string(),
        )
            .into_response();
    }

    if !valid_password(request.password.expose_secret()) {
        return (
            StatusCode::BAD_REQUEST,
            "Password must be at least 5 characters and contain a letter and a digit".to_string(),
        )
            .into_response();
    }

    // The KDF is deliberately slow; keep it off the async workers.
    let plaintext = request.password.expose_secret().to_string();
    let password_hash = match tokio::task::spawn_blocking(move || password::hash(&plaintext)).await
    {
        Ok(Ok(hash)) => hash,
        Ok(Err(err)) => {
            error!("Failed to hash password: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        Err(err) => {
            error!("Password hashing task failed: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // New accounts always start at the standard role.
    let created = auth_state
        .store()
        .create(NewUser {
            email: request.email,
            username: request.username,
            password_hash: Some(password_hash),
            role_id: None,
        })
        .await;

    match created {
        Ok(user) => {
            let response = SignupResponse {
                id: user.id.to_string(),
                email: user.email,
                username: user.username,
                role_id: user.role_id,
                created_at_unix: user.created_at_unix,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(StoreError::Conflict) => (
            StatusCode::CONFLICT,
            "Email or username already in use".to_string(),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to create user: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
