//! Public account profiles.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::auth::AuthState;
use crate::auth::role_name;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub username: String,
    pub created_at_unix: i64,
    pub role: String,
}

#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "Public profile", body = ProfileResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No such account"),
    ),
    tag = "users"
)]
pub async fn get_user(
    Path(id): Path<String>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    let Ok(user_id) = Uuid::parse_str(id.trim()) else {
        return (StatusCode::BAD_REQUEST, "Invalid id".to_string()).into_response();
    };

    match auth_state.store().find_by_id(user_id).await {
        Ok(Some(user)) => {
            let response = ProfileResponse {
                username: user.username,
                created_at_unix: user.created_at_unix,
                role: role_name(user.role_id).unwrap_or("user").to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("Failed to fetch profile: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
