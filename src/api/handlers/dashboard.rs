//! The authoring dashboard surface.
//!
//! Gated at [`AUTHORING_MIN_ROLE`]; the same gate call backs the navigation
//! data the frontend uses, so nothing is merely hidden client-side.

use axum::{
    extract::Extension, http::HeaderMap, http::StatusCode, response::IntoResponse, Json,
};
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;

use super::auth::principal::require_role;
use crate::auth::{role_name, AUTHORING_MIN_ROLE};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub user_id: String,
    pub username: String,
    pub role_id: i32,
    pub role: String,
}

#[utoipa::path(
    get,
    path = "/v1/dashboard",
    responses(
        (status = 200, description = "Authoring workspace data", body = DashboardResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Authenticated but not an author"),
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(headers: HeaderMap, pool: Extension<PgPool>) -> impl IntoResponse {
    let claim = match require_role(&headers, &pool, AUTHORING_MIN_ROLE).await {
        Ok(claim) => claim,
        Err(status) => return status.into_response(),
    };

    let response = DashboardResponse {
        user_id: claim.id.to_string(),
        role: role_name(claim.role_id).unwrap_or("user").to_string(),
        username: claim.username,
        role_id: claim.role_id,
    };

    (StatusCode::OK, Json(response)).into_response()
}
