//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use crate::api::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "kleidi",
        description = "Credential authentication and role authorization service"
    ),
    paths(
        handlers::health::health,
        handlers::auth::signup::signup,
        handlers::auth::login::login,
        handlers::auth::session::session,
        handlers::auth::session::logout,
        handlers::me::get_me,
        handlers::me::patch_me,
        handlers::me::delete_me,
        handlers::users::get_user,
        handlers::dashboard::get_dashboard,
    ),
    components(schemas(
        handlers::auth::types::SignupRequest,
        handlers::auth::types::SignupResponse,
        handlers::auth::types::LoginRequest,
        handlers::auth::types::SessionResponse,
        handlers::me::MeResponse,
        handlers::me::MeUpdateRequest,
        handlers::me::MeDeleteRequest,
        handlers::users::ProfileResponse,
        handlers::dashboard::DashboardResponse,
        crate::auth::SessionClaim,
    )),
    tags(
        (name = "auth", description = "Signup, login and session management"),
        (name = "me", description = "Authenticated self-service"),
        (name = "users", description = "Public profiles"),
        (name = "dashboard", description = "Authoring surfaces"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).expect("serialize");
        for path in [
            "/health",
            "/v1/auth/signup",
            "/v1/auth/login",
            "/v1/auth/session",
            "/v1/auth/logout",
            "/v1/me",
            "/v1/users/{id}",
            "/v1/dashboard",
        ] {
            assert!(json.contains(path), "missing path {path}");
        }
    }
}
