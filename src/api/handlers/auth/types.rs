//! Request/response types for auth endpoints.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    #[schema(value_type = String)]
    pub password: SecretString,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role_id: i32,
    pub created_at_unix: i64,
}

#[derive(ToSchema, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    #[schema(value_type = String)]
    pub password: SecretString,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub user_id: String,
    pub username: String,
    pub role_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn signup_request_deserializes_and_redacts_password() {
        let request: SignupRequest = serde_json::from_value(serde_json::json!({
            "email": "alice@x.com",
            "username": "alice",
            "password": "abc12",
        }))
        .expect("deserialize");

        assert_eq!(request.email, "alice@x.com");
        assert_eq!(request.password.expose_secret(), "abc12");

        // Debug output must never contain the password value.
        let debug = format!("{request:?}");
        assert!(!debug.contains("abc12"));
    }

    #[test]
    fn session_response_round_trips() {
        let response = SessionResponse {
            user_id: "3f0b".to_string(),
            username: "alice".to_string(),
            role_id: 2,
        };
        let value = serde_json::to_value(&response).expect("serialize");
        let decoded: SessionResponse = serde_json::from_value(value).expect("deserialize");
        assert_eq!(decoded.username, "alice");
        assert_eq!(decoded.role_id, 2);
    }
}
