//! Account and role data model.

use uuid::Uuid;

/// Ordinal for a standard account.
pub const ROLE_USER: i32 = 1;
/// Ordinal for authors; gates the authoring dashboard.
pub const ROLE_AUTHOR: i32 = 2;
/// Ordinal for administrators.
pub const ROLE_ADMIN: i32 = 3;

/// An account as the store holds it.
///
/// Deliberately not `Serialize`: the hash must never reach a response body,
/// so anything leaving the service goes through [`Identity`] or a dedicated
/// response type instead.
#[derive(Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub role_id: i32,
    pub created_at_unix: i64,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "***"))
            .field("role_id", &self.role_id)
            .field("created_at_unix", &self.created_at_unix)
            .finish()
    }
}

/// A role row. Read-only from this service's perspective; assignment happens
/// directly against the database.
#[derive(Clone, Debug)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Resolve the fixed ordinal mapping to a display name.
#[must_use]
pub const fn role_name(role_id: i32) -> Option<&'static str> {
    match role_id {
        ROLE_USER => Some("user"),
        ROLE_AUTHOR => Some("author"),
        ROLE_ADMIN => Some("admin"),
        _ => None,
    }
}

/// An authenticated account, with the credential material stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role_id: i32,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            role_id: user.role_id,
        }
    }
}
