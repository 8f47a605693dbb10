//! The `UserStore` seam between the auth core and the persistence layer.
//!
//! The core only ever touches accounts through this trait; the Postgres
//! implementation lives with the API wiring, and [`MemoryUserStore`] backs
//! tests and local experiments with the same unique-constraint semantics.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::models::{User, ROLE_USER};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint violation on email or username.
    #[error("email or username already in use")]
    Conflict,

    /// Target row does not exist (update/delete by id).
    #[error("no such user")]
    NotFound,

    /// The store itself failed; detail is for logs only.
    #[error("user store unavailable")]
    Unavailable(#[source] anyhow::Error),
}

/// Fields for a new account. `role_id` defaults to the standard role when
/// `None`; nothing in this service ever creates a privileged account.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub role_id: Option<i32>,
}

/// Mutable profile fields. Role changes are an administrative action against
/// the database, deliberately not expressible here.
#[derive(Clone, Debug, Default)]
pub struct UserPatch {
    pub username: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// In-memory `UserStore` with the same observable behavior as the Postgres
/// implementation: unique email/username, `NotFound` on missing ids.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn now_unix() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs() as i64)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().map_err(poisoned)?;

        let taken = users
            .values()
            .any(|user| user.email == new_user.email || user.username == new_user.username);
        if taken {
            return Err(StoreError::Conflict);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role_id: new_user.role_id.unwrap_or(ROLE_USER),
            created_at_unix: Self::now_unix(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, StoreError> {
        let mut users = self.users.lock().map_err(poisoned)?;

        if let Some(username) = &patch.username {
            let taken = users
                .values()
                .any(|user| user.id != id && &user.username == username);
            if taken {
                return Err(StoreError::Conflict);
            }
        }

        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(username) = patch.username {
            user.username = username;
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut users = self.users.lock().map_err(poisoned)?;
        users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable(anyhow::anyhow!("user store lock poisoned"))
}
