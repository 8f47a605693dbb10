//! Postgres-backed `UserStore`.
//!
//! The auth core only sees the [`UserStore`] trait; this is the production
//! implementation over the `users` table from `schema.sql`.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

use crate::auth::{NewUser, StoreError, User, UserPatch, UserStore, ROLE_USER};

const USER_COLUMNS: &str = r"
    id,
    email,
    username,
    password_hash,
    role_id,
    extract(epoch FROM created_at)::bigint AS created_at_unix
";

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_user(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        role_id: row.get("role_id"),
        created_at_unix: row.get("created_at_unix"),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

fn unavailable(err: sqlx::Error, what: &'static str) -> StoreError {
    StoreError::Unavailable(anyhow::Error::new(err).context(what))
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1 LIMIT 1");
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query.as_str()
        );
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .map_err(|err| unavailable(err, "failed to lookup user by email"))?;

        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 LIMIT 1");
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query.as_str()
        );
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await
            .map_err(|err| unavailable(err, "failed to lookup user by id"))?;

        Ok(row.as_ref().map(map_user))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            r"
            INSERT INTO users (email, username, password_hash, role_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
        "
        );
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query.as_str()
        );
        let row = sqlx::query(&query)
            .bind(&new_user.email)
            .bind(&new_user.username)
            .bind(&new_user.password_hash)
            .bind(new_user.role_id.unwrap_or(ROLE_USER))
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        match row {
            Ok(row) => Ok(map_user(&row)),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict),
            Err(err) => Err(unavailable(err, "failed to insert user")),
        }
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, StoreError> {
        let query = format!(
            r"
            UPDATE users
            SET username = COALESCE($1, username)
            WHERE id = $2
            RETURNING {USER_COLUMNS}
        "
        );
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "UPDATE",
            db.statement = query.as_str()
        );
        let row = sqlx::query(&query)
            .bind(&patch.username)
            .bind(id)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await;

        match row {
            Ok(Some(row)) => Ok(map_user(&row)),
            Ok(None) => Err(StoreError::NotFound),
            Err(err) if is_unique_violation(&err) => Err(StoreError::Conflict),
            Err(err) => Err(unavailable(err, "failed to update user")),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let query = "DELETE FROM users WHERE id = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "DELETE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(id)
            .execute(&self.pool)
            .instrument(span)
            .await
            .map_err(|err| unavailable(err, "failed to delete user"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_columns_cover_the_model() {
        for column in [
            "id",
            "email",
            "username",
            "password_hash",
            "role_id",
            "created_at_unix",
        ] {
            assert!(USER_COLUMNS.contains(column), "missing column {column}");
        }
    }
}
