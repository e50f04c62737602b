//! User entity model.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A user record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Internal identifier.
    pub id: Uuid,

    /// Public login handle (unique, matched case-insensitively).
    pub user_id: String,

    /// Display name.
    pub name: String,

    /// Argon2id PHC hash of the credential.
    pub password_hash: String,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user record.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub user_id: String,
    pub name: String,
    pub password_hash: String,
}

impl User {
    /// Insert a new user.
    pub async fn create<'e, E>(executor: E, input: CreateUser) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            INSERT INTO users (user_id, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(&input.user_id)
        .bind(&input.name)
        .bind(&input.password_hash)
        .fetch_one(executor)
        .await
    }

    /// Look up a user by internal id.
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Look up a user by login handle, case-insensitively.
    pub async fn find_by_handle<'e, E>(
        executor: E,
        handle: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM users WHERE LOWER(user_id) = LOWER($1)")
            .bind(handle)
            .fetch_optional(executor)
            .await
    }

    /// Whether a login handle is already taken (case-insensitive).
    pub async fn handle_exists<'e, E>(executor: E, handle: &str) -> Result<bool, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM users WHERE LOWER(user_id) = LOWER($1)")
                .bind(handle)
                .fetch_one(executor)
                .await?;
        Ok(row.0 > 0)
    }

    /// Update profile fields; `None` keeps the stored value.
    pub async fn update_profile<'e, E>(
        executor: E,
        id: Uuid,
        name: Option<&str>,
        password_hash: Option<&str>,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            UPDATE users
            SET name = COALESCE($2, name),
                password_hash = COALESCE($3, password_hash),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(name)
        .bind(password_hash)
        .fetch_optional(executor)
        .await
    }
}
