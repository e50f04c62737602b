//! Simulator entity model.
//!
//! Parameter maps are stored as JSON text columns (insertion order is part of
//! the contract; jsonb would reorder keys). The typed accessors parse them on
//! demand.

use chrono::{DateTime, Utc};
use mocksim_core::{ParameterConfigMap, Parameters};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A simulator record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Simulator {
    /// Unique identifier.
    pub id: Uuid,

    /// Internal id of the owning user. Immutable after creation.
    pub user_id: Uuid,

    /// Simulator name, unique per owner.
    pub name: String,

    /// JSON text: ordered map of parameter key to base value.
    pub parameters: String,

    /// JSON text: map of parameter key to generation policy.
    pub parameter_config: String,

    /// Whether the public data endpoint serves this simulator's payload.
    pub is_active: bool,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a simulator. JSON columns arrive pre-serialized from
/// the manager, which owns validation and normalization.
#[derive(Debug, Clone)]
pub struct CreateSimulator {
    pub user_id: Uuid,
    pub name: String,
    pub parameters: String,
    pub parameter_config: String,
    pub is_active: bool,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateSimulator {
    pub name: Option<String>,
    pub parameters: Option<String>,
    pub parameter_config: Option<String>,
    pub is_active: Option<bool>,
}

impl Simulator {
    /// Parse the stored parameter map.
    pub fn parameters(&self) -> Result<Parameters, serde_json::Error> {
        serde_json::from_str(&self.parameters)
    }

    /// Parse the stored generation-policy map.
    pub fn parameter_config(&self) -> Result<ParameterConfigMap, serde_json::Error> {
        serde_json::from_str(&self.parameter_config)
    }

    /// Insert a new simulator.
    pub async fn create<'e, E>(executor: E, input: CreateSimulator) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            INSERT INTO simulators (user_id, name, parameters, parameter_config, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.parameters)
        .bind(&input.parameter_config)
        .bind(input.is_active)
        .fetch_one(executor)
        .await
    }

    /// Look up a simulator by id, scoped to its owner.
    pub async fn find_owned<'e, E>(
        executor: E,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM simulators WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(executor)
            .await
    }

    /// Look up a simulator by the owner's public handle and the simulator
    /// name. This is the public data path: the handle is matched
    /// case-insensitively, the name exactly.
    pub async fn find_by_handle_and_name<'e, E>(
        executor: E,
        handle: &str,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            SELECT s.* FROM simulators s
            JOIN users u ON u.id = s.user_id
            WHERE LOWER(u.user_id) = LOWER($1) AND s.name = $2
            ",
        )
        .bind(handle)
        .bind(name)
        .fetch_optional(executor)
        .await
    }

    /// All simulators of an owner, newest first.
    pub async fn list_by_owner<'e, E>(executor: E, owner: Uuid) -> Result<Vec<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            "SELECT * FROM simulators WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(executor)
        .await
    }

    /// Whether `name` is already used by another simulator of this owner.
    pub async fn name_taken<'e, E>(
        executor: E,
        owner: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let row: (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*) FROM simulators
            WHERE user_id = $1 AND name = $2 AND ($3::uuid IS NULL OR id <> $3)
            ",
        )
        .bind(owner)
        .bind(name)
        .bind(exclude)
        .fetch_one(executor)
        .await?;
        Ok(row.0 > 0)
    }

    /// Apply a partial update; `None` fields keep their stored value.
    pub async fn update_fields<'e, E>(
        executor: E,
        owner: Uuid,
        id: Uuid,
        update: UpdateSimulator,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            UPDATE simulators
            SET name = COALESCE($3, name),
                parameters = COALESCE($4, parameters),
                parameter_config = COALESCE($5, parameter_config),
                is_active = COALESCE($6, is_active),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            ",
        )
        .bind(id)
        .bind(owner)
        .bind(update.name)
        .bind(update.parameters)
        .bind(update.parameter_config)
        .bind(update.is_active)
        .fetch_optional(executor)
        .await
    }

    /// Flip the activation state.
    pub async fn toggle_active<'e, E>(
        executor: E,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            UPDATE simulators
            SET is_active = NOT is_active, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            ",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(executor)
        .await
    }

    /// Delete a simulator and, in the same transaction, every failure
    /// scenario bound to it. Unbound scenarios are untouched.
    ///
    /// Returns `false` when the simulator does not exist or is not owned by
    /// `owner`.
    pub async fn delete_cascade(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM failure_scenarios WHERE simulator_id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM simulators WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
