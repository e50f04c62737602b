//! Failure-scenario entity model.
//!
//! The apply/release pair is the one place in the system with a genuine
//! concurrency hazard: "at most one applied scenario per simulator" has to
//! survive two concurrent `apply` calls. Both operations run in a single
//! transaction that takes a row lock on the simulator, and a partial unique
//! index (`failure_scenarios_one_applied_idx`) backs the invariant even
//! across API processes.

use chrono::{DateTime, Utc};
use mocksim_core::FailureParameters;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::Simulator;

/// A failure-scenario record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct FailureScenario {
    /// Unique identifier.
    pub id: Uuid,

    /// Internal id of the owning user.
    pub user_id: Uuid,

    /// Simulator this scenario is bound to; `None` means reusable.
    pub simulator_id: Option<Uuid>,

    /// Free-text scenario name.
    pub name: String,

    /// Optional description.
    pub description: Option<String>,

    /// JSON text: map of parameter key to override value.
    pub failure_parameters: String,

    /// Whether the scenario is selectable at all.
    pub is_active: bool,

    /// Whether the scenario is currently in effect for its simulator.
    pub is_applied: bool,

    /// When the scenario was applied (`None` while released).
    pub applied_at: Option<DateTime<Utc>>,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a scenario.
#[derive(Debug, Clone)]
pub struct CreateScenario {
    pub user_id: Uuid,
    pub simulator_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub failure_parameters: String,
    pub is_active: bool,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateScenario {
    pub name: Option<String>,
    pub description: Option<String>,
    pub failure_parameters: Option<String>,
    pub is_active: Option<bool>,
}

impl FailureScenario {
    /// Parse the stored override map.
    pub fn failure_parameters(&self) -> Result<FailureParameters, serde_json::Error> {
        serde_json::from_str(&self.failure_parameters)
    }

    /// Insert a new scenario.
    pub async fn create<'e, E>(executor: E, input: CreateScenario) -> Result<Self, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            INSERT INTO failure_scenarios
                (user_id, simulator_id, name, description, failure_parameters, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(input.user_id)
        .bind(input.simulator_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.failure_parameters)
        .bind(input.is_active)
        .fetch_one(executor)
        .await
    }

    /// Look up a scenario by id, scoped to its owner.
    pub async fn find_owned<'e, E>(
        executor: E,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as("SELECT * FROM failure_scenarios WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(executor)
            .await
    }

    /// All scenarios of an owner, newest first.
    pub async fn list_by_owner<'e, E>(executor: E, owner: Uuid) -> Result<Vec<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            "SELECT * FROM failure_scenarios WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner)
        .fetch_all(executor)
        .await
    }

    /// Scenarios of an owner bound to one simulator, newest first.
    pub async fn list_by_simulator<'e, E>(
        executor: E,
        owner: Uuid,
        simulator_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            SELECT * FROM failure_scenarios
            WHERE user_id = $1 AND simulator_id = $2
            ORDER BY created_at DESC
            ",
        )
        .bind(owner)
        .bind(simulator_id)
        .fetch_all(executor)
        .await
    }

    /// The scenario currently applied to a simulator, if any.
    pub async fn find_applied_for_simulator<'e, E>(
        executor: E,
        simulator_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            "SELECT * FROM failure_scenarios WHERE simulator_id = $1 AND is_applied",
        )
        .bind(simulator_id)
        .fetch_optional(executor)
        .await
    }

    /// Apply a partial update; `None` fields keep their stored value.
    pub async fn update_fields<'e, E>(
        executor: E,
        owner: Uuid,
        id: Uuid,
        update: UpdateScenario,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        sqlx::query_as(
            r"
            UPDATE failure_scenarios
            SET name = COALESCE($3, name),
                description = COALESCE($4, description),
                failure_parameters = COALESCE($5, failure_parameters),
                is_active = COALESCE($6, is_active),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            ",
        )
        .bind(id)
        .bind(owner)
        .bind(update.name)
        .bind(update.description)
        .bind(update.failure_parameters)
        .bind(update.is_active)
        .fetch_optional(executor)
        .await
    }

    /// Apply a scenario to a simulator, atomically releasing whichever
    /// scenario was applied before.
    ///
    /// The simulator row is locked for the duration of the transaction, so
    /// two concurrent calls serialize and the loser sees the winner's state.
    ///
    /// # Errors
    ///
    /// - `DbError::NotFound` if the simulator or scenario is unknown, not
    ///   owned by `owner`, or the scenario is bound to a different simulator
    /// - `DbError::ValidationFailed` if the scenario is inactive
    pub async fn apply_exclusive(
        pool: &PgPool,
        owner: Uuid,
        simulator_id: Uuid,
        scenario_id: Uuid,
    ) -> Result<Self, DbError> {
        let mut tx = pool.begin().await?;

        let simulator: Option<Simulator> =
            sqlx::query_as("SELECT * FROM simulators WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(simulator_id)
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;
        if simulator.is_none() {
            return Err(DbError::NotFound("simulator".to_string()));
        }

        let scenario: Option<FailureScenario> = sqlx::query_as(
            "SELECT * FROM failure_scenarios WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(scenario_id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?;
        let scenario = scenario.ok_or_else(|| DbError::NotFound("failure scenario".to_string()))?;

        if let Some(bound) = scenario.simulator_id {
            if bound != simulator_id {
                return Err(DbError::NotFound(
                    "failure scenario for this simulator".to_string(),
                ));
            }
        }
        if !scenario.is_active {
            return Err(DbError::ValidationFailed(
                "an inactive scenario cannot be applied".to_string(),
            ));
        }

        sqlx::query(
            r"
            UPDATE failure_scenarios
            SET is_applied = FALSE, applied_at = NULL, updated_at = now()
            WHERE simulator_id = $1 AND is_applied
            ",
        )
        .bind(simulator_id)
        .execute(&mut *tx)
        .await?;

        let applied: FailureScenario = sqlx::query_as(
            r"
            UPDATE failure_scenarios
            SET simulator_id = $2, is_applied = TRUE, applied_at = now(), updated_at = now()
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(scenario_id)
        .bind(simulator_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(applied)
    }

    /// Release whichever scenario is applied to a simulator.
    ///
    /// Returns the released scenario's id, or `None` when nothing was
    /// applied (a no-op, not an error).
    ///
    /// # Errors
    ///
    /// Returns `DbError::NotFound` if the simulator is unknown or not owned
    /// by `owner`.
    pub async fn release_exclusive(
        pool: &PgPool,
        owner: Uuid,
        simulator_id: Uuid,
    ) -> Result<Option<Uuid>, DbError> {
        let mut tx = pool.begin().await?;

        let simulator: Option<Simulator> =
            sqlx::query_as("SELECT * FROM simulators WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(simulator_id)
                .bind(owner)
                .fetch_optional(&mut *tx)
                .await?;
        if simulator.is_none() {
            return Err(DbError::NotFound("simulator".to_string()));
        }

        let released: Option<(Uuid,)> = sqlx::query_as(
            r"
            UPDATE failure_scenarios
            SET is_applied = FALSE, applied_at = NULL, updated_at = now()
            WHERE simulator_id = $1 AND is_applied
            RETURNING id
            ",
        )
        .bind(simulator_id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(released.map(|(id,)| id))
    }

    /// Delete a scenario unless it is currently applied.
    ///
    /// # Errors
    ///
    /// - `DbError::NotFound` if the scenario is unknown or not owned
    /// - `DbError::Conflict` while the scenario is applied
    pub async fn delete_checked(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<(), DbError> {
        let mut tx = pool.begin().await?;

        let scenario: Option<FailureScenario> = sqlx::query_as(
            "SELECT * FROM failure_scenarios WHERE id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&mut *tx)
        .await?;
        let scenario = scenario.ok_or_else(|| DbError::NotFound("failure scenario".to_string()))?;

        if scenario.is_applied {
            return Err(DbError::Conflict(
                "an applied scenario cannot be deleted; release it first".to_string(),
            ));
        }

        sqlx::query("DELETE FROM failure_scenarios WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
