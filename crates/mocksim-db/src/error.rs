//! Error types for the mocksim-db crate.

use thiserror::Error;

/// Database operation errors.
///
/// Wraps `sqlx` errors with context, plus the store-level outcomes
/// (not found, conflict, validation) raised by conditional updates such as
/// the apply/release transaction.
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish or acquire a database connection.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A database query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),

    /// Resource not found (or owned by someone else).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation collides with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation failed at the store boundary.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}
