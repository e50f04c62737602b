//! Database connection pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::DbError;

/// Default maximum number of pooled connections.
const MAX_CONNECTIONS: u32 = 10;

/// Wrapper around a `PgPool` with mocksim defaults.
#[derive(Debug, Clone)]
pub struct DbPool(PgPool);

impl DbPool {
    /// Connect to the database at `url`.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionFailed` if the connection cannot be
    /// established.
    pub async fn connect(url: &str) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(url)
            .await
            .map_err(DbError::ConnectionFailed)?;
        Ok(Self(pool))
    }

    /// Access the underlying `PgPool`.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.0
    }
}

impl From<PgPool> for DbPool {
    fn from(pool: PgPool) -> Self {
        Self(pool)
    }
}
