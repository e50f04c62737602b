//! PostgreSQL persistence for mocksim.
//!
//! The store is the sole mutator of records. Entity models expose
//! runtime-bound `sqlx::query_as` methods generic over an `Executor`, so
//! callers can run them on the pool or inside a transaction. Uniqueness and
//! the single-applied-scenario invariant are enforced here, at the store
//! boundary.

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{
    CreateScenario, CreateSimulator, CreateUser, FailureScenario, Simulator, UpdateScenario,
    UpdateSimulator, User,
};
pub use pool::DbPool;
