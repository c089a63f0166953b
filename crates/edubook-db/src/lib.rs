//! # EduBook DB
//!
//! Persistence for the EduBook API.
//!
//! - [`store`]: the store traits the HTTP layer consumes
//! - [`postgres`]: the PostgreSQL implementation used in production
//! - `memory` (feature `memory`): an in-memory implementation for tests
//!
//! # Example
//!
//! ```ignore
//! use edubook_config::DatabaseConfig;
//! use edubook_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

use edubook_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub mod postgres;
pub mod store;

#[cfg(any(test, feature = "memory"))]
pub mod memory;

#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{CourseStore, EnrollmentStore, IdentityProvider, ProfileStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL pool sized and timed per `config`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
}

/// Applies every pending migration under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
