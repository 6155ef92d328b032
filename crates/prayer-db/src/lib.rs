//! # prayer-db
//!
//! PostgreSQL implementations of the `prayer-core` repository traits.
//!
//! - connection pool construction and runtime-loaded SQL migrations
//! - `FromRow` models and model-to-entity mappers
//! - repositories, including the multi-statement transactions
//!   (log + counter, chain + creator, leave + commitment cascade)
//!
//! ```rust,ignore
//! use prayer_db::{create_pool, run_migrations, PgPrayerRequestRepository};
//!
//! let pool = create_pool(&config.database).await?;
//! run_migrations(&pool).await?;
//! let requests = PgPrayerRequestRepository::new(pool.clone());
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_lazy_pool, create_pool, ping, run_migrations, PgPool, MIGRATIONS_DIR};
pub use repositories::{
    PgChainMemberRepository, PgCommitmentRepository, PgPrayerChainRepository,
    PgPrayerLogRepository, PgPrayerRequestRepository, PgUserRepository,
};
