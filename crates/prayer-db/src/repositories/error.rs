//! Error handling utilities for repositories

use prayer_core::error::DomainError;
use prayer_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique-constraint violation to `on_unique`, anything else to a storage failure
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    map_db_error(e)
}

pub fn prayer_request_not_found(id: Snowflake) -> DomainError {
    DomainError::PrayerRequestNotFound(id)
}

pub fn prayer_chain_not_found(id: Snowflake) -> DomainError {
    DomainError::PrayerChainNotFound(id)
}
