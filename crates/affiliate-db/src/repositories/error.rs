//! Error handling utilities for repositories

use affiliate_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Whether the error is a unique violation involving `column`
///
/// PostgreSQL names the constraint (`affiliates_affiliate_code_key`), SQLite
/// names the column in the message (`UNIQUE constraint failed: affiliates.affiliate_code`).
pub fn is_unique_violation_on(e: &SqlxError, column: &str) -> bool {
    e.as_database_error().is_some_and(|db_err| {
        db_err.is_unique_violation()
            && (db_err.constraint().is_some_and(|c| c.contains(column))
                || db_err.message().contains(column))
    })
}
