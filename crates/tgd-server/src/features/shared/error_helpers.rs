//! Database error handling utilities
//!
//! Helpers for classifying constraint violations reported by PostgreSQL.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tgd_server::features::shared::error_helpers::map_unique_violation;
//!
//! sqlx::query("INSERT INTO users (username, password_hash) VALUES ($1, $2)")
//!     .execute(&pool)
//!     .await
//!     .map_err(|e| {
//!         map_unique_violation(e, RegisterUserError::UsernameTaken, RegisterUserError::Database)
//!     })?;
//! ```

use sqlx::Error as SqlxError;

/// Check if the error is a unique constraint violation
pub fn is_unique_violation(error: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = error {
        return db_err.is_unique_violation();
    }
    false
}

/// Check if the error is a foreign key violation
pub fn is_foreign_key_violation(error: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = error {
        return db_err.is_foreign_key_violation();
    }
    false
}

/// Return `unique_error` on a unique violation, otherwise wrap the error
pub fn map_unique_violation<E, F>(error: SqlxError, unique_error: E, default_wrapper: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_unique_violation(&error) {
        unique_error
    } else {
        default_wrapper(error)
    }
}

/// Return `fk_error` on a foreign key violation, otherwise wrap the error
pub fn map_foreign_key_violation<E, F>(error: SqlxError, fk_error: E, default_wrapper: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_foreign_key_violation(&error) {
        fk_error
    } else {
        default_wrapper(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Duplicate,
        Missing,
        Other,
    }

    #[test]
    fn test_non_database_errors_are_not_violations() {
        let err = SqlxError::RowNotFound;
        assert!(!is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));
    }

    #[test]
    fn test_mappers_fall_through_to_wrapper() {
        assert_eq!(
            map_unique_violation(SqlxError::RowNotFound, TestError::Duplicate, |_| TestError::Other),
            TestError::Other
        );
        assert_eq!(
            map_foreign_key_violation(SqlxError::PoolTimedOut, TestError::Missing, |_| {
                TestError::Other
            }),
            TestError::Other
        );
    }
}
