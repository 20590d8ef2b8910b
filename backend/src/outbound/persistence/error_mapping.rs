//! Translation of pool and Diesel failures into port error constructors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Pool failures are always connection problems.
pub(super) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors onto a repository's `query`/`connection` variants.
///
/// Driver messages are logged at debug level and replaced with generic text.
pub(super) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    log_diesel_error(&error);
    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

pub(super) fn log_diesel_error(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(
            error_type = %std::any::type_name_of_val(other),
            "diesel operation failed"
        ),
    }
}

/// Whether the error is a unique-constraint violation.
pub(super) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::CredentialRepositoryError;

    fn map(error: DieselError) -> CredentialRepositoryError {
        map_diesel_error(
            error,
            CredentialRepositoryError::query,
            CredentialRepositoryError::connection,
        )
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map(DieselError::NotFound),
            CredentialRepositoryError::query("record not found")
        );
    }

    #[rstest]
    fn rollback_is_a_generic_query_error() {
        assert_eq!(
            map(DieselError::RollbackTransaction),
            CredentialRepositoryError::query("database error")
        );
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(
            PoolError::checkout("timed out"),
            CredentialRepositoryError::connection,
        );
        assert_eq!(err, CredentialRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn only_database_errors_can_be_unique_violations() {
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
