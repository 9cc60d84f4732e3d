//! Shared Diesel error mapping for the delivery repositories.
//!
//! Every repository port exposes the same `Connection`/`Query` pair, so the
//! adapters pass their constructors in and share one classification.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map Diesel errors into query/connection constructors.
///
/// Closed connections and unexpected driver states count as connection
/// failures; everything else is a query failure. Database detail is logged
/// at debug level and never copied into the returned message.
pub(crate) fn map_basic_diesel_error<E, Q, C>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection closed")
        }
        DieselError::BrokenTransactionManager => connection("database connection unusable"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DeserializationError(_) => query("unreadable database row"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Probe {
        Query(&'static str),
        Connection(String),
    }

    fn classify(error: DieselError) -> Probe {
        map_basic_diesel_error(error, Probe::Query, |message| {
            Probe::Connection(message.to_owned())
        })
    }

    #[rstest]
    fn closed_connection_is_a_connection_failure() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert_eq!(
            classify(error),
            Probe::Connection("database connection closed".to_owned())
        );
    }

    #[rstest]
    fn unique_violation_does_not_leak_detail() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates users_username_key".to_owned()),
        );
        assert_eq!(classify(error), Probe::Query("unique constraint violated"));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert_eq!(classify(DieselError::NotFound), Probe::Query("record not found"));
    }

    #[rstest]
    fn pool_checkout_becomes_connection_error() {
        let mapped = map_basic_pool_error(PoolError::checkout("timed out"), Probe::Connection);
        assert_eq!(mapped, Probe::Connection("timed out".to_owned()));
    }
}
