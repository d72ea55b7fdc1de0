//! Error types for the statistics service.

use std::time::Duration;

use thiserror::Error;

/// Database access errors.
///
/// Connection problems (unreachable host, bad credentials, pool
/// exhaustion) and query problems (failing SQL, type mismatches) are
/// kept apart so handlers can log which side broke, but both surface
/// to the caller the same way: HTTP 500.
#[derive(Error, Debug)]
pub enum DbError {
    /// The pool could not hand out a connection.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A query failed at the database.
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A query exceeded the configured execution bound.
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_detail() {
        let err = DbError::Timeout(Duration::from_secs(30));
        assert!(err.to_string().contains("30"));

        let err = DbError::Connection(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().contains("connection failed"));
    }
}
