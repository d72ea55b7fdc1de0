//! MySQL connection pool and bounded query execution.

pub mod pool;

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::DbError;
use crate::metrics;

pub use pool::{create_pool, ping};

/// Run one database query with a hard execution bound.
///
/// On expiry the pooled connection is dropped mid-query, which discards
/// it instead of returning a dirty connection to the pool.
///
/// Latency and failures are recorded per query name.
pub async fn run_query<T, F>(name: &'static str, timeout: Duration, query: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    let start = Instant::now();

    let result = match tokio::time::timeout(timeout, query).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(DbError::Query(err)),
        Err(_) => Err(DbError::Timeout(timeout)),
    };

    metrics::record_query_latency(start, name);
    if result.is_err() {
        metrics::inc_query_failures(name);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_query_passes_through_success() {
        let result = run_query("test_ok", Duration::from_secs(1), async { Ok(7i64) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn run_query_maps_sql_failure_to_query_error() {
        let result = run_query::<i64, _>("test_err", Duration::from_secs(1), async {
            Err(sqlx::Error::RowNotFound)
        })
        .await;

        assert!(matches!(result, Err(DbError::Query(_))));
    }

    #[tokio::test]
    async fn run_query_enforces_the_bound() {
        let result = run_query::<i64, _>("test_slow", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(0)
        })
        .await;

        assert!(matches!(result, Err(DbError::Timeout(_))));
    }
}
