//! Connection pool construction.
//!
//! The pool is built lazily: constructing it never touches the network,
//! so the service starts cleanly with the database down and
//! unreachability surfaces per request instead. The first acquisition
//! opens a real connection (or fails with [`DbError::Connection`]).

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::config::Config;
use crate::error::DbError;

/// Build the MySQL connection pool from configuration.
///
/// Up to `db_pool_size` concurrent connections; requests beyond that
/// wait up to `db_acquire_timeout_seconds` for one to be released.
pub fn create_pool(config: &Config) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(config.db_pool_size)
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_seconds))
        .connect_lazy_with(connect_options(config))
}

/// Acquire a connection and run `SELECT 1` against it.
///
/// Used by the `check-db` subcommand to verify reachability and
/// credentials without touching any application table.
pub async fn ping(pool: &MySqlPool) -> Result<(), DbError> {
    let mut conn = pool.acquire().await.map_err(DbError::Connection)?;

    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&mut *conn)
        .await
        .map_err(DbError::Query)?;

    Ok(())
}

fn connect_options(config: &Config) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            db_host: "127.0.0.1".to_string(),
            db_user: "reporter".to_string(),
            db_password: String::new(),
            db_name: "academia".to_string(),
            db_port: 1,
            db_pool_size: 10,
            db_acquire_timeout_seconds: 1,
            db_query_timeout_seconds: 1,
            port: 3000,
            static_dir: ".".to_string(),
        }
    }

    #[tokio::test]
    async fn create_pool_does_not_connect() {
        // Port 1 is unreachable; lazy construction must still succeed.
        let pool = create_pool(&test_config());
        assert_eq!(pool.size(), 0);
    }

    #[tokio::test]
    async fn ping_reports_unreachable_database_as_connection_error() {
        let pool = create_pool(&test_config());

        let result = ping(&pool).await;
        assert!(matches!(result, Err(DbError::Connection(_))));
    }
}
