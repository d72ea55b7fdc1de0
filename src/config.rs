//! Application configuration loaded from environment variables.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Database Connection ===
    /// Database host.
    pub db_host: String,

    /// Database user.
    pub db_user: String,

    /// Database password.
    #[serde(default)]
    pub db_password: String,

    /// Database (schema) name.
    pub db_name: String,

    /// Database port.
    #[serde(default = "default_db_port")]
    pub db_port: u16,

    // === Connection Pool ===
    /// Maximum number of pooled connections.
    #[serde(default = "default_db_pool_size")]
    pub db_pool_size: u32,

    /// Seconds to wait for a free connection before failing the request.
    #[serde(default = "default_db_timeout")]
    pub db_acquire_timeout_seconds: u64,

    /// Seconds a single query may run before it is abandoned.
    #[serde(default = "default_db_timeout")]
    pub db_query_timeout_seconds: u64,

    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served as static files (dashboard HTML/CSS/JS).
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_pool_size() -> u32 {
    10
}

fn default_db_timeout() -> u64 {
    30
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.db_host.is_empty() {
            return Err("DB_HOST is required".to_string());
        }

        if self.db_user.is_empty() {
            return Err("DB_USER is required".to_string());
        }

        if self.db_name.is_empty() {
            return Err("DB_NAME is required".to_string());
        }

        if self.db_pool_size == 0 {
            return Err("DB_POOL_SIZE must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_config() -> Config {
        Config {
            db_host: "localhost".to_string(),
            db_user: "reporter".to_string(),
            db_password: "secret".to_string(),
            db_name: "academia".to_string(),
            db_port: default_db_port(),
            db_pool_size: default_db_pool_size(),
            db_acquire_timeout_seconds: default_db_timeout(),
            db_query_timeout_seconds: default_db_timeout(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }

    #[test]
    fn default_values_are_sensible() {
        assert_eq!(default_db_port(), 3306);
        assert_eq!(default_db_pool_size(), 10);
        assert_eq!(default_db_timeout(), 30);
        assert_eq!(default_port(), 3000);
        assert_eq!(default_static_dir(), ".");
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_db_host() {
        let config = Config {
            db_host: String::new(),
            ..base_config()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_pool_size() {
        let config = Config {
            db_pool_size: 0,
            ..base_config()
        };

        assert!(config.validate().is_err());
    }
}
