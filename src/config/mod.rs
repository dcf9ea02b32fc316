//! # Configuration Management
//!
//! Configuration for the registro service. Every collaborator receives its
//! configuration explicitly at construction; nothing reads ambient global
//! state after startup. Values come from `REGISTRO_*` environment variables
//! with sensible local defaults.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{Error, Result};

lazy_static! {
    /// SQL identifiers only: the table name is interpolated into DDL/DML and
    /// must never carry anything but an identifier.
    static ref TABLE_NAME_REGEX: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    #[validate(nested)]
    pub server: ServerConfig,

    /// Database configuration
    #[validate(nested)]
    pub database: DatabaseConfig,

    /// Observability configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config = Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            observability: ObservabilityConfig::from_env(),
        };
        config.validate_all()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_all(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;
        self.validate_custom()
    }

    /// Custom validation logic beyond what the validator derive covers
    fn validate_custom(&self) -> Result<()> {
        if !self.database.url.starts_with("sqlite://") {
            return Err(Error::validation("Database URL must start with 'sqlite://'"));
        }

        if !is_valid_table_name(&self.database.table) {
            return Err(Error::validation_field(
                "Table name must be a plain SQL identifier (letters, digits, underscores)",
                "table",
            ));
        }

        Ok(())
    }
}

/// Check a table name against the SQL identifier rule
pub fn is_valid_table_name(name: &str) -> bool {
    TABLE_NAME_REGEX.is_match(name)
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = std::env::var("REGISTRO_HOST").unwrap_or(defaults.host);
        let port = std::env::var("REGISTRO_PORT")
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse()
            .map_err(|e| Error::config(format!("Invalid server port: {}", e)))?;

        Ok(Self { host, port })
    }
}

/// Database configuration, passed to the store collaborator at construction
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Table that holds submissions
    #[validate(length(min = 1, message = "Table name cannot be empty"))]
    pub table: String,

    /// Maximum number of connections in the pool
    #[validate(range(min = 1, max = 100, message = "Max connections must be between 1 and 100"))]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[validate(range(max = 50, message = "Min connections must be 50 or less"))]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub connect_timeout_seconds: u64,

    /// Idle timeout in seconds, if connections should be reaped
    pub idle_timeout_seconds: Option<u64>,

    /// Ensure the submissions table exists when the pool is created
    pub auto_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./registro.db".to_string(),
            table: "submissions".to_string(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_seconds: 30,
            idle_timeout_seconds: Some(600),
            auto_schema: true,
        }
    }
}

impl DatabaseConfig {
    /// Get the connection acquire timeout as a Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Get the idle timeout as a Duration, if configured
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_seconds.map(Duration::from_secs)
    }

    /// Check whether this configuration points at SQLite
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite://")
    }

    /// Load database configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let url = std::env::var("REGISTRO_DATABASE_URL").unwrap_or(defaults.url);
        let table = std::env::var("REGISTRO_DATABASE_TABLE").unwrap_or(defaults.table);

        let max_connections = parse_env_var(
            "REGISTRO_DATABASE_MAX_CONNECTIONS",
            defaults.max_connections,
        )?;
        let min_connections = parse_env_var(
            "REGISTRO_DATABASE_MIN_CONNECTIONS",
            defaults.min_connections,
        )?;
        let connect_timeout_seconds = parse_env_var(
            "REGISTRO_DATABASE_CONNECT_TIMEOUT_SECONDS",
            defaults.connect_timeout_seconds,
        )?;
        let auto_schema = parse_env_var("REGISTRO_DATABASE_AUTO_SCHEMA", defaults.auto_schema)?;

        Ok(Self {
            url,
            table,
            max_connections,
            min_connections,
            connect_timeout_seconds,
            idle_timeout_seconds: defaults.idle_timeout_seconds,
            auto_schema,
        })
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ObservabilityConfig {
    /// Log level filter directive (tracing env-filter syntax)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Emit logs as JSON instead of human-readable text
    pub json_logs: bool,

    /// Service name reported in startup logs
    #[validate(length(min = 1, message = "Service name cannot be empty"))]
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "registro".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Load observability configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let log_level = std::env::var("REGISTRO_LOG_LEVEL").unwrap_or(defaults.log_level);
        let json_logs = std::env::var("REGISTRO_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(defaults.json_logs);
        let service_name = std::env::var("REGISTRO_SERVICE_NAME").unwrap_or(defaults.service_name);

        Self { log_level, json_logs, service_name }
    }
}

fn parse_env_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate_all().is_ok());
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.database.table, "submissions");
        assert!(config.database.is_sqlite());
    }

    #[test]
    fn test_rejects_non_sqlite_url() {
        let config = AppConfig {
            database: DatabaseConfig {
                url: "mysql://localhost/test".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_rejects_invalid_table_name() {
        let config = AppConfig {
            database: DatabaseConfig {
                table: "bad-name; DROP TABLE".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_table_name_rule() {
        assert!(is_valid_table_name("submissions"));
        assert!(is_valid_table_name("db_buenaspracticas"));
        assert!(is_valid_table_name("_tmp2"));
        assert!(!is_valid_table_name("2fast"));
        assert!(!is_valid_table_name("with space"));
        assert!(!is_valid_table_name("with.dot"));
        assert!(!is_valid_table_name(""));
    }

    #[test]
    fn test_rejects_zero_max_connections() {
        let config = AppConfig {
            database: DatabaseConfig { max_connections: 0, ..Default::default() },
            ..Default::default()
        };

        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_config_from_env() {
        // Single test owns the env vars so parallel tests never race on them
        std::env::set_var("REGISTRO_PORT", "9090");
        std::env::set_var("REGISTRO_DATABASE_TABLE", "custom_submissions");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.table, "custom_submissions");

        std::env::set_var("REGISTRO_PORT", "not-a-port");
        assert!(AppConfig::from_env().is_err());

        std::env::remove_var("REGISTRO_PORT");
        std::env::remove_var("REGISTRO_DATABASE_TABLE");
    }
}
