//! # Observability
//!
//! Structured logging for the registro service using the tracing ecosystem.
//! Initialized once at startup from [`ObservabilityConfig`].

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Initialize structured logging from configuration.
///
/// Honors the configured env-filter directive and optionally switches the
/// formatter to JSON output. Fails when a subscriber is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| Error::config(format!("Invalid log level '{}': {}", config.log_level, e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let init_result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    init_result.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))?;

    tracing::info!(
        service_name = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Observability initialized"
    );

    Ok(())
}
