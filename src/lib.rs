//! # Registro
//!
//! Registro is a small submission intake service: it accepts a record
//! (`title`, `description`, `author`) over HTTP, validates it through a
//! declarative field-validation pipeline, and persists accepted records to a
//! relational table.
//!
//! ## Architecture
//!
//! ```text
//! HTTP API Layer → Validation Pipeline → Submission Repository
//!      ↓                  ↓                      ↓
//! Error Envelopes    Pure FieldRules      SQLx Connection Pool
//! ```
//!
//! ## Core Components
//!
//! - **Validation Pipeline**: ordered, short-circuiting field rules; pure and
//!   stateless, shared read-only across requests
//! - **Submission Repository**: idempotent schema-ensure plus one atomic
//!   parameterized insert per accepted record
//! - **API Layer**: Axum handlers mapping every outcome to a response
//!   envelope with a structured reason code

pub mod api;
pub mod config;
pub mod domain;
pub mod errors;
pub mod observability;
pub mod storage;
pub mod validation;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_available() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "registro");
    }
}
