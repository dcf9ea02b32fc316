//! # Storage and Persistence
//!
//! Database connectivity and the persistence layer for accepted submissions.

pub mod pool;
pub mod repository;

pub use crate::config::DatabaseConfig;
pub use pool::{create_pool, DbPool};
pub use repository::SubmissionRepository;

use crate::errors::{Error, Result};

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map_err(|e| Error::Database {
        source: e,
        context: "Database connectivity check failed".to_string(),
    })?;

    Ok(())
}
