//! Submission repository.
//!
//! The persistence collaborator behind the validation pipeline: one
//! idempotent schema-ensure operation and one atomic parameterized insert.
//! The table name is fixed at construction from configuration and validated
//! as a SQL identifier; field values are always bound, never interpolated.

use sqlx::Row;
use tracing::instrument;

use crate::config::is_valid_table_name;
use crate::domain::{StoredSubmission, SubmissionRecord};
use crate::errors::{Error, Result};
use crate::storage::DbPool;

/// Repository for submission data access
#[derive(Debug, Clone)]
pub struct SubmissionRepository {
    pool: DbPool,
    table: String,
}

impl SubmissionRepository {
    /// Create a new submission repository over the given pool and table.
    /// Fails when the table name is not a plain SQL identifier.
    pub fn new<S: Into<String>>(pool: DbPool, table: S) -> Result<Self> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(Error::validation_field(
                format!("Invalid table name: '{}'", table),
                "table",
            ));
        }
        Ok(Self { pool, table })
    }

    /// The table this repository writes to
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Ensure the submissions table exists. Idempotent; safe to call on
    /// every request.
    #[instrument(skip(self), fields(table = %self.table), name = "db_ensure_schema")]
    pub async fn ensure_schema(&self) -> Result<()> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                author TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            self.table
        );

        sqlx::query(&ddl).execute(&self.pool).await.map_err(|e| {
            Error::database(e, format!("Failed to ensure table '{}'", self.table))
        })?;

        Ok(())
    }

    /// Insert one validated submission, returning the store-assigned id.
    /// Atomic per call; the id sequence is monotonically assigned.
    #[instrument(skip(self, record), fields(table = %self.table, author = %record.author), name = "db_insert_submission")]
    pub async fn insert(&self, record: &SubmissionRecord) -> Result<i64> {
        let sql = format!(
            "INSERT INTO {} (title, description, author, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
            self.table
        );

        let row = sqlx::query(&sql)
            .bind(&record.title)
            .bind(&record.description)
            .bind(&record.author)
            .bind(chrono::Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                Error::database(e, format!("Failed to insert submission into '{}'", self.table))
            })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| Error::database(e, "Insert did not return an id".to_string()))?;

        tracing::debug!(id, "Submission inserted");
        Ok(id)
    }

    /// Fetch one stored submission by id
    #[instrument(skip(self), fields(table = %self.table), name = "db_get_submission")]
    pub async fn get_by_id(&self, id: i64) -> Result<StoredSubmission> {
        let sql = format!(
            "SELECT id, title, description, author, created_at FROM {} WHERE id = $1",
            self.table
        );

        sqlx::query_as::<_, StoredSubmission>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::database(e, format!("Submission {} not found", id)))
    }
}
