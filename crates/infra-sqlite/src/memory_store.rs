// SQLite MemoryStore Implementation

use async_trait::async_trait;
use jarvis_core::domain::{MemoryEntry, MemoryKind};
use jarvis_core::error::{AppError, Result};
use jarvis_core::port::MemoryStore;
use sqlx::SqlitePool;

// Helper to convert sqlx::Error to AppError with structured information
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // UNIQUE constraint failed
            Some("2067") | Some("1555") => {
                AppError::Database(format!("Duplicate memory entry: {}", db_err.message()))
            }
            // CHECK constraint failed
            Some("275") => {
                AppError::Validation(format!("Rejected memory entry: {}", db_err.message()))
            }
            // SQLITE_BUSY - database is locked
            Some("5") => AppError::Database(format!(
                "Database locked (SQLITE_BUSY): {}",
                db_err.message()
            )),
            Some(code) => AppError::Database(format!(
                "Database error [{}]: {}",
                code,
                db_err.message()
            )),
            None => AppError::Database(format!("Database error: {}", db_err.message())),
        },
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => AppError::Database(err.to_string()),
    }
}

pub struct SqliteMemoryStore {
    pool: SqlitePool,
}

impl SqliteMemoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemoryStore for SqliteMemoryStore {
    async fn append(&self, entry: &MemoryEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO memory_entries (id, kind, content, metadata, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.kind.as_str())
        .bind(&entry.content)
        .bind(entry.metadata.to_string())
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn list(&self, limit: usize, kind: Option<MemoryKind>) -> Result<Vec<MemoryEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        // Insertion order (seq), not created_at: clocks may go backwards
        let rows = match kind {
            Some(kind) => {
                sqlx::query_as::<_, MemoryRow>(
                    r#"
                    SELECT id, kind, content, metadata, created_at
                    FROM memory_entries
                    WHERE kind = ?
                    ORDER BY seq DESC
                    LIMIT ?
                    "#,
                )
                .bind(kind.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, MemoryRow>(
                    r#"
                    SELECT id, kind, content, metadata, created_at
                    FROM memory_entries
                    ORDER BY seq DESC
                    LIMIT ?
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(MemoryRow::into_entry).collect()
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM memory_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemoryRow {
    id: String,
    kind: String,
    content: String,
    metadata: String,
    created_at: i64,
}

impl MemoryRow {
    fn into_entry(self) -> Result<MemoryEntry> {
        Ok(MemoryEntry {
            kind: self.kind.parse::<MemoryKind>()?,
            metadata: serde_json::from_str(&self.metadata)?,
            id: self.id,
            content: self.content,
            created_at: self.created_at,
        })
    }
}
