use super::JobRepository;
use crate::error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A statement recorded in the local outbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedStatement {
    pub id: String,
    pub statement: String,
    pub submitted_at: DateTime<Utc>,
}

/// Appends submitted statements to a local SQLite outbox table.
pub struct SqliteJobRepository {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteJobRepository {
    pub async fn open(path: &Path) -> Result<Self, RepositoryError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                RepositoryError::Connect(format!(
                    "create outbox directory {}: {error}",
                    parent.display()
                ))
            })?;
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .map_err(|error| {
                RepositoryError::Connect(format!("open outbox {}: {error}", path.display()))
            })?;

        ensure_schema(&pool).await?;
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Recorded statements, oldest first.
    pub async fn list_statements(&self) -> Result<Vec<SubmittedStatement>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, statement, submitted_at
             FROM scheduled_statements ORDER BY submitted_at ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| RepositoryError::Submit(format!("list statements: {error}")))?;

        let mut statements = Vec::with_capacity(rows.len());
        for row in rows {
            statements.push(row_to_statement(&row)?);
        }
        Ok(statements)
    }
}

#[async_trait]
impl JobRepository for SqliteJobRepository {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn submit(&self, statement: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO scheduled_statements (id, statement, submitted_at) VALUES (?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(statement)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|error| RepositoryError::Submit(error.to_string()))?;

        Ok(result.rows_affected())
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS scheduled_statements (
            id           TEXT PRIMARY KEY,
            statement    TEXT NOT NULL,
            submitted_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|error| RepositoryError::Schema(error.to_string()))?;

    Ok(())
}

fn row_to_statement(row: &sqlx::sqlite::SqliteRow) -> Result<SubmittedStatement, RepositoryError> {
    let submitted_raw: String = row.get("submitted_at");
    let submitted_at = DateTime::parse_from_rfc3339(&submitted_raw)
        .map_err(|error| {
            RepositoryError::Schema(format!("invalid timestamp '{submitted_raw}': {error}"))
        })?
        .with_timezone(&Utc);

    Ok(SubmittedStatement {
        id: row.get("id"),
        statement: row.get("statement"),
        submitted_at,
    })
}
