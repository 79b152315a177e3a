//! SQLite-backed submission store
//!
//! Enforces the `name` uniqueness that the reservation protocol relies on: the
//! `submissions.name` column is `UNIQUE`, and a violation surfaces as
//! [`StoreError::Conflict`].

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use cardsmith_core::{NewSubmission, StoreError, StoreResult, Submission, SubmissionStore};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS submissions (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    html_content TEXT NOT NULL,
    css_content TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_submissions_created_at ON submissions(created_at);
";

const COLUMNS: &str = "id, name, html_content, css_content, created_at";

pub struct SqliteSubmissionStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSubmissionStore {
    /// Open or create the database at `path`. The parent directory is
    /// created if missing.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "opening submission store");
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(|e| {
            StoreError::Transport(format!(
                "Failed to open SQLite database at '{}': {}",
                path.display(),
                e
            ))
        })?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| StoreError::Transport(format!("Failed to set journal mode: {}", e)))?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(|e| StoreError::Transport(format!("Failed to set synchronous mode: {}", e)))?;

        Self::with_connection(conn)
    }

    /// In-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StoreError::Transport(format!("Failed to open in-memory database: {}", e))
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA).map_err(query_error)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Number of stored submissions
    pub fn count(&self) -> StoreResult<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM submissions", [], |row| row.get(0))
            .map_err(query_error)?;
        Ok(count as usize)
    }

    fn row_to_submission(row: &Row<'_>) -> rusqlite::Result<Submission> {
        let id: String = row.get(0)?;
        let created_at: String = row.get(4)?;
        Ok(Submission {
            id: Uuid::parse_str(&id).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
            })?,
            name: row.get(1)?,
            html_content: row.get(2)?,
            css_content: row.get(3)?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
        })
    }
}

fn query_error(e: rusqlite::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == ErrorCode::ConstraintViolation
                && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[async_trait]
impl SubmissionStore for SqliteSubmissionStore {
    fn backend_name(&self) -> &str {
        "sqlite"
    }

    #[tracing::instrument(skip(self, submission), fields(name = %submission.name))]
    async fn insert_submission(&self, submission: NewSubmission) -> StoreResult<Submission> {
        let id = Uuid::new_v4();
        // Stored with microsecond precision; keep the returned record identical.
        let created_at = Utc::now().trunc_subsecs(6);
        let conn = self.conn.lock();
        let inserted = conn.execute(
            &format!("INSERT INTO submissions ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            params![
                id.to_string(),
                submission.name,
                submission.html_content,
                submission.css_content,
                created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        );

        match inserted {
            Ok(_) => {
                tracing::debug!(%id, "submission inserted");
                Ok(submission.into_submission(id, created_at))
            }
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!("insert rejected by unique constraint");
                Err(StoreError::Conflict {
                    name: submission.name,
                })
            }
            Err(e) => Err(query_error(e)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_exact_name(&self, name: &str) -> StoreResult<Option<Submission>> {
        let conn = self.conn.lock();
        conn.query_row(
            &format!("SELECT {COLUMNS} FROM submissions WHERE name = ?1"),
            params![name],
            Self::row_to_submission,
        )
        .optional()
        .map_err(query_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list_recent(&self, limit: Option<usize>) -> StoreResult<Vec<Submission>> {
        let conn = self.conn.lock();
        // A negative LIMIT means no limit in SQLite.
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM submissions ORDER BY created_at DESC, rowid DESC LIMIT ?1"
            ))
            .map_err(query_error)?;
        let rows = stmt
            .query_map(params![limit], Self::row_to_submission)
            .map_err(query_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(query_error)
    }
}
