//! SQLite-backed [`TranscriptStore`] implementation.
//!
//! Maps each [`TranscriptStore`] operation to SQL against the
//! `transcript_turns` table created by the migration step.

use std::str::FromStr;

use anyhow::{bail, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use turnlog_core::models::Role;
use turnlog_core::store::{AppendReceipt, NewTurn, SessionSummary, StoredTurn, TranscriptStore};

use crate::config::Config;

/// SQLite implementation of the [`TranscriptStore`] trait.
///
/// Wraps a [`SqlitePool`] and translates every store method into one or
/// more SQL statements against the transcript log schema.
pub struct SqliteTranscriptStore {
    pool: SqlitePool,
}

impl SqliteTranscriptStore {
    /// Open the transcript log database named by `config.db.path`.
    ///
    /// The log is a single SQLite file in WAL mode, created (along with
    /// its parent directory) on first use.
    pub async fn connect(config: &Config) -> Result<Self> {
        let db_path = &config.db.path;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn turn_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<StoredTurn> {
    let tag: String = row.get("role");
    let role = match Role::from_tag(&tag) {
        Some(r) => r,
        None => bail!("unknown role tag in transcript log: {}", tag),
    };
    Ok(StoredTurn {
        id: row.get("id"),
        session_id: row.get("session_id"),
        turn_index: row.get("turn_index"),
        role,
        raw_text: row.get("raw_text"),
        role_label: row.get("role_label"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl TranscriptStore for SqliteTranscriptStore {
    async fn append_turn(&self, turn: &NewTurn) -> Result<AppendReceipt> {
        let id = Uuid::new_v4().to_string();

        // Index assignment and insert happen in one transaction so
        // concurrent appends to the same session cannot collide.
        let mut tx = self.pool.begin().await?;

        let next_index: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(turn_index) + 1, 0) FROM transcript_turns WHERE session_id = ?",
        )
        .bind(&turn.session_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO transcript_turns (id, session_id, turn_index, role,
                                          raw_text, role_label, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&turn.session_id)
        .bind(next_index)
        .bind(turn.role.storage_tag())
        .bind(&turn.raw_text)
        .bind(&turn.role_label)
        .bind(turn.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(AppendReceipt {
            id,
            turn_index: next_index,
        })
    }

    async fn session_turns(&self, session_id: &str) -> Result<Vec<StoredTurn>> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, turn_index, role, raw_text, role_label, created_at
            FROM transcript_turns
            WHERE session_id = ?
            ORDER BY turn_index ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(turn_from_row).collect()
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT session_id, COUNT(*) AS turn_count, MAX(created_at) AS last_created_at
            FROM transcript_turns
            GROUP BY session_id
            ORDER BY session_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| SessionSummary {
                session_id: row.get("session_id"),
                turn_count: row.get("turn_count"),
                last_created_at: row.get("last_created_at"),
            })
            .collect())
    }

    async fn all_turns(&self) -> Result<Vec<StoredTurn>> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, turn_index, role, raw_text, role_label, created_at
            FROM transcript_turns
            ORDER BY session_id ASC, turn_index ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(turn_from_row).collect()
    }
}
