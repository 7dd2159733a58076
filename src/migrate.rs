use anyhow::Result;

use crate::config::Config;
use crate::store_sqlite::SqliteTranscriptStore;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let store = SqliteTranscriptStore::connect(config).await?;
    let pool = store.pool();

    // Create the transcript log table. Each row holds the raw,
    // pre-split turn text; the structured form is re-derived on read.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS transcript_turns (
            id TEXT PRIMARY KEY,
            session_id TEXT NOT NULL,
            turn_index INTEGER NOT NULL,
            role TEXT NOT NULL,
            raw_text TEXT NOT NULL,
            role_label TEXT,
            created_at INTEGER,
            UNIQUE(session_id, turn_index)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_turns_session_id ON transcript_turns(session_id)",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_turns_created_at ON transcript_turns(created_at DESC)",
    )
    .execute(pool)
    .await?;

    store.close().await;
    Ok(())
}
