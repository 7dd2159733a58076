//! Bulk transcript import.
//!
//! Loads a transcript history file — a JSON array of
//! `{"type": "human"|"ai", "data": {"content": "..."}}` entries, the
//! shape produced by session-history exports — and appends each entry
//! to the given session in order. Entries with an unknown type or
//! empty content are skipped and counted.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use turnlog_core::models::Role;
use turnlog_core::store::{NewTurn, TranscriptStore};

use crate::config::Config;
use crate::store_sqlite::SqliteTranscriptStore;

#[derive(Debug, Deserialize)]
struct HistoryEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: HistoryData,
}

#[derive(Debug, Deserialize, Default)]
struct HistoryData {
    #[serde(default)]
    content: String,
}

pub async fn run_import(config: &Config, session_id: &str, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read history file: {}", file.display()))?;

    let entries: Vec<HistoryEntry> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history file: {}", file.display()))?;

    let store = SqliteTranscriptStore::connect(config).await?;

    let mut imported = 0usize;
    let mut skipped = 0usize;

    for entry in &entries {
        let role = match Role::from_tag(&entry.kind) {
            Some(r) => r,
            None => {
                skipped += 1;
                continue;
            }
        };
        if entry.data.content.trim().is_empty() {
            skipped += 1;
            continue;
        }

        // History exports carry no timestamps; leave created_at unset.
        store
            .append_turn(&NewTurn {
                session_id: session_id.to_string(),
                role,
                raw_text: entry.data.content.clone(),
                role_label: None,
                created_at: None,
            })
            .await?;
        imported += 1;
    }

    store.close().await;

    println!(
        "Imported {} turns into session {} ({} skipped)",
        imported, session_id, skipped
    );

    Ok(())
}
