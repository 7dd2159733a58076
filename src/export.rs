//! Export the transcript log as CSV.
//!
//! Produces a `chat_history.csv` file with one row per turn:
//! `SessionId, UserRole, MessageType, Message, Timestamp`. `Message` is
//! the decoded content — delimiter-free and link-normalized — so
//! consumers never re-parse raw LLM text. Turns that decode to empty
//! content are skipped.

use anyhow::Result;
use std::path::Path;

use turnlog_core::codec::decode_turn;
use turnlog_core::store::TranscriptStore;

use crate::config::Config;
use crate::store_sqlite::SqliteTranscriptStore;

const CSV_HEADER: &str = "SessionId,UserRole,MessageType,Message,Timestamp";

/// Export all sessions as CSV.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub async fn run_export(config: &Config, output: Option<&Path>) -> Result<()> {
    let store = SqliteTranscriptStore::connect(config).await?;

    let turns = store.all_turns().await?;
    store.close().await;

    let mut lines = vec![CSV_HEADER.to_string()];
    let mut row_count = 0usize;

    for turn in &turns {
        let record = decode_turn(turn.role, &turn.raw_text);
        if record.content.is_empty() {
            continue;
        }

        let timestamp = turn.created_at.map(format_ts).unwrap_or_default();
        let user_role = turn.role_label.clone().unwrap_or_default();

        lines.push(
            [
                csv_field(&turn.session_id),
                csv_field(&user_role),
                csv_field(turn.role.display_type()),
                csv_field(&record.content),
                csv_field(&timestamp),
            ]
            .join(","),
        );
        row_count += 1;
    }

    let csv = lines.join("\n") + "\n";

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &csv)?;
            eprintln!("Exported {} rows to {}", row_count, path.display());
        }
        None => {
            print!("{}", csv);
        }
    }

    Ok(())
}

/// Format a unix timestamp for CSV rows and session listings.
pub fn format_ts(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
