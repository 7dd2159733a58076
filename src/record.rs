//! Append a raw turn to a session's transcript.
//!
//! The raw text is stored exactly as supplied; splitting, link
//! normalization, and sanitization all happen on read. The turn's
//! timestamp is assigned here, at append time.

use anyhow::{bail, Result};
use std::io::Read;

use turnlog_core::models::Role;
use turnlog_core::store::{NewTurn, TranscriptStore};

use crate::config::Config;
use crate::store_sqlite::SqliteTranscriptStore;

pub async fn run_record(
    config: &Config,
    session_id: &str,
    role_tag: &str,
    text: Option<String>,
    role_label: Option<String>,
    from_stdin: bool,
) -> Result<()> {
    let role = match Role::from_tag(role_tag) {
        Some(r) => r,
        None => bail!(
            "Unknown role: '{}'. Use user, human, ai, or assistant.",
            role_tag
        ),
    };

    let raw_text = if from_stdin {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        match text {
            Some(t) => t,
            None => bail!("No turn text given. Pass TEXT or use --stdin."),
        }
    };

    if raw_text.trim().is_empty() {
        bail!("Turn text must not be empty.");
    }

    let store = SqliteTranscriptStore::connect(config).await?;

    let turn = NewTurn {
        session_id: session_id.to_string(),
        role,
        raw_text,
        role_label,
        created_at: Some(chrono::Utc::now().timestamp()),
    };

    let receipt = store.append_turn(&turn).await?;

    println!(
        "Recorded {} turn {} in session {} ({})",
        role.display_type(),
        receipt.turn_index,
        session_id,
        receipt.id
    );

    store.close().await;
    Ok(())
}
