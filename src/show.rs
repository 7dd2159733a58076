//! Transcript display.
//!
//! Fetches a session's stored turns and decodes each one through the
//! codec into the public `{"type", "content", "options"}` payload.
//! Used by the `tlog show` CLI command.

use anyhow::{bail, Result};
use serde::Serialize;

use turnlog_core::codec::decode_turn;
use turnlog_core::models::{Role, TurnMessage};
use turnlog_core::store::TranscriptStore;

use crate::config::Config;
use crate::store_sqlite::SqliteTranscriptStore;

/// Session response: the decoded messages in chronological order.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub messages: Vec<TurnMessage>,
}

/// Core decode function returning structured data (used by CLI and tests).
///
/// Human turns that decode to empty content are skipped, matching the
/// original transcript read-back behavior. Empty assistant content is
/// replaced by the configured fallback message — that substitution is
/// an application concern, not part of the codec.
pub async fn get_session(config: &Config, session_id: &str) -> Result<SessionResponse> {
    let store = SqliteTranscriptStore::connect(config).await?;

    let turns = store.session_turns(session_id).await?;
    store.close().await;

    if turns.is_empty() {
        bail!("no messages found for session: {}", session_id);
    }

    let mut messages = Vec::new();
    for turn in &turns {
        let record = decode_turn(turn.role, &turn.raw_text);
        if record.content.is_empty() {
            match turn.role {
                Role::Human => continue,
                Role::Assistant => {
                    let mut message = record.to_message();
                    message.content = config.display.fallback_message.clone();
                    messages.push(message);
                    continue;
                }
            }
        }
        messages.push(record.to_message());
    }

    Ok(SessionResponse {
        session_id: session_id.to_string(),
        messages,
    })
}

/// CLI entry point — decodes the session and prints to stdout.
pub async fn run_show(config: &Config, session_id: &str, json: bool) -> Result<()> {
    let session = match get_session(config, session_id).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!("--- Session {} ---", session.session_id);
    for (i, message) in session.messages.iter().enumerate() {
        println!();
        println!("[{}] {}", i, message.kind);
        println!("{}", message.content);
        if !message.options.is_empty() {
            println!("options:");
            for (n, option) in message.options.iter().enumerate() {
                println!("  {}. {}", n + 1, option);
            }
        }
    }

    Ok(())
}
