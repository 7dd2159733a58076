//! In-memory [`TranscriptStore`] implementation for testing and WASM targets.
//!
//! Uses a `Vec` behind `std::sync::RwLock` for thread safety. Turn
//! indices are assigned by counting the session's existing entries, so
//! append order is preserved exactly as a SQLite backend would.

use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::{AppendReceipt, NewTurn, SessionSummary, StoredTurn, TranscriptStore};

/// In-memory transcript log for tests and WASM environments.
pub struct InMemoryTranscriptStore {
    turns: RwLock<Vec<StoredTurn>>,
}

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self {
            turns: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryTranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscriptStore {
    async fn append_turn(&self, turn: &NewTurn) -> Result<AppendReceipt> {
        let mut turns = self.turns.write().unwrap();
        let next_index = turns
            .iter()
            .filter(|t| t.session_id == turn.session_id)
            .count() as i64;
        let id = Uuid::new_v4().to_string();
        turns.push(StoredTurn {
            id: id.clone(),
            session_id: turn.session_id.clone(),
            turn_index: next_index,
            role: turn.role,
            raw_text: turn.raw_text.clone(),
            role_label: turn.role_label.clone(),
            created_at: turn.created_at,
        });
        Ok(AppendReceipt {
            id,
            turn_index: next_index,
        })
    }

    async fn session_turns(&self, session_id: &str) -> Result<Vec<StoredTurn>> {
        let turns = self.turns.read().unwrap();
        let mut out: Vec<StoredTurn> = turns
            .iter()
            .filter(|t| t.session_id == session_id)
            .cloned()
            .collect();
        out.sort_by_key(|t| t.turn_index);
        Ok(out)
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let turns = self.turns.read().unwrap();
        let mut summaries: Vec<SessionSummary> = Vec::new();
        for t in turns.iter() {
            match summaries.iter_mut().find(|s| s.session_id == t.session_id) {
                Some(summary) => {
                    summary.turn_count += 1;
                    if t.created_at > summary.last_created_at {
                        summary.last_created_at = t.created_at;
                    }
                }
                None => summaries.push(SessionSummary {
                    session_id: t.session_id.clone(),
                    turn_count: 1,
                    last_created_at: t.created_at,
                }),
            }
        }
        summaries.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        Ok(summaries)
    }

    async fn all_turns(&self) -> Result<Vec<StoredTurn>> {
        let turns = self.turns.read().unwrap();
        let mut out: Vec<StoredTurn> = turns.clone();
        out.sort_by(|a, b| {
            a.session_id
                .cmp(&b.session_id)
                .then(a.turn_index.cmp(&b.turn_index))
        });
        Ok(out)
    }
}
