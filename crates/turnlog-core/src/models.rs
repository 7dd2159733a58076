//! Core data models used throughout Turnlog.
//!
//! These types represent the chat turns that flow through the codec,
//! the transcript store, and the display/export pipelines.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Author of a chat turn.
///
/// The transcript log tags entries `"human"` / `"ai"`; the public
/// display payload renames these to `"user"` / `"ai"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Human,
    Assistant,
}

impl Role {
    /// Parse a role tag as it appears in transcript logs or CLI input.
    ///
    /// Accepts both the storage form (`human`/`ai`) and the display
    /// form (`user`/`assistant`), case-insensitively. Returns `None`
    /// for anything else.
    pub fn from_tag(tag: &str) -> Option<Role> {
        match tag.trim().to_lowercase().as_str() {
            "human" | "user" => Some(Role::Human),
            "ai" | "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }

    /// Tag written to the transcript store.
    pub fn storage_tag(self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::Assistant => "ai",
        }
    }

    /// Tag used in the public display payload (`"user"` / `"ai"`).
    pub fn display_type(self) -> &'static str {
        match self {
            Role::Human => "user",
            Role::Assistant => "ai",
        }
    }
}

/// The structured form of one chat turn, produced by the codec.
///
/// `content` never contains the follow-up delimiter phrase, and every
/// entry in `options` is a trimmed question ending in exactly one `?`.
/// `role_label` and `timestamp` are attached by the caller (the store
/// or export layer), never computed by the codec. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRecord {
    pub role: Role,
    pub content: String,
    pub options: Vec<String>,
    pub role_label: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl TurnRecord {
    /// Render this record as the public display payload.
    pub fn to_message(&self) -> TurnMessage {
        TurnMessage {
            kind: self.role.display_type().to_string(),
            content: self.content.clone(),
            options: self.options.clone(),
        }
    }
}

/// Public JSON payload shape for one turn:
/// `{"type": "ai"|"user", "content": "...", "options": ["...?"]}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TurnMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub options: Vec<String>,
}
