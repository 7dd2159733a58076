//! Storage abstraction for Turnlog transcripts.
//!
//! The [`TranscriptStore`] trait defines the append-only transcript log
//! used by the record, display, and export pipelines, enabling pluggable
//! backends (SQLite, in-memory, future WASM-compatible stores).
//!
//! The log persists the *raw*, pre-split turn text as the source of
//! truth; the structured `(content, options)` form is re-derived by the
//! codec on every read. Implementations must be `Send + Sync` to work
//! with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Role;

/// A turn about to be appended to a session's transcript.
///
/// `created_at` is supplied by the caller (unix seconds) or left unset
/// for entries imported without timestamps; the store never invents one.
#[derive(Debug, Clone)]
pub struct NewTurn {
    pub session_id: String,
    pub role: Role,
    pub raw_text: String,
    pub role_label: Option<String>,
    pub created_at: Option<i64>,
}

/// One persisted transcript entry.
///
/// `turn_index` is assigned by the store as the next index within the
/// session, so per-session order is append order.
#[derive(Debug, Clone)]
pub struct StoredTurn {
    pub id: String,
    pub session_id: String,
    pub turn_index: i64,
    pub role: Role,
    pub raw_text: String,
    pub role_label: Option<String>,
    pub created_at: Option<i64>,
}

/// What [`TranscriptStore::append_turn`] hands back: the new turn's ID
/// and the per-session index the store assigned to it.
#[derive(Debug, Clone)]
pub struct AppendReceipt {
    pub id: String,
    pub turn_index: i64,
}

/// Lightweight per-session rollup for listings.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub session_id: String,
    pub turn_count: i64,
    pub last_created_at: Option<i64>,
}

/// Abstract append-only transcript log.
///
/// All operations are async (via `async-trait`) to support both native
/// runtimes (tokio) and future WASM environments. In-memory
/// implementations return immediately-ready futures.
///
/// # Operations
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`append_turn`](TranscriptStore::append_turn) | Append one raw turn to a session |
/// | [`session_turns`](TranscriptStore::session_turns) | Fetch a session's turns in order |
/// | [`list_sessions`](TranscriptStore::list_sessions) | List sessions with rollup stats |
/// | [`all_turns`](TranscriptStore::all_turns) | Fetch every turn (export path) |
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Append a turn to its session's log.
    ///
    /// Assigns the next `turn_index` for the session and returns it
    /// along with the new turn's ID.
    async fn append_turn(&self, turn: &NewTurn) -> Result<AppendReceipt>;

    /// Fetch all turns for a session, ordered by `turn_index`.
    async fn session_turns(&self, session_id: &str) -> Result<Vec<StoredTurn>>;

    /// List all sessions with turn counts and last activity.
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>>;

    /// Fetch every stored turn, ordered by session then `turn_index`.
    async fn all_turns(&self) -> Result<Vec<StoredTurn>>;
}
