//! # Turnlog CLI (`tlog`)
//!
//! The `tlog` binary is the primary interface for Turnlog. It provides
//! commands for database initialization, appending and importing turns,
//! decoding sessions for display, and exporting the chat log as CSV.
//!
//! ## Usage
//!
//! ```bash
//! tlog --config ./config/tlog.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tlog init` | Create the SQLite database and run schema migrations |
//! | `tlog record <session> <role> [TEXT]` | Append one raw turn to a session |
//! | `tlog import <session> <file>` | Bulk-load a JSON transcript history file |
//! | `tlog show <session>` | Decode a session into display messages |
//! | `tlog sessions` | List sessions with turn counts |
//! | `tlog export` | Write the chat log as CSV |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! tlog init --config ./config/tlog.toml
//!
//! # Append a human turn and an assistant turn
//! tlog record s-42 user "What is the digital learning strategy?"
//! tlog record s-42 ai "It broadens access. You might have the following questions: Who runs it? When does it start?"
//!
//! # Append a turn from stdin (multi-line completions)
//! cat completion.txt | tlog record s-42 ai --stdin
//!
//! # Decoded display payload
//! tlog show s-42 --json
//!
//! # Chat-log CSV export
//! tlog export --output ./data/chat_history.csv
//! ```

mod config;
mod export;
mod import;
mod migrate;
mod record;
mod sessions;
mod show;
mod store_sqlite;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Turnlog CLI — a local-first chat transcript log with a deterministic
/// turn response codec.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/tlog.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "tlog",
    about = "Turnlog — a local-first chat transcript log with a deterministic turn response codec",
    version,
    long_about = "Turnlog stores raw chat turns in an append-only SQLite log and re-derives the \
    structured form (primary answer, follow-up question options, normalized links) on every read, \
    for display payloads and chat-log CSV export."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/tlog.toml`. Database, display, and export
    /// settings are read from this file.
    #[arg(long, global = true, default_value = "./config/tlog.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the transcript log table.
    /// This command is idempotent — running it multiple times is safe.
    Init,

    /// Append one raw turn to a session's transcript.
    ///
    /// The text is stored verbatim; splitting and link normalization
    /// happen on read. The turn's timestamp is assigned at append time.
    Record {
        /// Session identifier.
        session: String,

        /// Turn author: `user` (or `human`) / `ai` (or `assistant`).
        role: String,

        /// The raw turn text. Omit when using `--stdin`.
        text: Option<String>,

        /// Free-text role annotation attached to this turn
        /// (e.g. `public`, `educator`, `admin`).
        #[arg(long)]
        role_label: Option<String>,

        /// Read the turn text from stdin instead of an argument.
        #[arg(long)]
        stdin: bool,
    },

    /// Bulk-load a transcript history file into a session.
    ///
    /// Expects a JSON array of `{"type": "human"|"ai", "data":
    /// {"content": "..."}}` entries; unknown types and empty entries
    /// are skipped.
    Import {
        /// Session identifier to append into.
        session: String,

        /// Path to the JSON history file.
        file: PathBuf,
    },

    /// Decode a session's transcript for display.
    ///
    /// Runs every stored turn through the codec and prints the
    /// resulting messages with their follow-up options.
    Show {
        /// Session identifier.
        session: String,

        /// Print the raw JSON payload instead of formatted text.
        #[arg(long)]
        json: bool,
    },

    /// List sessions with turn counts and last activity.
    Sessions,

    /// Export the chat log as CSV.
    ///
    /// Rows are `SessionId, UserRole, MessageType, Message, Timestamp`,
    /// with `Message` already decoded (delimiter-free, links
    /// normalized).
    Export {
        /// Output file path. Falls back to `export.output` from the
        /// config; with neither set, writes to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Record {
            session,
            role,
            text,
            role_label,
            stdin,
        } => {
            record::run_record(&cfg, &session, &role, text, role_label, stdin).await?;
        }
        Commands::Import { session, file } => {
            import::run_import(&cfg, &session, &file).await?;
        }
        Commands::Show { session, json } => {
            show::run_show(&cfg, &session, json).await?;
        }
        Commands::Sessions => {
            sessions::list_sessions(&cfg).await?;
        }
        Commands::Export { output } => {
            let output = output.or_else(|| cfg.export.output.clone());
            export::run_export(&cfg, output.as_deref()).await?;
        }
    }

    Ok(())
}
