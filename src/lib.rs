//! # Turnlog
//!
//! A local-first chat transcript log built around a deterministic turn
//! response codec.
//!
//! Turnlog stores the raw text of each chat turn in an append-only
//! SQLite log, keyed by session. On every read the turn response codec
//! re-derives the structured form — primary answer, follow-up question
//! options, normalized links — so the display payload and the CSV
//! export never diverge from the stored source of truth.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌───────────┐
//! │ record /    │──▶│  SQLite       │──▶│  codec    │
//! │ import      │   │ append log   │   │ (decode)  │
//! └─────────────┘   └──────────────┘   └─────┬─────┘
//!                                            │
//!                            ┌───────────────┤
//!                            ▼               ▼
//!                      ┌──────────┐    ┌──────────┐
//!                      │ show     │    │ export   │
//!                      │ (JSON)   │    │ (CSV)    │
//!                      └──────────┘    └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! tlog init                                  # create database
//! tlog record s1 user "What is the plan?"    # append a human turn
//! tlog record s1 ai "Here it is. You might have the following questions: Why? When?"
//! tlog show s1 --json                        # decoded display payload
//! tlog export --output ./chat_history.csv    # chat-log CSV
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`record`] | Append raw turns to a session |
//! | [`import`] | Bulk-load transcript history files |
//! | [`show`] | Decode a session for display |
//! | [`sessions`] | Session listing |
//! | [`export`] | Chat-log CSV export |
//! | [`store_sqlite`] | SQLite transcript store |
//! | [`migrate`] | Schema migrations |

pub mod config;
pub mod export;
pub mod import;
pub mod migrate;
pub mod record;
pub mod sessions;
pub mod show;
pub mod store_sqlite;
