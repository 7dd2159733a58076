//! # Turnlog Core
//!
//! Shared, WASM-safe logic for Turnlog: the turn response codec,
//! transcript data models, and the transcript store abstraction.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. It compiles to both native targets and
//! `wasm32-unknown-unknown`.

pub mod codec;
pub mod models;
pub mod store;
