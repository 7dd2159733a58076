use anyhow::Result;

use turnlog_core::store::TranscriptStore;

use crate::config::Config;
use crate::export::format_ts;
use crate::store_sqlite::SqliteTranscriptStore;

pub async fn list_sessions(config: &Config) -> Result<()> {
    let store = SqliteTranscriptStore::connect(config).await?;

    let sessions = store.list_sessions().await?;
    store.close().await;

    println!("{:<38} {:>6}  LAST ACTIVITY", "SESSION", "TURNS");
    for session in &sessions {
        let last = session
            .last_created_at
            .map(format_ts)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<38} {:>6}  {}",
            session.session_id, session.turn_count, last
        );
    }

    Ok(())
}
