// crates/db/src/queries/mod.rs
// Public repository operations over each collection. Every mutating method
// runs the collection's lifecycle hooks first and clears the query cache on
// success. A rejected or failed write leaves the cache untouched.

pub(crate) mod row_types;

mod backups;
mod entries;
mod insights;
mod moods;
mod settings;
mod therapy;

use crate::{Database, SqlxContext, StoreResult};
use serde::Serialize;

/// Row counts per collection plus the size of the database file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub journal_entries: i64,
    pub mood_entries: i64,
    pub deep_insights: i64,
    pub therapy_sessions: i64,
    pub therapy_messages: i64,
    pub imported_backups: i64,
    pub db_size_bytes: u64,
}

impl Database {
    /// Per-collection row counts and on-disk size. Uncached; callers hit
    /// this rarely (settings screens, diagnostics).
    pub async fn storage_stats(&self) -> StoreResult<StorageStats> {
        const CONTEXT: &str = "Failed to load storage statistics";

        let count = |table: &'static str| async move {
            let sql = format!("SELECT COUNT(*) FROM {}", table);
            let row: (i64,) = sqlx::query_as(&sql)
                .fetch_one(self.pool())
                .await
                .context(CONTEXT)?;
            StoreResult::Ok(row.0)
        };

        let db_size_bytes = std::fs::metadata(self.db_path())
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(StorageStats {
            journal_entries: count("journal_entries").await?,
            mood_entries: count("mood_entries").await?,
            deep_insights: count("deep_insights").await?,
            therapy_sessions: count("therapy_sessions").await?,
            therapy_messages: count("therapy_messages").await?,
            imported_backups: count("imported_backups").await?,
            db_size_bytes,
        })
    }
}
