// crates/db/src/maintenance.rs
//! Repair routines for drifted records.
//!
//! Entries imported from other apps get their `created_at` stamped at
//! import time, which can disagree with the entry's own `date` field. The
//! repair below rewrites `created_at` from `date` + `time` so the two agree
//! again.

use crate::{Database, SqlxContext, StoreResult};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use tracing::warn;

/// Outcome of a date repair pass. The batch never aborts on a bad record;
/// failures are counted and the caller decides whether to retry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRepairReport {
    pub updated: u64,
    pub errors: u64,
}

/// Combine a `YYYY-MM-DD` date and optional `HH:MM` time into a Unix
/// timestamp, falling back to midnight when the time is absent or invalid.
/// Returns None only when the date itself does not parse.
pub(crate) fn combine_date_time(date: &str, time: Option<&str>) -> Option<i64> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let time = time
        .and_then(|t| {
            NaiveTime::parse_from_str(t, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
                .ok()
        })
        .unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time).and_utc().timestamp())
}

fn calendar_date_of(ts: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
}

impl Database {
    /// Realign `created_at` with each entry's nominal `date`.
    ///
    /// Entries whose `created_at` already falls on their `date` are left
    /// alone. For the rest, `created_at` becomes `date` + `time` (midnight
    /// when `time` is absent or malformed) and `updated_at` is set to now.
    /// Per-record failures are counted, not fatal; the cache is cleared
    /// once at the end.
    pub async fn migrate_entry_dates(&self) -> StoreResult<DateRepairReport> {
        const CONTEXT: &str = "Failed to migrate journal entry dates";

        let rows: Vec<(i64, String, Option<String>, i64)> =
            sqlx::query_as("SELECT id, date, time, created_at FROM journal_entries")
                .fetch_all(self.pool())
                .await
                .context(CONTEXT)?;

        let now = Utc::now().timestamp();
        let mut report = DateRepairReport::default();

        for (id, date, time, created_at) in rows {
            let implied = calendar_date_of(created_at);
            if implied.as_deref() == Some(date.as_str()) {
                continue;
            }

            let Some(recomputed) = combine_date_time(&date, time.as_deref()) else {
                warn!(id, date = %date, "unparseable entry date, skipping repair");
                report.errors += 1;
                continue;
            };

            let result =
                sqlx::query("UPDATE journal_entries SET created_at = ?1, updated_at = ?2 WHERE id = ?3")
                    .bind(recomputed)
                    .bind(now)
                    .bind(id)
                    .execute(self.pool())
                    .await;
            match result {
                Ok(_) => report.updated += 1,
                Err(e) => {
                    warn!(id, error = %e, "failed to rewrite entry created_at");
                    report.errors += 1;
                }
            }
        }

        self.cache().clear();
        Ok(report)
    }
}
