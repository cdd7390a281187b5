// crates/db/src/queries/entries.rs
// Journal entry CRUD and search.

use super::row_types::{encode_list, encode_opt, EntryRow};
use crate::cache::SEARCH_TTL;
use crate::hooks;
use crate::{Database, SqlxContext, StoreError, StoreResult};
use chrono::Utc;
use haven_core::{JournalEntry, JournalEntryPatch, NewJournalEntry};

const LOAD: &str = "Failed to load journal entries";
const SAVE: &str = "Failed to save journal entry";
const UPDATE: &str = "Failed to update journal entry";
const DELETE: &str = "Failed to delete journal entry";

impl Database {
    /// Persist a new journal entry and return it with its assigned id.
    pub async fn add_entry(&self, draft: NewJournalEntry) -> StoreResult<JournalEntry> {
        let entry = self.insert_entry(&draft).await?;
        self.cache().clear();
        Ok(entry)
    }

    /// Insert without touching the cache; batch paths (snapshot import)
    /// clear once at the end instead.
    pub(crate) async fn insert_entry(&self, draft: &NewJournalEntry) -> StoreResult<JournalEntry> {
        let stamp = hooks::on_create_entry(draft, Utc::now().timestamp())?;

        let result = sqlx::query(
            r#"
            INSERT INTO journal_entries (
                title, content, date, time, mood, tags,
                location, moon_phase, weather, ai_insights,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(&draft.date)
        .bind(&draft.time)
        .bind(draft.mood)
        .bind(encode_list(&draft.tags))
        .bind(encode_opt(&draft.location))
        .bind(&draft.moon_phase)
        .bind(encode_opt(&draft.weather))
        .bind(encode_opt(&draft.ai_insights))
        .bind(stamp.created_at)
        .bind(stamp.updated_at)
        .execute(self.pool())
        .await
        .context(SAVE)?;

        Ok(JournalEntry {
            id: result.last_insert_rowid(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            date: draft.date.clone(),
            time: draft.time.clone(),
            mood: draft.mood,
            tags: draft.tags.clone(),
            location: draft.location.clone(),
            moon_phase: draft.moon_phase.clone(),
            weather: draft.weather.clone(),
            ai_insights: draft.ai_insights.clone(),
            created_at: stamp.created_at,
            updated_at: stamp.updated_at,
        })
    }

    /// Fetch a single entry by id.
    pub async fn get_entry(&self, id: i64) -> StoreResult<JournalEntry> {
        let row: Option<EntryRow> =
            sqlx::query_as("SELECT * FROM journal_entries WHERE id = ?1")
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .context(LOAD)?;
        row.map(EntryRow::into_entry).ok_or(StoreError::NotFound {
            collection: "journal_entries",
            id,
        })
    }

    /// List entries newest-first, paginated.
    pub async fn list_entries(&self, limit: i64, offset: i64) -> StoreResult<Vec<JournalEntry>> {
        let key = format!("entries:list:{}:{}", limit, offset);
        if let Some(hit) = self.cache().get::<Vec<JournalEntry>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<EntryRow> = sqlx::query_as(
            "SELECT * FROM journal_entries ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;

        let entries: Vec<JournalEntry> = rows.into_iter().map(EntryRow::into_entry).collect();
        self.cache().set(key, entries.clone());
        Ok(entries)
    }

    /// All entries written about a given calendar date.
    pub async fn entries_on_date(&self, date: &str) -> StoreResult<Vec<JournalEntry>> {
        let key = format!("entries:date:{}", date);
        if let Some(hit) = self.cache().get::<Vec<JournalEntry>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<EntryRow> = sqlx::query_as(
            "SELECT * FROM journal_entries WHERE date = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(date)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;

        let entries: Vec<JournalEntry> = rows.into_iter().map(EntryRow::into_entry).collect();
        self.cache().set(key, entries.clone());
        Ok(entries)
    }

    /// Search entries: title starts-with (case-insensitive) or tag overlap
    /// with the whitespace-split query terms. Result sets are query-specific
    /// and low-reuse, hence the short TTL.
    pub async fn search_entries(&self, query: &str, limit: i64) -> StoreResult<Vec<JournalEntry>> {
        let key = format!("entries:search:{}:{}", query, limit);
        if let Some(hit) = self.cache().get::<Vec<JournalEntry>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<EntryRow> =
            sqlx::query_as("SELECT * FROM journal_entries ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await
                .context(LOAD)?;

        let needle = query.trim().to_lowercase();
        let terms: Vec<String> = needle.split_whitespace().map(str::to_string).collect();
        let entries: Vec<JournalEntry> = rows
            .into_iter()
            .map(EntryRow::into_entry)
            .filter(|e| entry_matches(e, &needle, &terms))
            .take(limit.max(0) as usize)
            .collect();

        self.cache().set_with_ttl(key, entries.clone(), SEARCH_TTL);
        Ok(entries)
    }

    /// Merge `patch` into the stored entry. Hooks re-validate content and
    /// stamp `updated_at`; a caller can never supply its own timestamps.
    pub async fn update_entry(
        &self,
        id: i64,
        patch: JournalEntryPatch,
    ) -> StoreResult<JournalEntry> {
        let mut entry = self.get_entry(id).await?;
        let updated_at = hooks::on_update_entry(patch.content.as_deref(), Utc::now().timestamp())?;

        if let Some(title) = patch.title {
            entry.title = Some(title);
        }
        if let Some(content) = patch.content {
            entry.content = content;
        }
        if let Some(date) = patch.date {
            entry.date = date;
        }
        if let Some(time) = patch.time {
            entry.time = Some(time);
        }
        if let Some(mood) = patch.mood {
            entry.mood = Some(mood);
        }
        if let Some(tags) = patch.tags {
            entry.tags = tags;
        }
        if let Some(location) = patch.location {
            entry.location = Some(location);
        }
        if let Some(moon_phase) = patch.moon_phase {
            entry.moon_phase = Some(moon_phase);
        }
        if let Some(weather) = patch.weather {
            entry.weather = Some(weather);
        }
        if let Some(ai_insights) = patch.ai_insights {
            entry.ai_insights = Some(ai_insights);
        }
        entry.updated_at = updated_at;

        sqlx::query(
            r#"
            UPDATE journal_entries SET
                title = ?1, content = ?2, date = ?3, time = ?4, mood = ?5,
                tags = ?6, location = ?7, moon_phase = ?8, weather = ?9,
                ai_insights = ?10, updated_at = ?11
            WHERE id = ?12
            "#,
        )
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(&entry.date)
        .bind(&entry.time)
        .bind(entry.mood)
        .bind(encode_list(&entry.tags))
        .bind(encode_opt(&entry.location))
        .bind(&entry.moon_phase)
        .bind(encode_opt(&entry.weather))
        .bind(encode_opt(&entry.ai_insights))
        .bind(entry.updated_at)
        .bind(id)
        .execute(self.pool())
        .await
        .context(UPDATE)?;

        self.cache().clear();
        Ok(entry)
    }

    /// Delete an entry. Entries have no cascade dependents; insights that
    /// reference this id stay behind by design.
    pub async fn delete_entry(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .context(DELETE)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: "journal_entries",
                id,
            });
        }
        self.cache().clear();
        Ok(())
    }

    /// Every entry, newest-first, bypassing the cache. Snapshot export and
    /// maintenance use this.
    pub(crate) async fn all_entries(&self) -> StoreResult<Vec<JournalEntry>> {
        let rows: Vec<EntryRow> =
            sqlx::query_as("SELECT * FROM journal_entries ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await
                .context(LOAD)?;
        Ok(rows.into_iter().map(EntryRow::into_entry).collect())
    }
}

fn entry_matches(entry: &JournalEntry, needle: &str, terms: &[String]) -> bool {
    if needle.is_empty() {
        return false;
    }
    if let Some(title) = &entry.title {
        if title.to_lowercase().starts_with(needle) {
            return true;
        }
    }
    entry
        .tags
        .iter()
        .any(|tag| terms.iter().any(|t| t == &tag.to_lowercase()))
}
