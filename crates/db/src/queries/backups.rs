// crates/db/src/queries/backups.rs
// Imported backup archive: storage, duplicate detection, and restore.

use super::row_types::{encode_list, encode_opt, BackupRow};
use crate::cache::SEARCH_TTL;
use crate::hooks;
use crate::{Database, SqlxContext, StoreError, StoreResult};
use chrono::Utc;
use haven_core::{checksum, ImportedBackup, JournalEntry, NewImportedBackup, NewJournalEntry};

const LOAD: &str = "Failed to load imported backups";
const SAVE: &str = "Failed to save imported backup";
const DELETE: &str = "Failed to delete imported backup";
const RESTORE: &str = "Failed to restore entry from backup";

impl Database {
    pub async fn add_backup(&self, draft: NewImportedBackup) -> StoreResult<ImportedBackup> {
        let backup = self.insert_backup(&draft).await?;
        self.cache().clear();
        Ok(backup)
    }

    pub(crate) async fn insert_backup(
        &self,
        draft: &NewImportedBackup,
    ) -> StoreResult<ImportedBackup> {
        let stamped = hooks::on_create_backup(draft, Utc::now().timestamp())?;

        let result = sqlx::query(
            r#"
            INSERT INTO imported_backups (
                title, content, date, time, mood, tags, location, moon_phase,
                ai_insights, original_import_date, import_source, import_method,
                original_file_name, checksum, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
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
        .bind(encode_opt(&draft.ai_insights))
        .bind(stamped.original_import_date)
        .bind(&draft.import_source)
        .bind(draft.import_method.as_str())
        .bind(&draft.original_file_name)
        .bind(&stamped.checksum)
        .bind(stamped.stamp.created_at)
        .bind(stamped.stamp.updated_at)
        .execute(self.pool())
        .await
        .context(SAVE)?;

        Ok(ImportedBackup {
            id: result.last_insert_rowid(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            date: draft.date.clone(),
            time: draft.time.clone(),
            mood: draft.mood,
            tags: draft.tags.clone(),
            location: draft.location.clone(),
            moon_phase: draft.moon_phase.clone(),
            ai_insights: draft.ai_insights.clone(),
            original_import_date: stamped.original_import_date,
            import_source: draft.import_source.clone(),
            import_method: draft.import_method,
            original_file_name: draft.original_file_name.clone(),
            checksum: stamped.checksum,
            created_at: stamped.stamp.created_at,
            updated_at: stamped.stamp.updated_at,
        })
    }

    pub async fn get_backup(&self, id: i64) -> StoreResult<ImportedBackup> {
        let row: Option<BackupRow> =
            sqlx::query_as("SELECT * FROM imported_backups WHERE id = ?1")
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .context(LOAD)?;
        row.map(BackupRow::into_backup).ok_or(StoreError::NotFound {
            collection: "imported_backups",
            id,
        })
    }

    pub async fn list_backups(&self, limit: i64, offset: i64) -> StoreResult<Vec<ImportedBackup>> {
        let key = format!("backups:list:{}:{}", limit, offset);
        if let Some(hit) = self.cache().get::<Vec<ImportedBackup>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<BackupRow> = sqlx::query_as(
            "SELECT * FROM imported_backups ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;

        let backups: Vec<ImportedBackup> = rows.into_iter().map(BackupRow::into_backup).collect();
        self.cache().set(key, backups.clone());
        Ok(backups)
    }

    /// Search backups: content starts-with (case-insensitive) or import
    /// source overlap with the whitespace-split query terms.
    pub async fn search_backups(
        &self,
        query: &str,
        limit: i64,
    ) -> StoreResult<Vec<ImportedBackup>> {
        let key = format!("backups:search:{}:{}", query, limit);
        if let Some(hit) = self.cache().get::<Vec<ImportedBackup>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<BackupRow> =
            sqlx::query_as("SELECT * FROM imported_backups ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await
                .context(LOAD)?;

        let needle = query.trim().to_lowercase();
        let terms: Vec<String> = needle.split_whitespace().map(str::to_string).collect();
        let backups: Vec<ImportedBackup> = rows
            .into_iter()
            .map(BackupRow::into_backup)
            .filter(|b| backup_matches(b, &needle, &terms))
            .take(limit.max(0) as usize)
            .collect();

        self.cache().set_with_ttl(key, backups.clone(), SEARCH_TTL);
        Ok(backups)
    }

    /// Delete a backup record. Restored entries are unaffected.
    pub async fn delete_backup(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM imported_backups WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .context(DELETE)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: "imported_backups",
                id,
            });
        }
        self.cache().clear();
        Ok(())
    }

    /// Copy a backup into a brand-new journal entry with fresh timestamps.
    /// The source backup is untouched; restore is a copy, not a move.
    pub async fn restore_from_backup(&self, backup_id: i64) -> StoreResult<JournalEntry> {
        let backup = self.get_backup(backup_id).await?;
        let now = Utc::now();

        let title = match backup.title {
            Some(t) if !t.trim().is_empty() => t,
            _ => format!("Imported Entry {}", now.format("%Y-%m-%d %H:%M")),
        };
        let date = if backup.date.trim().is_empty() {
            now.format("%Y-%m-%d").to_string()
        } else {
            backup.date
        };
        let tags = if backup.tags.is_empty() {
            vec!["imported".to_string()]
        } else {
            backup.tags
        };

        let draft = NewJournalEntry {
            title: Some(title),
            content: backup.content,
            date,
            time: backup.time,
            mood: Some(backup.mood.unwrap_or(3)),
            tags,
            location: backup.location,
            moon_phase: backup.moon_phase,
            weather: None,
            ai_insights: backup.ai_insights,
        };

        let entry = self.insert_entry(&draft).await.map_err(|e| match e {
            StoreError::Storage { source, .. } => StoreError::Storage {
                context: RESTORE,
                source,
            },
            other => other,
        })?;
        self.cache().clear();
        Ok(entry)
    }

    /// Advisory duplicate check: does any stored backup carry the checksum
    /// of this (content, date) pair? Collisions are possible; callers decide
    /// whether to skip the import.
    pub async fn check_duplicate(&self, content: &str, date: &str) -> StoreResult<bool> {
        let fingerprint = checksum(content, date);
        let row: (i64,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM imported_backups WHERE checksum = ?1)")
                .bind(&fingerprint)
                .fetch_one(self.pool())
                .await
                .context(LOAD)?;
        Ok(row.0 != 0)
    }

    pub(crate) async fn all_backups(&self) -> StoreResult<Vec<ImportedBackup>> {
        let rows: Vec<BackupRow> =
            sqlx::query_as("SELECT * FROM imported_backups ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await
                .context(LOAD)?;
        Ok(rows.into_iter().map(BackupRow::into_backup).collect())
    }
}

fn backup_matches(backup: &ImportedBackup, needle: &str, terms: &[String]) -> bool {
    if needle.is_empty() {
        return false;
    }
    if backup.content.to_lowercase().starts_with(needle) {
        return true;
    }
    terms
        .iter()
        .any(|t| t == &backup.import_source.to_lowercase())
}
