// crates/db/src/queries/moods.rs
// Mood sample CRUD. The 1..=5 bound is enforced here (create and update),
// unlike the advisory mood field on journal entries.

use super::row_types::{encode_list, MoodRow};
use crate::hooks;
use crate::{Database, SqlxContext, StoreError, StoreResult};
use chrono::Utc;
use haven_core::{MoodEntry, MoodEntryPatch, NewMoodEntry};

const LOAD: &str = "Failed to load mood entries";
const SAVE: &str = "Failed to save mood entry";
const UPDATE: &str = "Failed to update mood entry";
const DELETE: &str = "Failed to delete mood entry";

impl Database {
    pub async fn add_mood(&self, draft: NewMoodEntry) -> StoreResult<MoodEntry> {
        let mood = self.insert_mood(&draft).await?;
        self.cache().clear();
        Ok(mood)
    }

    pub(crate) async fn insert_mood(&self, draft: &NewMoodEntry) -> StoreResult<MoodEntry> {
        let stamp = hooks::on_create_mood(draft, Utc::now().timestamp())?;

        let result = sqlx::query(
            r#"
            INSERT INTO mood_entries (
                date, mood, notes, factors, energy, sleep, stress, anxiety,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&draft.date)
        .bind(draft.mood)
        .bind(&draft.notes)
        .bind(encode_list(&draft.factors))
        .bind(draft.energy)
        .bind(draft.sleep)
        .bind(draft.stress)
        .bind(draft.anxiety)
        .bind(stamp.created_at)
        .bind(stamp.updated_at)
        .execute(self.pool())
        .await
        .context(SAVE)?;

        Ok(MoodEntry {
            id: result.last_insert_rowid(),
            date: draft.date.clone(),
            mood: draft.mood,
            notes: draft.notes.clone(),
            factors: draft.factors.clone(),
            energy: draft.energy,
            sleep: draft.sleep,
            stress: draft.stress,
            anxiety: draft.anxiety,
            created_at: stamp.created_at,
            updated_at: stamp.updated_at,
        })
    }

    pub async fn get_mood(&self, id: i64) -> StoreResult<MoodEntry> {
        let row: Option<MoodRow> = sqlx::query_as("SELECT * FROM mood_entries WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .context(LOAD)?;
        row.map(MoodRow::into_mood).ok_or(StoreError::NotFound {
            collection: "mood_entries",
            id,
        })
    }

    pub async fn list_moods(&self, limit: i64, offset: i64) -> StoreResult<Vec<MoodEntry>> {
        let key = format!("moods:list:{}:{}", limit, offset);
        if let Some(hit) = self.cache().get::<Vec<MoodEntry>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<MoodRow> = sqlx::query_as(
            "SELECT * FROM mood_entries ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;

        let moods: Vec<MoodEntry> = rows.into_iter().map(MoodRow::into_mood).collect();
        self.cache().set(key, moods.clone());
        Ok(moods)
    }

    pub async fn update_mood(&self, id: i64, patch: MoodEntryPatch) -> StoreResult<MoodEntry> {
        let mut mood = self.get_mood(id).await?;
        let updated_at = hooks::on_update_mood(patch.mood, Utc::now().timestamp())?;

        if let Some(date) = patch.date {
            mood.date = date;
        }
        if let Some(value) = patch.mood {
            mood.mood = value;
        }
        if let Some(notes) = patch.notes {
            mood.notes = Some(notes);
        }
        if let Some(factors) = patch.factors {
            mood.factors = factors;
        }
        if let Some(energy) = patch.energy {
            mood.energy = Some(energy);
        }
        if let Some(sleep) = patch.sleep {
            mood.sleep = Some(sleep);
        }
        if let Some(stress) = patch.stress {
            mood.stress = Some(stress);
        }
        if let Some(anxiety) = patch.anxiety {
            mood.anxiety = Some(anxiety);
        }
        mood.updated_at = updated_at;

        sqlx::query(
            r#"
            UPDATE mood_entries SET
                date = ?1, mood = ?2, notes = ?3, factors = ?4,
                energy = ?5, sleep = ?6, stress = ?7, anxiety = ?8,
                updated_at = ?9
            WHERE id = ?10
            "#,
        )
        .bind(&mood.date)
        .bind(mood.mood)
        .bind(&mood.notes)
        .bind(encode_list(&mood.factors))
        .bind(mood.energy)
        .bind(mood.sleep)
        .bind(mood.stress)
        .bind(mood.anxiety)
        .bind(mood.updated_at)
        .bind(id)
        .execute(self.pool())
        .await
        .context(UPDATE)?;

        self.cache().clear();
        Ok(mood)
    }

    pub async fn delete_mood(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM mood_entries WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .context(DELETE)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: "mood_entries",
                id,
            });
        }
        self.cache().clear();
        Ok(())
    }

    pub(crate) async fn all_moods(&self) -> StoreResult<Vec<MoodEntry>> {
        let rows: Vec<MoodRow> =
            sqlx::query_as("SELECT * FROM mood_entries ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await
                .context(LOAD)?;
        Ok(rows.into_iter().map(MoodRow::into_mood).collect())
    }
}
