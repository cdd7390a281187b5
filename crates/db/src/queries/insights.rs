// crates/db/src/queries/insights.rs
// Deep insight storage. Records arrive fully formed from the external
// generator and are persisted verbatim; `journal_entry_id` is a weak
// reference the store never validates.

use super::row_types::{encode_list, encode_opt, InsightRow};
use crate::{Database, SqlxContext, StoreError, StoreResult};
use chrono::Utc;
use haven_core::{DeepInsight, NewDeepInsight};

const LOAD: &str = "Failed to load insights";
const SAVE: &str = "Failed to save insight";
const DELETE: &str = "Failed to delete insight";

impl Database {
    pub async fn add_insight(&self, draft: NewDeepInsight) -> StoreResult<DeepInsight> {
        let insight = self.insert_insight(&draft).await?;
        self.cache().clear();
        Ok(insight)
    }

    pub(crate) async fn insert_insight(&self, draft: &NewDeepInsight) -> StoreResult<DeepInsight> {
        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
            INSERT INTO deep_insights (
                journal_entry_id, primary_emotion, intensity, energy_level,
                sentiment, themes, suggestions, reflection_prompts,
                compassionate_reflection, spiritual_quote, healing_guidance,
                shadow_work, light_work, confidence, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
        )
        .bind(draft.journal_entry_id)
        .bind(&draft.primary_emotion)
        .bind(draft.intensity)
        .bind(&draft.energy_level)
        .bind(encode_opt(&draft.sentiment))
        .bind(encode_list(&draft.themes))
        .bind(encode_list(&draft.suggestions))
        .bind(encode_list(&draft.reflection_prompts))
        .bind(&draft.compassionate_reflection)
        .bind(&draft.spiritual_quote)
        .bind(&draft.healing_guidance)
        .bind(&draft.shadow_work)
        .bind(&draft.light_work)
        .bind(draft.confidence)
        .bind(created_at)
        .execute(self.pool())
        .await
        .context(SAVE)?;

        Ok(DeepInsight {
            id: result.last_insert_rowid(),
            journal_entry_id: draft.journal_entry_id,
            primary_emotion: draft.primary_emotion.clone(),
            intensity: draft.intensity,
            energy_level: draft.energy_level.clone(),
            sentiment: draft.sentiment.clone(),
            themes: draft.themes.clone(),
            suggestions: draft.suggestions.clone(),
            reflection_prompts: draft.reflection_prompts.clone(),
            compassionate_reflection: draft.compassionate_reflection.clone(),
            spiritual_quote: draft.spiritual_quote.clone(),
            healing_guidance: draft.healing_guidance.clone(),
            shadow_work: draft.shadow_work.clone(),
            light_work: draft.light_work.clone(),
            confidence: draft.confidence,
            created_at,
        })
    }

    pub async fn list_insights(&self, limit: i64, offset: i64) -> StoreResult<Vec<DeepInsight>> {
        let key = format!("insights:list:{}:{}", limit, offset);
        if let Some(hit) = self.cache().get::<Vec<DeepInsight>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<InsightRow> = sqlx::query_as(
            "SELECT * FROM deep_insights ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;

        let insights: Vec<DeepInsight> = rows.into_iter().map(InsightRow::into_insight).collect();
        self.cache().set(key, insights.clone());
        Ok(insights)
    }

    /// Insights referencing a journal entry. A relation by id lookup, not
    /// ownership. Results may reference an entry that no longer exists.
    pub async fn insights_for_entry(&self, entry_id: i64) -> StoreResult<Vec<DeepInsight>> {
        let key = format!("insights:entry:{}", entry_id);
        if let Some(hit) = self.cache().get::<Vec<DeepInsight>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<InsightRow> = sqlx::query_as(
            "SELECT * FROM deep_insights WHERE journal_entry_id = ?1 ORDER BY created_at DESC",
        )
        .bind(entry_id)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;

        let insights: Vec<DeepInsight> = rows.into_iter().map(InsightRow::into_insight).collect();
        self.cache().set(key, insights.clone());
        Ok(insights)
    }

    pub async fn delete_insight(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM deep_insights WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await
            .context(DELETE)?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: "deep_insights",
                id,
            });
        }
        self.cache().clear();
        Ok(())
    }

    pub(crate) async fn all_insights(&self) -> StoreResult<Vec<DeepInsight>> {
        let rows: Vec<InsightRow> =
            sqlx::query_as("SELECT * FROM deep_insights ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await
                .context(LOAD)?;
        Ok(rows.into_iter().map(InsightRow::into_insight).collect())
    }
}
