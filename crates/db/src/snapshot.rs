// crates/db/src/snapshot.rs
//! Whole-store snapshot export and import.
//!
//! The snapshot is a plain serde value: all collections plus a metadata
//! block. Import feeds every record back through the same creation hooks as
//! live writes (there is no validation bypass) and reports per-record
//! failures instead of aborting the batch.

use crate::{Database, StoreResult};
use chrono::Utc;
use haven_core::{
    AppSettings, AppSettingsPatch, DeepInsight, ImportedBackup, JournalEntry, MoodEntry,
    NewDeepInsight, NewImportedBackup, NewJournalEntry, NewMoodEntry, NewTherapyMessage,
    NewTherapySession, TherapyMessage, TherapySession, UserPreferences, UserPreferencesPatch,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Metadata block identifying a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    pub schema_version: i64,
    pub exported_at: i64,
    pub total_entries: i64,
}

/// A complete serialized copy of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    pub meta: SnapshotMeta,
    pub entries: Vec<JournalEntry>,
    pub mood_entries: Vec<MoodEntry>,
    pub insights: Vec<DeepInsight>,
    pub sessions: Vec<TherapySession>,
    pub messages: Vec<TherapyMessage>,
    pub backups: Vec<ImportedBackup>,
    pub settings: AppSettings,
    pub preferences: UserPreferences,
}

/// Outcome of an import. Rejected records are counted, never fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported: u64,
    pub errors: u64,
}

impl Database {
    /// Serialize every collection plus a metadata block.
    pub async fn export_snapshot(&self) -> StoreResult<JournalSnapshot> {
        let entries = self.all_entries().await?;
        let mood_entries = self.all_moods().await?;
        let insights = self.all_insights().await?;
        let sessions = self.all_sessions().await?;
        let messages = self.all_messages().await?;
        let backups = self.all_backups().await?;
        let settings = self.get_settings().await?;
        let preferences = self.get_preferences().await?;

        Ok(JournalSnapshot {
            meta: SnapshotMeta {
                schema_version: self.schema_version() as i64,
                exported_at: Utc::now().timestamp(),
                total_entries: entries.len() as i64,
            },
            entries,
            mood_entries,
            insights,
            sessions,
            messages,
            backups,
            settings,
            preferences,
        })
    }

    /// Load a snapshot into the store. Every record re-enters through the
    /// creation hooks (ids and timestamps are newly assigned; the date
    /// repair routine realigns `created_at` afterwards if desired).
    /// References between imported records (message→session, insight→entry)
    /// are remapped onto the fresh ids. The cache is cleared once at the
    /// end.
    pub async fn import_snapshot(&self, snapshot: JournalSnapshot) -> StoreResult<ImportReport> {
        let mut report = ImportReport::default();

        let mut entry_ids: HashMap<i64, i64> = HashMap::new();
        for entry in &snapshot.entries {
            let draft = NewJournalEntry {
                title: entry.title.clone(),
                content: entry.content.clone(),
                date: entry.date.clone(),
                time: entry.time.clone(),
                mood: entry.mood,
                tags: entry.tags.clone(),
                location: entry.location.clone(),
                moon_phase: entry.moon_phase.clone(),
                weather: entry.weather.clone(),
                ai_insights: entry.ai_insights.clone(),
            };
            match self.insert_entry(&draft).await {
                Ok(imported) => {
                    entry_ids.insert(entry.id, imported.id);
                    report.imported += 1;
                }
                Err(e) => {
                    warn!(id = entry.id, error = %e, "skipped journal entry during import");
                    report.errors += 1;
                }
            }
        }

        for mood in &snapshot.mood_entries {
            let draft = NewMoodEntry {
                date: mood.date.clone(),
                mood: mood.mood,
                notes: mood.notes.clone(),
                factors: mood.factors.clone(),
                energy: mood.energy,
                sleep: mood.sleep,
                stress: mood.stress,
                anxiety: mood.anxiety,
            };
            match self.insert_mood(&draft).await {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    warn!(id = mood.id, error = %e, "skipped mood entry during import");
                    report.errors += 1;
                }
            }
        }

        for insight in &snapshot.insights {
            // Weak reference: remap onto the freshly assigned entry id when
            // the entry came along in this snapshot, otherwise keep the old
            // id, since an insight may legitimately predate its entry.
            let journal_entry_id = insight
                .journal_entry_id
                .map(|old| entry_ids.get(&old).copied().unwrap_or(old));
            let draft = NewDeepInsight {
                journal_entry_id,
                primary_emotion: insight.primary_emotion.clone(),
                intensity: insight.intensity,
                energy_level: insight.energy_level.clone(),
                sentiment: insight.sentiment.clone(),
                themes: insight.themes.clone(),
                suggestions: insight.suggestions.clone(),
                reflection_prompts: insight.reflection_prompts.clone(),
                compassionate_reflection: insight.compassionate_reflection.clone(),
                spiritual_quote: insight.spiritual_quote.clone(),
                healing_guidance: insight.healing_guidance.clone(),
                shadow_work: insight.shadow_work.clone(),
                light_work: insight.light_work.clone(),
                confidence: insight.confidence,
            };
            match self.insert_insight(&draft).await {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    warn!(id = insight.id, error = %e, "skipped insight during import");
                    report.errors += 1;
                }
            }
        }

        let mut session_ids: HashMap<i64, i64> = HashMap::new();
        for session in &snapshot.sessions {
            let draft = NewTherapySession {
                date: session.date.clone(),
                exercises: session.exercises.clone(),
                summary: session.summary.clone(),
                mood: session.mood,
                tags: session.tags.clone(),
            };
            match self.insert_session(&draft).await {
                Ok(imported) => {
                    session_ids.insert(session.id, imported.id);
                    report.imported += 1;
                }
                Err(e) => {
                    warn!(id = session.id, error = %e, "skipped therapy session during import");
                    report.errors += 1;
                }
            }
        }

        for message in &snapshot.messages {
            // Messages are owned by their session; one whose session did not
            // import has nothing to attach to.
            let Some(&session_id) = session_ids.get(&message.session_id) else {
                warn!(
                    id = message.id,
                    session_id = message.session_id,
                    "skipped message whose session did not import"
                );
                report.errors += 1;
                continue;
            };
            let draft = NewTherapyMessage {
                session_id,
                content: message.content.clone(),
                sender: message.sender,
                timestamp: Some(message.timestamp),
                kind: message.kind.clone(),
            };
            match self.insert_message(&draft).await {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    warn!(id = message.id, error = %e, "skipped therapy message during import");
                    report.errors += 1;
                }
            }
        }

        for backup in &snapshot.backups {
            let draft = NewImportedBackup {
                title: backup.title.clone(),
                content: backup.content.clone(),
                date: backup.date.clone(),
                time: backup.time.clone(),
                mood: backup.mood,
                tags: backup.tags.clone(),
                location: backup.location.clone(),
                moon_phase: backup.moon_phase.clone(),
                ai_insights: backup.ai_insights.clone(),
                original_import_date: Some(backup.original_import_date),
                import_source: backup.import_source.clone(),
                import_method: backup.import_method,
                original_file_name: backup.original_file_name.clone(),
                checksum: Some(backup.checksum.clone()),
            };
            match self.insert_backup(&draft).await {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    warn!(id = backup.id, error = %e, "skipped backup during import");
                    report.errors += 1;
                }
            }
        }

        self.update_settings(AppSettingsPatch {
            theme: Some(snapshot.settings.theme.clone()),
            daily_reminder: Some(snapshot.settings.daily_reminder),
            reminder_time: snapshot.settings.reminder_time.clone(),
        })
        .await?;
        self.update_preferences(UserPreferencesPatch {
            display_name: snapshot.preferences.display_name.clone(),
            week_starts_monday: Some(snapshot.preferences.week_starts_monday),
            favorite_tags: Some(snapshot.preferences.favorite_tags.clone()),
        })
        .await?;

        self.cache().clear();
        Ok(report)
    }
}
