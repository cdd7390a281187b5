// crates/db/src/queries/row_types.rs
// Internal row types: the raw SQLite shape of each collection, plus the
// JSON-column encode/decode helpers shared by the query modules.

use haven_core::{
    DeepInsight, ImportMethod, ImportedBackup, JournalEntry, LocationData, MessageSender,
    MoodEntry, Sentiment, TherapyMessage, TherapySession, WeatherSnapshot,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::Row;

/// Encode a string list for a `TEXT NOT NULL DEFAULT '[]'` column.
pub(crate) fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encode an optional structured value for a nullable JSON TEXT column.
pub(crate) fn encode_opt<T: Serialize>(value: &Option<T>) -> Option<String> {
    value
        .as_ref()
        .and_then(|v| serde_json::to_string(v).ok())
}

pub(crate) fn decode_opt<T: DeserializeOwned>(raw: Option<String>) -> Option<T> {
    raw.and_then(|r| serde_json::from_str(&r).ok())
}

#[derive(Debug)]
pub(crate) struct EntryRow {
    id: i64,
    title: Option<String>,
    content: String,
    date: String,
    time: Option<String>,
    mood: Option<i64>,
    tags: String,
    location: Option<String>,
    moon_phase: Option<String>,
    weather: Option<String>,
    ai_insights: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for EntryRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            mood: row.try_get("mood")?,
            tags: row.try_get("tags")?,
            location: row.try_get("location")?,
            moon_phase: row.try_get("moon_phase")?,
            weather: row.try_get("weather")?,
            ai_insights: row.try_get("ai_insights")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl EntryRow {
    pub(crate) fn into_entry(self) -> JournalEntry {
        JournalEntry {
            id: self.id,
            title: self.title,
            content: self.content,
            date: self.date,
            time: self.time,
            mood: self.mood,
            tags: decode_list(&self.tags),
            location: decode_opt::<LocationData>(self.location),
            moon_phase: self.moon_phase,
            weather: decode_opt::<WeatherSnapshot>(self.weather),
            ai_insights: decode_opt(self.ai_insights),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug)]
pub(crate) struct MoodRow {
    id: i64,
    date: String,
    mood: i64,
    notes: Option<String>,
    factors: String,
    energy: Option<i64>,
    sleep: Option<f64>,
    stress: Option<i64>,
    anxiety: Option<i64>,
    created_at: i64,
    updated_at: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for MoodRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            date: row.try_get("date")?,
            mood: row.try_get("mood")?,
            notes: row.try_get("notes")?,
            factors: row.try_get("factors")?,
            energy: row.try_get("energy")?,
            sleep: row.try_get("sleep")?,
            stress: row.try_get("stress")?,
            anxiety: row.try_get("anxiety")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl MoodRow {
    pub(crate) fn into_mood(self) -> MoodEntry {
        MoodEntry {
            id: self.id,
            date: self.date,
            mood: self.mood,
            notes: self.notes,
            factors: decode_list(&self.factors),
            energy: self.energy,
            sleep: self.sleep,
            stress: self.stress,
            anxiety: self.anxiety,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug)]
pub(crate) struct InsightRow {
    id: i64,
    journal_entry_id: Option<i64>,
    primary_emotion: String,
    intensity: i64,
    energy_level: Option<String>,
    sentiment: Option<String>,
    themes: String,
    suggestions: String,
    reflection_prompts: String,
    compassionate_reflection: Option<String>,
    spiritual_quote: Option<String>,
    healing_guidance: Option<String>,
    shadow_work: Option<String>,
    light_work: Option<String>,
    confidence: Option<f64>,
    created_at: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for InsightRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            journal_entry_id: row.try_get("journal_entry_id")?,
            primary_emotion: row.try_get("primary_emotion")?,
            intensity: row.try_get("intensity")?,
            energy_level: row.try_get("energy_level")?,
            sentiment: row.try_get("sentiment")?,
            themes: row.try_get("themes")?,
            suggestions: row.try_get("suggestions")?,
            reflection_prompts: row.try_get("reflection_prompts")?,
            compassionate_reflection: row.try_get("compassionate_reflection")?,
            spiritual_quote: row.try_get("spiritual_quote")?,
            healing_guidance: row.try_get("healing_guidance")?,
            shadow_work: row.try_get("shadow_work")?,
            light_work: row.try_get("light_work")?,
            confidence: row.try_get("confidence")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl InsightRow {
    pub(crate) fn into_insight(self) -> DeepInsight {
        DeepInsight {
            id: self.id,
            journal_entry_id: self.journal_entry_id,
            primary_emotion: self.primary_emotion,
            intensity: self.intensity,
            energy_level: self.energy_level,
            sentiment: decode_opt::<Sentiment>(self.sentiment),
            themes: decode_list(&self.themes),
            suggestions: decode_list(&self.suggestions),
            reflection_prompts: decode_list(&self.reflection_prompts),
            compassionate_reflection: self.compassionate_reflection,
            spiritual_quote: self.spiritual_quote,
            healing_guidance: self.healing_guidance,
            shadow_work: self.shadow_work,
            light_work: self.light_work,
            confidence: self.confidence,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug)]
pub(crate) struct SessionRow {
    id: i64,
    date: String,
    exercises: String,
    summary: Option<String>,
    mood: Option<i64>,
    tags: String,
    created_at: i64,
    updated_at: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for SessionRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            date: row.try_get("date")?,
            exercises: row.try_get("exercises")?,
            summary: row.try_get("summary")?,
            mood: row.try_get("mood")?,
            tags: row.try_get("tags")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl SessionRow {
    pub(crate) fn into_session(self) -> TherapySession {
        TherapySession {
            id: self.id,
            date: self.date,
            exercises: decode_list(&self.exercises),
            summary: self.summary,
            mood: self.mood,
            tags: decode_list(&self.tags),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug)]
pub(crate) struct MessageRow {
    id: i64,
    session_id: i64,
    content: String,
    sender: String,
    timestamp: i64,
    kind: Option<String>,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for MessageRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            content: row.try_get("content")?,
            sender: row.try_get("sender")?,
            timestamp: row.try_get("timestamp")?,
            kind: row.try_get("kind")?,
        })
    }
}

impl MessageRow {
    pub(crate) fn into_message(self) -> TherapyMessage {
        TherapyMessage {
            id: self.id,
            session_id: self.session_id,
            content: self.content,
            sender: MessageSender::from_db_str(&self.sender),
            timestamp: self.timestamp,
            kind: self.kind,
        }
    }
}

#[derive(Debug)]
pub(crate) struct BackupRow {
    id: i64,
    title: Option<String>,
    content: String,
    date: String,
    time: Option<String>,
    mood: Option<i64>,
    tags: String,
    location: Option<String>,
    moon_phase: Option<String>,
    ai_insights: Option<String>,
    original_import_date: i64,
    import_source: String,
    import_method: String,
    original_file_name: Option<String>,
    checksum: String,
    created_at: i64,
    updated_at: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for BackupRow {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            mood: row.try_get("mood")?,
            tags: row.try_get("tags")?,
            location: row.try_get("location")?,
            moon_phase: row.try_get("moon_phase")?,
            ai_insights: row.try_get("ai_insights")?,
            original_import_date: row.try_get("original_import_date")?,
            import_source: row.try_get("import_source")?,
            import_method: row.try_get("import_method")?,
            original_file_name: row.try_get("original_file_name")?,
            checksum: row.try_get("checksum")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl BackupRow {
    pub(crate) fn into_backup(self) -> ImportedBackup {
        ImportedBackup {
            id: self.id,
            title: self.title,
            content: self.content,
            date: self.date,
            time: self.time,
            mood: self.mood,
            tags: decode_list(&self.tags),
            location: decode_opt::<LocationData>(self.location),
            moon_phase: self.moon_phase,
            ai_insights: decode_opt(self.ai_insights),
            original_import_date: self.original_import_date,
            import_source: self.import_source,
            import_method: ImportMethod::from_db_str(&self.import_method),
            original_file_name: self.original_file_name,
            checksum: self.checksum,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
