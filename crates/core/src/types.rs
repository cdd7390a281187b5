// crates/core/src/types.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured geolocation attached to an entry by the enrichment layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Weather snapshot captured when the entry was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

/// A user-authored journal entry.
///
/// `mood` here is advisory display data; the 1..=5 bound is enforced on
/// [`MoodEntry`] only, an asymmetry inherited from the app's history.
/// `created_at`/`updated_at` are stamped by the store, never by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: i64,
    pub title: Option<String>,
    pub content: String,
    /// Calendar date the entry is about, `YYYY-MM-DD`.
    pub date: String,
    /// Optional clock string, `HH:MM`.
    pub time: Option<String>,
    pub mood: Option<i64>,
    pub tags: Vec<String>,
    pub location: Option<LocationData>,
    pub moon_phase: Option<String>,
    pub weather: Option<WeatherSnapshot>,
    /// Embedded analysis result, stored verbatim as produced upstream.
    pub ai_insights: Option<Value>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Caller-supplied fields for a new journal entry; id and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    pub title: Option<String>,
    pub content: String,
    pub date: String,
    pub time: Option<String>,
    pub mood: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Option<LocationData>,
    pub moon_phase: Option<String>,
    pub weather: Option<WeatherSnapshot>,
    pub ai_insights: Option<Value>,
}

/// Partial update for a journal entry. `None` fields are left unchanged;
/// there is deliberately no way to supply timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub mood: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub location: Option<LocationData>,
    pub moon_phase: Option<String>,
    pub weather: Option<WeatherSnapshot>,
    pub ai_insights: Option<Value>,
}

/// A standalone daily mood sample. `mood` is validated to 1..=5 at write
/// time, on both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: i64,
    pub date: String,
    pub mood: i64,
    pub notes: Option<String>,
    pub factors: Vec<String>,
    pub energy: Option<i64>,
    pub sleep: Option<f64>,
    pub stress: Option<i64>,
    pub anxiety: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMoodEntry {
    pub date: String,
    pub mood: i64,
    pub notes: Option<String>,
    #[serde(default)]
    pub factors: Vec<String>,
    pub energy: Option<i64>,
    pub sleep: Option<f64>,
    pub stress: Option<i64>,
    pub anxiety: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryPatch {
    pub date: Option<String>,
    pub mood: Option<i64>,
    pub notes: Option<String>,
    pub factors: Option<Vec<String>>,
    pub energy: Option<i64>,
    pub sleep: Option<f64>,
    pub stress: Option<i64>,
    pub anxiety: Option<i64>,
}

/// Sentiment block inside a deep insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentiment {
    pub score: f64,
    pub label: String,
    pub confidence: f64,
    #[serde(default)]
    pub emotions: Vec<String>,
}

/// An AI-style analysis result, persisted verbatim as produced by the
/// external generator.
///
/// `journal_entry_id` is a weak reference: the store never enforces that the
/// entry exists, and an insight outlives its entry's deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepInsight {
    pub id: i64,
    pub journal_entry_id: Option<i64>,
    pub primary_emotion: String,
    /// Emotional intensity on a 0..=10 scale.
    pub intensity: i64,
    pub energy_level: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub themes: Vec<String>,
    pub suggestions: Vec<String>,
    pub reflection_prompts: Vec<String>,
    pub compassionate_reflection: Option<String>,
    pub spiritual_quote: Option<String>,
    pub healing_guidance: Option<String>,
    pub shadow_work: Option<String>,
    pub light_work: Option<String>,
    /// Generator confidence, 0..=1.
    pub confidence: Option<f64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeepInsight {
    pub journal_entry_id: Option<i64>,
    pub primary_emotion: String,
    pub intensity: i64,
    pub energy_level: Option<String>,
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub reflection_prompts: Vec<String>,
    pub compassionate_reflection: Option<String>,
    pub spiritual_quote: Option<String>,
    pub healing_guidance: Option<String>,
    pub shadow_work: Option<String>,
    pub light_work: Option<String>,
    pub confidence: Option<f64>,
}

/// Who authored a therapy chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Therapist,
}

impl MessageSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageSender::User => "user",
            MessageSender::Therapist => "therapist",
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s {
            "therapist" => MessageSender::Therapist,
            _ => MessageSender::User,
        }
    }
}

/// A chat-like therapy session. Messages live in their own collection keyed
/// by `session_id`; deleting a session removes them too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapySession {
    pub id: i64,
    pub date: String,
    pub exercises: Vec<String>,
    pub summary: Option<String>,
    pub mood: Option<i64>,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTherapySession {
    pub date: String,
    #[serde(default)]
    pub exercises: Vec<String>,
    pub summary: Option<String>,
    pub mood: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapySessionPatch {
    pub date: Option<String>,
    pub exercises: Option<Vec<String>>,
    pub summary: Option<String>,
    pub mood: Option<i64>,
    pub tags: Option<Vec<String>>,
}

/// A single message within a therapy session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapyMessage {
    pub id: i64,
    pub session_id: i64,
    pub content: String,
    pub sender: MessageSender,
    pub timestamp: i64,
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTherapyMessage {
    pub session_id: i64,
    pub content: String,
    pub sender: MessageSender,
    /// Stamped by the store when absent.
    pub timestamp: Option<i64>,
    pub kind: Option<String>,
}

/// How a backup record entered the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMethod {
    Manual,
    Auto,
}

impl ImportMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportMethod::Manual => "manual",
            ImportMethod::Auto => "auto",
        }
    }

    pub fn from_db_str(s: &str) -> Self {
        match s {
            "auto" => ImportMethod::Auto,
            _ => ImportMethod::Manual,
        }
    }
}

/// An archival copy of a journal entry captured during import.
///
/// Restoring copies it into a fresh [`JournalEntry`]; the backup itself is
/// never consumed and never auto-expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedBackup {
    pub id: i64,
    pub title: Option<String>,
    pub content: String,
    pub date: String,
    pub time: Option<String>,
    pub mood: Option<i64>,
    pub tags: Vec<String>,
    pub location: Option<LocationData>,
    pub moon_phase: Option<String>,
    pub ai_insights: Option<Value>,
    pub original_import_date: i64,
    pub import_source: String,
    pub import_method: ImportMethod,
    pub original_file_name: Option<String>,
    /// Fingerprint of (content, date) used for duplicate detection.
    pub checksum: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewImportedBackup {
    pub title: Option<String>,
    pub content: String,
    pub date: String,
    pub time: Option<String>,
    pub mood: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: Option<LocationData>,
    pub moon_phase: Option<String>,
    pub ai_insights: Option<Value>,
    /// Defaults to the write time when absent.
    pub original_import_date: Option<i64>,
    pub import_source: String,
    pub import_method: ImportMethod,
    pub original_file_name: Option<String>,
    /// Computed from (content, date) when absent.
    pub checksum: Option<String>,
}

/// Application settings (single logical row, created lazily with defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub theme: String,
    pub daily_reminder: bool,
    pub reminder_time: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
            daily_reminder: false,
            reminder_time: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingsPatch {
    pub theme: Option<String>,
    pub daily_reminder: Option<bool>,
    pub reminder_time: Option<String>,
}

/// Per-user preferences (single logical row, created lazily with defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub display_name: Option<String>,
    pub week_starts_monday: bool,
    pub favorite_tags: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            display_name: None,
            week_starts_monday: true,
            favorite_tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferencesPatch {
    pub display_name: Option<String>,
    pub week_starts_monday: Option<bool>,
    pub favorite_tags: Option<Vec<String>>,
}
