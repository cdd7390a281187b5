//! Shared fixtures for the store integration tests.
#![allow(dead_code)]

use haven_core::{
    ImportMethod, MessageSender, NewImportedBackup, NewJournalEntry, NewMoodEntry,
    NewTherapyMessage, NewTherapySession,
};
use haven_db::Database;

pub fn make_entry(content: &str, date: &str) -> NewJournalEntry {
    NewJournalEntry {
        title: Some(format!("Entry for {}", date)),
        content: content.to_string(),
        date: date.to_string(),
        time: Some("21:15".to_string()),
        mood: Some(4),
        tags: vec!["reflection".to_string()],
        location: None,
        moon_phase: Some("Waxing Gibbous".to_string()),
        weather: None,
        ai_insights: None,
    }
}

pub fn make_tagged_entry(content: &str, date: &str, tags: &[&str]) -> NewJournalEntry {
    NewJournalEntry {
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..make_entry(content, date)
    }
}

pub fn make_mood(date: &str, mood: i64) -> NewMoodEntry {
    NewMoodEntry {
        date: date.to_string(),
        mood,
        notes: None,
        factors: vec![],
        energy: Some(3),
        sleep: Some(7.5),
        stress: None,
        anxiety: None,
    }
}

pub fn make_session(date: &str) -> NewTherapySession {
    NewTherapySession {
        date: date.to_string(),
        exercises: vec!["box breathing".to_string()],
        summary: None,
        mood: Some(3),
        tags: vec![],
    }
}

pub fn make_message(session_id: i64, content: &str, sender: MessageSender) -> NewTherapyMessage {
    NewTherapyMessage {
        session_id,
        content: content.to_string(),
        sender,
        timestamp: None,
        kind: None,
    }
}

pub fn make_backup(content: &str, date: &str, source: &str) -> NewImportedBackup {
    NewImportedBackup {
        title: None,
        content: content.to_string(),
        date: date.to_string(),
        time: None,
        mood: None,
        tags: vec![],
        location: None,
        moon_phase: None,
        ai_insights: None,
        original_import_date: None,
        import_source: source.to_string(),
        import_method: ImportMethod::Manual,
        original_file_name: None,
        checksum: None,
    }
}

/// Rewrite a journal entry's created_at directly, bypassing the repository.
/// Clears the cache afterwards so reads see the raw change.
pub async fn set_entry_created_at(db: &Database, id: i64, created_at: i64) {
    sqlx::query("UPDATE journal_entries SET created_at = ?1 WHERE id = ?2")
        .bind(created_at)
        .bind(id)
        .execute(db.pool())
        .await
        .unwrap();
    db.cache().clear();
}

/// Same, for mood entries.
pub async fn set_mood_created_at(db: &Database, id: i64, created_at: i64) {
    sqlx::query("UPDATE mood_entries SET created_at = ?1 WHERE id = ?2")
        .bind(created_at)
        .bind(id)
        .execute(db.pool())
        .await
        .unwrap();
    db.cache().clear();
}
