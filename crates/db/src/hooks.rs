// crates/db/src/hooks.rs
//! Lifecycle hooks: validate-then-stamp steps run synchronously by every
//! write path, before the SQL statement executes.
//!
//! Each hook is a pure function over the draft record and a caller-provided
//! clock value, so the rules are testable without a live store. A hook
//! rejection aborts only the single write it guards.

use haven_core::{
    checksum, NewImportedBackup, NewJournalEntry, NewMoodEntry, NewTherapyMessage,
    ValidationError,
};

/// Timestamps assigned to a freshly created record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteStamp {
    pub created_at: i64,
    pub updated_at: i64,
}

impl WriteStamp {
    pub fn at(now: i64) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }
}

/// Extra fields stamped onto a new imported backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupStamp {
    pub stamp: WriteStamp,
    pub original_import_date: i64,
    pub checksum: String,
}

fn require_content(content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(())
}

fn require_mood_in_range(mood: i64) -> Result<(), ValidationError> {
    if !(1..=5).contains(&mood) {
        return Err(ValidationError::MoodOutOfRange { value: mood });
    }
    Ok(())
}

/// Create hook for journal entries: non-empty content, fresh timestamps.
/// `entry.mood` is deliberately not range-checked here; only MoodEntry
/// carries that invariant.
pub fn on_create_entry(draft: &NewJournalEntry, now: i64) -> Result<WriteStamp, ValidationError> {
    require_content(&draft.content)?;
    Ok(WriteStamp::at(now))
}

/// Update hook for journal entries: content may only be replaced with
/// something non-empty. Returns the `updated_at` to stamp; any
/// caller-supplied timestamp is discarded by construction (patches cannot
/// carry one).
pub fn on_update_entry(content: Option<&str>, now: i64) -> Result<i64, ValidationError> {
    if let Some(content) = content {
        require_content(content)?;
    }
    Ok(now)
}

/// Create hook for mood entries: mood must sit in 1..=5.
pub fn on_create_mood(draft: &NewMoodEntry, now: i64) -> Result<WriteStamp, ValidationError> {
    require_mood_in_range(draft.mood)?;
    Ok(WriteStamp::at(now))
}

/// Update hook for mood entries. The range check applies on update as well
/// as create, closing the asymmetry the app historically had.
pub fn on_update_mood(mood: Option<i64>, now: i64) -> Result<i64, ValidationError> {
    if let Some(mood) = mood {
        require_mood_in_range(mood)?;
    }
    Ok(now)
}

/// Create hook for imported backups: non-empty content, a present import
/// source, and derived fields (import date, checksum) filled in when the
/// caller did not supply them.
pub fn on_create_backup(
    draft: &NewImportedBackup,
    now: i64,
) -> Result<BackupStamp, ValidationError> {
    require_content(&draft.content)?;
    if draft.import_source.trim().is_empty() {
        return Err(ValidationError::MissingImportSource);
    }
    let checksum = draft
        .checksum
        .clone()
        .unwrap_or_else(|| checksum(&draft.content, &draft.date));
    Ok(BackupStamp {
        stamp: WriteStamp::at(now),
        original_import_date: draft.original_import_date.unwrap_or(now),
        checksum,
    })
}

/// Create hook for therapy sessions. Sessions have no rejectable invariant;
/// the hook exists so sessions get stamped the same way as everything else
/// (empty exercise/tag lists are the draft type's defaults).
pub fn on_create_session(now: i64) -> WriteStamp {
    WriteStamp::at(now)
}

/// Create hook for therapy messages: stamps the message timestamp when the
/// caller did not supply one.
pub fn on_create_message(draft: &NewTherapyMessage, now: i64) -> i64 {
    draft.timestamp.unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::{ImportMethod, MessageSender};

    fn entry_draft(content: &str) -> NewJournalEntry {
        NewJournalEntry {
            content: content.to_string(),
            date: "2024-05-01".to_string(),
            ..Default::default()
        }
    }

    fn mood_draft(mood: i64) -> NewMoodEntry {
        NewMoodEntry {
            date: "2024-05-01".to_string(),
            mood,
            ..Default::default()
        }
    }

    fn backup_draft() -> NewImportedBackup {
        NewImportedBackup {
            title: None,
            content: "carried over from the old app".to_string(),
            date: "2024-05-01".to_string(),
            time: None,
            mood: Some(4),
            tags: vec![],
            location: None,
            moon_phase: None,
            ai_insights: None,
            original_import_date: None,
            import_source: "daylio-export.csv".to_string(),
            import_method: ImportMethod::Manual,
            original_file_name: None,
            checksum: None,
        }
    }

    #[test]
    fn test_entry_create_stamps_both_timestamps() {
        let stamp = on_create_entry(&entry_draft("a good day"), 1700000000).unwrap();
        assert_eq!(stamp.created_at, 1700000000);
        assert_eq!(stamp.updated_at, 1700000000);
    }

    #[test]
    fn test_entry_create_rejects_whitespace_content() {
        let err = on_create_entry(&entry_draft("   \n\t"), 1700000000).unwrap_err();
        assert_eq!(err, ValidationError::EmptyContent);
    }

    #[test]
    fn test_entry_update_rejects_empty_replacement() {
        let err = on_update_entry(Some(""), 1700000000).unwrap_err();
        assert_eq!(err, ValidationError::EmptyContent);
        // Patches that leave content alone pass
        assert_eq!(on_update_entry(None, 1700000001).unwrap(), 1700000001);
    }

    #[test]
    fn test_mood_create_range() {
        assert!(on_create_mood(&mood_draft(1), 0).is_ok());
        assert!(on_create_mood(&mood_draft(5), 0).is_ok());
        assert_eq!(
            on_create_mood(&mood_draft(0), 0).unwrap_err(),
            ValidationError::MoodOutOfRange { value: 0 }
        );
        assert_eq!(
            on_create_mood(&mood_draft(6), 0).unwrap_err(),
            ValidationError::MoodOutOfRange { value: 6 }
        );
    }

    #[test]
    fn test_mood_update_range_checked_too() {
        assert!(on_update_mood(Some(3), 0).is_ok());
        assert!(on_update_mood(None, 0).is_ok());
        assert_eq!(
            on_update_mood(Some(9), 0).unwrap_err(),
            ValidationError::MoodOutOfRange { value: 9 }
        );
    }

    #[test]
    fn test_backup_create_derives_checksum_and_import_date() {
        let draft = backup_draft();
        let stamped = on_create_backup(&draft, 1700000000).unwrap();
        assert_eq!(stamped.original_import_date, 1700000000);
        assert_eq!(stamped.checksum, checksum(&draft.content, &draft.date));
    }

    #[test]
    fn test_backup_create_keeps_supplied_checksum() {
        let draft = NewImportedBackup {
            checksum: Some("abc123".to_string()),
            original_import_date: Some(42),
            ..backup_draft()
        };
        let stamped = on_create_backup(&draft, 1700000000).unwrap();
        assert_eq!(stamped.checksum, "abc123");
        assert_eq!(stamped.original_import_date, 42);
    }

    #[test]
    fn test_backup_create_requires_source() {
        let draft = NewImportedBackup {
            import_source: "  ".to_string(),
            ..backup_draft()
        };
        assert_eq!(
            on_create_backup(&draft, 0).unwrap_err(),
            ValidationError::MissingImportSource
        );
    }

    #[test]
    fn test_message_timestamp_defaulting() {
        let draft = NewTherapyMessage {
            session_id: 1,
            content: "hello".to_string(),
            sender: MessageSender::User,
            timestamp: None,
            kind: None,
        };
        assert_eq!(on_create_message(&draft, 77), 77);
        let draft = NewTherapyMessage {
            timestamp: Some(12),
            ..draft
        };
        assert_eq!(on_create_message(&draft, 77), 12);
    }
}
