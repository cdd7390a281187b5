// crates/core/src/error.rs
use thiserror::Error;

/// A lifecycle hook rejected a write. No partial record is persisted when
/// one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Content cannot be empty")]
    EmptyContent,

    #[error("Mood must be between 1 and 5, got {value}")]
    MoodOutOfRange { value: i64 },

    #[error("Import source is required")]
    MissingImportSource,
}
