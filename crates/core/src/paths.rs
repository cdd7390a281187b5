// crates/core/src/paths.rs
//! Centralized path functions for on-disk storage locations.
//!
//! Single source of truth, so no ad-hoc `dirs::data_dir().join(...)` elsewhere.

use std::path::PathBuf;

/// App data root: `~/Library/Application Support/haven/` (macOS) or
/// `~/.local/share/haven/` (Linux). Journal contents are user data, not a
/// rebuildable cache, so this lives under the data dir.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("haven"))
}

/// SQLite database file: `<app_data_dir>/haven.db`.
pub fn db_path() -> Option<PathBuf> {
    app_data_dir().map(|d| d.join("haven.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_data_dir() {
        let dir = app_data_dir().unwrap();
        assert!(dir.to_string_lossy().contains("haven"));
    }

    #[test]
    fn test_db_path() {
        let path = db_path().unwrap();
        assert!(path.to_string_lossy().ends_with("haven.db"));
    }
}
