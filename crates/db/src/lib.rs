// crates/db/src/lib.rs
// SQLite persistence and caching layer for the haven journal.

pub mod analytics;
pub mod cache;
pub mod hooks;
pub mod maintenance;
mod migrations;
mod queries;
pub mod snapshot;

pub use analytics::{AnalyticsSummary, TagCount};
pub use cache::{Clock, QueryCache, ANALYTICS_TTL, DEFAULT_TTL, SEARCH_TTL};
pub use maintenance::DateRepairReport;
pub use queries::StorageStats;
pub use snapshot::{ImportReport, JournalSnapshot, SnapshotMeta};

use haven_core::ValidationError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A lifecycle hook rejected the write; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced id does not exist for update/delete/restore.
    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: i64 },

    /// Engine failure, wrapped with a per-operation message. The display
    /// string is suitable for the UI; the sqlx detail stays on the source
    /// chain for logs.
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to determine data directory")]
    NoDataDir,

    #[error("Failed to create database directory: {0}")]
    CreateDir(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Attach a stable per-operation message to an engine error.
pub(crate) trait SqlxContext<T> {
    fn context(self, context: &'static str) -> StoreResult<T>;
}

impl<T> SqlxContext<T> for Result<T, sqlx::Error> {
    fn context(self, context: &'static str) -> StoreResult<T> {
        self.map_err(|source| StoreError::Storage { context, source })
    }
}

/// Main store handle: a SQLite connection pool plus the process-lifetime
/// query cache. Cloning shares both.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    db_path: PathBuf,
    cache: QueryCache,
}

impl Database {
    /// Open (or create) the database at the given path and run any pending
    /// migrations. Idempotent: reopening an up-to-date store is a no-op.
    pub async fn new(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .context("Failed to open journal database")?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .context("Failed to open journal database")?;

        let db = Self {
            pool,
            db_path: path.to_owned(),
            cache: QueryCache::new(),
        };
        db.run_migrations().await?;

        info!("Journal database opened at {}", path.display());
        Ok(db)
    }

    /// Create an in-memory database (for testing).
    ///
    /// Uses `shared_cache(true)` so all pool connections see the same
    /// in-memory database; without it each connection gets its own.
    pub async fn new_in_memory() -> StoreResult<Self> {
        Self::new_in_memory_with_clock(cache::system_clock()).await
    }

    /// In-memory database with an injected cache clock, so tests can drive
    /// TTL expiry deterministically.
    pub async fn new_in_memory_with_clock(clock: Clock) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("Failed to open journal database")?
            .shared_cache(true)
            .busy_timeout(std::time::Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .context("Failed to open journal database")?;
        let db = Self {
            pool,
            db_path: PathBuf::new(),
            cache: QueryCache::with_clock(clock),
        };
        db.run_migrations().await?;
        Ok(db)
    }

    /// Open the database at the default location under the user data dir.
    pub async fn open_default() -> StoreResult<Self> {
        let path = haven_core::paths::db_path().ok_or(StoreError::NoDataDir)?;
        Self::new(&path).await
    }

    /// Run all pending inline migrations.
    ///
    /// A `_migrations` table records which versions have been applied, so
    /// non-idempotent statements (ALTER TABLE ADD COLUMN) run exactly once.
    /// The history is strictly additive: new tables, new indexes, new
    /// columns, never a drop or rename.
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query("CREATE TABLE IF NOT EXISTS _migrations (version INTEGER PRIMARY KEY)")
            .execute(&self.pool)
            .await
            .context("Failed to run schema migrations")?;

        let row: (i64,) = sqlx::query_as("SELECT COALESCE(MAX(version), 0) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .context("Failed to run schema migrations")?;
        let current_version = row.0 as usize;

        for (i, migration) in migrations::MIGRATIONS.iter().enumerate() {
            let version = i + 1; // 1-based
            if version <= current_version {
                continue;
            }
            sqlx::query(migration)
                .execute(&self.pool)
                .await
                .context("Failed to run schema migrations")?;
            sqlx::query("INSERT INTO _migrations (version) VALUES (?)")
                .bind(version as i64)
                .execute(&self.pool)
                .await
                .context("Failed to run schema migrations")?;
            info!(version, "applied schema migration");
        }

        Ok(())
    }

    /// Latest schema version, i.e. the number of known migrations.
    pub fn schema_version(&self) -> usize {
        migrations::MIGRATIONS.len()
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The query cache in front of read operations.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Path to the database file. Empty for in-memory databases.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_database() {
        let db = Database::new_in_memory()
            .await
            .expect("should create in-memory database");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM journal_entries")
            .fetch_one(db.pool())
            .await
            .expect("journal_entries table should exist");
        assert_eq!(count.0, 0);

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM imported_backups")
            .fetch_one(db.pool())
            .await
            .expect("imported_backups table should exist");
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let db = Database::new_in_memory()
            .await
            .expect("first open should succeed");

        db.run_migrations()
            .await
            .expect("second migration run should succeed");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM mood_entries")
            .fetch_one(db.pool())
            .await
            .expect("mood_entries table should still exist");
        assert_eq!(count.0, 0);
    }

    #[tokio::test]
    async fn test_all_versions_recorded() {
        let db = Database::new_in_memory().await.unwrap();
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(row.0 as usize, db.schema_version());
    }

    #[tokio::test]
    async fn test_storage_error_display_is_stable() {
        let err = StoreError::Storage {
            context: "Failed to load journal entries",
            source: sqlx::Error::RowNotFound,
        };
        assert_eq!(err.to_string(), "Failed to load journal entries");
        assert!(std::error::Error::source(&err).is_some());
    }
}
