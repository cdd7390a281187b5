/// Inline SQL migrations for the haven journal schema.
///
/// Simple inline migrations rather than sqlx migration files; the schema is
/// small and self-contained. Each element is one version; versions are
/// applied in order and recorded in `_migrations`. The history only ever
/// adds tables, indexes, and columns.
pub const MIGRATIONS: &[&str] = &[
    // Migration 1: journal_entries table
    r#"
CREATE TABLE IF NOT EXISTS journal_entries (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT,
    content     TEXT NOT NULL,
    date        TEXT NOT NULL,
    time        TEXT,
    mood        INTEGER,
    tags        TEXT NOT NULL DEFAULT '[]',
    location    TEXT,
    moon_phase  TEXT,
    ai_insights TEXT,
    created_at  INTEGER NOT NULL,
    updated_at  INTEGER NOT NULL
);
"#,
    // Migration 2: journal_entries indexes
    r#"CREATE INDEX IF NOT EXISTS idx_entries_date ON journal_entries(date);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_entries_created ON journal_entries(created_at DESC);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_entries_mood ON journal_entries(mood);"#,
    // Migration 3: mood_entries table + indexes
    r#"
CREATE TABLE IF NOT EXISTS mood_entries (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    date       TEXT NOT NULL,
    mood       INTEGER NOT NULL CHECK (mood BETWEEN 1 AND 5),
    notes      TEXT,
    factors    TEXT NOT NULL DEFAULT '[]',
    energy     INTEGER,
    sleep      REAL,
    stress     INTEGER,
    anxiety    INTEGER,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_moods_date ON mood_entries(date);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_moods_created ON mood_entries(created_at DESC);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_moods_mood ON mood_entries(mood);"#,
    // Migration 4: deep_insights table + indexes
    r#"
CREATE TABLE IF NOT EXISTS deep_insights (
    id                       INTEGER PRIMARY KEY AUTOINCREMENT,
    journal_entry_id         INTEGER,
    primary_emotion          TEXT NOT NULL,
    intensity                INTEGER NOT NULL DEFAULT 0,
    energy_level             TEXT,
    sentiment                TEXT,
    themes                   TEXT NOT NULL DEFAULT '[]',
    suggestions              TEXT NOT NULL DEFAULT '[]',
    reflection_prompts       TEXT NOT NULL DEFAULT '[]',
    compassionate_reflection TEXT,
    spiritual_quote          TEXT,
    healing_guidance         TEXT,
    shadow_work              TEXT,
    light_work               TEXT,
    confidence               REAL,
    created_at               INTEGER NOT NULL
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_insights_entry ON deep_insights(journal_entry_id);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_insights_created ON deep_insights(created_at DESC);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_insights_emotion ON deep_insights(primary_emotion);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_insights_intensity ON deep_insights(intensity);"#,
    // Migration 5: therapy_sessions + therapy_messages tables
    r#"
CREATE TABLE IF NOT EXISTS therapy_sessions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    date       TEXT NOT NULL,
    exercises  TEXT NOT NULL DEFAULT '[]',
    summary    TEXT,
    mood       INTEGER,
    tags       TEXT NOT NULL DEFAULT '[]',
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS therapy_messages (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL,
    content    TEXT NOT NULL,
    sender     TEXT NOT NULL,
    timestamp  INTEGER NOT NULL,
    kind       TEXT
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_sessions_created ON therapy_sessions(created_at DESC);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_messages_session ON therapy_messages(session_id);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_messages_timestamp ON therapy_messages(timestamp);"#,
    // Migration 6: singleton settings tables (unindexed; one logical row)
    r#"
CREATE TABLE IF NOT EXISTS app_settings (
    id             INTEGER PRIMARY KEY DEFAULT 1 CHECK (id = 1),
    theme          TEXT NOT NULL DEFAULT 'system',
    daily_reminder INTEGER NOT NULL DEFAULT 0,
    reminder_time  TEXT
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS user_preferences (
    id                 INTEGER PRIMARY KEY DEFAULT 1 CHECK (id = 1),
    display_name       TEXT,
    week_starts_monday INTEGER NOT NULL DEFAULT 1,
    favorite_tags      TEXT NOT NULL DEFAULT '[]'
);
"#,
    // Migration 7: imported_backups table + indexes
    r#"
CREATE TABLE IF NOT EXISTS imported_backups (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    title                TEXT,
    content              TEXT NOT NULL,
    date                 TEXT NOT NULL,
    time                 TEXT,
    mood                 INTEGER,
    tags                 TEXT NOT NULL DEFAULT '[]',
    location             TEXT,
    moon_phase           TEXT,
    ai_insights          TEXT,
    original_import_date INTEGER NOT NULL,
    import_source        TEXT NOT NULL,
    import_method        TEXT NOT NULL DEFAULT 'manual',
    original_file_name   TEXT,
    checksum             TEXT NOT NULL,
    created_at           INTEGER NOT NULL,
    updated_at           INTEGER NOT NULL
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_backups_import_date ON imported_backups(original_import_date);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_backups_source ON imported_backups(import_source);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_backups_method ON imported_backups(import_method);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_backups_date ON imported_backups(date);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_backups_created ON imported_backups(created_at DESC);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_backups_checksum ON imported_backups(checksum);"#,
    // Migration 8: weather snapshots on entries
    r#"ALTER TABLE journal_entries ADD COLUMN weather TEXT;"#,
    // Migration 9: composite index for date+mood filtering
    r#"CREATE INDEX IF NOT EXISTS idx_entries_date_mood ON journal_entries(date, mood);"#,
];
