// crates/db/src/queries/settings.rs
// Singleton settings/preferences rows, created lazily with defaults.
//
// These are the one place single-key cache invalidation is used instead of
// a full clear: nothing else in the cache can reflect a settings value, so
// writes here evict only their own key.

use super::row_types::{decode_list, encode_list};
use crate::{Database, SqlxContext, StoreResult};
use haven_core::{AppSettings, AppSettingsPatch, UserPreferences, UserPreferencesPatch};

const SETTINGS_KEY: &str = "settings";
const PREFERENCES_KEY: &str = "preferences";

const LOAD_SETTINGS: &str = "Failed to load settings";
const SAVE_SETTINGS: &str = "Failed to save settings";
const LOAD_PREFS: &str = "Failed to load preferences";
const SAVE_PREFS: &str = "Failed to save preferences";

impl Database {
    /// Read current app settings, creating the row with defaults on first
    /// access.
    pub async fn get_settings(&self) -> StoreResult<AppSettings> {
        if let Some(hit) = self.cache().get::<AppSettings>(SETTINGS_KEY) {
            return Ok(hit);
        }

        let defaults = AppSettings::default();
        sqlx::query(
            "INSERT OR IGNORE INTO app_settings (id, theme, daily_reminder, reminder_time) VALUES (1, ?1, ?2, ?3)",
        )
        .bind(&defaults.theme)
        .bind(defaults.daily_reminder)
        .bind(&defaults.reminder_time)
        .execute(self.pool())
        .await
        .context(LOAD_SETTINGS)?;

        let row: (String, bool, Option<String>) = sqlx::query_as(
            "SELECT theme, daily_reminder, reminder_time FROM app_settings WHERE id = 1",
        )
        .fetch_one(self.pool())
        .await
        .context(LOAD_SETTINGS)?;

        let settings = AppSettings {
            theme: row.0,
            daily_reminder: row.1,
            reminder_time: row.2,
        };
        self.cache().set(SETTINGS_KEY, settings.clone());
        Ok(settings)
    }

    /// Partial settings update; only supplied fields change.
    pub async fn update_settings(&self, patch: AppSettingsPatch) -> StoreResult<AppSettings> {
        let mut settings = self.get_settings().await?;

        if let Some(theme) = patch.theme {
            settings.theme = theme;
        }
        if let Some(daily_reminder) = patch.daily_reminder {
            settings.daily_reminder = daily_reminder;
        }
        if let Some(reminder_time) = patch.reminder_time {
            settings.reminder_time = Some(reminder_time);
        }

        sqlx::query(
            "UPDATE app_settings SET theme = ?1, daily_reminder = ?2, reminder_time = ?3 WHERE id = 1",
        )
        .bind(&settings.theme)
        .bind(settings.daily_reminder)
        .bind(&settings.reminder_time)
        .execute(self.pool())
        .await
        .context(SAVE_SETTINGS)?;

        self.cache().delete(SETTINGS_KEY);
        Ok(settings)
    }

    /// Read user preferences, creating the row with defaults on first
    /// access.
    pub async fn get_preferences(&self) -> StoreResult<UserPreferences> {
        if let Some(hit) = self.cache().get::<UserPreferences>(PREFERENCES_KEY) {
            return Ok(hit);
        }

        let defaults = UserPreferences::default();
        sqlx::query(
            "INSERT OR IGNORE INTO user_preferences (id, display_name, week_starts_monday, favorite_tags) VALUES (1, ?1, ?2, ?3)",
        )
        .bind(&defaults.display_name)
        .bind(defaults.week_starts_monday)
        .bind(encode_list(&defaults.favorite_tags))
        .execute(self.pool())
        .await
        .context(LOAD_PREFS)?;

        let row: (Option<String>, bool, String) = sqlx::query_as(
            "SELECT display_name, week_starts_monday, favorite_tags FROM user_preferences WHERE id = 1",
        )
        .fetch_one(self.pool())
        .await
        .context(LOAD_PREFS)?;

        let preferences = UserPreferences {
            display_name: row.0,
            week_starts_monday: row.1,
            favorite_tags: decode_list(&row.2),
        };
        self.cache().set(PREFERENCES_KEY, preferences.clone());
        Ok(preferences)
    }

    /// Partial preferences update; only supplied fields change.
    pub async fn update_preferences(
        &self,
        patch: UserPreferencesPatch,
    ) -> StoreResult<UserPreferences> {
        let mut preferences = self.get_preferences().await?;

        if let Some(display_name) = patch.display_name {
            preferences.display_name = Some(display_name);
        }
        if let Some(week_starts_monday) = patch.week_starts_monday {
            preferences.week_starts_monday = week_starts_monday;
        }
        if let Some(favorite_tags) = patch.favorite_tags {
            preferences.favorite_tags = favorite_tags;
        }

        sqlx::query(
            "UPDATE user_preferences SET display_name = ?1, week_starts_monday = ?2, favorite_tags = ?3 WHERE id = 1",
        )
        .bind(&preferences.display_name)
        .bind(preferences.week_starts_monday)
        .bind(encode_list(&preferences.favorite_tags))
        .execute(self.pool())
        .await
        .context(SAVE_PREFS)?;

        self.cache().delete(PREFERENCES_KEY);
        Ok(preferences)
    }
}
