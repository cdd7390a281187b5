// crates/db/src/analytics.rs
//! Derived trend/streak/tag statistics over the stored journal.
//!
//! The aggregations are pure functions over fetched rows so they can be
//! tested without a store; the store method restricts rows to the trailing
//! window and caches the summary under a long TTL.

use crate::cache::ANALYTICS_TTL;
use crate::queries::row_types::decode_list;
use crate::{Database, SqlxContext, StoreResult};
use chrono::Utc;
use serde::Serialize;

const LOAD: &str = "Failed to load analytics";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// A tag and how many windowed entries carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub count: i64,
}

/// Aggregate statistics over the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub window_days: i64,
    /// Mean mood over the window's mood samples; 0.0 when there are none.
    pub average_mood: f64,
    /// Second-half mean minus first-half mean; positive = improving.
    pub mood_trend: f64,
    /// Consecutive calendar days with entries, ending at the most recent.
    pub writing_streak: i64,
    /// Top 10 tags by frequency, ties kept in first-encountered order.
    pub top_tags: Vec<TagCount>,
    /// Whitespace-token total over windowed entry content.
    pub word_count: i64,
}

impl Database {
    /// Compute (or return the cached) analytics summary for entries and
    /// mood samples created within the trailing `window_days`.
    pub async fn analytics(&self, window_days: i64) -> StoreResult<AnalyticsSummary> {
        let key = format!("analytics:{}", window_days);
        if let Some(hit) = self.cache().get::<AnalyticsSummary>(&key) {
            return Ok(hit);
        }

        let cutoff = Utc::now().timestamp() - window_days * SECONDS_PER_DAY;

        // Chronological order feeds the trend split directly.
        let moods: Vec<(i64,)> = sqlx::query_as(
            "SELECT mood FROM mood_entries WHERE created_at >= ?1 ORDER BY created_at ASC, id ASC",
        )
        .bind(cutoff)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;
        let moods: Vec<i64> = moods.into_iter().map(|(m,)| m).collect();

        let entries: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT content, tags, created_at FROM journal_entries WHERE created_at >= ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(cutoff)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;

        let created: Vec<i64> = entries.iter().map(|(_, _, c)| *c).collect();
        let tag_lists: Vec<Vec<String>> = entries
            .iter()
            .map(|(_, tags, _)| decode_list(tags))
            .collect();

        let summary = AnalyticsSummary {
            window_days,
            average_mood: average_mood(&moods),
            mood_trend: mood_trend(&moods),
            writing_streak: writing_streak(&created),
            top_tags: top_tags(&tag_lists, 10),
            word_count: entries
                .iter()
                .map(|(content, _, _)| content.split_whitespace().count() as i64)
                .sum(),
        };

        self.cache().set_with_ttl(key, summary.clone(), ANALYTICS_TTL);
        Ok(summary)
    }
}

/// Arithmetic mean; 0.0 for an empty set rather than NaN.
pub fn average_mood(moods: &[i64]) -> f64 {
    if moods.is_empty() {
        return 0.0;
    }
    moods.iter().sum::<i64>() as f64 / moods.len() as f64
}

/// Split the chronological sequence at floor(len/2) and subtract the first
/// half's mean from the second half's. 0.0 below two samples.
pub fn mood_trend(moods: &[i64]) -> f64 {
    if moods.len() < 2 {
        return 0.0;
    }
    let (first, second) = moods.split_at(moods.len() / 2);
    average_mood(second) - average_mood(first)
}

/// Count consecutive calendar days with at least one entry, walking back
/// from the most recent. A second entry on an already-counted day is
/// skipped; a gap of more than one day ends the streak.
pub fn writing_streak(created_at: &[i64]) -> i64 {
    let mut days: Vec<i64> = created_at
        .iter()
        .map(|ts| ts.div_euclid(SECONDS_PER_DAY))
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));

    let mut iter = days.into_iter();
    let Some(mut prev) = iter.next() else {
        return 0;
    };
    let mut streak = 1;
    for day in iter {
        match prev - day {
            0 => continue,
            1 => {
                streak += 1;
                prev = day;
            }
            _ => break,
        }
    }
    streak
}

/// Frequency-count tags across entries, descending by count, ties in
/// first-encountered order, truncated to `limit`.
pub fn top_tags(tag_lists: &[Vec<String>], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for tags in tag_lists {
        for tag in tags {
            match counts.iter_mut().find(|c| &c.tag == tag) {
                Some(existing) => existing.count += 1,
                None => counts.push(TagCount {
                    tag: tag.clone(),
                    count: 1,
                }),
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count)); // stable: ties keep order
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> i64 {
        n * SECONDS_PER_DAY + 3600 // an hour into the day, not midnight
    }

    #[test]
    fn test_average_mood_empty_is_zero() {
        assert_eq!(average_mood(&[]), 0.0);
    }

    #[test]
    fn test_average_mood() {
        assert_eq!(average_mood(&[2, 3, 4]), 3.0);
    }

    #[test]
    fn test_mood_trend_improving() {
        // First half mean 1, second half mean 5
        assert_eq!(mood_trend(&[1, 1, 1, 5, 5, 5]), 4.0);
    }

    #[test]
    fn test_mood_trend_declining_is_negative() {
        assert_eq!(mood_trend(&[5, 5, 1, 1]), -4.0);
    }

    #[test]
    fn test_mood_trend_below_two_samples() {
        assert_eq!(mood_trend(&[]), 0.0);
        assert_eq!(mood_trend(&[3]), 0.0);
    }

    #[test]
    fn test_mood_trend_odd_length_splits_at_floor() {
        // floor(5/2) = 2: first = [1, 1] mean 1, second = [1, 5, 5] mean 11/3
        let trend = mood_trend(&[1, 1, 1, 5, 5]);
        assert!((trend - (11.0 / 3.0 - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_streak_empty_and_single() {
        assert_eq!(writing_streak(&[]), 0);
        assert_eq!(writing_streak(&[day(10)]), 1);
    }

    #[test]
    fn test_streak_three_consecutive_days_then_gap() {
        // Most recent three days are consecutive; the fourth is 3 days back
        let stamps = [day(5), day(4), day(3), day(0)];
        assert_eq!(writing_streak(&stamps), 3);
    }

    #[test]
    fn test_streak_gap_at_most_recent() {
        let stamps = [day(10), day(7), day(6)];
        assert_eq!(writing_streak(&stamps), 1);
    }

    #[test]
    fn test_streak_same_day_entries_counted_once() {
        let stamps = [day(3), day(3), day(2), day(1)];
        assert_eq!(writing_streak(&stamps), 3);
    }

    #[test]
    fn test_streak_order_independent() {
        let stamps = [day(1), day(3), day(2)];
        assert_eq!(writing_streak(&stamps), 3);
    }

    #[test]
    fn test_top_tags_descending_with_stable_ties() {
        let lists = vec![
            vec!["sleep".to_string(), "work".to_string()],
            vec!["work".to_string()],
            vec!["gratitude".to_string()],
        ];
        let top = top_tags(&lists, 10);
        assert_eq!(top[0].tag, "work");
        assert_eq!(top[0].count, 2);
        // sleep and gratitude tie at 1; sleep was seen first
        assert_eq!(top[1].tag, "sleep");
        assert_eq!(top[2].tag, "gratitude");
    }

    #[test]
    fn test_top_tags_truncates() {
        let lists: Vec<Vec<String>> = (0..15).map(|i| vec![format!("t{}", i)]).collect();
        assert_eq!(top_tags(&lists, 10).len(), 10);
    }
}
