//! Integration tests for the analytics aggregator over a seeded store.

use chrono::Utc;
use haven_db::Database;

mod shared;
use shared::{make_mood, make_tagged_entry, set_entry_created_at, set_mood_created_at};

const DAY: i64 = 86_400;

#[tokio::test]
async fn test_empty_store_yields_zeroes() {
    let db = Database::new_in_memory().await.unwrap();
    let summary = db.analytics(30).await.unwrap();

    assert_eq!(summary.average_mood, 0.0);
    assert_eq!(summary.mood_trend, 0.0);
    assert_eq!(summary.writing_streak, 0);
    assert!(summary.top_tags.is_empty());
    assert_eq!(summary.word_count, 0);
}

#[tokio::test]
async fn test_average_and_trend_over_window() {
    let db = Database::new_in_memory().await.unwrap();
    let now = Utc::now().timestamp();

    // Chronological moods [1,1,1,5,5,5]: clear improvement
    for (i, mood) in [1, 1, 1, 5, 5, 5].iter().enumerate() {
        let added = db.add_mood(make_mood("2024-06-01", *mood)).await.unwrap();
        set_mood_created_at(&db, added.id, now - 6 * 3600 + i as i64 * 600).await;
    }

    let summary = db.analytics(30).await.unwrap();
    assert_eq!(summary.average_mood, 3.0);
    assert_eq!(summary.mood_trend, 4.0);
}

#[tokio::test]
async fn test_single_mood_has_no_trend() {
    let db = Database::new_in_memory().await.unwrap();
    db.add_mood(make_mood("2024-06-01", 3)).await.unwrap();

    let summary = db.analytics(30).await.unwrap();
    assert_eq!(summary.average_mood, 3.0);
    assert_eq!(summary.mood_trend, 0.0);
}

#[tokio::test]
async fn test_window_excludes_old_samples() {
    let db = Database::new_in_memory().await.unwrap();
    let now = Utc::now().timestamp();

    let recent = db.add_mood(make_mood("2024-06-01", 5)).await.unwrap();
    set_mood_created_at(&db, recent.id, now - 2 * DAY).await;
    let ancient = db.add_mood(make_mood("2024-01-01", 1)).await.unwrap();
    set_mood_created_at(&db, ancient.id, now - 40 * DAY).await;

    let summary = db.analytics(30).await.unwrap();
    assert_eq!(summary.average_mood, 5.0);
}

#[tokio::test]
async fn test_writing_streak_counts_unbroken_suffix() {
    let db = Database::new_in_memory().await.unwrap();
    let now = Utc::now().timestamp();

    // Entries 0, 1, 2 and 5 days ago: streak is the unbroken run of 3
    for offset in [0_i64, 1, 2, 5] {
        let e = db
            .add_entry(make_tagged_entry("streak body", "2024-06-01", &[]))
            .await
            .unwrap();
        set_entry_created_at(&db, e.id, now - offset * DAY).await;
    }

    let summary = db.analytics(30).await.unwrap();
    assert_eq!(summary.writing_streak, 3);
}

#[tokio::test]
async fn test_top_tags_and_word_count() {
    let db = Database::new_in_memory().await.unwrap();

    db.add_entry(make_tagged_entry("one two three", "2024-06-01", &["calm", "walk"]))
        .await
        .unwrap();
    db.add_entry(make_tagged_entry("four five", "2024-06-02", &["calm"]))
        .await
        .unwrap();
    db.add_entry(make_tagged_entry("six", "2024-06-03", &["family"]))
        .await
        .unwrap();

    let summary = db.analytics(30).await.unwrap();
    assert_eq!(summary.word_count, 6);
    assert_eq!(summary.top_tags[0].tag, "calm");
    assert_eq!(summary.top_tags[0].count, 2);
    // walk and family tie; walk was encountered first
    assert_eq!(summary.top_tags[1].tag, "walk");
    assert_eq!(summary.top_tags[2].tag, "family");
}

#[tokio::test]
async fn test_summary_is_cached_until_a_write() {
    let db = Database::new_in_memory().await.unwrap();
    db.add_mood(make_mood("2024-06-01", 4)).await.unwrap();

    let first = db.analytics(30).await.unwrap();
    assert_eq!(first.average_mood, 4.0);

    // A raw row behind the repository's back is invisible to the cached
    // summary...
    sqlx::query(
        "INSERT INTO mood_entries (date, mood, factors, created_at, updated_at)
         VALUES ('2024-06-02', 2, '[]', ?1, ?1)",
    )
    .bind(Utc::now().timestamp())
    .execute(db.pool())
    .await
    .unwrap();
    assert_eq!(db.analytics(30).await.unwrap().average_mood, 4.0);

    // ...until a repository write clears the cache
    db.add_mood(make_mood("2024-06-03", 3)).await.unwrap();
    assert_eq!(db.analytics(30).await.unwrap().average_mood, 3.0);
}
