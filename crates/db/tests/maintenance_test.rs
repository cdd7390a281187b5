//! Integration tests for the created_at/date repair routine.

use chrono::Utc;
use haven_db::Database;

mod shared;
use shared::{make_entry, set_entry_created_at};

// 2024-01-01T00:00:00Z
const JAN_1: i64 = 1_704_067_200;
// 2024-01-05T14:30:00Z
const JAN_5_1430: i64 = 1_704_465_000;
// 2024-02-10T00:00:00Z
const FEB_10_MIDNIGHT: i64 = 1_707_523_200;

#[tokio::test]
async fn test_repair_combines_date_and_time() {
    let db = Database::new_in_memory().await.unwrap();

    let mut draft = make_entry("imported with a stale created_at", "2024-01-05");
    draft.time = Some("14:30".to_string());
    let entry = db.add_entry(draft).await.unwrap();
    set_entry_created_at(&db, entry.id, JAN_1).await;

    let before = Utc::now().timestamp();
    let report = db.migrate_entry_dates().await.unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.errors, 0);

    let repaired = db.get_entry(entry.id).await.unwrap();
    assert_eq!(repaired.created_at, JAN_5_1430);
    assert!(repaired.updated_at >= before);
}

#[tokio::test]
async fn test_repair_falls_back_to_midnight() {
    let db = Database::new_in_memory().await.unwrap();

    let mut no_time = make_entry("no time recorded", "2024-02-10");
    no_time.time = None;
    let a = db.add_entry(no_time).await.unwrap();
    set_entry_created_at(&db, a.id, JAN_1).await;

    let mut bad_time = make_entry("unparseable time", "2024-02-10");
    bad_time.time = Some("around lunch".to_string());
    let b = db.add_entry(bad_time).await.unwrap();
    set_entry_created_at(&db, b.id, JAN_1).await;

    let report = db.migrate_entry_dates().await.unwrap();
    assert_eq!(report.updated, 2);
    assert_eq!(report.errors, 0);

    assert_eq!(db.get_entry(a.id).await.unwrap().created_at, FEB_10_MIDNIGHT);
    assert_eq!(db.get_entry(b.id).await.unwrap().created_at, FEB_10_MIDNIGHT);
}

#[tokio::test]
async fn test_aligned_entries_are_left_alone() {
    let db = Database::new_in_memory().await.unwrap();

    // created_at is stamped now; using today's date keeps them in agreement
    let today = Utc::now().format("%Y-%m-%d").to_string();
    let entry = db.add_entry(make_entry("already aligned", &today)).await.unwrap();

    let report = db.migrate_entry_dates().await.unwrap();
    assert_eq!(report.updated, 0);
    assert_eq!(report.errors, 0);

    let read = db.get_entry(entry.id).await.unwrap();
    assert_eq!(read.created_at, entry.created_at);
    assert_eq!(read.updated_at, entry.updated_at);
}

#[tokio::test]
async fn test_unparseable_date_is_counted_not_fatal() {
    let db = Database::new_in_memory().await.unwrap();

    let bad = db
        .add_entry(make_entry("weird date", "sometime last spring"))
        .await
        .unwrap();
    set_entry_created_at(&db, bad.id, JAN_1).await;

    let mut fixable = make_entry("fixable", "2024-01-05");
    fixable.time = Some("14:30".to_string());
    let good = db.add_entry(fixable).await.unwrap();
    set_entry_created_at(&db, good.id, JAN_1).await;

    // The batch continues past the bad record
    let report = db.migrate_entry_dates().await.unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.errors, 1);
    assert_eq!(db.get_entry(good.id).await.unwrap().created_at, JAN_5_1430);
}

#[tokio::test]
async fn test_repair_converges() {
    let db = Database::new_in_memory().await.unwrap();

    let mut draft = make_entry("repair once", "2024-01-05");
    draft.time = Some("14:30".to_string());
    let entry = db.add_entry(draft).await.unwrap();
    set_entry_created_at(&db, entry.id, JAN_1).await;

    assert_eq!(db.migrate_entry_dates().await.unwrap().updated, 1);
    // Second pass: created_at now agrees with the date field
    let second = db.migrate_entry_dates().await.unwrap();
    assert_eq!(second.updated, 0);
    assert_eq!(second.errors, 0);
}
