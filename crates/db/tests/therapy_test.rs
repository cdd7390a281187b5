//! Integration tests for therapy sessions, messages, and the cascade
//! delete, the one compound-integrity rule in the store.

use haven_core::{MessageSender, NewTherapySession, TherapySessionPatch};
use haven_db::{Database, StoreError};

mod shared;
use shared::{make_message, make_session};

#[tokio::test]
async fn test_session_defaults_to_empty_lists() {
    let db = Database::new_in_memory().await.unwrap();

    let session = db
        .add_session(NewTherapySession {
            date: "2024-05-20".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(session.exercises.is_empty());
    assert!(session.tags.is_empty());
    assert!(session.summary.is_none());
    assert!(session.created_at > 0);

    let read = db.get_session(session.id).await.unwrap();
    assert_eq!(read, session);
}

#[tokio::test]
async fn test_messages_ordered_by_timestamp() {
    let db = Database::new_in_memory().await.unwrap();
    let session = db.add_session(make_session("2024-05-20")).await.unwrap();

    let mut late = make_message(session.id, "and how did that feel?", MessageSender::Therapist);
    late.timestamp = Some(2000);
    let mut early = make_message(session.id, "I kept circling the same thought", MessageSender::User);
    early.timestamp = Some(1000);

    db.add_message(late).await.unwrap();
    db.add_message(early).await.unwrap();

    let messages = db.messages_for_session(session.id).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].timestamp, 1000);
    assert_eq!(messages[0].sender, MessageSender::User);
    assert_eq!(messages[1].timestamp, 2000);
    assert_eq!(messages[1].sender, MessageSender::Therapist);
}

#[tokio::test]
async fn test_cascade_delete_removes_all_session_messages() {
    let db = Database::new_in_memory().await.unwrap();
    let session = db.add_session(make_session("2024-05-20")).await.unwrap();
    let other = db.add_session(make_session("2024-05-21")).await.unwrap();

    for i in 0..5 {
        db.add_message(make_message(session.id, &format!("message {}", i), MessageSender::User))
            .await
            .unwrap();
    }
    db.add_message(make_message(other.id, "unrelated", MessageSender::User))
        .await
        .unwrap();

    db.delete_session(session.id).await.unwrap();

    // Zero messages remain for the deleted session
    assert!(db.messages_for_session(session.id).await.unwrap().is_empty());
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM therapy_messages WHERE session_id = ?1")
            .bind(session.id)
            .fetch_one(db.pool())
            .await
            .unwrap();
    assert_eq!(count.0, 0);

    // The other session and its message are untouched
    assert_eq!(db.messages_for_session(other.id).await.unwrap().len(), 1);
    assert!(db.get_session(other.id).await.is_ok());
}

#[tokio::test]
async fn test_delete_missing_session_is_not_found_and_rolls_back() {
    let db = Database::new_in_memory().await.unwrap();
    let session = db.add_session(make_session("2024-05-20")).await.unwrap();
    db.add_message(make_message(session.id, "still here", MessageSender::User))
        .await
        .unwrap();

    let err = db.delete_session(999).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { id: 999, .. }));

    // Nothing was deleted along the way
    assert_eq!(db.messages_for_session(session.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_session_merges_fields() {
    let db = Database::new_in_memory().await.unwrap();
    let session = db.add_session(make_session("2024-05-20")).await.unwrap();

    let patch = TherapySessionPatch {
        summary: Some("worked through the week's spiral".to_string()),
        tags: Some(vec!["anxiety".to_string()]),
        ..Default::default()
    };
    let updated = db.update_session(session.id, patch).await.unwrap();
    assert_eq!(updated.summary.as_deref(), Some("worked through the week's spiral"));
    assert_eq!(updated.tags, vec!["anxiety"]);
    assert_eq!(updated.date, "2024-05-20");
    assert_eq!(updated.exercises, session.exercises);
}
