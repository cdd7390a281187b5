// crates/db/src/queries/therapy.rs
// Therapy session and message operations. Deleting a session removes its
// messages in the same transaction, the one cascade in the system.

use super::row_types::{encode_list, MessageRow, SessionRow};
use crate::hooks;
use crate::{Database, SqlxContext, StoreError, StoreResult};
use chrono::Utc;
use haven_core::{
    NewTherapyMessage, NewTherapySession, TherapyMessage, TherapySession, TherapySessionPatch,
};

const LOAD: &str = "Failed to load therapy sessions";
const SAVE: &str = "Failed to save therapy session";
const UPDATE: &str = "Failed to update therapy session";
const DELETE: &str = "Failed to delete therapy session";
const LOAD_MSG: &str = "Failed to load therapy messages";
const SAVE_MSG: &str = "Failed to save therapy message";

impl Database {
    pub async fn add_session(&self, draft: NewTherapySession) -> StoreResult<TherapySession> {
        let session = self.insert_session(&draft).await?;
        self.cache().clear();
        Ok(session)
    }

    pub(crate) async fn insert_session(
        &self,
        draft: &NewTherapySession,
    ) -> StoreResult<TherapySession> {
        let stamp = hooks::on_create_session(Utc::now().timestamp());

        let result = sqlx::query(
            r#"
            INSERT INTO therapy_sessions (date, exercises, summary, mood, tags, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&draft.date)
        .bind(encode_list(&draft.exercises))
        .bind(&draft.summary)
        .bind(draft.mood)
        .bind(encode_list(&draft.tags))
        .bind(stamp.created_at)
        .bind(stamp.updated_at)
        .execute(self.pool())
        .await
        .context(SAVE)?;

        Ok(TherapySession {
            id: result.last_insert_rowid(),
            date: draft.date.clone(),
            exercises: draft.exercises.clone(),
            summary: draft.summary.clone(),
            mood: draft.mood,
            tags: draft.tags.clone(),
            created_at: stamp.created_at,
            updated_at: stamp.updated_at,
        })
    }

    pub async fn get_session(&self, id: i64) -> StoreResult<TherapySession> {
        let row: Option<SessionRow> =
            sqlx::query_as("SELECT * FROM therapy_sessions WHERE id = ?1")
                .bind(id)
                .fetch_optional(self.pool())
                .await
                .context(LOAD)?;
        row.map(SessionRow::into_session)
            .ok_or(StoreError::NotFound {
                collection: "therapy_sessions",
                id,
            })
    }

    pub async fn list_sessions(
        &self,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<TherapySession>> {
        let key = format!("sessions:list:{}:{}", limit, offset);
        if let Some(hit) = self.cache().get::<Vec<TherapySession>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<SessionRow> = sqlx::query_as(
            "SELECT * FROM therapy_sessions ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
        .context(LOAD)?;

        let sessions: Vec<TherapySession> = rows.into_iter().map(SessionRow::into_session).collect();
        self.cache().set(key, sessions.clone());
        Ok(sessions)
    }

    pub async fn update_session(
        &self,
        id: i64,
        patch: TherapySessionPatch,
    ) -> StoreResult<TherapySession> {
        let mut session = self.get_session(id).await?;

        if let Some(date) = patch.date {
            session.date = date;
        }
        if let Some(exercises) = patch.exercises {
            session.exercises = exercises;
        }
        if let Some(summary) = patch.summary {
            session.summary = Some(summary);
        }
        if let Some(mood) = patch.mood {
            session.mood = Some(mood);
        }
        if let Some(tags) = patch.tags {
            session.tags = tags;
        }
        session.updated_at = Utc::now().timestamp();

        sqlx::query(
            r#"
            UPDATE therapy_sessions SET
                date = ?1, exercises = ?2, summary = ?3, mood = ?4, tags = ?5, updated_at = ?6
            WHERE id = ?7
            "#,
        )
        .bind(&session.date)
        .bind(encode_list(&session.exercises))
        .bind(&session.summary)
        .bind(session.mood)
        .bind(encode_list(&session.tags))
        .bind(session.updated_at)
        .bind(id)
        .execute(self.pool())
        .await
        .context(UPDATE)?;

        self.cache().clear();
        Ok(session)
    }

    /// Delete a session and every message whose `session_id` points at it,
    /// as one logical operation. Both deletes run inside a single
    /// transaction, so a failure leaves the store unchanged rather than
    /// half-cascaded.
    pub async fn delete_session(&self, id: i64) -> StoreResult<()> {
        let mut tx = self.pool().begin().await.context(DELETE)?;

        sqlx::query("DELETE FROM therapy_messages WHERE session_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context(DELETE)?;

        let result = sqlx::query("DELETE FROM therapy_sessions WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context(DELETE)?;
        if result.rows_affected() == 0 {
            // Roll back the message delete; the session never existed.
            tx.rollback().await.context(DELETE)?;
            return Err(StoreError::NotFound {
                collection: "therapy_sessions",
                id,
            });
        }

        tx.commit().await.context(DELETE)?;
        self.cache().clear();
        Ok(())
    }

    pub async fn add_message(&self, draft: NewTherapyMessage) -> StoreResult<TherapyMessage> {
        let message = self.insert_message(&draft).await?;
        self.cache().clear();
        Ok(message)
    }

    pub(crate) async fn insert_message(
        &self,
        draft: &NewTherapyMessage,
    ) -> StoreResult<TherapyMessage> {
        let timestamp = hooks::on_create_message(draft, Utc::now().timestamp());

        let result = sqlx::query(
            r#"
            INSERT INTO therapy_messages (session_id, content, sender, timestamp, kind)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(draft.session_id)
        .bind(&draft.content)
        .bind(draft.sender.as_str())
        .bind(timestamp)
        .bind(&draft.kind)
        .execute(self.pool())
        .await
        .context(SAVE_MSG)?;

        Ok(TherapyMessage {
            id: result.last_insert_rowid(),
            session_id: draft.session_id,
            content: draft.content.clone(),
            sender: draft.sender,
            timestamp,
            kind: draft.kind.clone(),
        })
    }

    /// Messages for one session, oldest first.
    pub async fn messages_for_session(&self, session_id: i64) -> StoreResult<Vec<TherapyMessage>> {
        let key = format!("messages:session:{}", session_id);
        if let Some(hit) = self.cache().get::<Vec<TherapyMessage>>(&key) {
            return Ok(hit);
        }

        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT * FROM therapy_messages WHERE session_id = ?1 ORDER BY timestamp ASC, id ASC",
        )
        .bind(session_id)
        .fetch_all(self.pool())
        .await
        .context(LOAD_MSG)?;

        let messages: Vec<TherapyMessage> = rows.into_iter().map(MessageRow::into_message).collect();
        self.cache().set(key, messages.clone());
        Ok(messages)
    }

    pub(crate) async fn all_sessions(&self) -> StoreResult<Vec<TherapySession>> {
        let rows: Vec<SessionRow> =
            sqlx::query_as("SELECT * FROM therapy_sessions ORDER BY created_at DESC, id DESC")
                .fetch_all(self.pool())
                .await
                .context(LOAD)?;
        Ok(rows.into_iter().map(SessionRow::into_session).collect())
    }

    pub(crate) async fn all_messages(&self) -> StoreResult<Vec<TherapyMessage>> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT * FROM therapy_messages ORDER BY session_id ASC, timestamp ASC, id ASC",
        )
        .fetch_all(self.pool())
        .await
        .context(LOAD_MSG)?;
        Ok(rows.into_iter().map(MessageRow::into_message).collect())
    }
}
