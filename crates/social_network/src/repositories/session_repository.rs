use crate::models::sessions::Session;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use uuid::Uuid;

pub struct SessionRepository {
    db: Arc<SqlitePool>,
}

impl SessionRepository {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        SessionRepository { db }
    }

    pub async fn create_session(&self, user_id: i64) -> Result<Session, sqlx::Error> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(self.db.as_ref())
            .await
    }

    pub async fn delete_session(&self, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.db.as_ref())
            .await?;

        Ok(())
    }

    /// Removes every session created before `cutoff`.
    pub async fn delete_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE created_at < ?")
            .bind(cutoff)
            .execute(self.db.as_ref())
            .await?;

        Ok(result.rows_affected())
    }
}
