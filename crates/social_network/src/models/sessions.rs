use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at > ttl
    }
}
