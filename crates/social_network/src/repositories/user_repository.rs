use crate::models::{
    user_follows::FollowCounts,
    users::{NewUser, User},
};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;

pub struct UserRepository {
    db: Arc<SqlitePool>,
}

impl UserRepository {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        UserRepository { db }
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(self.db.as_ref())
            .await
    }

    pub async fn count_users(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(self.db.as_ref())
            .await
    }

    /// Adds the edge `follower_id -> followee_id` and returns the followee's
    /// counts. A repeated follow leaves the single existing edge in place.
    pub async fn follow_user(
        &self,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<FollowCounts, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            "INSERT INTO user_follows (follower_id, followee_id, created_at) VALUES (?, ?, ?)
             ON CONFLICT (follower_id, followee_id) DO NOTHING",
        )
        .bind(follower_id)
        .bind(followee_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let counts = Self::follow_counts_with(&mut tx, followee_id).await?;
        tx.commit().await?;
        Ok(counts)
    }

    /// Removes the edge `follower_id -> followee_id` if present and returns
    /// the followee's counts.
    pub async fn unfollow_user(
        &self,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<FollowCounts, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM user_follows WHERE follower_id = ? AND followee_id = ?")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&mut *tx)
            .await?;

        let counts = Self::follow_counts_with(&mut tx, followee_id).await?;
        tx.commit().await?;
        Ok(counts)
    }

    pub async fn follow_counts(&self, user_id: i64) -> Result<FollowCounts, sqlx::Error> {
        let mut conn = self.db.acquire().await?;
        Self::follow_counts_with(&mut conn, user_id).await
    }

    async fn follow_counts_with(
        conn: &mut SqliteConnection,
        user_id: i64,
    ) -> Result<FollowCounts, sqlx::Error> {
        let query = r#"
        SELECT
            (SELECT COUNT(*) FROM user_follows WHERE followee_id = ?1) AS follower_count,
            (SELECT COUNT(*) FROM user_follows WHERE follower_id = ?1) AS following_count
        "#;
        sqlx::query_as::<_, FollowCounts>(query)
            .bind(user_id)
            .fetch_one(conn)
            .await
    }

    pub async fn get_following(&self, user_id: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = r#"
        SELECT u.*
        FROM users u
        INNER JOIN user_follows uf ON u.id = uf.followee_id
        WHERE uf.follower_id = ?
        ORDER BY u.username
        "#;
        sqlx::query_as::<_, User>(query)
            .bind(user_id)
            .fetch_all(self.db.as_ref())
            .await
    }

    pub async fn is_following(
        &self,
        follower_id: i64,
        followee_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let query = r#"
        SELECT EXISTS (SELECT 1 FROM user_follows WHERE follower_id = ? AND followee_id = ?)
        "#;
        sqlx::query_scalar::<_, bool>(query)
            .bind(follower_id)
            .bind(followee_id)
            .fetch_one(self.db.as_ref())
            .await
    }
}
