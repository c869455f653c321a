use crate::models::posts::{LikeSummary, Post, PostView};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;

const POST_VIEW_SELECT: &str = r#"
    SELECT
        p.id,
        p.user_id,
        u.username,
        p.body,
        p.created_at,
        p.updated_at,
        (SELECT COUNT(*) FROM post_likes pl WHERE pl.post_id = p.id) AS likes,
        EXISTS (
            SELECT 1 FROM post_likes pl WHERE pl.post_id = p.id AND pl.user_id = ?
        ) AS liked_by_viewer
    FROM posts p
    INNER JOIN users u ON u.id = p.user_id
"#;

const NEWEST_FIRST: &str = "ORDER BY p.created_at DESC, p.id DESC";

pub struct PostRepository {
    db: Arc<SqlitePool>,
}

impl PostRepository {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        PostRepository { db }
    }

    pub async fn create_post(&self, user_id: i64, body: &str) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (user_id, body, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(user_id)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await
    }

    /// Replaces the body and stamps `updated_at`; `created_at` is untouched.
    pub async fn update_body(&self, id: i64, body: &str) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "UPDATE posts SET body = ?, updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(body)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(self.db.as_ref())
        .await
    }

    pub async fn count_posts(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(self.db.as_ref())
            .await
    }

    pub async fn list_posts(
        &self,
        viewer_id: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostView>, sqlx::Error> {
        let query = format!("{} {} LIMIT ? OFFSET ?", POST_VIEW_SELECT, NEWEST_FIRST);
        sqlx::query_as::<_, PostView>(&query)
            .bind(viewer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.db.as_ref())
            .await
    }

    pub async fn count_followed_posts(&self, follower_id: i64) -> Result<i64, sqlx::Error> {
        let query = r#"
        SELECT COUNT(*)
        FROM posts p
        INNER JOIN user_follows uf ON uf.followee_id = p.user_id
        WHERE uf.follower_id = ?
        "#;
        sqlx::query_scalar::<_, i64>(query)
            .bind(follower_id)
            .fetch_one(self.db.as_ref())
            .await
    }

    /// Posts written by the users `follower_id` follows.
    pub async fn list_followed_posts(
        &self,
        follower_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostView>, sqlx::Error> {
        let query = format!(
            "{} INNER JOIN user_follows uf ON uf.followee_id = p.user_id WHERE uf.follower_id = ? {} LIMIT ? OFFSET ?",
            POST_VIEW_SELECT, NEWEST_FIRST
        );
        sqlx::query_as::<_, PostView>(&query)
            .bind(follower_id)
            .bind(follower_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.db.as_ref())
            .await
    }

    pub async fn list_user_posts(
        &self,
        author_id: i64,
        viewer_id: Option<i64>,
    ) -> Result<Vec<PostView>, sqlx::Error> {
        let query = format!("{} WHERE p.user_id = ? {}", POST_VIEW_SELECT, NEWEST_FIRST);
        sqlx::query_as::<_, PostView>(&query)
            .bind(viewer_id)
            .bind(author_id)
            .fetch_all(self.db.as_ref())
            .await
    }

    /// Flips `user_id`'s membership in the post's like-set based on what is
    /// stored, not on what the client believes.
    pub async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<LikeSummary, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        // Write first so the transaction takes the write lock before reading.
        let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            Self::insert_like(&mut tx, post_id, user_id).await?;
        }

        let likes = Self::count_likes_with(&mut tx, post_id).await?;
        tx.commit().await?;

        Ok(LikeSummary {
            post_id,
            likes,
            liked: removed == 0,
        })
    }

    /// Puts `user_id` in or out of the like-set; repeating it changes nothing.
    pub async fn set_like(
        &self,
        post_id: i64,
        user_id: i64,
        liked: bool,
    ) -> Result<LikeSummary, sqlx::Error> {
        let mut tx = self.db.begin().await?;

        if liked {
            Self::insert_like(&mut tx, post_id, user_id).await?;
        } else {
            sqlx::query("DELETE FROM post_likes WHERE post_id = ? AND user_id = ?")
                .bind(post_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        let likes = Self::count_likes_with(&mut tx, post_id).await?;
        tx.commit().await?;

        Ok(LikeSummary {
            post_id,
            likes,
            liked,
        })
    }

    pub async fn count_likes(&self, post_id: i64) -> Result<i64, sqlx::Error> {
        let mut conn = self.db.acquire().await?;
        Self::count_likes_with(&mut conn, post_id).await
    }

    async fn insert_like(
        conn: &mut SqliteConnection,
        post_id: i64,
        user_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO post_likes (post_id, user_id, created_at) VALUES (?, ?, ?)
             ON CONFLICT (post_id, user_id) DO NOTHING",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(conn)
        .await?;

        Ok(())
    }

    async fn count_likes_with(conn: &mut SqliteConnection, post_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_likes WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(conn)
            .await
    }
}
