use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Longest accepted post body, in characters.
pub const MAX_POST_LENGTH: usize = 5000;

#[derive(Clone, Debug, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
    /// Set once when the post is created.
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A post joined with its author and like-set, as seen by one viewer.
#[derive(Clone, Debug, PartialEq, FromRow, Serialize)]
pub struct PostView {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub likes: i64,
    pub liked_by_viewer: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Like,
    Unlike,
}

/// Like-set state of a post right after a like mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct LikeSummary {
    pub post_id: i64,
    pub likes: i64,
    pub liked: bool,
}
