use serde::Serialize;
use utoipa::ToSchema;

use crate::models::posts::LikeSummary;

#[derive(Debug, Serialize, ToSchema)]
pub struct FollowResponse {
    /// Confirmation such as "followed alice confirmed"
    pub message: String,
    pub follower_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeResponse {
    pub likes: i64,
    pub post_id: i64,
    pub liked: bool,
}

impl From<LikeSummary> for LikeResponse {
    fn from(summary: LikeSummary) -> Self {
        LikeResponse {
            likes: summary.likes,
            post_id: summary.post_id,
            liked: summary.liked,
        }
    }
}
