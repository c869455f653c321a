use std::fmt::Display;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Follower and following counts of one user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromRow, Serialize, ToSchema, Default)]
pub struct FollowCounts {
    /// Users following this user
    pub follower_count: i64,
    /// Users this user follows
    pub following_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FollowAction {
    Follow,
    Unfollow,
}

impl Display for FollowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FollowAction::Follow => write!(f, "follow"),
            FollowAction::Unfollow => write!(f, "unfollow"),
        }
    }
}
