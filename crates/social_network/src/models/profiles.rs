use serde::Serialize;

use super::{posts::PostView, user_follows::FollowCounts, users::UserResponse};

/// Everything the profile page shows for one user.
#[derive(Debug, Serialize)]
pub struct ProfileDetails {
    pub user: UserResponse,
    pub counts: FollowCounts,
    /// Users this profile follows
    pub following: Vec<UserResponse>,
    /// This profile's posts, newest first
    pub posts: Vec<PostView>,
    /// Whether the viewer follows this profile; `None` when logged out or on
    /// the viewer's own profile.
    pub viewer_follows: Option<bool>,
}
