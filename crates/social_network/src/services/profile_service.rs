use crate::models::{profiles::ProfileDetails, users::UserResponse};
use crate::repositories::{post_repository::PostRepository, user_repository::UserRepository};
use crate::utils::errors::app_error::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileService {
    user_repository: Arc<UserRepository>,
    post_repository: Arc<PostRepository>,
}

impl ProfileService {
    pub fn new(user_repository: Arc<UserRepository>, post_repository: Arc<PostRepository>) -> Self {
        Self {
            user_repository,
            post_repository,
        }
    }

    pub async fn get_profile(
        &self,
        user_id: i64,
        viewer_id: Option<i64>,
    ) -> Result<ProfileDetails, AppError> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let counts = self.user_repository.follow_counts(user_id).await?;
        let following = self
            .user_repository
            .get_following(user_id)
            .await?
            .into_iter()
            .map(UserResponse::from)
            .collect();
        let posts = self
            .post_repository
            .list_user_posts(user_id, viewer_id)
            .await?;

        let viewer_follows = match viewer_id {
            Some(viewer_id) if viewer_id != user_id => Some(
                self.user_repository
                    .is_following(viewer_id, user_id)
                    .await?,
            ),
            _ => None,
        };

        Ok(ProfileDetails {
            user: user.into(),
            counts,
            following,
            posts,
            viewer_follows,
        })
    }
}
