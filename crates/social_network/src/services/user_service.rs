use crate::models::user_follows::{FollowAction, FollowCounts};
use crate::models::users::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::app_error::AppError;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<UserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn get_user(&self, id: i64) -> Result<UserResponse, AppError> {
        self.user_repository
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Applies `action` to the edge `actor_id -> target_id` and returns the
    /// target's counts after the change.
    pub async fn follow_action(
        &self,
        actor_id: i64,
        target_id: i64,
        action: FollowAction,
    ) -> Result<(UserResponse, FollowCounts), AppError> {
        if actor_id == target_id {
            return Err(AppError::Validation("You cannot follow yourself".to_string()));
        }

        let target = self.get_user(target_id).await?;

        let counts = match action {
            FollowAction::Follow => {
                self.user_repository
                    .follow_user(actor_id, target_id)
                    .await?
            }
            FollowAction::Unfollow => {
                self.user_repository
                    .unfollow_user(actor_id, target_id)
                    .await?
            }
        };

        info!(
            "User {} {}ed user {} ({} followers)",
            actor_id, action, target_id, counts.follower_count
        );
        Ok((target, counts))
    }
}
