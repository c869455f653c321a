use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::{posts::LikeAction, user_follows::FollowAction};
use crate::services::auth_service::Registration;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostForm {
    pub post: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterForm {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

impl From<RegisterForm> for Registration {
    fn from(form: RegisterForm) -> Self {
        Registration {
            username: form.username,
            email: form.email,
            password: form.password,
            confirmation: form.confirmation,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FollowRequest {
    pub btn_value: FollowAction,
    pub user_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LikeRequest {
    pub post_id: i64,
    /// What the page currently shows. Accepted for older clients and ignored.
    pub heart: Option<String>,
    /// Set or clear the like instead of toggling it.
    pub action: Option<LikeAction>,
}
