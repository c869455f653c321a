use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};

use super::{
    api_models::{request::FollowRequest, response::FollowResponse},
    middlewares::session::{CurrentUser, MaybeUser},
};
use crate::{
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    views, AppState,
};

pub const TAG: &str = "profiles";

/// Show a user's profile
#[utoipa::path(
    get,
    tag = TAG,
    path = "/profile/{user_id}",
    operation_id = "getProfile",
    responses(
        (status = 200, description = "Profile page", content_type = "text/html", body = String),
        (status = 404, description = "User not found", body = ErrorPayload)
    ),
    params(
        ("user_id" = i64, Path, description = "User ID")
    )
)]
pub(super) async fn get_profile(
    State(app_state): State<Arc<AppState>>,
    MaybeUser(viewer): MaybeUser,
    Path(user_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let profile = app_state
        .profile_service
        .get_profile(user_id, viewer.as_ref().map(|u| u.id))
        .await?;
    Ok(Html(views::profile_page(viewer.as_ref(), &profile)))
}

/// Follow or unfollow a user
#[utoipa::path(
    post,
    tag = TAG,
    path = "/profile/{user_id}",
    operation_id = "followUser",
    request_body = FollowRequest,
    responses(
        (status = 200, description = "Follow state updated", body = FollowResponse),
        (status = 400, description = "Self-follow or mismatched user id", body = ErrorPayload),
        (status = 401, description = "Not logged in", body = ErrorPayload),
        (status = 404, description = "User not found", body = ErrorPayload)
    ),
    params(
        ("user_id" = i64, Path, description = "User ID to follow or unfollow")
    )
)]
pub(super) async fn follow_user(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(user_id): Path<i64>,
    Json(body): Json<FollowRequest>,
) -> Result<(StatusCode, Json<FollowResponse>), AppError> {
    if body.user_id != user_id {
        return Err(AppError::BadRequest(format!(
            "user_id {} does not match profile {}",
            body.user_id, user_id
        )));
    }

    let (target, counts) = app_state
        .user_service
        .follow_action(user.id, user_id, body.btn_value)
        .await?;

    Ok((
        StatusCode::OK,
        Json(FollowResponse {
            message: format!("{}ed {} confirmed", body.btn_value, target.username),
            follower_count: counts.follower_count,
            following_count: counts.following_count,
        }),
    ))
}
