use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use tracing::debug;

use super::{
    api_models::{
        query::PageQuery,
        request::{LikeRequest, PostForm},
        response::LikeResponse,
    },
    middlewares::session::{CurrentUser, MaybeUser},
};
use crate::{
    models::users::UserResponse,
    utils::errors::{app_error::AppError, error_payload::ErrorPayload},
    views, AppState,
};

pub const TAG: &str = "posts";

/// List all posts, newest first
#[utoipa::path(
    get,
    tag = TAG,
    path = "/",
    operation_id = "listPosts",
    responses(
        (status = 200, description = "Page of posts", content_type = "text/html", body = String),
        (status = 400, description = "First page with an invalid page message", content_type = "text/html", body = String)
    ),
    params(PageQuery)
)]
pub(super) async fn index(
    State(app_state): State<Arc<AppState>>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let viewer_id = viewer.as_ref().map(|u| u.id);
    let listing = match query.page() {
        Ok(page) => app_state.post_service.list_posts(viewer_id, page).await,
        Err(e) => Err(e),
    };

    match listing {
        Ok(page) => Ok(Html(views::post_list_page(
            "All Posts",
            "/",
            viewer.as_ref(),
            &page,
            true,
            None,
        ))
        .into_response()),
        Err(e) if is_user_input_error(&e) => {
            all_posts_with_message(&app_state, viewer.as_ref(), &e.to_string()).await
        }
        Err(e) => Err(e),
    }
}

/// Create a post
#[utoipa::path(
    post,
    tag = TAG,
    path = "/",
    operation_id = "createPost",
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Post created, redirect to the listing"),
        (status = 400, description = "Form re-rendered with a validation message", content_type = "text/html", body = String),
        (status = 401, description = "Not logged in", body = ErrorPayload)
    )
)]
pub(super) async fn create_post(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    match app_state.post_service.create_post(user.id, &form.post).await {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(message)) => {
            all_posts_with_message(&app_state, Some(&user), &message).await
        }
        Err(e) => Err(e),
    }
}

/// List posts by the users the current user follows
#[utoipa::path(
    get,
    tag = TAG,
    path = "/following",
    operation_id = "listFollowingPosts",
    responses(
        (status = 200, description = "Page of posts", content_type = "text/html", body = String),
        (status = 400, description = "First page with an invalid page message", content_type = "text/html", body = String),
        (status = 401, description = "Not logged in", body = ErrorPayload)
    ),
    params(PageQuery)
)]
pub(super) async fn following(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Response, AppError> {
    let listing = match query.page() {
        Ok(page) => {
            app_state
                .post_service
                .list_following_posts(user.id, page)
                .await
        }
        Err(e) => Err(e),
    };

    let (page, status, message) = match listing {
        Ok(page) => (page, StatusCode::OK, None),
        Err(e) if is_user_input_error(&e) => {
            let first = app_state
                .post_service
                .list_following_posts(user.id, 1)
                .await?;
            (first, StatusCode::BAD_REQUEST, Some(e.to_string()))
        }
        Err(e) => return Err(e),
    };

    Ok((
        status,
        Html(views::post_list_page(
            "Following",
            "/following",
            Some(&user),
            &page,
            false,
            message.as_deref(),
        )),
    )
        .into_response())
}

/// Render the edit form for one of the current user's posts
#[utoipa::path(
    get,
    tag = TAG,
    path = "/edit/{post_id}",
    operation_id = "editPostForm",
    responses(
        (status = 200, description = "Edit form", content_type = "text/html", body = String),
        (status = 401, description = "Not logged in", body = ErrorPayload),
        (status = 403, description = "Post belongs to another user", body = ErrorPayload),
        (status = 404, description = "Post not found", body = ErrorPayload)
    ),
    params(
        ("post_id" = i64, Path, description = "Post ID")
    )
)]
pub(super) async fn edit_form(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let post = app_state
        .post_service
        .get_owned_post(user.id, post_id)
        .await?;
    Ok(Html(views::edit_page(&user, post.id, &post.body, None)))
}

/// Save an edited post
#[utoipa::path(
    post,
    tag = TAG,
    path = "/edit/{post_id}",
    operation_id = "editPost",
    request_body(content = PostForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Post saved, redirect to the listing"),
        (status = 400, description = "Form re-rendered with a validation message", content_type = "text/html", body = String),
        (status = 401, description = "Not logged in", body = ErrorPayload),
        (status = 403, description = "Post belongs to another user", body = ErrorPayload),
        (status = 404, description = "Post not found", body = ErrorPayload)
    ),
    params(
        ("post_id" = i64, Path, description = "Post ID")
    )
)]
pub(super) async fn edit_post(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    match app_state
        .post_service
        .edit_post(user.id, post_id, &form.post)
        .await
    {
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(AppError::Validation(message)) => Ok((
            StatusCode::BAD_REQUEST,
            Html(views::edit_page(&user, post_id, &form.post, Some(&message))),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}

/// Like or unlike a post
#[utoipa::path(
    post,
    tag = TAG,
    path = "/like",
    operation_id = "likePost",
    request_body = LikeRequest,
    responses(
        (status = 200, description = "Like-set updated", body = LikeResponse),
        (status = 401, description = "Not logged in", body = ErrorPayload),
        (status = 404, description = "Post not found", body = ErrorPayload)
    )
)]
pub(super) async fn like_post(
    State(app_state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<LikeRequest>,
) -> Result<(StatusCode, Json<LikeResponse>), AppError> {
    if let Some(heart) = &body.heart {
        debug!("Ignoring client like state {:?} for post {}", heart, body.post_id);
    }

    let summary = app_state
        .post_service
        .like_post(user.id, body.post_id, body.action)
        .await?;
    Ok((StatusCode::OK, Json(summary.into())))
}

/// Bad page numbers and rejected post bodies are shown on the page itself.
fn is_user_input_error(error: &AppError) -> bool {
    matches!(
        error,
        AppError::InvalidPage { .. } | AppError::Validation(_)
    )
}

/// The first page of all posts with `message` on top, answered with 400.
async fn all_posts_with_message(
    app_state: &AppState,
    viewer: Option<&UserResponse>,
    message: &str,
) -> Result<Response, AppError> {
    let page = app_state
        .post_service
        .list_posts(viewer.map(|u| u.id), 1)
        .await?;

    Ok((
        StatusCode::BAD_REQUEST,
        Html(views::post_list_page(
            "All Posts",
            "/",
            viewer,
            &page,
            true,
            Some(message),
        )),
    )
        .into_response())
}
