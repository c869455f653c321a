use crate::models::posts::{LikeAction, LikeSummary, Post, PostView, MAX_POST_LENGTH};
use crate::repositories::post_repository::PostRepository;
use crate::utils::errors::app_error::AppError;
use crate::utils::pagination::{Page, PageWindow, PAGE_SIZE};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct PostService {
    post_repository: Arc<PostRepository>,
}

impl PostService {
    pub fn new(post_repository: Arc<PostRepository>) -> Self {
        Self { post_repository }
    }

    /// All posts, newest first, one page at a time.
    pub async fn list_posts(
        &self,
        viewer_id: Option<i64>,
        page: i64,
    ) -> Result<Page<PostView>, AppError> {
        let total = self.post_repository.count_posts().await?;
        let window = PageWindow::resolve(page, total, PAGE_SIZE)?;
        let posts = self
            .post_repository
            .list_posts(viewer_id, window.limit, window.offset)
            .await?;
        Ok(window.into_page(posts, total))
    }

    /// Posts by the users `user_id` follows, paginated like [`Self::list_posts`].
    pub async fn list_following_posts(
        &self,
        user_id: i64,
        page: i64,
    ) -> Result<Page<PostView>, AppError> {
        let total = self.post_repository.count_followed_posts(user_id).await?;
        let window = PageWindow::resolve(page, total, PAGE_SIZE)?;
        let posts = self
            .post_repository
            .list_followed_posts(user_id, window.limit, window.offset)
            .await?;
        Ok(window.into_page(posts, total))
    }

    pub async fn create_post(&self, author_id: i64, body: &str) -> Result<Post, AppError> {
        let body = validate_body(body)?;
        let post = self.post_repository.create_post(author_id, body).await?;
        info!("User {} created post {}", author_id, post.id);
        Ok(post)
    }

    /// Loads a post for editing. Only its author may open it.
    pub async fn get_owned_post(&self, actor_id: i64, post_id: i64) -> Result<Post, AppError> {
        let post = self
            .post_repository
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

        if post.user_id != actor_id {
            warn!(
                "User {} tried to edit post {} owned by user {}",
                actor_id, post_id, post.user_id
            );
            return Err(AppError::Forbidden(
                "You can only edit your own posts".to_string(),
            ));
        }

        Ok(post)
    }

    pub async fn edit_post(
        &self,
        actor_id: i64,
        post_id: i64,
        body: &str,
    ) -> Result<Post, AppError> {
        self.get_owned_post(actor_id, post_id).await?;
        let body = validate_body(body)?;
        let post = self.post_repository.update_body(post_id, body).await?;
        info!("User {} edited post {}", actor_id, post_id);
        Ok(post)
    }

    /// Changes `actor_id`'s like on a post. Without an explicit `action` the
    /// stored membership is flipped.
    pub async fn like_post(
        &self,
        actor_id: i64,
        post_id: i64,
        action: Option<LikeAction>,
    ) -> Result<LikeSummary, AppError> {
        if self.post_repository.find_by_id(post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Post {} not found", post_id)));
        }

        let summary = match action {
            None => self.post_repository.toggle_like(post_id, actor_id).await?,
            Some(LikeAction::Like) => self.post_repository.set_like(post_id, actor_id, true).await?,
            Some(LikeAction::Unlike) => {
                self.post_repository
                    .set_like(post_id, actor_id, false)
                    .await?
            }
        };

        debug!(
            "User {} like on post {} is now {} ({} likes)",
            actor_id, post_id, summary.liked, summary.likes
        );
        Ok(summary)
    }
}

fn validate_body(body: &str) -> Result<&str, AppError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(AppError::Validation("Post cannot be empty".to_string()));
    }
    if body.chars().count() > MAX_POST_LENGTH {
        return Err(AppError::Validation(format!(
            "Post cannot be longer than {} characters",
            MAX_POST_LENGTH
        )));
    }
    Ok(body)
}
