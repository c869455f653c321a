use crate::models::{
    sessions::Session,
    users::{NewUser, UserResponse},
};
use crate::repositories::{
    session_repository::SessionRepository, user_repository::UserRepository,
};
use crate::utils::errors::app_error::AppError;
use crate::utils::password::{hash_password, verify_password};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};

pub const INVALID_CREDENTIALS: &str = "Invalid username and/or password.";

#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

#[derive(Clone)]
pub struct AuthService {
    user_repository: Arc<UserRepository>,
    session_repository: Arc<SessionRepository>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        user_repository: Arc<UserRepository>,
        session_repository: Arc<SessionRepository>,
        session_ttl_hours: i64,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            session_ttl: Duration::hours(session_ttl_hours),
        }
    }

    /// Creates the user and logs them in. Every validation failure happens
    /// before anything is written.
    pub async fn register(&self, registration: Registration) -> Result<Session, AppError> {
        let username = registration.username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required.".to_string()));
        }
        if registration.password.is_empty() {
            return Err(AppError::Validation("Password is required.".to_string()));
        }
        if registration.password != registration.confirmation {
            return Err(AppError::Validation("Passwords must match.".to_string()));
        }
        if self.user_repository.find_by_username(username).await?.is_some() {
            return Err(username_taken());
        }

        let password_hash = hash_password(&registration.password)?;
        let user = self
            .user_repository
            .create_user(NewUser {
                username: username.to_string(),
                email: registration.email.trim().to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => username_taken(),
                e => AppError::DatabaseError(e),
            })?;

        info!("Registered user {} ({})", user.id, user.username);
        self.start_session(user.id).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let user = self
            .user_repository
            .find_by_username(username.trim())
            .await?
            .filter(|user| verify_password(password, &user.password_hash))
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        info!("User {} logged in", user.id);
        self.start_session(user.id).await
    }

    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        self.session_repository.delete_session(token).await?;
        Ok(())
    }

    /// Resolves a session cookie to its user. Unknown and expired tokens
    /// resolve to `None`.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<UserResponse>, AppError> {
        let Some(session) = self.session_repository.find_by_token(token).await? else {
            return Ok(None);
        };

        if session.is_expired(self.session_ttl, Utc::now()) {
            debug!("Session for user {} expired", session.user_id);
            self.session_repository.delete_session(token).await?;
            return Ok(None);
        }

        let user = self.user_repository.find_by_id(session.user_id).await?;
        Ok(user.map(UserResponse::from))
    }

    /// Sweeps expired sessions before issuing a new one.
    async fn start_session(&self, user_id: i64) -> Result<Session, AppError> {
        let purged = self
            .session_repository
            .delete_created_before(Utc::now() - self.session_ttl)
            .await?;
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }

        Ok(self.session_repository.create_session(user_id).await?)
    }
}

fn username_taken() -> AppError {
    AppError::Validation("Username already taken.".to_string())
}
