use apis::setup_routes;
use axum::Router;
use repositories::{
    post_repository::PostRepository, session_repository::SessionRepository,
    user_repository::UserRepository,
};
use services::{
    auth_service::AuthService, post_service::PostService, profile_service::ProfileService,
    user_service::UserService,
};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::{str::FromStr, sync::Arc};
use tower_http::trace::TraceLayer;

pub mod apis;
pub mod models;
pub mod repositories;
pub mod services;
pub mod settings;
pub mod utils;
pub mod views;

pub struct AppState {
    pub user_service: UserService,
    pub post_service: PostService,
    pub profile_service: ProfileService,
    pub auth_service: AuthService,
}

/// Opens the pool and applies the embedded migrations.
pub async fn setup_database(database_url: &str) -> Result<Arc<SqlitePool>, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    // An in-memory database lives and dies with its single connection.
    let pool = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    sqlx::migrate!().run(&pool).await?;
    Ok(Arc::new(pool))
}

pub fn setup_services(db: Arc<SqlitePool>, settings: &settings::Settings) -> AppState {
    let user_repository = Arc::new(UserRepository::new(db.clone()));
    let post_repository = Arc::new(PostRepository::new(db.clone()));
    let session_repository = Arc::new(SessionRepository::new(db));

    AppState {
        user_service: UserService::new(user_repository.clone()),
        post_service: PostService::new(post_repository.clone()),
        profile_service: ProfileService::new(user_repository.clone(), post_repository),
        auth_service: AuthService::new(
            user_repository,
            session_repository,
            settings.session_ttl_hours(),
        ),
    }
}

pub async fn setup_router(
    settings: &settings::Settings,
) -> Result<Router, Box<dyn std::error::Error>> {
    let db = setup_database(&settings.database_url).await?;
    let state = setup_services(db, settings);

    Ok(setup_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

pub fn init_tracing(settings: &settings::Settings) {
    let level = if settings.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_names(true)
        .with_ansi(!settings.is_production())
        .init();
}

#[cfg(test)]
pub(crate) mod test_utils {
    use super::*;
    use crate::models::users::{NewUser, User};

    pub async fn test_db() -> Arc<SqlitePool> {
        setup_database("sqlite::memory:").await.unwrap()
    }

    /// Inserts a user directly; the stored hash is not a valid password.
    pub async fn create_user(db: &Arc<SqlitePool>, username: &str) -> User {
        UserRepository::new(db.clone())
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash: "unusable".to_string(),
            })
            .await
            .unwrap()
    }
}
