use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::{
    api_models::request::{LoginForm, RegisterForm},
    middlewares::session::{expired_session_cookie, session_cookie, SESSION_COOKIE},
};
use crate::{utils::errors::app_error::AppError, views, AppState};

pub const TAG: &str = "auth";

/// Render the login form
#[utoipa::path(
    get,
    tag = TAG,
    path = "/login",
    operation_id = "loginForm",
    responses(
        (status = 200, description = "Login form", content_type = "text/html", body = String)
    )
)]
pub(super) async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

/// Log in and start a session
#[utoipa::path(
    post,
    tag = TAG,
    path = "/login",
    operation_id = "login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, session cookie set"),
        (status = 401, description = "Login form with an error message", content_type = "text/html", body = String)
    )
)]
pub(super) async fn login(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match app_state
        .auth_service
        .login(&form.username, &form.password)
        .await
    {
        Ok(session) => {
            Ok((jar.add(session_cookie(session.token)), Redirect::to("/")).into_response())
        }
        Err(AppError::Unauthorized(message)) => {
            warn!("Failed login for {:?}", form.username);
            Ok((
                StatusCode::UNAUTHORIZED,
                Html(views::login_page(Some(&message))),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// End the current session. Served on GET and POST.
pub(super) async fn logout(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        app_state.auth_service.logout(cookie.value()).await?;
    }
    Ok((jar.remove(expired_session_cookie()), Redirect::to("/")))
}

/// Render the registration form
#[utoipa::path(
    get,
    tag = TAG,
    path = "/register",
    operation_id = "registerForm",
    responses(
        (status = 200, description = "Registration form", content_type = "text/html", body = String)
    )
)]
pub(super) async fn register_form() -> Html<String> {
    Html(views::register_page(None))
}

/// Create an account and start a session
#[utoipa::path(
    post,
    tag = TAG,
    path = "/register",
    operation_id = "register",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered, session cookie set"),
        (status = 400, description = "Registration form with an error message", content_type = "text/html", body = String)
    )
)]
pub(super) async fn register(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    match app_state.auth_service.register(form.into()).await {
        Ok(session) => {
            Ok((jar.add(session_cookie(session.token)), Redirect::to("/")).into_response())
        }
        Err(AppError::Validation(message)) => Ok((
            StatusCode::BAD_REQUEST,
            Html(views::register_page(Some(&message))),
        )
            .into_response()),
        Err(e) => Err(e),
    }
}
