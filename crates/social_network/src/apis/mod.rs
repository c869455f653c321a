use std::sync::Arc;

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_scalar::{Scalar, Servable};

use crate::AppState;

pub mod api_models;
pub mod auth_handlers;
pub mod middlewares;
pub mod post_handlers;
pub mod profile_handlers;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "posts", description = "Post listing, editing and likes"),
        (name = "profiles", description = "Profiles and the follow graph"),
        (name = "auth", description = "Registration and sessions")
    )
)]
pub struct ApiDoc;

pub fn setup_routes() -> Router<Arc<AppState>> {
    let api_doc = ApiDoc::openapi();

    let post_router = OpenApiRouter::new()
        .routes(routes!(post_handlers::index, post_handlers::create_post))
        .routes(routes!(post_handlers::following))
        .routes(routes!(post_handlers::edit_form, post_handlers::edit_post))
        .routes(routes!(post_handlers::like_post));

    let profile_router = OpenApiRouter::new().routes(routes!(
        profile_handlers::get_profile,
        profile_handlers::follow_user
    ));

    let auth_router = OpenApiRouter::new()
        .routes(routes!(auth_handlers::login_form, auth_handlers::login))
        .routes(routes!(auth_handlers::register_form, auth_handlers::register));

    let (router, api_openapi) = OpenApiRouter::with_openapi(api_doc)
        .merge(post_router)
        .merge(profile_router)
        .merge(auth_router)
        .split_for_parts();

    Router::new()
        .merge(Scalar::with_url("/docs", api_openapi))
        .merge(router)
        .route(
            "/logout",
            get(auth_handlers::logout).post(auth_handlers::logout),
        )
}
