mod common;

use axum::http::StatusCode;
use common::{app, get, post_form, register};

#[tokio::test]
async fn forms_render() {
    let router = app().await;
    let login = get(&router, "/login", None).await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body.contains(r#"action="/login""#));

    let register = get(&router, "/register", None).await;
    assert_eq!(register.status, StatusCode::OK);
    assert!(register.body.contains(r#"name="confirmation""#));
}

#[tokio::test]
async fn mismatched_confirmation_creates_no_user() {
    let router = app().await;
    let resp = post_form(
        &router,
        "/register",
        None,
        &[
            ("username", "alice"),
            ("email", "alice@example.com"),
            ("password", "one"),
            ("confirmation", "two"),
        ],
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("Passwords must match."));
    assert!(resp.cookie.is_none());

    let login = post_form(
        &router,
        "/login",
        None,
        &[("username", "alice"), ("password", "one")],
    )
    .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let profile = get(&router, "/profile/1", None).await;
    assert_eq!(profile.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_username_rerenders_form() {
    let router = app().await;
    register(&router, "alice").await;

    let resp = post_form(
        &router,
        "/register",
        None,
        &[
            ("username", "alice"),
            ("email", "other@example.com"),
            ("password", "pw"),
            ("confirmation", "pw"),
        ],
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.contains("Username already taken."));
}

#[tokio::test]
async fn login_and_logout() {
    let router = app().await;
    register(&router, "alice").await;

    let bad = post_form(
        &router,
        "/login",
        None,
        &[("username", "alice"), ("password", "wrong")],
    )
    .await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
    assert!(bad.body.contains("Invalid username and/or password."));

    let good = post_form(
        &router,
        "/login",
        None,
        &[("username", "alice"), ("password", "pw")],
    )
    .await;
    assert_eq!(good.status, StatusCode::SEE_OTHER);
    let cookie = good.cookie.expect("session cookie");

    let feed = get(&router, "/following", Some(&cookie)).await;
    assert_eq!(feed.status, StatusCode::OK);

    let logout = get(&router, "/logout", Some(&cookie)).await;
    assert_eq!(logout.status, StatusCode::SEE_OTHER);
    assert_eq!(logout.location.as_deref(), Some("/"));

    let feed = get(&router, "/following", Some(&cookie)).await;
    assert_eq!(feed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_still_redirects() {
    let router = app().await;
    let resp = post_form(&router, "/logout", None, &[]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
}
