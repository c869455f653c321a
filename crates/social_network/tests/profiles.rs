mod common;

use axum::http::StatusCode;
use common::{app, get, post_form, post_json, register};
use serde_json::json;

// Users get ids in registration order on a fresh database.
const ALICE: i64 = 1;
const BOB: i64 = 2;

#[tokio::test]
async fn follow_then_unfollow_restores_counts() {
    let router = app().await;
    let alice = register(&router, "alice").await;
    register(&router, "bob").await;

    let follow = json!({"btn_value": "follow", "user_id": BOB});
    let resp = post_json(&router, "/profile/2", Some(&alice), follow.clone()).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.json(),
        json!({"message": "followed bob confirmed", "follower_count": 1, "following_count": 0})
    );

    // Following twice keeps a single edge.
    let resp = post_json(&router, "/profile/2", Some(&alice), follow).await;
    assert_eq!(resp.json()["follower_count"], 1);

    let resp = post_json(
        &router,
        "/profile/2",
        Some(&alice),
        json!({"btn_value": "unfollow", "user_id": BOB}),
    )
    .await;
    assert_eq!(
        resp.json(),
        json!({"message": "unfollowed bob confirmed", "follower_count": 0, "following_count": 0})
    );
}

#[tokio::test]
async fn self_follow_is_rejected() {
    let router = app().await;
    let alice = register(&router, "alice").await;

    let resp = post_json(
        &router,
        "/profile/1",
        Some(&alice),
        json!({"btn_value": "follow", "user_id": ALICE}),
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["type"], "VALIDATION_ERROR");

    let profile = get(&router, "/profile/1", Some(&alice)).await;
    assert!(profile.body.contains("Followers: 0 &middot; Following: 0"));
}

#[tokio::test]
async fn follow_request_validation() {
    let router = app().await;
    let alice = register(&router, "alice").await;
    register(&router, "bob").await;

    let resp = post_json(&router, "/profile/2", None, json!({"btn_value": "follow", "user_id": BOB})).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = post_json(
        &router,
        "/profile/2",
        Some(&alice),
        json!({"btn_value": "follow", "user_id": 3}),
    )
    .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);

    let resp = post_json(
        &router,
        "/profile/9",
        Some(&alice),
        json!({"btn_value": "follow", "user_id": 9}),
    )
    .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_page_shows_counts_and_posts() {
    let router = app().await;
    let alice = register(&router, "alice").await;
    let bob = register(&router, "bob").await;
    post_form(&router, "/", Some(&bob), &[("post", "bob's first")]).await;
    post_json(
        &router,
        "/profile/2",
        Some(&alice),
        json!({"btn_value": "follow", "user_id": BOB}),
    )
    .await;

    let page = get(&router, "/profile/2", Some(&alice)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Followers: 1 &middot; Following: 0"));
    assert!(page.body.contains("bob&#x27;s first") || page.body.contains("bob's first"));
    assert!(page.body.contains(r#"data-action="unfollow""#));

    let own = get(&router, "/profile/2", Some(&bob)).await;
    assert!(!own.body.contains("data-action="));

    let alice_page = get(&router, "/profile/1", None).await;
    assert!(alice_page.body.contains("Followers: 0 &middot; Following: 1"));
    assert!(alice_page.body.contains(r#"<a href="/profile/2">bob</a>"#));

    let missing = get(&router, "/profile/42", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn following_feed_requires_login_and_filters_authors() {
    let router = app().await;
    let alice = register(&router, "alice").await;
    let bob = register(&router, "bob").await;
    let carol = register(&router, "carol").await;
    post_form(&router, "/", Some(&bob), &[("post", "posted by bob")]).await;
    post_form(&router, "/", Some(&carol), &[("post", "posted by carol")]).await;

    let resp = get(&router, "/following", None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    post_json(
        &router,
        "/profile/2",
        Some(&alice),
        json!({"btn_value": "follow", "user_id": BOB}),
    )
    .await;
    let feed = get(&router, "/following", Some(&alice)).await;
    assert_eq!(feed.status, StatusCode::OK);
    assert!(feed.body.contains("posted by bob"));
    assert!(!feed.body.contains("posted by carol"));

    let resp = get(&router, "/following?page=2", Some(&alice)).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.is_html());
    assert!(resp.body.contains("page 2 does not exist"));
    assert!(resp.body.contains("posted by bob"));
}
