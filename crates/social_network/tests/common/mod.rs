#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use social_network::settings::Settings;
use tower::ServiceExt;

pub async fn app() -> Router {
    let settings = Settings {
        environment: Some("TEST".to_string()),
        database_url: "sqlite::memory:".to_string(),
        port: None,
        session_ttl_hours: None,
    };
    social_network::setup_router(&settings).await.unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub cookie: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/html"))
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let resp = router.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let location = resp
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().split(';').next().unwrap().to_string());
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    TestResponse {
        status,
        content_type,
        location,
        cookie,
        body: String::from_utf8_lossy(&bytes).to_string(),
    }
}

fn with_cookie(
    builder: axum::http::request::Builder,
    cookie: Option<&str>,
) -> axum::http::request::Builder {
    match cookie {
        Some(cookie) => builder.header(header::COOKIE, cookie),
        None => builder,
    }
}

pub async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    let req = with_cookie(Request::builder().method("GET").uri(uri), cookie)
        .body(Body::empty())
        .unwrap();
    send(router, req).await
}

pub async fn post_form(
    router: &Router,
    uri: &str,
    cookie: Option<&str>,
    fields: &[(&str, &str)],
) -> TestResponse {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let req = with_cookie(Request::builder().method("POST").uri(uri), cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(router, req).await
}

pub async fn post_json(
    router: &Router,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> TestResponse {
    let req = with_cookie(Request::builder().method("POST").uri(uri), cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, req).await
}

/// Registers `username` with password "pw" and returns the session cookie.
pub async fn register(router: &Router, username: &str) -> String {
    let email = format!("{}@example.com", username);
    let resp = post_form(
        router,
        "/register",
        None,
        &[
            ("username", username),
            ("email", &email),
            ("password", "pw"),
            ("confirmation", "pw"),
        ],
    )
    .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER, "{}", resp.body);
    resp.cookie.expect("session cookie")
}
