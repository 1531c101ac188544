//! Site rendering tests
//!
//! Requests against the bundled site with the upstream API mocked

use axum::http::{header, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header as header_matcher, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{embedded_state, spawn_site, TEST_ANALYTICS, TEST_PARTIAL};
use crate::{assert_contains, assert_not_contains};

#[tokio::test]
async fn test_home_page_is_full_document() {
    let app = spawn_site().await;

    let response = app
        .server
        .get("/")
        .add_header(header::COOKIE, HeaderValue::from_static("sid=abc"))
        .add_header(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X)"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert_contains!(html, "<!DOCTYPE html>");
    assert_contains!(html, "<title>GolangCI</title>");
    assert_contains!(html, TEST_PARTIAL);
    assert_contains!(html, TEST_ANALYTICS);

    let state = embedded_state(&html);
    assert_eq!(state.auth.cookie, "sid=abc");
    assert_eq!(state.router.location, "/");
    assert_eq!(state.result.api_result_http_code, Some(200));
    assert!(state.device.tablet);
    assert!(!state.device.desktop);
}

#[tokio::test]
async fn test_repo_page_loads_upstream_data() {
    let app = spawn_site().await;
    Mock::given(method("GET"))
        .and(path("/v1/repos/golangci/golangci-lint"))
        .and(header_matcher("cookie", "sid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "description": "Fast linters runner",
            "issues": 12
        })))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/repos/golangci/golangci-lint?tab=issues")
        .add_header(header::COOKIE, HeaderValue::from_static("sid=abc"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert_contains!(html, "<h1>golangci/golangci-lint</h1>");
    assert_contains!(html, "12 issues");

    let state = embedded_state(&html);
    assert_eq!(state.router.location, "/repos/golangci/golangci-lint?tab=issues");
    assert_eq!(
        state.slice("repo"),
        Some(&json!({"description": "Fast linters runner", "issues": 12}))
    );
}

#[tokio::test]
async fn test_upstream_failure_is_status_only() {
    let app = spawn_site().await;
    Mock::given(method("GET"))
        .and(path("/v1/repos/private/repo"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.upstream)
        .await;

    let response = app.server.get("/repos/private/repo").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body = response.text();
    assert_not_contains!(body, "<html");
    assert_not_contains!(body, "__INITIAL_STATE__");
}

#[tokio::test]
async fn test_upstream_error_status_is_forwarded() {
    let app = spawn_site().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.upstream)
        .await;

    let response = app.server.get("/repos/a/b").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_short_link_redirects() {
    let app = spawn_site().await;

    let response = app.server.get("/r/golangci/golangci-lint").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header(header::LOCATION),
        "/repos/golangci/golangci-lint"
    );
    assert_not_contains!(response.text(), "<html");
}

#[tokio::test]
async fn test_moved_repo_redirects_after_load() {
    let app = spawn_site().await;
    Mock::given(method("GET"))
        .and(path("/v1/repos/old/name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"movedTo": "new/name"})))
        .mount(&app.upstream)
        .await;

    let response = app.server.get("/repos/old/name").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header(header::LOCATION), "/repos/new/name");
}

#[tokio::test]
async fn test_unknown_page_is_404() {
    let app = spawn_site().await;
    let response = app.server.get("/definitely/not/a/page").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_same_request_renders_identical_documents() {
    let app = spawn_site().await;

    let first = app.server.get("/?lang=go").await.text();
    let second = app.server.get("/?lang=go").await.text();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_static_files_are_served() {
    let app = spawn_site().await;
    std::fs::write(app.static_dir.path().join("app.js"), "console.log(1)").unwrap();

    let response = app.server.get("/static/app.js").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "console.log(1)");
}

#[tokio::test]
async fn test_non_get_is_rejected() {
    let app = spawn_site().await;
    let response = app.server.post("/").await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}
