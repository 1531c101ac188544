//! Pipeline behaviour through the router with a custom application

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use ssr_render::backend::error::BackendError;
use ssr_render::backend::render::context::RenderContext;
use ssr_render::backend::render::effects::{EffectError, EffectScope};
use ssr_render::backend::render::routing::{Application, Page, PageContext, RouteTree};
use ssr_render::backend::server::ServerConfig;
use ssr_render::shared::{toggle, Action, RenderConfig, SharedError};

use crate::common::{embedded_state, spawn_app};
use crate::{assert_contains, assert_ok};

/// Two slow effects plus a toggle; renders what it finds in the state
struct Dashboard;

impl Page for Dashboard {
    fn effects(&self, _cx: &PageContext<'_>, scope: &mut EffectScope) {
        scope.spawn("slow", async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok::<_, EffectError>(vec![Action::set_slice("slow", json!(1))])
        });
        scope.spawn("fast", async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok::<_, EffectError>(vec![
                Action::set_slice("fast", json!(2)),
                toggle("sidebar", None),
            ])
        });
    }

    fn render(&self, cx: &PageContext<'_>, out: &mut RenderContext) -> Result<String, BackendError> {
        out.head.set_title("Dashboard");
        let slow = cx.state.slice("slow").cloned().unwrap_or(Value::Null);
        let fast = cx.state.slice("fast").cloned().unwrap_or(Value::Null);
        Ok(format!(
            "<p>slow={} fast={} sidebar={}</p>",
            slow,
            fast,
            cx.state.toggle.store.is_on("sidebar")
        ))
    }
}

struct Panicking;

impl Page for Panicking {
    fn effects(&self, _cx: &PageContext<'_>, scope: &mut EffectScope) {
        scope.spawn("explodes", async {
            if true {
                panic!("effect blew up");
            }
            Ok::<Vec<Action>, EffectError>(Vec::new())
        });
    }

    fn render(&self, _cx: &PageContext<'_>, _out: &mut RenderContext) -> Result<String, BackendError> {
        Ok("<p>never sent</p>".to_string())
    }
}

struct TestApplication;

impl Application for TestApplication {
    fn routes(&self) -> Result<RouteTree, SharedError> {
        RouteTree::builder()
            .page("/", Dashboard)
            .page("/panic", Panicking)
            .build()
    }
}

fn config_with(render: RenderConfig) -> ServerConfig {
    ServerConfig {
        port: 0,
        static_dir: std::env::temp_dir(),
        render,
    }
}

fn inline_config() -> ServerConfig {
    config_with(assert_ok!(RenderConfig::builder().inline_partial("<!-- assets -->").build()))
}

#[tokio::test]
async fn test_render_waits_for_every_effect() {
    let server = spawn_app(Arc::new(TestApplication), inline_config());

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let html = response.text();
    assert_contains!(html, "<p>slow=1 fast=2 sidebar=true</p>");

    let state = embedded_state(&html);
    assert_eq!(state.slice("slow"), Some(&json!(1)));
    assert_eq!(state.slice("fast"), Some(&json!(2)));
    assert!(state.toggle.store.is_on("sidebar"));
}

#[tokio::test]
async fn test_panicking_effect_is_500_without_document() {
    let server = spawn_app(Arc::new(TestApplication), inline_config());

    let response = server.get("/panic").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains("never sent"));
}

#[tokio::test]
async fn test_missing_partial_is_500_json() {
    let dir = tempfile::tempdir().unwrap();
    let render = assert_ok!(RenderConfig::builder()
        .partial_path(dir.path().join("webpack.partial.html"))
        .build());
    let server = spawn_app(Arc::new(TestApplication), config_with(render));

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["status"], 500);
    assert_contains!(body["error"].as_str().unwrap(), "webpack.partial.html");
}

#[tokio::test]
async fn test_partial_is_read_once_per_process() {
    let dir = tempfile::tempdir().unwrap();
    let partial = dir.path().join("webpack.partial.html");
    std::fs::write(&partial, "<script src=\"/v1.js\"></script>").unwrap();

    let render = assert_ok!(RenderConfig::builder().partial_path(&partial).build());
    let server = spawn_app(Arc::new(TestApplication), config_with(render));

    let first = server.get("/").await.text();
    std::fs::write(&partial, "<script src=\"/v2.js\"></script>").unwrap();
    let second = server.get("/").await.text();

    assert_contains!(first, "/v1.js");
    assert_contains!(second, "/v1.js");
    assert_eq!(first, second);
}
