//! Test server fixtures
//!
//! Every fixture runs the real router in-process through `axum-test` and
//! points the upstream API at a `wiremock` server owned by the fixture.

use std::sync::Arc;

use axum_test::TestServer;
use ssr_render::backend::render::routing::Application;
use ssr_render::backend::server::{create_app, create_app_with, ServerConfig};
use ssr_render::shared::{AppState, RenderConfig};
use tempfile::TempDir;
use wiremock::MockServer;

/// Partial used in place of the client build output
pub const TEST_PARTIAL: &str = r#"<script src="/static/app.js" defer></script>"#;

/// Analytics markup spliced after the partial
pub const TEST_ANALYTICS: &str = "<!-- analytics -->";

/// A running test server plus the resources it depends on
pub struct TestApp {
    pub server: TestServer,
    pub upstream: MockServer,
    pub static_dir: TempDir,
}

/// Configuration for a test server using `upstream` as the API
pub fn test_config(upstream: &MockServer, static_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        port: 0,
        static_dir: static_dir.path().to_path_buf(),
        render: RenderConfig::builder()
            .inline_partial(TEST_PARTIAL)
            .analytics_html(TEST_ANALYTICS)
            .api_base_url(upstream.uri())
            .build()
            .expect("valid test render config"),
    }
}

/// Serve the bundled site against a fresh mock upstream
pub async fn spawn_site() -> TestApp {
    let upstream = MockServer::start().await;
    let static_dir = tempfile::tempdir().expect("create static dir");
    let app = create_app(test_config(&upstream, &static_dir)).expect("create app");

    TestApp {
        server: TestServer::new(app).expect("start test server"),
        upstream,
        static_dir,
    }
}

/// Serve an arbitrary application with the given configuration
pub fn spawn_app(app: Arc<dyn Application>, config: ServerConfig) -> TestServer {
    TestServer::new(create_app_with(app, config)).expect("start test server")
}

/// Decode the state embedded in a rendered document
pub fn embedded_state(html: &str) -> AppState {
    let encoded = ssr_render::backend::render::html::extract_encoded_state(html)
        .expect("document carries exactly one bootstrap script");
    ssr_render::shared::embed::decode_state(encoded).expect("embedded state decodes")
}
