/**
 * Server State
 *
 * Everything handlers share across requests. Cloning is cheap: the
 * pipeline (and the partial cache inside it) lives behind an `Arc`, so
 * every clone sees the same cache.
 *
 * The `FromRef` implementation lets the render handler extract the
 * pipeline alone.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use ssr_render::backend::server::state::ServerState;
 *
 * async fn handler(State(state): State<ServerState>) {
 *     let loaded = state.pipeline.assembler().partial().is_loaded();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::render::pipeline::RenderPipeline;
use crate::backend::server::config::ServerConfig;

#[derive(Clone)]
pub struct ServerState {
    pub pipeline: Arc<RenderPipeline>,
    pub config: Arc<ServerConfig>,
}

impl ServerState {
    pub fn new(pipeline: RenderPipeline, config: ServerConfig) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
        }
    }
}

impl FromRef<ServerState> for Arc<RenderPipeline> {
    fn from_ref(state: &ServerState) -> Self {
        state.pipeline.clone()
    }
}
