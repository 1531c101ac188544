/**
 * Server Initialization
 *
 * Builds the composition root: the application, the document assembler
 * (which owns the partial cache) and the pipeline joining them, then hands
 * the resulting state to the router.
 *
 * The partial is not read here. It is loaded by the first render that
 * produces a document, so the server starts even before the client build
 * has written it.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::api::ApiClient;
use crate::backend::error::BackendError;
use crate::backend::render::html::HtmlAssembler;
use crate::backend::render::pipeline::RenderPipeline;
use crate::backend::render::routing::Application;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::ServerState;
use crate::backend::site::Site;

/// Create the router serving the bundled site
pub fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    let api = ApiClient::new(config.render.api_base_url.clone())?;
    Ok(create_app_with(Arc::new(Site::new(api)), config))
}

/// Create the router serving an arbitrary application
pub fn create_app_with(app: Arc<dyn Application>, config: ServerConfig) -> Router<()> {
    tracing::info!(
        port = config.port,
        static_dir = %config.static_dir.display(),
        dev_mode = config.render.dev_mode,
        "initializing render server"
    );

    let assembler = HtmlAssembler::new(&config.render);
    let pipeline = RenderPipeline::new(app, assembler);
    let state = ServerState::new(pipeline, config);

    let router = create_router(state);
    tracing::info!("router configured");
    router
}
