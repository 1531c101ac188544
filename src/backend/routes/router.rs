/**
 * Router Configuration
 *
 * # Route Order
 *
 * 1. `/static/...` - files from the configured static directory
 * 2. fallback - every other `GET` is a page render; other methods get 405
 *
 * Unknown pages are not an axum-level 404: the route tree decides, so its
 * not-found page still gets to run.
 */

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::render::handler::render_page;
use crate::backend::server::state::ServerState;

/// Create the Axum router with all routes configured
pub fn create_router(state: ServerState) -> Router<()> {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest_service("/static", static_files)
        .fallback(get(render_page))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
