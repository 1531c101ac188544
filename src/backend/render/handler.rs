/**
 * Render Handler
 *
 * The axum entry point for every page request. Each request runs inside
 * its own `render` span so effect and assembly logs can be correlated.
 */

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tracing::Instrument;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::render::request::RenderRequest;
use crate::backend::render::pipeline::RenderPipeline;

/// Render the requested URL and answer with the outcome
pub async fn render_page(
    State(pipeline): State<Arc<RenderPipeline>>,
    request: RenderRequest,
) -> Result<Response, BackendError> {
    let span = tracing::info_span!("render", id = %Uuid::new_v4(), url = %request.url);

    async move {
        let outcome = pipeline.render(&request).await?;

        let kind = outcome.kind();
        let sent_at = Instant::now();
        let response = outcome.into_response();
        tracing::info!(
            kind,
            status = %response.status(),
            send_ms = sent_at.elapsed().as_millis() as u64,
            "response sent"
        );
        Ok::<_, BackendError>(response)
    }
    .instrument(span)
    .await
}
