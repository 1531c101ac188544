/**
 * Render Pipeline
 *
 * Turns one [`RenderRequest`] into one [`RenderOutcome`].
 *
 * # Steps
 *
 * 1. Create the request store: cookie and location known, result unset
 * 2. Classify the device and dispatch it before any effect starts
 * 3. Build the route tree and resolve the request path
 * 4. Phase 1: the page starts its effects
 * 5. Close the effect scope so nothing else can start
 * 6. Wait for every effect to settle and dispatch their actions
 * 7. Phase 2: render the page against the settled state
 * 8. Answer with the result status if it is not 200, else with the
 *    redirect if one was requested, else with the assembled document
 *
 * Step 6 is the only suspension point that waits on application work.
 * Errors from phase 2 or from document assembly abort the request; no
 * partial document is produced.
 */

use std::sync::Arc;
use std::time::Instant;

use crate::backend::error::BackendError;
use crate::backend::render::context::RenderContext;
use crate::backend::render::effects::EffectScope;
use crate::backend::render::html::HtmlAssembler;
use crate::backend::render::request::RenderRequest;
use crate::backend::render::response::RenderOutcome;
use crate::backend::render::routing::{Application, PageContext};
use crate::shared::device::classify;
use crate::shared::state::SUCCESS_STATUS;
use crate::shared::{Action, AppState, Store};

fn millis(from: Instant, to: Instant) -> u64 {
    to.saturating_duration_since(from).as_millis() as u64
}

pub struct RenderPipeline {
    app: Arc<dyn Application>,
    assembler: HtmlAssembler,
}

impl RenderPipeline {
    pub fn new(app: Arc<dyn Application>, assembler: HtmlAssembler) -> Self {
        Self { app, assembler }
    }

    pub fn assembler(&self) -> &HtmlAssembler {
        &self.assembler
    }

    pub async fn render(&self, request: &RenderRequest) -> Result<RenderOutcome, BackendError> {
        let started_at = Instant::now();

        let mut store = Store::new(AppState::for_request(
            request.cookie.as_deref(),
            request.url.as_str(),
        ));
        store.dispatch(Action::SetDevice(classify(request.user_agent.as_deref())));

        let routes = self.app.routes()?;
        let resolved = routes.resolve(&request.path);
        tracing::debug!(pattern = ?resolved.pattern, "route resolved");

        let mut scope = EffectScope::new();
        {
            let cx = PageContext {
                path: &request.path,
                query: &request.query,
                params: &resolved.params,
                state: store.state(),
            };
            resolved.page.effects(&cx, &mut scope);
        }
        let pending = scope.close();
        tracing::debug!(effects = pending.len(), "effect scope closed");

        let settlement = pending.settle().await;
        for action in settlement.into_actions() {
            store.dispatch(action);
        }
        if store.state().result.is_unset() {
            store.dispatch(Action::SetResult(SUCCESS_STATUS));
        }
        let preloaded_at = Instant::now();

        let mut context = RenderContext::new();
        let content = {
            let cx = PageContext {
                path: &request.path,
                query: &request.query,
                params: &resolved.params,
                state: store.state(),
            };
            resolved.page.render(&cx, &mut context).map_err(|e| {
                tracing::error!(url = %request.url, "final render failed: {}", e);
                e
            })?
        };
        let (redirect, head) = context.finish();
        let state = store.into_state();

        let code = state.result.api_result_http_code.unwrap_or(SUCCESS_STATUS);
        if code != SUCCESS_STATUS {
            tracing::warn!(
                "request {} was processed for {}ms: return {}",
                request.url,
                millis(started_at, Instant::now()),
                code
            );
            return Ok(RenderOutcome::status(code));
        }

        if let Some(location) = redirect {
            tracing::info!(
                "request {} was processed for {}ms: redirect to {}",
                request.url,
                millis(started_at, Instant::now()),
                location
            );
            return RenderOutcome::redirect(location);
        }

        let rendered_at = Instant::now();
        let html = self.assembler.assemble(&content, &state, &head).await?;
        let html_created_at = Instant::now();

        tracing::info!(
            preload_ms = millis(started_at, preloaded_at),
            render_ms = millis(preloaded_at, rendered_at),
            html_ms = millis(rendered_at, html_created_at),
            "request {} was processed for {}ms",
            request.url,
            millis(started_at, html_created_at)
        );
        Ok(RenderOutcome::Html(html))
    }
}
