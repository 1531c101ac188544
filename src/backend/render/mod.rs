//! Render Module
//!
//! Server-side rendering of one request into one response.
//!
//! # Module Structure
//!
//! ```text
//! render/
//! ├── mod.rs       - Module exports and documentation
//! ├── request.rs   - RenderRequest extractor
//! ├── response.rs  - RenderOutcome and its HTTP form
//! ├── effects.rs   - EffectScope / PendingEffects
//! ├── routing.rs   - RouteTree, Page and Application
//! ├── context.rs   - RenderContext and HeadTags
//! ├── partial.rs   - PartialCache
//! ├── html.rs      - HtmlAssembler and render_document
//! ├── pipeline.rs  - RenderPipeline
//! └── handler.rs   - axum handler
//! ```
//!
//! A render runs the page twice. The first pass only starts effects; the
//! second pass runs after every effect settled and produces the markup
//! sent to the client together with the final state.

pub mod context;
pub mod effects;
pub mod handler;
pub mod html;
pub mod partial;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod routing;

pub use context::{HeadTags, RenderContext};
pub use effects::{EffectError, EffectResult, EffectScope, PendingEffects, Settlement};
pub use handler::render_page;
pub use html::HtmlAssembler;
pub use partial::PartialCache;
pub use pipeline::RenderPipeline;
pub use request::{QueryMap, QueryValue, RenderRequest};
pub use response::RenderOutcome;
pub use routing::{Application, NotFoundPage, Page, PageContext, Params, RedirectPage, RouteTree};
