//! Backend Module
//!
//! Server-side rendering over axum. Only compiled with the `ssr` feature.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs   - Module exports and documentation
//! ├── server/  - configuration, state, initialization
//! ├── routes/  - router assembly
//! ├── render/  - the render pipeline and its collaborators
//! ├── api/     - upstream JSON API client
//! ├── site/    - the bundled application
//! └── error/   - BackendError and its HTTP form
//! ```
//!
//! # Request Flow
//!
//! 1. The router hands every non-static `GET` to `render::render_page`
//! 2. `RenderPipeline` resolves the page, runs its effects to completion
//!    and renders it against the settled state
//! 3. The outcome is a bare status, a 307 redirect or a full document
//!
//! # Thread Safety
//!
//! Requests share only `ServerState`: the pipeline behind an `Arc` and the
//! template partial behind a `tokio::sync::OnceCell`. The store a render
//! dispatches into is owned by that render alone.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Render pipeline
pub mod render;

/// Upstream API client
pub mod api;

/// Bundled application
pub mod site;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use render::{RenderOutcome, RenderPipeline, RenderRequest};
pub use server::{create_app, create_app_with, ServerConfig, ServerState};
