//! SSR Render - Server-Side Rendering Library
//!
//! Renders a client application on the server: every page request is
//! resolved against the application's routes, the page's data-loading
//! effects run to completion, and the page is rendered once more against
//! the settled state. The response is either a bare status, a redirect or
//! a full HTML document that embeds the final state for the client bundle
//! to resume from.
//!
//! # Module Structure
//!
//! - **`shared`** - state types shared with the client
//!   - Root state, actions and reducer
//!   - Feature toggle store
//!   - Device classification
//!   - State embedding and render configuration
//!
//! - **`backend`** - server-side code (only compiled with `ssr` feature)
//!   - Render pipeline and HTML assembly
//!   - Axum router and handler
//!   - Upstream API client and the bundled site
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use ssr_render::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config)?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - A failed data load is not an error: its status travels in the state
//!   and becomes the response status
//! - Failures that prevent producing a document are `backend::BackendError`
//!   and are answered with 500

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
