//! Server Module
//!
//! Startup of the axum server: configuration, shared state and the
//! composition root.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports and documentation
//! ├── state.rs   - ServerState and FromRef implementations
//! ├── config.rs  - ServerConfig loading (file + environment)
//! └── init.rs    - create_app / create_app_with
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: defaults, `SSR_CONFIG` file, environment
//! 2. **Composition**: application, assembler and pipeline
//! 3. **Router Creation**: page fallback, static files, tracing layer

/// Shared handler state
pub mod state;

/// Configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::ServerConfig;
pub use init::{create_app, create_app_with};
pub use state::ServerState;
