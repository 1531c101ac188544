//! Shared Module
//!
//! Platform-agnostic types describing the application state a render
//! produces. Nothing here touches the network or the filesystem, so the
//! module is compiled with or without the `ssr` feature.
//!
//! # Overview
//!
//! - **`toggle`** - feature-toggle slice and its pure reducer
//! - **`state`** - the full application state, actions and the root reducer
//! - **`device`** - user-agent classification
//! - **`embed`** - encoding of the state for the page's bootstrap script
//! - **`config`** - render configuration values
//! - **`error`** - shared error types

/// Feature toggles
pub mod toggle;

/// Application state and root reducer
pub mod state;

/// Device classification
pub mod device;

/// Embedded state encoding
pub mod embed;

/// Render configuration
pub mod config;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use config::{ConfigError, PartialSource, RenderConfig, RenderConfigBuilder};
pub use device::DeviceInfo;
pub use error::SharedError;
pub use state::{Action, AppState, Store};
pub use toggle::{toggle, ToggleCommand, ToggleState, ToggleStore};
