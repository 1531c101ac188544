/**
 * Backend Error Types
 *
 * This module defines the errors that can abort a render. A request whose
 * data loading failed is *not* an error here: that outcome travels in-band
 * as the state's `result` code and becomes a status-only response.
 *
 * # Error Categories
 *
 * ## Partial Errors
 *
 * The asset partial could not be read. Nothing is cached, so the next
 * render tries again and fails the same way until the build output exists.
 *
 * ## Serialization Errors
 *
 * The final state could not be serialized. No HTML is produced because the
 * embedded state script is a required part of the document.
 *
 * ## Render Errors
 *
 * A page or the route tree failed during the final render pass.
 */

use std::path::PathBuf;
use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::{ConfigError, SharedError};

/// Backend-specific error types
///
/// Every variant is fatal for the request that raised it and is turned into
/// a 500 response by the outermost layer.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., request that cannot be rendered at all)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// The asset partial could not be loaded
    #[error("Failed to load template partial {path}: {source}")]
    Partial {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A page failed while producing the final view
    #[error("Render error: {message}")]
    RenderError {
        /// Human-readable error message
        message: String,
    },

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Startup configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The upstream HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    pub fn partial(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Partial {
            path: path.into(),
            source,
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError::ValidationError` - 400 Bad Request
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::SharedError(SharedError::SerializationError { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Partial { .. }
            | Self::RenderError { .. }
            | Self::SerializationError(_)
            | Self::Config(_)
            | Self::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::RenderError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
