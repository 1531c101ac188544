/**
 * Render Outcome
 *
 * A render ends in exactly one of three responses:
 *
 * - `Status` - data loading reported a non-success code; no body beyond the
 *   status reason
 * - `Redirect` - the page asked the client to go elsewhere (307, so the
 *   client repeats the request with the same method)
 * - `Html` - the complete document with status 200
 */

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::backend::error::BackendError;

/// Status used for every redirect
pub const REDIRECT_STATUS: StatusCode = StatusCode::TEMPORARY_REDIRECT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Status(StatusCode),
    Redirect { location: String },
    Html(String),
}

impl RenderOutcome {
    /// Status-only outcome for a code recorded in the state
    ///
    /// Codes outside the valid HTTP range are answered with 500.
    pub fn status(code: u16) -> Self {
        let status = StatusCode::from_u16(code).unwrap_or_else(|_| {
            tracing::warn!(code, "result code is not a valid HTTP status");
            StatusCode::INTERNAL_SERVER_ERROR
        });
        Self::Status(status)
    }

    /// Redirect outcome, checked to be usable as a `Location` header
    pub fn redirect(location: impl Into<String>) -> Result<Self, BackendError> {
        let location = location.into();
        if HeaderValue::from_str(&location).is_err() {
            return Err(BackendError::render(format!(
                "redirect target is not a valid Location header: {:?}",
                location
            )));
        }
        Ok(Self::Redirect { location })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Status(status) => *status,
            Self::Redirect { .. } => REDIRECT_STATUS,
            Self::Html(_) => StatusCode::OK,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Redirect { .. } => "redirect",
            Self::Html(_) => "html",
        }
    }
}

impl IntoResponse for RenderOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Status(status) => {
                (status, status.canonical_reason().unwrap_or_default()).into_response()
            }
            Self::Redirect { location } => {
                (REDIRECT_STATUS, [(header::LOCATION, location)]).into_response()
            }
            Self::Html(body) => (StatusCode::OK, Html(body)).into_response(),
        }
    }
}
