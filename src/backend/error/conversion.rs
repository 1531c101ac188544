/**
 * Error Conversion
 *
 * Backend errors implement `IntoResponse`, so a handler can propagate them
 * with `?` and the client receives a JSON body with the mapped status:
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 500
 * }
 * ```
 *
 * No HTML is ever sent for a failed render.
 */

use axum::{
    response::{Response, IntoResponse},
    http::{header, StatusCode},
    body::Body,
};
use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "render failed: {}", message);
        } else {
            tracing::warn!(status = status.as_u16(), "render rejected: {}", message);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Body::from("Internal Server Error"));
                *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
