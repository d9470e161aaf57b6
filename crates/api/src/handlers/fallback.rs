//! Responses for requests that match no handler, time out, or panic.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response::{ApiResponse, Envelope};

/// No route matches the request path.
pub async fn route_not_found() -> ApiResponse {
    ApiResponse::new(StatusCode::NOT_FOUND, Envelope::fail("Route not found"))
}

/// The path exists but not for this HTTP method.
pub async fn method_not_allowed() -> ApiResponse {
    ApiResponse::new(
        StatusCode::METHOD_NOT_ALLOWED,
        Envelope::fail("Method not allowed"),
    )
}

/// Give the empty 408 produced by the request timeout layer an envelope.
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!("Request exceeded the request timeout");

    ApiResponse::new(
        StatusCode::REQUEST_TIMEOUT,
        Envelope::error("Request timed out"),
    )
    .into_response()
}

/// Turn a handler panic into a 500 `error` envelope.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    ApiResponse::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        Envelope::error("Internal server error"),
    )
    .into_response()
}
