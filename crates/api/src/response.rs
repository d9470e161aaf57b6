//! Shared response envelope for every API handler.
//!
//! All responses use `{ "status", "message"?, "error"?, "data"? }`:
//!
//! - `success`: normal completion, `data` only when there is a payload
//! - `fail`: the client sent something unusable (400/404/409)
//! - `error`: the server or database failed (500), `error` holds the cause
//!
//! Build responses through [`ApiResponse`] rather than ad-hoc `json!` so the
//! shape and the status code always travel together.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Fail,
    Error,
}

/// The uniform JSON body.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize = ()> {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn success_with(message: impl Into<String>, data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: Some(message.into()),
            error: None,
            data: Some(data),
        }
    }
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: Some(message.into()),
            error: None,
            data: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Fail,
            message: Some(message.into()),
            error: None,
            data: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: None,
            error: Some(error.into()),
            data: None,
        }
    }
}

/// An envelope paired with the HTTP status it is written with.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize = ()> {
    pub status: StatusCode,
    pub body: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, body: Envelope<T>) -> Self {
        Self { status, body }
    }

    /// 200 with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, Envelope::success_with(message, data))
    }

    /// 201 with a payload.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, Envelope::success_with(message, data))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
