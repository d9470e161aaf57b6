use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use students_core::error::CoreError;
use students_db::StoreError;

use crate::response::{ApiResponse, Envelope};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds a variant for malformed requests. Implements [`IntoResponse`]
/// so every failure leaves as an envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `students_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from `students_db`.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    Envelope::fail(format!("{entity} with id {id} not found")),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, Envelope::fail(msg.as_str()))
                }
            },

            // --- Persistence errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Malformed requests ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, Envelope::fail(msg.as_str())),
        };

        ApiResponse::new(status, body).into_response()
    }
}

/// Classify a store error into an HTTP status and envelope.
///
/// - Unique email violations map to 409.
/// - Timeouts, connection loss and driver errors all map to 500 with the
///   underlying error text, but are logged under distinct messages.
fn classify_store_error(err: &StoreError) -> (StatusCode, Envelope) {
    match err {
        StoreError::DuplicateEmail { email } => {
            tracing::info!(%email, "Rejected duplicate student email");
            (StatusCode::CONFLICT, Envelope::fail(err.to_string()))
        }
        StoreError::Timeout { operation, after } => {
            tracing::error!(operation, ?after, "Database operation timed out");
            (StatusCode::INTERNAL_SERVER_ERROR, Envelope::error(err.to_string()))
        }
        StoreError::Connection(_) => {
            tracing::error!(error = %err, "Database connection error");
            (StatusCode::INTERNAL_SERVER_ERROR, Envelope::error(err.to_string()))
        }
        StoreError::Driver(_) | StoreError::Internal(_) => {
            tracing::error!(error = %err, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, Envelope::error(err.to_string()))
        }
    }
}
