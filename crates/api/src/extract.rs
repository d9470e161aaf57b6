//! Request extractors that fail with an envelope instead of plain text.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] whose rejection is
/// [`AppError::BadRequest`], so a malformed or missing body yields a 400
/// `fail` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// [`axum::extract::Path`] with the same envelope rejection as [`JsonBody`].
/// Covers segments that are not valid UTF-8 after percent-decoding.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);
