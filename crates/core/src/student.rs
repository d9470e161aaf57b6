//! Student payloads and their validation rules.
//!
//! Requests arrive as [`CreateStudent`] (full entity) or [`StudentPatch`]
//! (sparse update). Responses leave as [`StudentView`], which never carries
//! the identifier or timestamps.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Message returned when a create payload lacks a name or an email.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name and Email are required";

/// Message returned when an update payload supplies nothing to change.
pub const EMPTY_PATCH_MESSAGE: &str = "At least one of name or email must be provided";

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Payload for `POST /api/students`.
///
/// Missing `name`/`email` deserialize to empty strings so they surface as a
/// validation failure rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
pub struct CreateStudent {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,

    #[validate(range(min = 0))]
    pub age: Option<i32>,
}

impl CreateStudent {
    /// Trim the text fields and check the create rules.
    pub fn into_valid(self) -> Result<Self, CoreError> {
        let normalized = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age,
        };
        normalized
            .validate()
            .map_err(|errors| CoreError::Validation(describe(&errors)))?;
        Ok(normalized)
    }
}

fn describe(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut parts = Vec::new();
    if fields.contains_key("name") || fields.contains_key("email") {
        parts.push(REQUIRED_FIELDS_MESSAGE);
    }
    if fields.contains_key("age") {
        parts.push("Age must be a non-negative integer");
    }
    parts.join("; ")
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Sparse payload for `PUT /api/students/{id}`.
///
/// A field that is absent, `null`, or blank counts as "not supplied" and the
/// stored value is left alone. Unknown fields (including `age`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl StudentPatch {
    /// Drop blank fields and require at least one remaining.
    pub fn into_valid(self) -> Result<Self, CoreError> {
        let patch = Self {
            name: supplied(self.name),
            email: supplied(self.email),
        };
        if patch.is_empty() {
            return Err(CoreError::Validation(EMPTY_PATCH_MESSAGE.to_string()));
        }
        Ok(patch)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

fn supplied(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Response projection of a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentView {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
}
