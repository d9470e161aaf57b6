use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// Length of a rendered student identifier (12 bytes, hex encoded).
pub const STUDENT_ID_LEN: usize = 24;

/// Identifier of a persisted student, rendered as 24 lowercase hex digits.
///
/// The database assigns it on insert. Anything that does not parse here is
/// rejected before a handler touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentId(String);

impl StudentId {
    /// Parse an identifier from its hex rendering.
    ///
    /// Upper-case digits are accepted and normalised to lower case.
    ///
    /// ```
    /// use students_core::types::StudentId;
    ///
    /// let id = StudentId::parse("65F1C2A9B3D4E5F60718293A").unwrap();
    /// assert_eq!(id.as_str(), "65f1c2a9b3d4e5f60718293a");
    /// assert!(StudentId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() != STUDENT_ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::Validation(format!("Invalid student id: {raw}")));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StudentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StudentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
