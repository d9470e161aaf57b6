//! Domain types for the students service.
//!
//! Holds the identifier format, request payloads with their validation
//! rules, the response projection, and the domain error taxonomy. Nothing
//! in here performs I/O.

pub mod error;
pub mod student;
pub mod types;
