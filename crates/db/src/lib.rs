//! Persistence for the students service.
//!
//! [`MongoGateway`] owns the single database connection for the process.
//! Handlers never see it directly: they talk to a [`StudentStore`], which
//! is either backed by MongoDB ([`MongoStudentRepo`]) or held in memory
//! ([`InMemoryStudentStore`]).

pub mod error;
pub mod gateway;
pub mod models;
pub mod repositories;
pub mod timeout;

pub use error::StoreError;
pub use gateway::MongoGateway;
pub use repositories::{InMemoryStudentStore, MongoStudentRepo, StudentStore};

/// Database used when none is configured.
pub const DEFAULT_DATABASE: &str = "studentsdb";

/// Collection holding student documents.
pub const STUDENTS_COLLECTION: &str = "students";
