//! Data access for students.
//!
//! [`StudentStore`] is the seam between handlers and storage. Implementations
//! report outcomes, not HTTP semantics: "nothing matched" is `Ok(false)` or
//! `Ok(None)`, never an error.

pub mod memory;
pub mod student_repo;

use async_trait::async_trait;
use students_core::student::{CreateStudent, StudentPatch};
use students_core::types::StudentId;

use crate::error::StoreError;
use crate::models::student::Student;

pub use memory::InMemoryStudentStore;
pub use student_repo::MongoStudentRepo;

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a validated student and return its new identifier.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] if the email is taken.
    async fn insert(&self, input: &CreateStudent) -> Result<StudentId, StoreError>;

    /// Every stored student, in storage order.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StoreError>;

    /// Apply the supplied patch fields. Returns `false` when no record matched.
    async fn update(&self, id: &StudentId, patch: &StudentPatch) -> Result<bool, StoreError>;

    /// Remove a student. Returns `false` when no record matched.
    async fn delete(&self, id: &StudentId) -> Result<bool, StoreError>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
