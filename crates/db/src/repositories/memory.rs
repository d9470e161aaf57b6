//! In-process [`StudentStore`] used by tests.
//!
//! Every operation runs under one lock, so the email uniqueness check and
//! the write that follows it are atomic here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use students_core::student::{CreateStudent, StudentPatch};
use students_core::types::StudentId;

use crate::error::StoreError;
use crate::models::student::{object_id, student_id, Student};
use crate::repositories::StudentStore;

#[derive(Default)]
pub struct InMemoryStudentStore {
    students: Mutex<Vec<Student>>,
    offline: AtomicBool,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Connection`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored students.
    pub fn len(&self) -> usize {
        self.students.lock().map(|s| s.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Student>>, StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("student store is offline".into()));
        }
        self.students
            .lock()
            .map_err(|_| StoreError::Internal("student store lock poisoned".into()))
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn insert(&self, input: &CreateStudent) -> Result<StudentId, StoreError> {
        let mut students = self.lock()?;
        if students.iter().any(|s| s.email == input.email) {
            return Err(StoreError::DuplicateEmail {
                email: input.email.clone(),
            });
        }

        let oid = ObjectId::new();
        let mut student = Student::new(input, DateTime::now());
        student.id = Some(oid);
        students.push(student);
        student_id(&oid)
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StoreError> {
        let oid = object_id(id)?;
        Ok(self.lock()?.iter().find(|s| s.id == Some(oid)).cloned())
    }

    async fn update(&self, id: &StudentId, patch: &StudentPatch) -> Result<bool, StoreError> {
        let oid = object_id(id)?;
        let mut students = self.lock()?;

        if let Some(email) = &patch.email {
            if students
                .iter()
                .any(|s| s.id != Some(oid) && &s.email == email)
            {
                return Err(StoreError::DuplicateEmail {
                    email: email.clone(),
                });
            }
        }

        let Some(student) = students.iter_mut().find(|s| s.id == Some(oid)) else {
            return Ok(false);
        };
        if let Some(name) = &patch.name {
            student.name = name.clone();
        }
        if let Some(email) = &patch.email {
            student.email = email.clone();
        }
        student.updated_at = Some(DateTime::now());
        Ok(true)
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StoreError> {
        let oid = object_id(id)?;
        let mut students = self.lock()?;
        let before = students.len();
        students.retain(|s| s.id != Some(oid));
        Ok(students.len() != before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
