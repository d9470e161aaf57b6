//! MongoDB-backed [`StudentStore`].

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use students_core::student::{CreateStudent, StudentPatch};
use students_core::types::StudentId;

use crate::error::StoreError;
use crate::gateway::MongoGateway;
use crate::models::student::{object_id, student_id, Student};
use crate::repositories::StudentStore;

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Name of the unique index on `email`.
pub const EMAIL_INDEX: &str = "uq_students_email";

/// Student persistence on top of the gateway's `students` collection.
#[derive(Clone)]
pub struct MongoStudentRepo {
    collection: Collection<Student>,
    database: Database,
}

impl MongoStudentRepo {
    pub fn new(gateway: &MongoGateway) -> Self {
        Self {
            collection: gateway.students(),
            database: gateway.database().clone(),
        }
    }

    /// Create the unique index on `email` if it does not exist yet.
    ///
    /// Email uniqueness rests on this index; inserts and updates translate
    /// its violations into [`StoreError::DuplicateEmail`].
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let options = IndexOptions::builder()
            .unique(true)
            .name(EMAIL_INDEX.to_string())
            .build();
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(options)
            .build();
        self.collection.create_index(index).await?;
        tracing::info!(index = EMAIL_INDEX, "Student indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl StudentStore for MongoStudentRepo {
    async fn insert(&self, input: &CreateStudent) -> Result<StudentId, StoreError> {
        let student = Student::new(input, DateTime::now());
        let result = self
            .collection
            .insert_one(&student)
            .await
            .map_err(|e| classify_write_error(e, &input.email))?;
        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Internal("insert did not return an ObjectId".into()))?;
        student_id(&oid)
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StoreError> {
        let oid = object_id(id)?;
        Ok(self.collection.find_one(doc! { "_id": oid }).await?)
    }

    async fn update(&self, id: &StudentId, patch: &StudentPatch) -> Result<bool, StoreError> {
        let oid = object_id(id)?;

        let mut set = doc! { "updatedAt": DateTime::now() };
        if let Some(name) = &patch.name {
            set.insert("name", name.as_str());
        }
        if let Some(email) = &patch.email {
            set.insert("email", email.as_str());
        }

        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await
            .map_err(|e| classify_write_error(e, patch.email.as_deref().unwrap_or_default()))?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &StudentId) -> Result<bool, StoreError> {
        let oid = object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// Map a write failure, turning unique-index violations into a conflict.
fn classify_write_error(err: mongodb::error::Error, email: &str) -> StoreError {
    if is_duplicate_key(&err) {
        StoreError::DuplicateEmail {
            email: email.to_string(),
        }
    } else {
        StoreError::Driver(err)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
