//! Persisted student document.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use students_core::student::{CreateStudent, StudentView};
use students_core::types::StudentId;

use crate::error::StoreError;

/// A document in the `students` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}

impl Student {
    /// Build a not-yet-inserted document from a validated create payload.
    pub fn new(input: &CreateStudent, now: DateTime) -> Self {
        Self {
            id: None,
            name: input.name.clone(),
            email: input.email.clone(),
            age: input.age,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn to_view(&self) -> StudentView {
        StudentView {
            name: self.name.clone(),
            email: self.email.clone(),
            age: self.age,
        }
    }
}

/// Convert a validated identifier into the driver's `ObjectId`.
pub fn object_id(id: &StudentId) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id.as_str()).map_err(|e| StoreError::Internal(e.to_string()))
}

/// Render a driver `ObjectId` as a [`StudentId`].
pub fn student_id(oid: &ObjectId) -> Result<StudentId, StoreError> {
    StudentId::parse(&oid.to_hex()).map_err(|e| StoreError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use mongodb::bson;

    use super::*;

    fn ann() -> CreateStudent {
        CreateStudent {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            age: Some(20),
        }
    }

    #[test]
    fn new_document_has_no_id_and_both_timestamps() {
        let now = DateTime::now();
        let student = Student::new(&ann(), now);
        assert_eq!(student.id, None);
        assert_eq!(student.created_at, Some(now));
        assert_eq!(student.updated_at, Some(now));
    }

    #[test]
    fn document_uses_mongo_field_names() {
        let doc = bson::to_document(&Student::new(&ann(), DateTime::now())).unwrap();
        assert!(!doc.contains_key("_id"));
        assert!(doc.contains_key("createdAt"));
        assert!(doc.contains_key("updatedAt"));
        assert_eq!(doc.get_str("email").unwrap(), "ann@x.com");
        assert_eq!(doc.get_i32("age").unwrap(), 20);
    }

    #[test]
    fn view_drops_id_and_timestamps() {
        let mut student = Student::new(&ann(), DateTime::now());
        student.id = Some(ObjectId::new());
        assert_eq!(
            student.to_view(),
            StudentView {
                name: "Ann".into(),
                email: "ann@x.com".into(),
                age: Some(20),
            }
        );
    }

    #[test]
    fn object_id_round_trips_through_student_id() {
        let oid = ObjectId::new();
        let id = student_id(&oid).unwrap();
        assert_eq!(id.as_str().len(), 24);
        assert_eq!(object_id(&id).unwrap(), oid);
    }
}
