//! Handlers for the `/students` resource.
//!
//! Each handler bounds its database calls (5s per single-record call, 10s
//! for the collection scan) and answers with exactly one envelope.

use axum::extract::State;
use serde::Serialize;
use students_core::error::CoreError;
use students_core::student::{CreateStudent, StudentPatch, StudentView};
use students_core::types::StudentId;
use students_db::models::student::Student;
use students_db::timeout::{bounded, SCAN_TIMEOUT, SINGLE_OP_TIMEOUT};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam};
use crate::response::{ApiResponse, Envelope};
use crate::state::AppState;

/// Payload returned by create.
#[derive(Debug, Serialize)]
pub struct CreatedStudent {
    pub id: StudentId,
}

/// POST /api/students
///
/// Returns 409 if a student with the same email already exists.
pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateStudent>,
) -> AppResult<ApiResponse<CreatedStudent>> {
    let input = input.into_valid()?;

    let id = bounded(
        "insert_student",
        SINGLE_OP_TIMEOUT,
        state.students.insert(&input),
    )
    .await?;

    tracing::info!(student_id = %id, email = %input.email, "Student created");

    Ok(ApiResponse::created(
        "Student created successfully",
        CreatedStudent { id },
    ))
}

/// GET /api/students
pub async fn list_students(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<StudentView>>> {
    let students = bounded("list_students", SCAN_TIMEOUT, state.students.list()).await?;
    let views: Vec<StudentView> = students.iter().map(Student::to_view).collect();

    Ok(ApiResponse::ok("Students fetched successfully", views))
}

/// GET /api/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    PathParam(raw_id): PathParam<String>,
) -> AppResult<ApiResponse<StudentView>> {
    let id = StudentId::parse(&raw_id)?;

    let student = bounded("find_student", SINGLE_OP_TIMEOUT, state.students.find_by_id(&id))
        .await?
        .ok_or_else(|| not_found(&id))?;

    Ok(ApiResponse::ok("Student fetched successfully", student.to_view()))
}

/// PUT /api/students/{id}
///
/// Partial update: only non-blank `name`/`email` are applied. The updated
/// record is re-read and returned.
pub async fn update_student(
    State(state): State<AppState>,
    PathParam(raw_id): PathParam<String>,
    JsonBody(patch): JsonBody<StudentPatch>,
) -> AppResult<ApiResponse<StudentView>> {
    let id = StudentId::parse(&raw_id)?;
    let patch = patch.into_valid()?;

    let matched = bounded(
        "update_student",
        SINGLE_OP_TIMEOUT,
        state.students.update(&id, &patch),
    )
    .await?;
    if !matched {
        return Err(not_found(&id));
    }

    let student = bounded("find_student", SINGLE_OP_TIMEOUT, state.students.find_by_id(&id))
        .await?
        .ok_or_else(|| not_found(&id))?;

    tracing::info!(
        student_id = %id,
        name_changed = patch.name.is_some(),
        email_changed = patch.email.is_some(),
        "Student updated",
    );

    Ok(ApiResponse::ok("Student updated successfully", student.to_view()))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    PathParam(raw_id): PathParam<String>,
) -> AppResult<ApiResponse> {
    let id = StudentId::parse(&raw_id)?;

    let deleted = bounded("delete_student", SINGLE_OP_TIMEOUT, state.students.delete(&id)).await?;
    if !deleted {
        return Err(not_found(&id));
    }

    tracing::info!(student_id = %id, "Student deleted");

    Ok(ApiResponse::new(
        axum::http::StatusCode::OK,
        Envelope::success("Student deleted successfully"),
    ))
}

fn not_found(id: &StudentId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Student",
        id: id.to_string(),
    })
}
