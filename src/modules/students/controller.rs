use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use coursebook_core::AppError;
use coursebook_models::{Student, UpdateStudentDto};

use super::service::StudentService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{PathParams, ValidatedJson};

pub const USER_UPDATED: &str = "User updated successfully.";
pub const STUDENT_ENROLLED: &str = "Student enrolled in course successfully.";

/// List all students
#[utoipa::path(
    get,
    path = "/api/getAllUsers",
    responses(
        (status = 200, description = "All students with their enrolled courses", body = Vec<Student>),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_all_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::list_students(state.students.as_ref()).await?;
    Ok(Json(students))
}

/// Get a student by id
///
/// An unknown id yields `null` with status 200.
#[utoipa::path(
    get,
    path = "/api/getUser/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student, or null", body = Option<Student>),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParams(id): PathParams<i32>,
) -> Result<Json<Option<Student>>, AppError> {
    let student = StudentService::get_student(state.students.as_ref(), id).await?;
    Ok(Json(student))
}

/// Delete a student by id
#[utoipa::path(
    delete,
    path = "/api/deleteUser/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 204, description = "Student deleted, or did not exist"),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParams(id): PathParams<i32>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(state.students.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update the caller's own profile
#[utoipa::path(
    put,
    path = "/api/update",
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Profile updated", body = String, content_type = "text/plain"),
        (status = 403, description = "Invalid token, or the payload targets another student", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<String, AppError> {
    StudentService::update_own_profile(
        state.students.as_ref(),
        state.password_config,
        &identity,
        dto,
    )
    .await?;
    Ok(USER_UPDATED.to_string())
}

/// Enroll a student in an existing course
#[utoipa::path(
    post,
    path = "/api/students/{student_id}/courses/{course_id}",
    params(
        ("student_id" = i32, Path, description = "Student id"),
        ("course_id" = i32, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Student enrolled, or already enrolled", body = String, content_type = "text/plain"),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse),
        (status = 404, description = "Student or course not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn enroll_student_in_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParams((student_id, course_id)): PathParams<(i32, i32)>,
) -> Result<String, AppError> {
    StudentService::enroll_in_course(state.students.as_ref(), student_id, course_id).await?;
    Ok(STUDENT_ENROLLED.to_string())
}
