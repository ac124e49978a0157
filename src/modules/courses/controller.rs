use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use coursebook_core::AppError;
use coursebook_models::{Course, CourseDto};

use super::service::CourseService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{PathParams, ValidatedJson};

pub const COURSE_CREATED: &str = "Enrolled in course successfully.";

/// Create a course
#[utoipa::path(
    post,
    path = "/api/enroll",
    request_body = CourseDto,
    responses(
        (status = 200, description = "Course created", body = String, content_type = "text/plain"),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<String, AppError> {
    CourseService::create_course(state.courses.as_ref(), dto).await?;
    Ok(COURSE_CREATED.to_string())
}

/// List all courses
#[utoipa::path(
    get,
    path = "/api/getCourse",
    responses(
        (status = 200, description = "All courses", body = Vec<Course>),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(state.courses.as_ref()).await?;
    Ok(Json(courses))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/getCourse/{id}",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course", body = Course),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParams(id): PathParams<i32>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course(state.courses.as_ref(), id).await?;
    Ok(Json(course))
}

/// Rename a course
#[utoipa::path(
    put,
    path = "/api/updateCourse/{id}",
    params(("id" = i32, Path, description = "Course id")),
    request_body = CourseDto,
    responses(
        (status = 200, description = "The updated course", body = Course),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParams(id): PathParams<i32>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(state.courses.as_ref(), id, dto).await?;
    Ok(Json(course))
}

/// Delete a course by id
#[utoipa::path(
    delete,
    path = "/api/deleteCourse/{id}",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 403, description = "Invalid token or authentication failed", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParams(id): PathParams<i32>,
) -> Result<StatusCode, AppError> {
    CourseService::delete_course(state.courses.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
