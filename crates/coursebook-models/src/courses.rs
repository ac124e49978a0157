//! Course models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: i32,
    pub course_name: String,
}

/// Payload for creating or renaming a course.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CourseDto {
    #[serde(alias = "courseName")]
    #[validate(length(min = 1, max = 100, message = "course_name must be 1 to 100 characters"))]
    pub course_name: String,
}
