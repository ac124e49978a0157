//! Student domain models and DTOs.
//!
//! A student is both the account that authenticates against the API and the
//! record that courses are linked to.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::courses::Course;

/// A student as returned by the API.
///
/// The password hash never leaves the store; see [`Credentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    #[serde(default)]
    pub enrolled_courses: Vec<Course>,
}

/// Stored login data for a student.
#[derive(Clone, FromRow)]
pub struct Credentials {
    pub id: i32,
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// A student ready to be inserted, password already hashed.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
}

/// Fields replaced by a profile update. `None` leaves the stored value
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct StudentChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// Registration payload.
#[derive(Deserialize, Validate, ToSchema)]
pub struct RegisterStudentDto {
    #[validate(length(min = 1, max = 50, message = "username must be 1 to 50 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "password must be 1 to 128 characters"))]
    pub password: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
}

impl std::fmt::Debug for RegisterStudentDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterStudentDto")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Profile update payload.
///
/// `username` must match the caller's own username; `id`, when given, must
/// match the caller's own id.
#[derive(Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 50, message = "username must be 1 to 50 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: Option<String>,
}

impl std::fmt::Debug for UpdateStudentDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateStudentDto")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
