//! # Coursebook Models
//!
//! Domain models and DTOs for the Coursebook API.
//!
//! # Modules
//!
//! - [`auth`]: token request payload
//! - [`courses`]: course entity and payload
//! - [`students`]: student entity, stored credentials and payloads
//!
//! # Example
//!
//! ```ignore
//! use coursebook_models::{Course, RegisterStudentDto, Student};
//! use validator::Validate;
//!
//! let dto = RegisterStudentDto {
//!     username: "alice".to_string(),
//!     password: "p1".to_string(),
//!     email: None,
//! };
//! dto.validate()?;
//! ```

pub mod auth;
pub mod courses;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use auth::TokenRequest;
pub use courses::{Course, CourseDto};
pub use students::{
    Credentials, NewStudent, RegisterStudentDto, Student, StudentChanges, UpdateStudentDto,
};
