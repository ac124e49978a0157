//! Store abstractions.
//!
//! Both traits are object safe so the application state can hold them as
//! `Arc<dyn StudentStore>` / `Arc<dyn CourseStore>` regardless of the
//! backend.

use async_trait::async_trait;

use coursebook_models::{Course, Credentials, NewStudent, Student, StudentChanges};

/// Result of linking a student to a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentOutcome {
    Enrolled,
    /// The link already existed; nothing was written.
    AlreadyEnrolled,
    StudentNotFound,
    CourseNotFound,
}

/// Credential store: student records and their course links.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list_students(&self) -> anyhow::Result<Vec<Student>>;

    async fn find_student(&self, id: i32) -> anyhow::Result<Option<Student>>;

    /// Looks up login data by username.
    async fn find_credentials(&self, username: &str) -> anyhow::Result<Option<Credentials>>;

    /// Inserts a student. Returns `None` when the username is already taken.
    async fn insert_student(&self, student: NewStudent) -> anyhow::Result<Option<Student>>;

    /// Applies `changes` to the student with `id`. Returns `None` when no
    /// such student exists.
    async fn update_student(
        &self,
        id: i32,
        changes: StudentChanges,
    ) -> anyhow::Result<Option<Student>>;

    /// Deletes a student and its course links. Returns whether a record was
    /// removed.
    async fn delete_student(&self, id: i32) -> anyhow::Result<bool>;

    /// Links a student to a course. Linking twice is a no-op. When both
    /// records are missing the student is reported.
    async fn enroll(&self, student_id: i32, course_id: i32) -> anyhow::Result<EnrollmentOutcome>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list_courses(&self) -> anyhow::Result<Vec<Course>>;

    async fn find_course(&self, id: i32) -> anyhow::Result<Option<Course>>;

    async fn insert_course(&self, course_name: &str) -> anyhow::Result<Course>;

    /// Renames a course. Returns `None` when no such course exists.
    async fn update_course(&self, id: i32, course_name: &str) -> anyhow::Result<Option<Course>>;

    /// Deletes a course and every link to it. Returns whether a record was
    /// removed.
    async fn delete_course(&self, id: i32) -> anyhow::Result<bool>;
}
