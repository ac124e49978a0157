use anyhow::anyhow;
use tracing::{info, instrument};

use coursebook_auth::Identity;
use coursebook_config::PasswordConfig;
use coursebook_core::{AppError, hash_password};
use coursebook_db::{EnrollmentOutcome, StudentStore};
use coursebook_models::{Student, StudentChanges, UpdateStudentDto};

use crate::metrics::track_enrollment;

pub const NOT_OWN_PROFILE: &str = "You can only update your own profile.";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(students))]
    pub async fn list_students(students: &dyn StudentStore) -> Result<Vec<Student>, AppError> {
        Ok(students.list_students().await?)
    }

    #[instrument(skip(students))]
    pub async fn get_student(
        students: &dyn StudentStore,
        id: i32,
    ) -> Result<Option<Student>, AppError> {
        Ok(students.find_student(id).await?)
    }

    #[instrument(skip(students))]
    pub async fn delete_student(students: &dyn StudentStore, id: i32) -> Result<(), AppError> {
        if students.delete_student(id).await? {
            info!(student_id = id, "Student deleted");
        }
        Ok(())
    }

    /// Applies `dto` to the record of `identity`.
    ///
    /// The payload must name the caller: its username must equal the
    /// caller's, and its id, when present, must equal the caller's id.
    #[instrument(skip(students, password_config))]
    pub async fn update_own_profile(
        students: &dyn StudentStore,
        password_config: PasswordConfig,
        identity: &Identity,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let targets_other_id = dto.id.is_some_and(|id| id != identity.id);
        if dto.username != identity.username || targets_other_id {
            return Err(AppError::forbidden(NOT_OWN_PROFILE));
        }

        let password_hash = match dto.password.as_deref() {
            Some(password) if !password.is_empty() => {
                Some(hash_password(password, password_config.bcrypt_cost)?)
            }
            _ => None,
        };

        let changes = StudentChanges {
            email: dto.email,
            password_hash,
        };

        students
            .update_student(identity.id, changes)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Student not found")))
    }

    #[instrument(skip(students))]
    pub async fn enroll_in_course(
        students: &dyn StudentStore,
        student_id: i32,
        course_id: i32,
    ) -> Result<(), AppError> {
        match students.enroll(student_id, course_id).await? {
            EnrollmentOutcome::Enrolled => {
                info!(student_id, course_id, "Student enrolled in course");
                track_enrollment(true);
                Ok(())
            }
            EnrollmentOutcome::AlreadyEnrolled => {
                track_enrollment(false);
                Ok(())
            }
            EnrollmentOutcome::StudentNotFound => {
                Err(AppError::not_found(anyhow!("Student not found")))
            }
            EnrollmentOutcome::CourseNotFound => {
                Err(AppError::not_found(anyhow!("Course not found")))
            }
        }
    }
}
