use anyhow::anyhow;
use tracing::{info, instrument};

use coursebook_core::AppError;
use coursebook_db::CourseStore;
use coursebook_models::{Course, CourseDto};

fn course_not_found() -> AppError {
    AppError::not_found(anyhow!("Course not found"))
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(courses))]
    pub async fn create_course(courses: &dyn CourseStore, dto: CourseDto) -> Result<Course, AppError> {
        let course = courses.insert_course(&dto.course_name).await?;
        info!(course_id = course.id, course_name = %course.course_name, "Course created");
        Ok(course)
    }

    #[instrument(skip(courses))]
    pub async fn list_courses(courses: &dyn CourseStore) -> Result<Vec<Course>, AppError> {
        Ok(courses.list_courses().await?)
    }

    #[instrument(skip(courses))]
    pub async fn get_course(courses: &dyn CourseStore, id: i32) -> Result<Course, AppError> {
        courses.find_course(id).await?.ok_or_else(course_not_found)
    }

    #[instrument(skip(courses))]
    pub async fn update_course(
        courses: &dyn CourseStore,
        id: i32,
        dto: CourseDto,
    ) -> Result<Course, AppError> {
        courses
            .update_course(id, &dto.course_name)
            .await?
            .ok_or_else(course_not_found)
    }

    #[instrument(skip(courses))]
    pub async fn delete_course(courses: &dyn CourseStore, id: i32) -> Result<(), AppError> {
        if !courses.delete_course(id).await? {
            return Err(course_not_found());
        }
        info!(course_id = id, "Course deleted");
        Ok(())
    }
}
