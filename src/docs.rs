use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use coursebook_models::{Course, CourseDto, RegisterStudentDto, Student, TokenRequest, UpdateStudentDto};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::generate_token,
        crate::modules::students::controller::get_all_users,
        crate::modules::students::controller::get_user,
        crate::modules::students::controller::delete_user,
        crate::modules::students::controller::update_user,
        crate::modules::students::controller::enroll_student_in_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            Student,
            Course,
            RegisterStudentDto,
            TokenRequest,
            UpdateStudentDto,
            CourseDto,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and token issuance"),
        (name = "Students", description = "Student management and enrollment"),
        (name = "Courses", description = "Course management")
    ),
    info(
        title = "Coursebook API",
        version = "0.1.0",
        description = "Student and course management REST API with JWT bearer authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
