use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{
    delete_user, enroll_student_in_course, get_all_users, get_user, update_user,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/getAllUsers", get(get_all_users))
        .route("/getUser/{id}", get(get_user))
        .route("/deleteUser/{id}", delete(delete_user))
        .route("/update", put(update_user))
        .route(
            "/students/{student_id}/courses/{course_id}",
            post(enroll_student_in_course),
        )
}
