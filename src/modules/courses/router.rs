use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{create_course, delete_course, get_course, list_courses, update_course};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/enroll", post(create_course))
        .route("/getCourse", get(list_courses))
        .route("/getCourse/{id}", get(get_course))
        .route("/updateCourse/{id}", put(update_course))
        .route("/deleteCourse/{id}", delete(delete_course))
}
