use crate::state::AppState;
use axum::{Router, routing::post};

use super::controller::{generate_token, register_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/addNewUser", post(register_user))
        .route("/generateToken", post(generate_token))
}
