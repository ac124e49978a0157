use axum::extract::State;
use tracing::instrument;
use utoipa::ToSchema;

use coursebook_core::AppError;
use coursebook_models::{RegisterStudentDto, TokenRequest};

use super::service::{AuthService, Registration};
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub const USER_ADDED: &str = "User Added Successfully";
pub const USER_ALREADY_REGISTERED: &str = "User already Registered";

/// Register a new student
///
/// A taken username is reported in the body, not as an error status.
#[utoipa::path(
    post,
    path = "/api/addNewUser",
    request_body = RegisterStudentDto,
    responses(
        (status = 200, description = "Registration outcome message", body = String, content_type = "text/plain"),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterStudentDto>,
) -> Result<String, AppError> {
    let outcome =
        AuthService::register_student(state.students.as_ref(), state.password_config, dto).await?;

    let message = match outcome {
        Registration::Created(_) => USER_ADDED,
        Registration::AlreadyRegistered => USER_ALREADY_REGISTERED,
    };
    Ok(message.to_string())
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/api/generateToken",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed JWT", body = String, content_type = "text/plain"),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn generate_token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TokenRequest>,
) -> Result<String, AppError> {
    AuthService::issue_token(state.students.as_ref(), &state.tokens, dto).await
}
