use tracing::{info, instrument, warn};

use coursebook_auth::TokenService;
use coursebook_config::PasswordConfig;
use coursebook_core::{AppError, hash_password, verify_password};
use coursebook_db::StudentStore;
use coursebook_models::{NewStudent, RegisterStudentDto, Student, TokenRequest};

use crate::metrics::{track_registration, track_token_denied, track_token_issued};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug)]
pub enum Registration {
    Created(Student),
    AlreadyRegistered,
}

pub struct AuthService;

impl AuthService {
    #[instrument(skip(students, password_config))]
    pub async fn register_student(
        students: &dyn StudentStore,
        password_config: PasswordConfig,
        dto: RegisterStudentDto,
    ) -> Result<Registration, AppError> {
        if students.find_credentials(&dto.username).await?.is_some() {
            track_registration(true);
            return Ok(Registration::AlreadyRegistered);
        }

        let password_hash = hash_password(&dto.password, password_config.bcrypt_cost)?;

        // The insert is the authority on uniqueness; a concurrent registration
        // can still take the username after the lookup above.
        let inserted = students
            .insert_student(NewStudent {
                username: dto.username,
                password_hash,
                email: dto.email,
            })
            .await?;

        match inserted {
            Some(student) => {
                info!(student_id = student.id, username = %student.username, "Student registered");
                track_registration(false);
                Ok(Registration::Created(student))
            }
            None => {
                track_registration(true);
                Ok(Registration::AlreadyRegistered)
            }
        }
    }

    #[instrument(skip(students, tokens))]
    pub async fn issue_token(
        students: &dyn StudentStore,
        tokens: &TokenService,
        dto: TokenRequest,
    ) -> Result<String, AppError> {
        let Some(credentials) = students.find_credentials(&dto.username).await? else {
            warn!(username = %dto.username, "Token requested for unknown username");
            track_token_denied();
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            warn!(username = %dto.username, "Token requested with wrong password");
            track_token_denied();
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let token = tokens.issue(&credentials.username)?;
        track_token_issued();

        Ok(token)
    }
}
