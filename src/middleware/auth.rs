use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::{debug, warn};

use coursebook_auth::{Identity, TokenService};
use coursebook_core::AppError;
use coursebook_db::StudentStore;

use crate::metrics::track_auth_failure;
use crate::state::AppState;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Message returned with every 403 caused by a failed authentication.
pub const AUTH_FAILED_MESSAGE: &str = "Invalid token or authentication failed.";

/// Authenticates a raw `Authorization` header value from scratch.
///
/// The token subject is decoded without verification, resolved against the
/// credential store, and only then is the token verified against the
/// resolved identity. Every failure collapses into "not authenticated".
#[derive(Clone)]
pub struct AuthGate {
    tokens: TokenService,
    students: Arc<dyn StudentStore>,
}

impl AuthGate {
    pub fn new(tokens: TokenService, students: Arc<dyn StudentStore>) -> Self {
        Self { tokens, students }
    }

    pub async fn authenticate(&self, header: Option<&str>) -> Option<Identity> {
        let Some(header) = header else {
            debug!("Missing authorization header");
            return None;
        };
        let Some(token) = header.strip_prefix(BEARER_PREFIX) else {
            debug!("Authorization header is not a bearer token");
            return None;
        };
        if token.is_empty() {
            debug!("Empty bearer token");
            return None;
        }

        let Some(subject) = self.tokens.extract_subject(token) else {
            debug!("Bearer token could not be decoded");
            return None;
        };

        let credentials = match self.students.find_credentials(&subject).await {
            Ok(Some(credentials)) => credentials,
            Ok(None) => {
                debug!(subject = %subject, "Token subject does not resolve to a student");
                return None;
            }
            Err(e) => {
                warn!(error = ?e, "Credential lookup failed during authentication");
                return None;
            }
        };

        let identity = Identity {
            id: credentials.id,
            username: credentials.username,
        };

        if self.tokens.validate(token, &identity) {
            Some(identity)
        } else {
            debug!(subject = %subject, "Bearer token failed validation");
            None
        }
    }

    pub async fn is_authenticated(&self, header: Option<&str>) -> bool {
        self.authenticate(header).await.is_some()
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Extractor that runs the [`AuthGate`] and hands the resolved identity to
/// the handler. Rejects with 403.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match state.auth_gate.authenticate(auth_header).await {
            Some(identity) => Ok(AuthUser(identity)),
            None => {
                track_auth_failure();
                Err(AppError::forbidden(AUTH_FAILED_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use coursebook_config::JwtConfig;
    use coursebook_db::{EnrollmentOutcome, MemoryStore};
    use coursebook_models::{Credentials, NewStudent, Student, StudentChanges};

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    async fn gate_with_alice() -> (AuthGate, TokenService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_student(NewStudent {
                username: "alice".to_string(),
                password_hash: "unused".to_string(),
                email: None,
            })
            .await
            .unwrap();

        let tokens = TokenService::new(&test_jwt_config());
        let gate = AuthGate::new(tokens.clone(), store.clone());
        (gate, tokens, store)
    }

    #[tokio::test]
    async fn test_valid_token_resolves_identity() {
        let (gate, tokens, _) = gate_with_alice().await;
        let header = format!("Bearer {}", tokens.issue("alice").unwrap());

        let identity = gate.authenticate(Some(&header)).await.unwrap();

        assert_eq!(identity.id, 1);
        assert_eq!(identity.username, "alice");
        assert!(gate.is_authenticated(Some(&header)).await);
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let (gate, _, _) = gate_with_alice().await;
        assert!(!gate.is_authenticated(None).await);
    }

    #[tokio::test]
    async fn test_malformed_headers_are_rejected() {
        let (gate, tokens, _) = gate_with_alice().await;
        let token = tokens.issue("alice").unwrap();

        for header in [
            String::new(),
            "Bear".to_string(),
            "Bearer".to_string(),
            "Bearer ".to_string(),
            format!("bearer {}", token),
            format!("Token {}", token),
            format!("Bearer  {}", token),
            token.clone(),
        ] {
            assert!(
                !gate.is_authenticated(Some(&header)).await,
                "header {:?} should be rejected",
                header
            );
        }
    }

    #[tokio::test]
    async fn test_unknown_subject_is_rejected() {
        let (gate, tokens, _) = gate_with_alice().await;
        let header = format!("Bearer {}", tokens.issue("bob").unwrap());

        assert!(!gate.is_authenticated(Some(&header)).await);
    }

    #[tokio::test]
    async fn test_deleted_identity_is_rejected() {
        let (gate, tokens, store) = gate_with_alice().await;
        let header = format!("Bearer {}", tokens.issue("alice").unwrap());
        assert!(gate.is_authenticated(Some(&header)).await);

        store.delete_student(1).await.unwrap();

        assert!(!gate.is_authenticated(Some(&header)).await);
    }

    #[tokio::test]
    async fn test_forged_token_for_existing_subject_is_rejected() {
        let (gate, _, _) = gate_with_alice().await;
        let forger = TokenService::new(&JwtConfig {
            secret: "attacker-controlled-secret-of-some-length".to_string(),
            access_token_expiry: 3600,
        });
        let header = format!("Bearer {}", forger.issue("alice").unwrap());

        assert!(!gate.is_authenticated(Some(&header)).await);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let (gate, _, _) = gate_with_alice().await;
        let expired = TokenService::new(&JwtConfig {
            access_token_expiry: -3600,
            ..test_jwt_config()
        });
        let header = format!("Bearer {}", expired.issue("alice").unwrap());

        assert!(!gate.is_authenticated(Some(&header)).await);
    }

    struct FailingStore;

    #[async_trait]
    impl StudentStore for FailingStore {
        async fn list_students(&self) -> anyhow::Result<Vec<Student>> {
            anyhow::bail!("store offline")
        }
        async fn find_student(&self, _id: i32) -> anyhow::Result<Option<Student>> {
            anyhow::bail!("store offline")
        }
        async fn find_credentials(&self, _username: &str) -> anyhow::Result<Option<Credentials>> {
            anyhow::bail!("store offline")
        }
        async fn insert_student(&self, _student: NewStudent) -> anyhow::Result<Option<Student>> {
            anyhow::bail!("store offline")
        }
        async fn update_student(
            &self,
            _id: i32,
            _changes: StudentChanges,
        ) -> anyhow::Result<Option<Student>> {
            anyhow::bail!("store offline")
        }
        async fn delete_student(&self, _id: i32) -> anyhow::Result<bool> {
            anyhow::bail!("store offline")
        }
        async fn enroll(&self, _student_id: i32, _course_id: i32) -> anyhow::Result<EnrollmentOutcome> {
            anyhow::bail!("store offline")
        }
    }

    #[tokio::test]
    async fn test_store_failure_fails_closed() {
        let tokens = TokenService::new(&test_jwt_config());
        let gate = AuthGate::new(tokens.clone(), Arc::new(FailingStore));
        let header = format!("Bearer {}", tokens.issue("alice").unwrap());

        assert!(gate.authenticate(Some(&header)).await.is_none());
    }
}
