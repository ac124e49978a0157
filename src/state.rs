use std::sync::Arc;

use coursebook_auth::TokenService;
use coursebook_config::{CorsConfig, JwtConfig, PasswordConfig};
use coursebook_db::{CourseStore, MemoryStore, StudentStore};

use crate::middleware::auth::AuthGate;

#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentStore>,
    pub courses: Arc<dyn CourseStore>,
    pub tokens: TokenService,
    pub auth_gate: AuthGate,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        students: Arc<dyn StudentStore>,
        courses: Arc<dyn CourseStore>,
        jwt_config: &JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let tokens = TokenService::new(jwt_config);
        let auth_gate = AuthGate::new(tokens.clone(), students.clone());

        Self {
            students,
            courses,
            tokens,
            auth_gate,
            password_config,
            cors_config,
        }
    }

    /// State backed by a fresh [`MemoryStore`].
    pub fn in_memory(
        jwt_config: &JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(
            store.clone(),
            store,
            jwt_config,
            password_config,
            cors_config,
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tokens", &self.tokens)
            .field("password_config", &self.password_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
