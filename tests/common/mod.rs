#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use coursebook::{AppState, init_router};
use coursebook_config::{CorsConfig, JwtConfig, PasswordConfig};
use coursebook_db::CourseStore;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-key-32-chars-min";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

/// Full router over a fresh in-memory store, with the bcrypt minimum cost.
pub fn setup_test_app() -> TestApp {
    let state = AppState::in_memory(
        &test_jwt_config(),
        PasswordConfig { bcrypt_cost: 4 },
        CorsConfig::from_lookup(|_: &str| None),
    );
    TestApp {
        router: init_router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_string(&body).unwrap())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    pub async fn register(&self, username: &str, password: &str) -> (StatusCode, String) {
        let response = self
            .request(
                "POST",
                "/api/addNewUser",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        let status = response.status();
        (status, body_text(response).await)
    }

    pub async fn token(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/generateToken",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        body_text(response).await
    }

    /// Registers `username` and returns a token for it.
    pub async fn login_as(&self, username: &str) -> String {
        let (status, _) = self.register(username, "p1").await;
        assert_eq!(status, StatusCode::OK);
        self.token(username, "p1").await
    }

    pub async fn create_course(&self, token: &str, name: &str) -> i32 {
        let response = self
            .request(
                "POST",
                "/api/enroll",
                Some(token),
                Some(json!({ "course_name": name })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let courses = self.state.courses.list_courses().await.unwrap();
        courses
            .iter()
            .rev()
            .find(|course| course.course_name == name)
            .map(|course| course.id)
            .unwrap()
    }
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
