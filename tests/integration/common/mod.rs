//! Common test utilities and fixtures for integration tests
//!
//! Builds the application router over a fresh in-memory store, with a fast
//! reversible password hasher, and offers request helpers that return the
//! status and decoded JSON body.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use leaderboard_teams::{
    AuthBackend, AuthConfig, PasswordHasher, TeamsRepositories, TeamsService, TeamsState, User,
    UserStore,
};
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test_secret_key_for_testing_only";
pub const PASSWORD: &str = "password123";

/// Reversible stand-in for Argon2 so tests stay fast
#[derive(Debug)]
pub struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> anyhow::Result<String> {
        Ok(format!("plain:{}", password))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash == format!("plain:{}", password)
    }
}

/// Test application over a fresh in-memory store
pub struct TestApp {
    pub router: Router,
    pub service: TeamsService,
    pub auth: AuthBackend,
}

/// A stored user and a valid token for them
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let auth = AuthBackend::new(AuthConfig::new(JWT_SECRET));
        let service = TeamsService::new(TeamsRepositories::in_memory(), auth.clone())
            .with_hasher(Arc::new(PlainHasher));

        let router = Router::new()
            .route("/health", axum::routing::get(|| async { "OK" }))
            .merge(leaderboard_teams::routes().with_state(TeamsState::new(service.clone())));

        Self {
            router,
            service,
            auth,
        }
    }

    /// Insert a user with a fixed score, bypassing registration
    pub async fn user(&self, name: &str, score: i32) -> TestUser {
        let user = User::with_score(
            format!("{}@example.com", name.to_lowercase()),
            name.to_string(),
            format!("plain:{}", PASSWORD),
            score,
        );
        let user = self
            .service
            .repositories()
            .users
            .create(&user)
            .await
            .expect("user should be stored");
        let token = self
            .auth
            .issue_token(&user.email, &user.name)
            .expect("token should be issued");

        TestUser { user, token }
    }

    /// Send a request and decode the body as JSON
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request should build");

        self.send_raw(request).await
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), Some(body)).await
    }

    /// Create a team through the API and assert it succeeded
    pub async fn team(&self, owner: &TestUser, name: &str) {
        let (status, body) = self
            .post(
                "/api/team",
                Some(&owner.token),
                serde_json::json!({ "name": name }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "team creation failed: {}", body);
    }
}

pub mod assertions {
    use axum::http::StatusCode;
    use serde_json::Value;

    /// Assert a business failure and return its `(code, message)` pairs
    pub fn failure(status: StatusCode, body: &Value) -> Vec<(u64, String)> {
        assert_eq!(status, StatusCode::BAD_REQUEST, "unexpected body: {}", body);
        body.as_array()
            .expect("failure body is an array")
            .iter()
            .map(|error| {
                (
                    error["code"].as_u64().expect("code is a number"),
                    error["message"]
                        .as_str()
                        .expect("message is a string")
                        .to_string(),
                )
            })
            .collect()
    }

    pub fn error(code: u64, message: &str) -> (u64, String) {
        (code, message.to_string())
    }
}
