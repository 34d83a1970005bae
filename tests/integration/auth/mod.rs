//! Registration, signin and bearer-token integration tests
//!
//! - POST /api/auth/register
//! - POST /api/auth/signin
//! - Authorization header handling on protected routes

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use crate::common::assertions::{error, failure};
use crate::common::{TestApp, PASSWORD};

const WRONG_CREDENTIALS: &str = "Wrong combination of email and password, or user does not exist.";

mod test_register {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_register_returns_usable_token() {
        let app = TestApp::new();

        let (status, body) = app
            .post(
                "/api/auth/register",
                None,
                json!({ "email": "new@example.com", "name": "NewUser", "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().expect("token in body").to_string();

        let (status, body) = app.get("/api/user?name=NewUser", &token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "NewUser");
        assert_eq!(body["rank"], 1);
        assert_eq!(body["team"], json!([]));
        let score = body["score"].as_i64().expect("score is a number");
        assert!((1..=100).contains(&score));
    }

    #[tokio::test]
    async fn test_register_reports_every_violation() {
        let app = TestApp::new();

        let (status, body) = app
            .post(
                "/api/auth/register",
                None,
                json!({ "email": "not-an-email", "name": "abc", "password": "short" }),
            )
            .await;

        assert_eq!(
            failure(status, &body),
            vec![
                error(400, "Invalid email format."),
                error(400, "Name must be at least 4 characters long."),
                error(400, "Password must be at least 8 characters long."),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email_and_name_conflict() {
        let app = TestApp::new();
        app.user("TeamOwner", 50).await;

        let (status, body) = app
            .post(
                "/api/auth/register",
                None,
                json!({ "email": "teamowner@example.com", "name": "TeamOwner", "password": PASSWORD }),
            )
            .await;

        assert_eq!(
            failure(status, &body),
            vec![
                error(409, "Email already exists."),
                error(409, "Name already exists."),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let app = TestApp::new();

        let (status, body) = app
            .post("/api/auth/register", None, json!({ "email": "a@example.com" }))
            .await;

        assert_eq!(
            failure(status, &body),
            vec![error(400, "Email, name and password must be provided.")]
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = TestApp::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!([{ "code": 400, "message": "Bad request." }]));
    }
}

mod test_signin {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_signin_with_correct_password() {
        let app = TestApp::new();
        app.user("TeamOwner", 50).await;

        let (status, body) = app
            .post(
                "/api/auth/signin",
                None,
                json!({ "email": "teamowner@example.com", "password": PASSWORD }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().expect("token in body");
        let context = app.auth.authenticate_jwt(token).unwrap();
        assert_eq!(context.email, "teamowner@example.com");
        assert_eq!(context.name, "TeamOwner");
    }

    #[tokio::test]
    async fn test_signin_does_not_reveal_unknown_email() {
        let app = TestApp::new();
        app.user("TeamOwner", 50).await;

        let (status, unknown) = app
            .post(
                "/api/auth/signin",
                None,
                json!({ "email": "ghost@example.com", "password": PASSWORD }),
            )
            .await;
        assert_eq!(failure(status, &unknown), vec![error(401, WRONG_CREDENTIALS)]);

        let (status, wrong) = app
            .post(
                "/api/auth/signin",
                None,
                json!({ "email": "teamowner@example.com", "password": "wrong-password" }),
            )
            .await;
        assert_eq!(failure(status, &wrong), vec![error(401, WRONG_CREDENTIALS)]);
    }
}

mod test_bearer_token {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_missing_token_is_forbidden() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/api/user", None, None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "message": "Forbidden.", "code": 403 }));
    }

    #[tokio::test]
    async fn test_token_signed_elsewhere_is_forbidden() {
        let app = TestApp::new();
        let other = leaderboard_teams::AuthBackend::new(leaderboard_teams::AuthConfig::new(
            "some-other-secret",
        ));
        let token = other.issue_token("teamowner@example.com", "TeamOwner").unwrap();

        let (status, _) = app.get("/api/team", &token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_forbidden() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 50).await;
        let request = Request::builder()
            .uri("/api/team")
            .header(header::AUTHORIZATION, format!("Basic {}", owner.token))
            .body(Body::empty())
            .unwrap();

        let (status, _) = app.send_raw(request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

mod test_application {
    use super::*;
    use pretty_assertions::assert_eq;
    use leaderboard_teams::{AuthConfig, TeamsRepositories};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let router = leaderboard_app::build_router(
            TeamsRepositories::in_memory(),
            AuthConfig::new("health-secret"),
        );

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_register_then_signin_with_argon2() {
        let router = leaderboard_app::build_router(
            TeamsRepositories::in_memory(),
            AuthConfig::new("argon-secret"),
        );
        let body = json!({ "email": "real@example.com", "name": "RealUser", "password": PASSWORD });

        let register = Request::post("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.clone().oneshot(register).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let signin = Request::post("/api/auth/signin")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "email": "real@example.com", "password": PASSWORD }).to_string(),
            ))
            .unwrap();
        let response = router.oneshot(signin).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
