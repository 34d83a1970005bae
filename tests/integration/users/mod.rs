//! User lookup endpoint integration tests
//!
//! - GET /api/user - leaderboard, or one user by email or name

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::{error, failure};
use crate::common::TestApp;

#[tokio::test]
async fn test_leaderboard_is_ranked_by_score() {
    let app = TestApp::new();
    let low = app.user("LowScorer", 10).await;
    app.user("HighScorer", 90).await;
    app.user("MidScorer", 50).await;
    app.team(&low, "JestTeam").await;

    let (status, body) = app.get("/api/user", &low.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "rank": 1, "name": "HighScorer", "score": 90, "team": [] },
            { "rank": 2, "name": "MidScorer", "score": 50, "team": [] },
            { "rank": 3, "name": "LowScorer", "score": 10, "team": ["JestTeam"] },
        ])
    );
}

#[tokio::test]
async fn test_get_user_by_email_computes_rank() {
    let app = TestApp::new();
    let caller = app.user("Caller", 20).await;
    app.user("Leader", 80).await;

    let (status, body) = app
        .get("/api/user?email=caller@example.com", &caller.token)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "rank": 2, "name": "Caller", "score": 20, "team": [] })
    );
}

#[tokio::test]
async fn test_equal_scores_share_rank() {
    let app = TestApp::new();
    let first = app.user("FirstTied", 40).await;
    app.user("SecondTied", 40).await;

    let (_, first_body) = app.get("/api/user?name=FirstTied", &first.token).await;
    let (_, second_body) = app.get("/api/user?name=SecondTied", &first.token).await;

    assert_eq!(first_body["rank"], 1);
    assert_eq!(second_body["rank"], 1);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new();
    let caller = app.user("Caller", 20).await;

    let (status, body) = app
        .get("/api/user?email=ghost@example.com", &caller.token)
        .await;

    assert_eq!(failure(status, &body), vec![error(404, "User does not exist.")]);
}

#[tokio::test]
async fn test_empty_query_values_list_everyone() {
    let app = TestApp::new();
    let caller = app.user("Caller", 20).await;

    let (status, body) = app.get("/api/user?email=&name=", &caller.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}
