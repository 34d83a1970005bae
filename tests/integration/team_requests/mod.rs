//! Join request endpoint integration tests
//!
//! - POST /api/team/request - Ask to join
//! - GET /api/team/request - Owner lists pending requests
//! - PUT /api/team/request - Owner accepts
//! - DELETE /api/team/request - Owner rejects

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::assertions::{error, failure};
use crate::common::{TestApp, TestUser};

/// Owner with team "JestTeam" plus a second user without a team
async fn scene() -> (TestApp, TestUser, TestUser) {
    let app = TestApp::new();
    let owner = app.user("TeamOwner", 42).await;
    let member = app.user("MemberOne", 17).await;
    app.team(&owner, "JestTeam").await;
    (app, owner, member)
}

async fn request_to_join(app: &TestApp, user: &TestUser, message: &str) -> (StatusCode, Value) {
    app.post(
        "/api/team/request",
        Some(&user.token),
        json!({ "teamName": "JestTeam", "message": message }),
    )
    .await
}

async fn accept(app: &TestApp, owner: &TestUser, name: &str) -> (StatusCode, Value) {
    app.put(
        "/api/team/request",
        &owner.token,
        json!({ "teamName": "JestTeam", "name": name }),
    )
    .await
}

#[tokio::test]
async fn test_request_accept_lifecycle() {
    let (app, owner, member) = scene().await;

    let (status, body) = request_to_join(&app, &member, "Let me in").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Team request successfully created."));

    let (status, body) = app
        .get("/api/team/request?teamName=JestTeam", &owner.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "name": "MemberOne", "message": "Let me in" }]));

    let (status, body) = accept(&app, &owner, "MemberOne").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Team request successfully accepted."));

    let (_, team) = app.get("/api/team?name=JestTeam", &owner.token).await;
    assert_eq!(team["memberNumber"], 2);
    assert_eq!(team["totalScore"], 59);
    assert_eq!(team["availableMemberNumber"], 9);

    let (_, requests) = app
        .get("/api/team/request?teamName=JestTeam", &owner.token)
        .await;
    assert_eq!(requests, json!([]));

    let (_, user) = app.get("/api/user?name=MemberOne", &member.token).await;
    assert_eq!(user["team"], json!(["JestTeam"]));
}

#[tokio::test]
async fn test_duplicate_request_conflicts() {
    let (app, _owner, member) = scene().await;
    request_to_join(&app, &member, "first").await;

    let (status, body) = request_to_join(&app, &member, "second").await;

    assert_eq!(
        failure(status, &body),
        vec![error(409, "Team request already exists.")]
    );
}

#[tokio::test]
async fn test_member_cannot_request_again() {
    let (app, owner, member) = scene().await;
    request_to_join(&app, &member, "hi").await;
    accept(&app, &owner, "MemberOne").await;

    let (status, body) = request_to_join(&app, &member, "again").await;

    assert_eq!(
        failure(status, &body),
        vec![error(409, "User is already a team member.")]
    );
}

#[tokio::test]
async fn test_request_for_unknown_team() {
    let (app, _owner, member) = scene().await;

    let (status, body) = app
        .post(
            "/api/team/request",
            Some(&member.token),
            json!({ "teamName": "Nowhere" }),
        )
        .await;

    assert_eq!(failure(status, &body), vec![error(404, "Team does not exist.")]);
}

#[tokio::test]
async fn test_only_owner_can_accept() {
    let (app, _owner, member) = scene().await;
    let intruder = app.user("Intruder", 5).await;
    request_to_join(&app, &member, "hi").await;

    let (status, body) = accept(&app, &intruder, "MemberOne").await;

    assert_eq!(
        failure(status, &body),
        vec![error(403, "Forbidden. Only team owner can accept requests.")]
    );
}

#[tokio::test]
async fn test_accept_masks_unknown_requester() {
    let (app, owner, _member) = scene().await;

    let (status, body) = accept(&app, &owner, "GhostUser").await;

    assert_eq!(
        failure(status, &body),
        vec![error(404, "Team request does not exist.")]
    );
}

#[tokio::test]
async fn test_accept_without_pending_request() {
    let (app, owner, _member) = scene().await;

    let (status, body) = accept(&app, &owner, "MemberOne").await;

    assert_eq!(
        failure(status, &body),
        vec![error(404, "Team request does not exist.")]
    );
}

#[tokio::test]
async fn test_full_team_rejects_acceptance() {
    let (app, owner, _member) = scene().await;

    // Owner plus ten members fills the default capacity of 11
    for i in 0..10 {
        let user = app.user(&format!("Member{:02}", i), 10 + i).await;
        request_to_join(&app, &user, "hi").await;
        let (status, _) = accept(&app, &owner, &user.user.name).await;
        assert_eq!(status, StatusCode::OK);
    }

    let late = app.user("LateComer", 3).await;
    request_to_join(&app, &late, "room for one more?").await;
    let (status, body) = accept(&app, &owner, "LateComer").await;

    assert_eq!(failure(status, &body), vec![error(409, "Team is full.")]);

    let (_, team) = app.get("/api/team?name=JestTeam", &owner.token).await;
    assert_eq!(team["memberNumber"], 11);
    assert_eq!(team["availableMemberNumber"], 0);
}

#[tokio::test]
async fn test_owner_rejects_request() {
    let (app, owner, member) = scene().await;
    request_to_join(&app, &member, "hi").await;

    let (status, body) = app
        .delete(
            "/api/team/request",
            &owner.token,
            json!({ "teamName": "JestTeam", "name": "MemberOne" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Team request successfully deleted."));

    let (status, body) = app
        .delete(
            "/api/team/request",
            &owner.token,
            json!({ "teamName": "JestTeam", "name": "MemberOne" }),
        )
        .await;
    assert_eq!(
        failure(status, &body),
        vec![error(404, "Team request not found.")]
    );
}

#[tokio::test]
async fn test_listing_requires_ownership_and_team_name() {
    let (app, _owner, member) = scene().await;

    let (status, body) = app
        .get("/api/team/request?teamName=JestTeam", &member.token)
        .await;
    assert_eq!(
        failure(status, &body),
        vec![error(403, "Forbidden. Only team owner can fetch join requests.")]
    );

    let (status, body) = app.get("/api/team/request", &member.token).await;
    assert_eq!(
        failure(status, &body),
        vec![error(400, "Owner and team name must be provided.")]
    );
}
