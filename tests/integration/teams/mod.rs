//! Team management endpoint integration tests
//!
//! Tests the 4 team management endpoints:
//! - POST /api/team - Create team
//! - GET /api/team - Get one team or list all
//! - PUT /api/team - Update team
//! - DELETE /api/team - Delete team

use axum::http::StatusCode;
use serde_json::json;

use crate::common::assertions::{error, failure};
use crate::common::TestApp;

mod test_create_team {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_create_team_with_default_capacity() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;

        let (status, body) = app
            .post("/api/team", Some(&owner.token), json!({ "name": "JestTeam" }))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "name": "JestTeam",
                "ownerName": "TeamOwner",
                "totalScore": 42,
                "memberNumber": 1,
                "availableMemberNumber": 10,
                "members": [{ "rank": 1, "name": "TeamOwner", "score": 42 }],
            })
        );
    }

    #[tokio::test]
    async fn test_capacity_of_ten_is_rejected() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;

        let (status, body) = app
            .post(
                "/api/team",
                Some(&owner.token),
                json!({ "name": "JestTeam", "maxMemberCount": 10 }),
            )
            .await;

        assert_eq!(
            failure(status, &body),
            vec![error(400, "Max member count must be greater than 10.")]
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_and_short_name_are_reported() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;
        app.team(&owner, "abc_taken").await;

        let (status, body) = app
            .post("/api/team", Some(&owner.token), json!({ "name": "abc_taken" }))
            .await;
        assert_eq!(
            failure(status, &body),
            vec![error(409, "Team name already exists.")]
        );

        let (status, body) = app
            .post("/api/team", Some(&owner.token), json!({ "name": "abc" }))
            .await;
        assert_eq!(
            failure(status, &body),
            vec![error(400, "Name must be at least 4 characters long.")]
        );
    }

    #[tokio::test]
    async fn test_token_for_deleted_account_gets_generic_failure() {
        let app = TestApp::new();
        let ghost_token = app
            .auth
            .issue_token("ghost@example.com", "GhostUser")
            .unwrap();

        let (status, body) = app
            .post("/api/team", Some(&ghost_token), json!({ "name": "JestTeam" }))
            .await;

        assert_eq!(
            failure(status, &body),
            vec![error(500, "Failed to create team.")]
        );
    }
}

mod test_get_team {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_list_omits_members() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;
        app.team(&owner, "JestTeam").await;

        let (status, body) = app.get("/api/team", &owner.token).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "name": "JestTeam",
                "ownerName": "TeamOwner",
                "totalScore": 42,
                "memberNumber": 1,
                "availableMemberNumber": 10,
            }])
        );
    }

    #[tokio::test]
    async fn test_unknown_team_is_not_found() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;

        let (status, body) = app.get("/api/team?name=Nowhere", &owner.token).await;

        assert_eq!(failure(status, &body), vec![error(404, "Team does not exist.")]);
    }
}

mod test_update_team {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_owner_renames_and_resizes() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;
        app.team(&owner, "JestTeam").await;

        let (status, body) = app
            .put(
                "/api/team",
                &owner.token,
                json!({
                    "teamName": "JestTeam",
                    "updateData": { "name": "RenamedTeam", "maxMemberCount": 20 },
                }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "RenamedTeam");
        assert_eq!(body["availableMemberNumber"], 19);

        let (status, _) = app.get("/api/team?name=JestTeam", &owner.token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_keeping_own_name_is_allowed() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;
        app.team(&owner, "JestTeam").await;

        let (status, body) = app
            .put(
                "/api/team",
                &owner.token,
                json!({ "teamName": "JestTeam", "updateData": { "name": "JestTeam" } }),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "JestTeam");
    }

    #[tokio::test]
    async fn test_non_owner_is_forbidden() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;
        let other = app.user("OtherUser", 10).await;
        app.team(&owner, "JestTeam").await;

        let (status, body) = app
            .put(
                "/api/team",
                &other.token,
                json!({ "teamName": "JestTeam", "updateData": { "maxMemberCount": 30 } }),
            )
            .await;

        assert_eq!(
            failure(status, &body),
            vec![error(403, "Forbidden. Only team owner can update the team.")]
        );
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;
        app.team(&owner, "JestTeam").await;

        let (status, body) = app
            .put("/api/team", &owner.token, json!({ "teamName": "JestTeam" }))
            .await;

        assert_eq!(
            failure(status, &body),
            vec![error(400, "Team name or max member count must be provided.")]
        );
    }
}

mod test_delete_team {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_owner_deletes_team_and_pending_requests() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;
        let member = app.user("MemberOne", 17).await;
        app.team(&owner, "JestTeam").await;
        let (status, _) = app
            .post(
                "/api/team/request",
                Some(&member.token),
                json!({ "teamName": "JestTeam" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .delete("/api/team", &owner.token, json!({ "teamName": "JestTeam" }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("Successfully deleted team."));

        let (status, body) = app.get("/api/team", &owner.token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        // Same name can be reused, and the old request does not come back
        app.team(&owner, "JestTeam").await;
        let (status, body) = app
            .get("/api/team/request?teamName=JestTeam", &owner.token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_delete() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;
        let other = app.user("OtherUser", 10).await;
        app.team(&owner, "JestTeam").await;

        let (status, body) = app
            .delete("/api/team", &other.token, json!({ "teamName": "JestTeam" }))
            .await;

        assert_eq!(
            failure(status, &body),
            vec![error(403, "Forbidden. Only team owner can delete the team.")]
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_team() {
        let app = TestApp::new();
        let owner = app.user("TeamOwner", 42).await;

        let (status, body) = app
            .delete("/api/team", &owner.token, json!({ "teamName": "Nowhere" }))
            .await;

        assert_eq!(failure(status, &body), vec![error(404, "Team does not exist.")]);
    }
}
