//! Join request API handlers

use axum::{
    extract::{Query, State},
    response::Response,
};
use leaderboard_common::{JsonBody, Result};
use serde::Deserialize;

use super::non_empty;
use crate::api::response::{respond, respond_with_message};
use crate::api::middleware::{AuthUser, TeamsState};

/// Team whose pending requests are listed
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRequestQuery {
    pub team_name: Option<String>,
}

/// Request to join a team
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequestBody {
    pub team_name: Option<String>,
    pub message: Option<String>,
}

/// Owner decision on one requester's pending request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRequestDecision {
    pub team_name: Option<String>,
    /// Requester's user name
    pub name: Option<String>,
}

/// List pending requests of a team owned by the caller
pub async fn list_team_requests(
    AuthUser(caller): AuthUser,
    State(state): State<TeamsState>,
    Query(query): Query<TeamRequestQuery>,
) -> Result<Response> {
    let team_name = non_empty(query.team_name);
    let outcome = state
        .service
        .get_all_team_requests(Some(&caller.email), team_name.as_deref())
        .await?;

    Ok(respond(outcome))
}

/// File a join request as the caller
pub async fn create_team_request(
    AuthUser(caller): AuthUser,
    State(state): State<TeamsState>,
    JsonBody(req): JsonBody<CreateTeamRequestBody>,
) -> Result<Response> {
    let outcome = state
        .service
        .create_team_request(
            Some(&caller.email),
            req.team_name.as_deref(),
            req.message.as_deref(),
        )
        .await?;

    Ok(respond_with_message(
        outcome,
        "Team request successfully created.",
    ))
}

/// Accept a pending request, making the requester a member
pub async fn accept_team_request(
    AuthUser(caller): AuthUser,
    State(state): State<TeamsState>,
    JsonBody(req): JsonBody<TeamRequestDecision>,
) -> Result<Response> {
    let outcome = state
        .service
        .accept_team_request(
            Some(&caller.email),
            req.team_name.as_deref(),
            req.name.as_deref(),
        )
        .await?;

    Ok(respond_with_message(
        outcome,
        "Team request successfully accepted.",
    ))
}

/// Reject a pending request
pub async fn delete_team_request(
    AuthUser(caller): AuthUser,
    State(state): State<TeamsState>,
    JsonBody(req): JsonBody<TeamRequestDecision>,
) -> Result<Response> {
    let outcome = state
        .service
        .delete_team_request(
            Some(&caller.email),
            req.team_name.as_deref(),
            req.name.as_deref(),
        )
        .await?;

    Ok(respond_with_message(
        outcome,
        "Team request successfully deleted.",
    ))
}
