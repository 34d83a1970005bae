//! Team management API handlers
//!
//! The caller's token email is the owner for every write; the service
//! enforces ownership and the business rules.

use axum::{
    extract::{Query, State},
    response::Response,
};
use leaderboard_common::{JsonBody, Result};
use serde::Deserialize;

use super::non_empty;
use crate::api::response::{respond, respond_with_message};
use crate::api::middleware::{AuthUser, TeamsState};
use crate::domain::entities::TeamUpdate;
use crate::domain::validation::DEFAULT_MAX_MEMBER_COUNT;

/// Optional team name for `GET /api/team`
#[derive(Debug, Default, Deserialize)]
pub struct TeamQuery {
    pub name: Option<String>,
}

/// Request for creating a new team
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: Option<String>,

    /// Capacity, 11 when omitted
    #[serde(default = "default_max_member_count")]
    pub max_member_count: Option<i32>,
}

fn default_max_member_count() -> Option<i32> {
    Some(DEFAULT_MAX_MEMBER_COUNT)
}

/// Request for updating a team
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    pub team_name: Option<String>,
    #[serde(default)]
    pub update_data: TeamUpdate,
}

/// Request naming the team to delete
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTeamRequest {
    pub team_name: Option<String>,
}

/// Get one team with its members, or every team when no name is given
pub async fn get_teams(
    AuthUser(_caller): AuthUser,
    State(state): State<TeamsState>,
    Query(query): Query<TeamQuery>,
) -> Result<Response> {
    match non_empty(query.name) {
        Some(name) => Ok(respond(state.service.get_team(Some(&name)).await?)),
        None => Ok(respond(state.service.get_all_teams().await?)),
    }
}

/// Create a team owned by the caller
pub async fn create_team(
    AuthUser(caller): AuthUser,
    State(state): State<TeamsState>,
    JsonBody(req): JsonBody<CreateTeamRequest>,
) -> Result<Response> {
    let outcome = state
        .service
        .create_team(Some(&caller.email), req.name.as_deref(), req.max_member_count)
        .await?;

    Ok(respond(outcome))
}

/// Rename or resize a team owned by the caller
pub async fn update_team(
    AuthUser(caller): AuthUser,
    State(state): State<TeamsState>,
    JsonBody(req): JsonBody<UpdateTeamRequest>,
) -> Result<Response> {
    let outcome = state
        .service
        .update_team(req.team_name.as_deref(), Some(&caller.email), req.update_data)
        .await?;

    Ok(respond(outcome))
}

/// Delete a team owned by the caller
pub async fn delete_team(
    AuthUser(caller): AuthUser,
    State(state): State<TeamsState>,
    JsonBody(req): JsonBody<DeleteTeamRequest>,
) -> Result<Response> {
    let outcome = state
        .service
        .delete_team(req.team_name.as_deref(), Some(&caller.email))
        .await?;

    Ok(respond_with_message(outcome, "Successfully deleted team."))
}
