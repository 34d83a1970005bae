//! User lookup handlers

use axum::{
    extract::{Query, State},
    response::Response,
};
use leaderboard_common::Result;
use serde::Deserialize;

use super::non_empty;
use crate::api::response::respond;
use crate::api::middleware::{AuthUser, TeamsState};

/// Optional lookup keys for `GET /api/user`
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Get one user by email or name, or the whole leaderboard when neither is given
pub async fn get_users(
    AuthUser(_caller): AuthUser,
    State(state): State<TeamsState>,
    Query(query): Query<UserQuery>,
) -> Result<Response> {
    let (email, name) = (non_empty(query.email), non_empty(query.name));

    if email.is_none() && name.is_none() {
        return Ok(respond(state.service.get_all_users().await?));
    }

    let outcome = state
        .service
        .get_user(email.as_deref(), name.as_deref())
        .await?;
    Ok(respond(outcome))
}
