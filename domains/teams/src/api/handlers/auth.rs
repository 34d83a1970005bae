//! Registration and signin handlers

use axum::{extract::State, response::Response};
use leaderboard_common::{JsonBody, Result};
use serde::Deserialize;

use crate::api::response::respond;
use crate::api::middleware::TeamsState;

/// Request for registering a new user
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Request for signing in
#[derive(Debug, Default, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register a user and return a token for them
pub async fn register(
    State(state): State<TeamsState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<Response> {
    let outcome = state
        .service
        .register(
            req.email.as_deref(),
            req.name.as_deref(),
            req.password.as_deref(),
        )
        .await?;

    Ok(respond(outcome))
}

/// Exchange email and password for a token
pub async fn signin(
    State(state): State<TeamsState>,
    JsonBody(req): JsonBody<SigninRequest>,
) -> Result<Response> {
    let outcome = state
        .service
        .signin(req.email.as_deref(), req.password.as_deref())
        .await?;

    Ok(respond(outcome))
}
