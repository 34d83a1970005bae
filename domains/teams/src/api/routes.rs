//! Route definitions for Teams domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{auth, team_requests, teams, users};
use super::middleware::TeamsState;

/// Registration and signin; the only routes without a bearer token
fn auth_routes() -> Router<TeamsState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/signin", post(auth::signin))
}

/// Create user lookup routes
fn user_routes() -> Router<TeamsState> {
    Router::new().route("/api/user", get(users::get_users))
}

/// Create team management routes
fn team_routes() -> Router<TeamsState> {
    Router::new().route(
        "/api/team",
        get(teams::get_teams)
            .post(teams::create_team)
            .put(teams::update_team)
            .delete(teams::delete_team),
    )
}

/// Create join request routes
fn team_request_routes() -> Router<TeamsState> {
    Router::new().route(
        "/api/team/request",
        get(team_requests::list_team_requests)
            .post(team_requests::create_team_request)
            .put(team_requests::accept_team_request)
            .delete(team_requests::delete_team_request),
    )
}

/// Create all Teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(team_routes())
        .merge(team_request_routes())
}
