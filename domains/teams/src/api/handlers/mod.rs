//! HTTP handlers for the Teams domain
//!
//! Handlers decode the request, call one service operation and map the
//! outcome. Empty query values count as absent.

pub mod auth;
pub mod team_requests;
pub mod teams;
pub mod users;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
