//! API endpoint integration tests
//!
//! Drives the full router (health, auth, users, teams, team requests)
//! against the in-memory store.

#![allow(dead_code)]

mod auth;
mod common;
mod team_requests;
mod teams;
mod users;
