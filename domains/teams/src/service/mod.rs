//! Domain operations for users, teams, join requests and accounts
//!
//! Every operation returns `Result<Outcome<T>>`: the outer `Err` is reserved
//! for faults (store unreachable, hashing failure), while every expected
//! business failure comes back as an `Outcome::Failure` holding only the
//! client-facing error pairs. Independent checks are merged so callers see
//! all violated rules at once; ownership is checked only after existence and
//! stops the operation on its own.

mod auth;
mod team_requests;
mod teams;
mod users;

use std::sync::Arc;

use leaderboard_auth::AuthBackend;
use leaderboard_common::{Check, ErrorSink, Outcome, TracingSink};

use crate::domain::password::{Argon2Hasher, PasswordHasher};
use crate::repository::TeamsRepositories;

/// Entry point for all teams domain operations
#[derive(Clone)]
pub struct TeamsService {
    repos: TeamsRepositories,
    sink: Arc<dyn ErrorSink>,
    hasher: Arc<dyn PasswordHasher>,
    auth: AuthBackend,
}

impl TeamsService {
    /// Service logging through `tracing` and hashing with Argon2
    pub fn new(repos: TeamsRepositories, auth: AuthBackend) -> Self {
        Self {
            repos,
            sink: Arc::new(TracingSink),
            hasher: Arc::new(Argon2Hasher::new()),
            auth,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn repositories(&self) -> &TeamsRepositories {
        &self.repos
    }

    pub fn auth(&self) -> &AuthBackend {
        &self.auth
    }

    fn fail_if<T>(&self, function: &'static str, predicate: bool, check: Check) -> Outcome<T> {
        Outcome::fail_if(self.sink.as_ref(), predicate, check.in_function(function))
    }
}

/// Treat empty strings like absent parameters
fn provided(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
