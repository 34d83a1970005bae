//! Teams domain state and auth backend integration

use crate::service::TeamsService;
use axum::extract::FromRef;
use leaderboard_auth::AuthBackend;

pub use leaderboard_auth::AuthUser;

/// Application state for the Teams domain
#[derive(Clone)]
pub struct TeamsState {
    pub service: TeamsService,
    pub auth: AuthBackend,
}

impl TeamsState {
    pub fn new(service: TeamsService) -> Self {
        let auth = service.auth().clone();
        Self { service, auth }
    }
}

impl FromRef<TeamsState> for AuthBackend {
    fn from_ref(state: &TeamsState) -> Self {
        state.auth.clone()
    }
}
