//! Teams domain: users, scores, teams, memberships, join requests

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::dto::{TeamDto, TeamRequestDto, TokenDto, UserDto};
pub use domain::entities::*;
pub use domain::password::{Argon2Hasher, PasswordHasher};
pub use domain::state::{
    JoinEvent, JoinGuardContext, JoinState, JoinStateMachine, StateError,
};
// Re-export repository types
pub use repository::{
    InMemoryStore, MembershipStore, TeamRequestStore, TeamStore, TeamsRepositories, UserStore,
};
pub use service::TeamsService;

// Re-export API types
pub use api::routes;
pub use api::TeamsState;

// Re-export auth types used by callers of this crate
pub use leaderboard_auth::{AuthBackend, AuthConfig, AuthContext, AuthError, AuthUser};
