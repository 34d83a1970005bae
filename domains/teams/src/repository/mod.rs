//! Entity store for the Teams domain
//!
//! One async trait per entity, with a Postgres implementation per trait and a
//! single in-memory store implementing all of them. Uniqueness violations on
//! write surface as `RepositoryError::AlreadyExists` from every implementation.

pub mod memberships;
pub mod memory;
pub mod team_requests;
pub mod teams;
pub mod transactions;
pub mod users;

use std::sync::Arc;

use leaderboard_common::RepositoryError;
use sqlx::PgPool;

pub use memberships::{MembershipStore, PgMembershipStore};
pub use memory::InMemoryStore;
pub use team_requests::{PgTeamRequestStore, TeamRequestStore};
pub use teams::{PgTeamStore, TeamStore};
pub use transactions::{
    create_membership_tx, create_team_tx, delete_memberships_for_team_tx,
    delete_requests_for_team_tx, delete_team_request_tx, delete_team_tx,
    lock_team_member_count_tx,
};
pub use users::{PgUserStore, UserStore};

/// Result type shared by every store method
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Combined store access for the Teams domain
#[derive(Clone)]
pub struct TeamsRepositories {
    pub users: Arc<dyn UserStore>,
    pub teams: Arc<dyn TeamStore>,
    pub memberships: Arc<dyn MembershipStore>,
    pub team_requests: Arc<dyn TeamRequestStore>,
}

impl TeamsRepositories {
    /// Postgres-backed stores sharing one pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            teams: Arc::new(PgTeamStore::new(pool.clone())),
            memberships: Arc::new(PgMembershipStore::new(pool.clone())),
            team_requests: Arc::new(PgTeamRequestStore::new(pool)),
        }
    }

    /// Fresh, empty in-memory stores
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(InMemoryStore::new()))
    }

    /// Every store backed by the same in-memory tables
    pub fn from_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            teams: store.clone(),
            memberships: store.clone(),
            team_requests: store,
        }
    }

    /// Apply the SQL migrations shipped with the workspace
    pub async fn migrate(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(pool).await
    }
}
