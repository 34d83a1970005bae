//! In-memory entity store
//!
//! Implements every store trait over one set of tables guarded by a single
//! mutex, so each method (including multi-step writes) is atomic. The same
//! uniqueness rules as the SQL schema are enforced on insert and update.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use leaderboard_common::RepositoryError;
use uuid::Uuid;

use super::memberships::MembershipStore;
use super::team_requests::TeamRequestStore;
use super::teams::TeamStore;
use super::users::UserStore;
use super::RepositoryResult;
use crate::domain::entities::{
    Team, TeamMembership, TeamRequest, TeamRequestWithUser, TeamUpdate, User,
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    teams: Vec<Team>,
    memberships: Vec<TeamMembership>,
    team_requests: Vec<TeamRequest>,
}

impl Tables {
    fn user(&self, user_id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    fn is_member(&self, team_id: Uuid, user_id: Uuid) -> bool {
        self.memberships
            .iter()
            .any(|m| m.team_id == team_id && m.user_id == user_id)
    }

    fn insert_membership(&mut self, membership: &TeamMembership) -> RepositoryResult<()> {
        if self.is_member(membership.team_id, membership.user_id) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.memberships.push(membership.clone());
        Ok(())
    }
}

/// Vec-backed store; rows keep insertion order
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|e| RepositoryError::InvalidData(format!("Store lock poisoned: {}", e)))
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, user_id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.lock()?.user(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<User>> {
        Ok(self.lock()?.users.iter().find(|u| u.name == name).cloned())
    }

    async fn find_all_by_score(&self) -> RepositoryResult<Vec<User>> {
        let mut users = self.lock()?.users.clone();
        // Stable sort keeps registration order among equal scores
        users.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(users)
    }

    async fn count_with_higher_score(&self, score: i32) -> RepositoryResult<i64> {
        let count = self.lock()?.users.iter().filter(|u| u.score > score).count();
        Ok(count as i64)
    }

    async fn create(&self, user: &User) -> RepositoryResult<User> {
        let mut tables = self.lock()?;
        if tables
            .users
            .iter()
            .any(|u| u.id == user.id || u.email == user.email || u.name == user.name)
        {
            return Err(RepositoryError::AlreadyExists);
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }
}

#[async_trait]
impl TeamStore for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
        Ok(self.lock()?.teams.iter().find(|t| t.name == name).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        Ok(self.lock()?.teams.clone())
    }

    async fn create_with_owner(
        &self,
        team: &Team,
        owner_membership: &TeamMembership,
    ) -> RepositoryResult<Team> {
        let mut tables = self.lock()?;
        if tables
            .teams
            .iter()
            .any(|t| t.id == team.id || t.name == team.name)
        {
            return Err(RepositoryError::AlreadyExists);
        }
        if tables.user(team.owner_id).is_none() {
            return Err(RepositoryError::InvalidData(format!(
                "Owner {} does not exist",
                team.owner_id
            )));
        }

        tables.teams.push(team.clone());
        if let Err(e) = tables.insert_membership(owner_membership) {
            tables.teams.retain(|t| t.id != team.id);
            return Err(e);
        }
        Ok(team.clone())
    }

    async fn update(&self, team_id: Uuid, update: &TeamUpdate) -> RepositoryResult<Team> {
        let mut tables = self.lock()?;
        if let Some(name) = &update.name {
            if tables
                .teams
                .iter()
                .any(|t| t.id != team_id && &t.name == name)
            {
                return Err(RepositoryError::AlreadyExists);
            }
        }

        let team = tables
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(RepositoryError::NotFound)?;
        update.apply_to(team);
        Ok(team.clone())
    }

    async fn delete_cascade(&self, team_id: Uuid) -> RepositoryResult<()> {
        let mut tables = self.lock()?;
        if !tables.teams.iter().any(|t| t.id == team_id) {
            return Err(RepositoryError::NotFound);
        }

        tables.team_requests.retain(|r| r.team_id != team_id);
        tables.memberships.retain(|m| m.team_id != team_id);
        tables.teams.retain(|t| t.id != team_id);
        Ok(())
    }
}

#[async_trait]
impl MembershipStore for InMemoryStore {
    async fn find_members(&self, team_id: Uuid) -> RepositoryResult<Vec<User>> {
        let tables = self.lock()?;
        let members = tables
            .memberships
            .iter()
            .filter(|m| m.team_id == team_id)
            .filter_map(|m| tables.user(m.user_id).cloned())
            .collect();
        Ok(members)
    }

    async fn find_team_names_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<String>> {
        let tables = self.lock()?;
        let names = tables
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .filter_map(|m| tables.teams.iter().find(|t| t.id == m.team_id))
            .map(|t| t.name.clone())
            .collect();
        Ok(names)
    }

    async fn exists(&self, team_id: Uuid, user_id: Uuid) -> RepositoryResult<bool> {
        Ok(self.lock()?.is_member(team_id, user_id))
    }

    async fn count_for_team(&self, team_id: Uuid) -> RepositoryResult<i64> {
        let count = self
            .lock()?
            .memberships
            .iter()
            .filter(|m| m.team_id == team_id)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl TeamRequestStore for InMemoryStore {
    async fn create(&self, request: &TeamRequest) -> RepositoryResult<TeamRequest> {
        let mut tables = self.lock()?;
        if tables.team_requests.iter().any(|r| {
            r.id == request.id || (r.team_id == request.team_id && r.user_id == request.user_id)
        }) {
            return Err(RepositoryError::AlreadyExists);
        }
        tables.team_requests.push(request.clone());
        Ok(request.clone())
    }

    async fn find_first(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> RepositoryResult<Option<TeamRequest>> {
        Ok(self
            .lock()?
            .team_requests
            .iter()
            .find(|r| r.team_id == team_id && r.user_id == user_id)
            .cloned())
    }

    async fn find_by_team(&self, team_id: Uuid) -> RepositoryResult<Vec<TeamRequestWithUser>> {
        let tables = self.lock()?;
        let requests = tables
            .team_requests
            .iter()
            .filter(|r| r.team_id == team_id)
            .filter_map(|r| {
                tables.user(r.user_id).map(|u| TeamRequestWithUser {
                    id: r.id,
                    team_id: r.team_id,
                    user_id: r.user_id,
                    message: r.message.clone(),
                    created_at: r.created_at,
                    user_name: u.name.clone(),
                })
            })
            .collect();
        Ok(requests)
    }

    async fn accept(
        &self,
        request_id: Uuid,
        membership: &TeamMembership,
        max_member_count: i32,
    ) -> RepositoryResult<TeamMembership> {
        let mut tables = self.lock()?;
        let position = tables
            .team_requests
            .iter()
            .position(|r| r.id == request_id)
            .ok_or(RepositoryError::NotFound)?;

        let member_count = tables
            .memberships
            .iter()
            .filter(|m| m.team_id == membership.team_id)
            .count() as i64;
        if member_count >= i64::from(max_member_count) {
            return Err(RepositoryError::CapacityReached);
        }

        tables.insert_membership(membership)?;
        tables.team_requests.remove(position);
        Ok(membership.clone())
    }

    async fn delete_for_user(&self, team_id: Uuid, user_id: Uuid) -> RepositoryResult<u64> {
        let mut tables = self.lock()?;
        let before = tables.team_requests.len();
        tables
            .team_requests
            .retain(|r| !(r.team_id == team_id && r.user_id == user_id));
        Ok((before - tables.team_requests.len()) as u64)
    }
}
