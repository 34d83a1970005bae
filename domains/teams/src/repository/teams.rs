//! Team store

use async_trait::async_trait;
use leaderboard_common::RepositoryError;
use sqlx::PgPool;
use uuid::Uuid;

use super::transactions::{
    create_membership_tx, create_team_tx, delete_memberships_for_team_tx,
    delete_requests_for_team_tx, delete_team_tx,
};
use super::RepositoryResult;
use crate::domain::entities::{Team, TeamMembership, TeamUpdate};

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Team>>;

    /// All teams in creation order
    async fn find_all(&self) -> RepositoryResult<Vec<Team>>;

    /// Insert the team and its owner's membership as one unit
    async fn create_with_owner(
        &self,
        team: &Team,
        owner_membership: &TeamMembership,
    ) -> RepositoryResult<Team>;

    /// Apply a partial update.
    ///
    /// `NotFound` if the team vanished, `AlreadyExists` if the new name is taken.
    async fn update(&self, team_id: Uuid, update: &TeamUpdate) -> RepositoryResult<Team>;

    /// Remove the team with its memberships and pending requests
    async fn delete_cascade(&self, team_id: Uuid) -> RepositoryResult<()>;
}

const TEAM_COLUMNS: &str = "id, name, max_member_count, owner_id, created_at";

#[derive(Debug, Clone)]
pub struct PgTeamStore {
    pool: PgPool,
}

impl PgTeamStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamStore for PgTeamStore {
    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(&format!(
            "SELECT {} FROM teams WHERE name = $1",
            TEAM_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(&format!(
            "SELECT {} FROM teams ORDER BY created_at ASC, id ASC",
            TEAM_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn create_with_owner(
        &self,
        team: &Team,
        owner_membership: &TeamMembership,
    ) -> RepositoryResult<Team> {
        let mut tx = self.pool.begin().await?;

        let created = create_team_tx(&mut tx, team).await?;
        create_membership_tx(&mut tx, owner_membership).await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, team_id: Uuid, update: &TeamUpdate) -> RepositoryResult<Team> {
        let updated = sqlx::query_as::<_, Team>(&format!(
            r#"
            UPDATE teams
            SET name = COALESCE($2, name),
                max_member_count = COALESCE($3, max_member_count)
            WHERE id = $1
            RETURNING {}
            "#,
            TEAM_COLUMNS
        ))
        .bind(team_id)
        .bind(update.name.as_deref())
        .bind(update.max_member_count)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(RepositoryError::NotFound)
    }

    async fn delete_cascade(&self, team_id: Uuid) -> RepositoryResult<()> {
        let mut tx = self.pool.begin().await?;

        delete_requests_for_team_tx(&mut tx, team_id).await?;
        delete_memberships_for_team_tx(&mut tx, team_id).await?;
        delete_team_tx(&mut tx, team_id).await?;

        tx.commit().await?;
        Ok(())
    }
}
