//! Team request store

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use leaderboard_common::RepositoryError;

use super::transactions::{
    create_membership_tx, delete_team_request_tx, lock_team_member_count_tx,
};
use super::RepositoryResult;
use crate::domain::entities::{TeamMembership, TeamRequest, TeamRequestWithUser};

#[async_trait]
pub trait TeamRequestStore: Send + Sync {
    /// Insert a request; an existing one for the same pair is `AlreadyExists`
    async fn create(&self, request: &TeamRequest) -> RepositoryResult<TeamRequest>;

    /// Oldest pending request for the pair
    async fn find_first(&self, team_id: Uuid, user_id: Uuid)
        -> RepositoryResult<Option<TeamRequest>>;

    /// Pending requests for a team with requester names, oldest first
    async fn find_by_team(&self, team_id: Uuid) -> RepositoryResult<Vec<TeamRequestWithUser>>;

    /// Consume the request and create the membership as one unit.
    ///
    /// The member count is checked against `max_member_count` inside the same
    /// unit: `CapacityReached` when the team is full. `NotFound` when the
    /// request was already consumed. `AlreadyExists` when the user is already
    /// a member. No membership is written in any of these cases.
    async fn accept(
        &self,
        request_id: Uuid,
        membership: &TeamMembership,
        max_member_count: i32,
    ) -> RepositoryResult<TeamMembership>;

    /// Delete every request for the pair, returning how many were removed
    async fn delete_for_user(&self, team_id: Uuid, user_id: Uuid) -> RepositoryResult<u64>;
}

#[derive(Debug, Clone)]
pub struct PgTeamRequestStore {
    pool: PgPool,
}

impl PgTeamRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRequestStore for PgTeamRequestStore {
    async fn create(&self, request: &TeamRequest) -> RepositoryResult<TeamRequest> {
        let created = sqlx::query_as::<_, TeamRequest>(
            r#"
            INSERT INTO team_requests (id, team_id, user_id, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, team_id, user_id, message, created_at
            "#,
        )
        .bind(request.id)
        .bind(request.team_id)
        .bind(request.user_id)
        .bind(&request.message)
        .bind(request.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_first(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> RepositoryResult<Option<TeamRequest>> {
        let request = sqlx::query_as::<_, TeamRequest>(
            r#"
            SELECT id, team_id, user_id, message, created_at
            FROM team_requests
            WHERE team_id = $1 AND user_id = $2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn find_by_team(&self, team_id: Uuid) -> RepositoryResult<Vec<TeamRequestWithUser>> {
        let requests = sqlx::query_as::<_, TeamRequestWithUser>(
            r#"
            SELECT r.id, r.team_id, r.user_id, r.message, r.created_at,
                   u.name AS user_name
            FROM team_requests r
            INNER JOIN users u ON u.id = r.user_id
            WHERE r.team_id = $1
            ORDER BY r.created_at ASC, r.id ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    async fn accept(
        &self,
        request_id: Uuid,
        membership: &TeamMembership,
        max_member_count: i32,
    ) -> RepositoryResult<TeamMembership> {
        let mut tx = self.pool.begin().await?;

        let member_count = lock_team_member_count_tx(&mut tx, membership.team_id).await?;
        if member_count >= i64::from(max_member_count) {
            return Err(RepositoryError::CapacityReached);
        }

        // Zero rows means a concurrent accept or delete won; the tx rolls back on drop
        delete_team_request_tx(&mut tx, request_id).await?;
        let created = create_membership_tx(&mut tx, membership).await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn delete_for_user(&self, team_id: Uuid, user_id: Uuid) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM team_requests WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
