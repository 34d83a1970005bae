//! Membership store

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::RepositoryResult;
use crate::domain::entities::User;

#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Users belonging to a team, in join order
    async fn find_members(&self, team_id: Uuid) -> RepositoryResult<Vec<User>>;

    /// Names of the teams a user belongs to, in join order
    async fn find_team_names_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<String>>;

    async fn exists(&self, team_id: Uuid, user_id: Uuid) -> RepositoryResult<bool>;

    async fn count_for_team(&self, team_id: Uuid) -> RepositoryResult<i64>;
}

#[derive(Debug, Clone)]
pub struct PgMembershipStore {
    pool: PgPool,
}

impl PgMembershipStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipStore for PgMembershipStore {
    async fn find_members(&self, team_id: Uuid) -> RepositoryResult<Vec<User>> {
        let members = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.name, u.hashed_password, u.score, u.created_at
            FROM team_memberships m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.team_id = $1
            ORDER BY m.created_at ASC, m.id ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn find_team_names_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT t.name
            FROM team_memberships m
            INNER JOIN teams t ON t.id = m.team_id
            WHERE m.user_id = $1
            ORDER BY m.created_at ASC, m.id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    async fn exists(&self, team_id: Uuid, user_id: Uuid) -> RepositoryResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM team_memberships
                WHERE team_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn count_for_team(&self, team_id: Uuid) -> RepositoryResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM team_memberships WHERE team_id = $1")
                .bind(team_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
