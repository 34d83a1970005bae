//! Transactional free functions for Teams domain (Zero2Prod pattern)
//!
//! Each function runs inside a caller-owned transaction so multi-step writes
//! (team plus owner membership, request consumption plus membership, team
//! cascade) commit or roll back as one unit.

use crate::domain::entities::{Team, TeamMembership};
use leaderboard_common::RepositoryError;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Create a team within an existing transaction.
pub async fn create_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team: &Team,
) -> std::result::Result<Team, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (id, name, max_member_count, owner_id, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, max_member_count, owner_id, created_at
        "#,
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(team.max_member_count)
    .bind(team.owner_id)
    .bind(team.created_at)
    .fetch_one(&mut **transaction)
    .await
}

/// Create a membership within an existing transaction.
pub async fn create_membership_tx(
    transaction: &mut Transaction<'_, Postgres>,
    membership: &TeamMembership,
) -> std::result::Result<TeamMembership, sqlx::Error> {
    sqlx::query_as::<_, TeamMembership>(
        r#"
        INSERT INTO team_memberships (id, team_id, user_id, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, team_id, user_id, created_at
        "#,
    )
    .bind(membership.id)
    .bind(membership.team_id)
    .bind(membership.user_id)
    .bind(membership.created_at)
    .fetch_one(&mut **transaction)
    .await
}

/// Delete every membership of a team within an existing transaction.
pub async fn delete_memberships_for_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM team_memberships WHERE team_id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;
    Ok(result.rows_affected())
}

/// Delete every pending request for a team within an existing transaction.
pub async fn delete_requests_for_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM team_requests WHERE team_id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;
    Ok(result.rows_affected())
}

/// Delete a team row within an existing transaction.
///
/// Returns `RepositoryError::NotFound` if the team is already gone.
pub async fn delete_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM teams WHERE id = $1")
        .bind(team_id)
        .execute(&mut **transaction)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Lock a team row and count its members within an existing transaction.
///
/// The row lock serializes concurrent acceptances for the same team until the
/// transaction ends. Returns `RepositoryError::NotFound` if the team is gone.
pub async fn lock_team_member_count_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<i64, RepositoryError> {
    let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM teams WHERE id = $1 FOR UPDATE")
        .bind(team_id)
        .fetch_optional(&mut **transaction)
        .await?;
    if locked.is_none() {
        return Err(RepositoryError::NotFound);
    }

    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM team_memberships WHERE team_id = $1")
            .bind(team_id)
            .fetch_one(&mut **transaction)
            .await?;
    Ok(count)
}

/// Consume one pending request within an existing transaction.
///
/// Returns `RepositoryError::NotFound` if another caller already consumed
/// or deleted it.
pub async fn delete_team_request_tx(
    transaction: &mut Transaction<'_, Postgres>,
    request_id: Uuid,
) -> std::result::Result<(), RepositoryError> {
    let result = sqlx::query("DELETE FROM team_requests WHERE id = $1")
        .bind(request_id)
        .execute(&mut **transaction)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
