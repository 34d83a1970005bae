//! Domain entities for the Leaderboard teams domain
//!
//! Store-facing records for users, teams, memberships and join requests.
//! Identifiers are assigned here and never change afterwards.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{MAX_SCORE, MIN_SCORE};

/// User entity
#[derive(Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub score: i32,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    #[mutants::skip] // Formatting only; the hash redaction is covered by a test
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("hashed_password", &"[REDACTED]")
            .field("score", &self.score)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl User {
    /// Create a new user with a random starting score
    pub fn new(email: String, name: String, hashed_password: String) -> Self {
        let score = rand::thread_rng().gen_range(MIN_SCORE..=MAX_SCORE);
        Self::with_score(email, name, hashed_password, score)
    }

    pub fn with_score(email: String, name: String, hashed_password: String, score: i32) -> Self {
        User {
            id: Uuid::new_v4(),
            email,
            name,
            hashed_password,
            score,
            created_at: Utc::now(),
        }
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub max_member_count: i32,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: String, max_member_count: i32, owner_id: Uuid) -> Self {
        Team {
            id: Uuid::new_v4(),
            name,
            max_member_count,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Ownership is fixed at creation
    pub fn is_owned_by(&self, user: &User) -> bool {
        self.owner_id == user.id
    }
}

/// Partial team update; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub max_member_count: Option<i32>,
}

impl TeamUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.max_member_count.is_none()
    }

    /// Apply the provided fields to `team`
    pub fn apply_to(&self, team: &mut Team) {
        if let Some(name) = &self.name {
            team.name = name.clone();
        }
        if let Some(max_member_count) = self.max_member_count {
            team.max_member_count = max_member_count;
        }
    }
}

/// Membership entity - association between User and Team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMembership {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TeamMembership {
    pub fn new(team_id: Uuid, user_id: Uuid) -> Self {
        TeamMembership {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

/// Pending request from a user to join a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamRequest {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl TeamRequest {
    pub fn new(team_id: Uuid, user_id: Uuid, message: String) -> Self {
        TeamRequest {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            message,
            created_at: Utc::now(),
        }
    }
}

/// Team request with the requester's name for list responses
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TeamRequestWithUser {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
}
