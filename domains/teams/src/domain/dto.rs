//! Client-facing projections of stored entities
//!
//! Field names here are the wire contract. Internal identifiers and password
//! hashes never appear in a DTO.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Team, TeamRequestWithUser, User};

/// User DTO
///
/// `team` is only present when the caller asked for team names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub rank: i64,
    pub name: String,
    pub score: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub team: Option<Vec<String>>,
}

impl UserDto {
    pub fn new(user: &User, rank: i64) -> Self {
        Self {
            rank,
            name: user.name.clone(),
            score: user.score,
            team: None,
        }
    }

    pub fn with_teams(mut self, team_names: Vec<String>) -> Self {
        self.team = Some(team_names);
        self
    }
}

/// Team DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub name: String,
    pub owner_name: String,
    pub total_score: i64,
    pub member_number: i64,
    pub available_member_number: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub members: Option<Vec<UserDto>>,
}

impl TeamDto {
    /// Aggregate a team from its owner and current members.
    ///
    /// `availableMemberNumber` is not clamped and goes negative when a team
    /// is over capacity.
    pub fn new(team: &Team, owner: &User, members: &[User]) -> Self {
        let member_number = members.len() as i64;
        Self {
            name: team.name.clone(),
            owner_name: owner.name.clone(),
            total_score: members.iter().map(|m| i64::from(m.score)).sum(),
            member_number,
            available_member_number: i64::from(team.max_member_count) - member_number,
            members: None,
        }
    }

    pub fn with_members(mut self, members: Vec<UserDto>) -> Self {
        self.members = Some(members);
        self
    }
}

/// Pending join request as shown to the team owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRequestDto {
    pub name: String,
    pub message: String,
}

impl From<TeamRequestWithUser> for TeamRequestDto {
    fn from(request: TeamRequestWithUser) -> Self {
        Self {
            name: request.user_name,
            message: request.message,
        }
    }
}

/// Signed session token returned by register and signin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDto {
    pub token: String,
}
