//! Team creation, update, deletion and listing

use leaderboard_common::{merge, Check, Error, Outcome, RepositoryError, Result};
use serde_json::json;

use super::{provided, TeamsService};
use crate::domain::dto::TeamDto;
use crate::domain::entities::{Team, TeamMembership, TeamUpdate, User};
use crate::domain::validation::{is_max_member_count_too_low, is_name_too_short};

const NAME_TAKEN: &str = "Team name already exists.";
const NAME_TOO_SHORT: &str = "Name must be at least 4 characters long.";
const MAX_MEMBER_COUNT_TOO_LOW: &str = "Max member count must be greater than 10.";

impl TeamsService {
    /// Create a team owned by `owner_email`, with the owner as first member
    pub async fn create_team(
        &self,
        owner_email: Option<&str>,
        name: Option<&str>,
        max_member_count: Option<i32>,
    ) -> Result<Outcome<TeamDto>> {
        const FN: &str = "create_team";
        let (owner_email, name) = (provided(owner_email), provided(name));

        let name_exists = match name {
            Some(name) => self.repos.teams.find_by_name(name).await?.is_some(),
            None => false,
        };
        let validation = merge([
            self.fail_if::<()>(FN, name_exists, Check::with_code(NAME_TAKEN, 409)),
            self.fail_if(
                FN,
                owner_email.is_none() || name.is_none() || max_member_count.is_none(),
                Check::new("Team name, owner, and max member count must be provided."),
            ),
            self.fail_if(
                FN,
                name.is_some_and(is_name_too_short),
                Check::new(NAME_TOO_SHORT),
            ),
            self.fail_if(
                FN,
                max_member_count.is_some_and(is_max_member_count_too_low),
                Check::new(MAX_MEMBER_COUNT_TOO_LOW),
            ),
        ]);
        let (Some(owner_email), Some(name), Some(max_member_count), false) =
            (owner_email, name, max_member_count, validation.is_error())
        else {
            return Ok(validation.fail());
        };

        // The external message stays generic so callers cannot discover emails
        let owner = self.repos.users.find_by_email(owner_email).await?;
        let Some(owner) = owner else {
            let owner_exists = self.fail_if::<()>(
                FN,
                true,
                Check::with_code("Failed to create team.", 500)
                    .internal("User does not exist.", 404)
                    .context(json!({ "ownerEmail": owner_email })),
            );
            return Ok(owner_exists.fail());
        };

        let team = Team::new(name.to_string(), max_member_count, owner.id);
        let membership = TeamMembership::new(team.id, owner.id);
        let team = match self.repos.teams.create_with_owner(&team, &membership).await {
            Ok(team) => team,
            Err(RepositoryError::AlreadyExists) => {
                let name_is_unique = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code(NAME_TAKEN, 409).cause("unique constraint on team name"),
                );
                return Ok(name_is_unique.fail());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(team_id = %team.id, owner_id = %owner.id, "Team created");

        Ok(Outcome::ok(self.team_dto(&team, &owner, true).await?))
    }

    /// Rename and/or resize a team; only its owner may do so
    pub async fn update_team(
        &self,
        team_name: Option<&str>,
        owner_email: Option<&str>,
        update: TeamUpdate,
    ) -> Result<Outcome<TeamDto>> {
        const FN: &str = "update_team";
        let (team_name, owner_email) = (provided(team_name), provided(owner_email));
        let update = TeamUpdate {
            name: update.name.filter(|n| !n.is_empty()),
            max_member_count: update.max_member_count,
        };

        let team = match team_name {
            Some(team_name) => self.repos.teams.find_by_name(team_name).await?,
            None => None,
        };

        // Keeping the current name is not a collision
        let name_exists = match update.name.as_deref() {
            Some(new_name) => self
                .repos
                .teams
                .find_by_name(new_name)
                .await?
                .is_some_and(|existing| team.as_ref().map_or(true, |t| t.id != existing.id)),
            None => false,
        };

        let validation = merge([
            self.fail_if::<()>(FN, name_exists, Check::with_code(NAME_TAKEN, 409)),
            self.fail_if(
                FN,
                team_name.is_none() || owner_email.is_none(),
                Check::new("Team name and owner must be provided."),
            ),
            self.fail_if(
                FN,
                update.is_empty(),
                Check::new("Team name or max member count must be provided."),
            ),
            self.fail_if(
                FN,
                update.name.as_deref().is_some_and(is_name_too_short),
                Check::new(NAME_TOO_SHORT),
            ),
            self.fail_if(
                FN,
                update.max_member_count.is_some_and(is_max_member_count_too_low),
                Check::new(MAX_MEMBER_COUNT_TOO_LOW),
            ),
        ]);
        let (Some(owner_email), false) = (owner_email, validation.is_error()) else {
            return Ok(validation.fail());
        };

        let owner = self.repos.users.find_by_email(owner_email).await?;
        let (owner, team) = match self.resolve_owner_and_team(FN, owner, team) {
            Ok(found) => found,
            Err(failure) => return Ok(failure),
        };

        let is_owner = self.fail_if::<()>(
            FN,
            !team.is_owned_by(&owner),
            Check::with_code("Forbidden. Only team owner can update the team.", 403),
        );
        if is_owner.is_error() {
            return Ok(is_owner.fail());
        }

        let updated = match self.repos.teams.update(team.id, &update).await {
            Ok(updated) => updated,
            Err(RepositoryError::AlreadyExists) => {
                let name_is_unique = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code(NAME_TAKEN, 409).cause("unique constraint on team name"),
                );
                return Ok(name_is_unique.fail());
            }
            Err(RepositoryError::NotFound) => {
                let team_exists = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code("Team does not exist.", 404).cause("team deleted during update"),
                );
                return Ok(team_exists.fail());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(team_id = %updated.id, "Team updated");

        Ok(Outcome::ok(self.team_dto(&updated, &owner, true).await?))
    }

    /// Delete a team with its memberships and pending requests
    pub async fn delete_team(
        &self,
        team_name: Option<&str>,
        owner_email: Option<&str>,
    ) -> Result<Outcome<()>> {
        const FN: &str = "delete_team";

        let (Some(team_name), Some(owner_email)) = (provided(team_name), provided(owner_email))
        else {
            let params_are_valid =
                self.fail_if::<()>(FN, true, Check::new("Team name and owner must be provided."));
            return Ok(params_are_valid.fail());
        };

        let owner = self.repos.users.find_by_email(owner_email).await?;
        let team = self.repos.teams.find_by_name(team_name).await?;
        let (owner, team) = match self.resolve_owner_and_team(FN, owner, team) {
            Ok(found) => found,
            Err(failure) => return Ok(failure),
        };

        let is_owner = self.fail_if::<()>(
            FN,
            !team.is_owned_by(&owner),
            Check::with_code("Forbidden. Only team owner can delete the team.", 403),
        );
        if is_owner.is_error() {
            return Ok(is_owner.fail());
        }

        match self.repos.teams.delete_cascade(team.id).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => {
                let team_exists = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code("Team does not exist.", 404).cause("team deleted concurrently"),
                );
                return Ok(team_exists.fail());
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(team_id = %team.id, "Team deleted");

        Ok(Outcome::empty())
    }

    /// Fetch a team by name, members included
    pub async fn get_team(&self, name: Option<&str>) -> Result<Outcome<TeamDto>> {
        const FN: &str = "get_team";

        let Some(name) = provided(name) else {
            let name_is_valid =
                self.fail_if::<()>(FN, true, Check::new("Team name must be provided."));
            return Ok(name_is_valid.fail());
        };

        let Some(team) = self.repos.teams.find_by_name(name).await? else {
            let team_exists =
                self.fail_if::<()>(FN, true, Check::with_code("Team does not exist.", 404));
            return Ok(team_exists.fail());
        };

        let owner = self.team_owner(&team).await?;
        Ok(Outcome::ok(self.team_dto(&team, &owner, true).await?))
    }

    /// Every team, without member lists
    pub async fn get_all_teams(&self) -> Result<Outcome<Vec<TeamDto>>> {
        let teams = self.repos.teams.find_all().await?;

        let mut dtos = Vec::with_capacity(teams.len());
        for team in &teams {
            let owner = self.team_owner(team).await?;
            dtos.push(self.team_dto(team, &owner, false).await?);
        }

        Ok(Outcome::ok(dtos))
    }

    /// Report a missing owner and a missing team together
    pub(crate) fn resolve_owner_and_team<T>(
        &self,
        function: &'static str,
        owner: Option<User>,
        team: Option<Team>,
    ) -> std::result::Result<(User, Team), Outcome<T>> {
        let validation = merge([
            self.fail_if::<()>(
                function,
                owner.is_none(),
                Check::with_code("Owner does not exist.", 404),
            ),
            self.fail_if(
                function,
                team.is_none(),
                Check::with_code("Team does not exist.", 404),
            ),
        ]);

        match (owner, team) {
            (Some(owner), Some(team)) if validation.is_success() => Ok((owner, team)),
            _ => Err(validation.fail()),
        }
    }

    /// Owner of a stored team; a dangling owner is a fault, not a business failure
    async fn team_owner(&self, team: &Team) -> Result<User> {
        self.repos
            .users
            .find_by_id(team.owner_id)
            .await?
            .ok_or_else(|| Error::Internal(format!("Team {} has no owner", team.id)))
    }

    /// Build a team DTO from its current members.
    ///
    /// Member DTOs are ranked individually and carry no team list.
    pub(crate) async fn team_dto(
        &self,
        team: &Team,
        owner: &User,
        include_members: bool,
    ) -> Result<TeamDto> {
        let members = self.repos.memberships.find_members(team.id).await?;
        let dto = TeamDto::new(team, owner, &members);
        if !include_members {
            return Ok(dto);
        }

        let mut member_dtos = Vec::with_capacity(members.len());
        for member in &members {
            member_dtos.push(self.user_dto(member, None, false).await?);
        }
        Ok(dto.with_members(member_dtos))
    }
}
