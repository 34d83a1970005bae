//! User lookups and ranking

use leaderboard_common::{Check, Outcome, Result};

use super::{provided, TeamsService};
use crate::domain::dto::UserDto;
use crate::domain::entities::User;

impl TeamsService {
    /// Fetch one user by email, or by name when no email is given
    pub async fn get_user(
        &self,
        email: Option<&str>,
        name: Option<&str>,
    ) -> Result<Outcome<UserDto>> {
        const FN: &str = "get_user";
        let (email, name) = (provided(email), provided(name));

        let query_is_valid = self.fail_if::<()>(
            FN,
            email.is_none() && name.is_none(),
            Check::new("Email or name must be provided."),
        );
        if query_is_valid.is_error() {
            return Ok(query_is_valid.fail());
        }

        let user = match (email, name) {
            (Some(email), _) => self.repos.users.find_by_email(email).await?,
            (None, Some(name)) => self.repos.users.find_by_name(name).await?,
            (None, None) => None,
        };
        let Some(user) = user else {
            let user_exists = self.fail_if::<()>(
                FN,
                true,
                Check::with_code("User does not exist.", 404),
            );
            return Ok(user_exists.fail());
        };

        Ok(Outcome::ok(self.user_dto(&user, None, true).await?))
    }

    /// Every user ranked by descending score
    pub async fn get_all_users(&self) -> Result<Outcome<Vec<UserDto>>> {
        let users = self.repos.users.find_all_by_score().await?;

        let mut dtos = Vec::with_capacity(users.len());
        for (index, user) in users.iter().enumerate() {
            dtos.push(self.user_dto(user, Some(index as i64 + 1), true).await?);
        }

        Ok(Outcome::ok(dtos))
    }

    /// Build a user DTO.
    ///
    /// Without a precomputed rank this runs a count query: rank is one more
    /// than the number of users with a strictly higher score. Including teams
    /// runs a membership query.
    pub(crate) async fn user_dto(
        &self,
        user: &User,
        rank: Option<i64>,
        include_teams: bool,
    ) -> Result<UserDto> {
        let rank = match rank {
            Some(rank) => rank,
            None => self.repos.users.count_with_higher_score(user.score).await? + 1,
        };

        let dto = UserDto::new(user, rank);
        if !include_teams {
            return Ok(dto);
        }

        let team_names = self
            .repos
            .memberships
            .find_team_names_for_user(user.id)
            .await?;
        Ok(dto.with_teams(team_names))
    }
}
