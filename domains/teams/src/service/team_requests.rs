//! Join-request lifecycle: create, accept, delete, list

use leaderboard_common::{merge, Check, Outcome, RepositoryError, Result};
use serde_json::json;

use super::{provided, TeamsService};
use crate::domain::dto::TeamRequestDto;
use crate::domain::entities::{Team, TeamMembership, TeamRequest, User};
use crate::domain::state::{
    JoinEvent, JoinGuardContext, JoinState, JoinStateMachine, StateError,
};

const REQUEST_MISSING: &str = "Team request does not exist.";
const REQUEST_NOT_FOUND: &str = "Team request not found.";
const REQUEST_EXISTS: &str = "Team request already exists.";
const ALREADY_MEMBER: &str = "User is already a team member.";

/// Team and requester resolved for an owner-side request operation
struct OwnerAction {
    team: Team,
    requester: User,
}

impl TeamsService {
    /// Ask to join a team
    pub async fn create_team_request(
        &self,
        email: Option<&str>,
        team_name: Option<&str>,
        message: Option<&str>,
    ) -> Result<Outcome<()>> {
        const FN: &str = "create_team_request";

        let (Some(email), Some(team_name)) = (provided(email), provided(team_name)) else {
            let params_are_valid =
                self.fail_if::<()>(FN, true, Check::new("User and team name must be provided."));
            return Ok(params_are_valid.fail());
        };

        let user = self.repos.users.find_by_email(email).await?;
        let team = self.repos.teams.find_by_name(team_name).await?;
        let validation = merge([
            self.fail_if::<()>(
                FN,
                user.is_none(),
                Check::with_code("User does not exist.", 404),
            ),
            self.fail_if(
                FN,
                team.is_none(),
                Check::with_code("Team does not exist.", 404),
            ),
        ]);
        let (Some(user), Some(team), false) = (user, team, validation.is_error()) else {
            return Ok(validation.fail());
        };

        let has_request = self
            .repos
            .team_requests
            .find_first(team.id, user.id)
            .await?
            .is_some();
        let is_member = self.repos.memberships.exists(team.id, user.id).await?;
        let current = JoinState::derive(has_request, is_member);

        if let Err(e) = JoinStateMachine::transition(current, JoinEvent::Request, None) {
            let reason = match e {
                StateError::TerminalState(_) => ALREADY_MEMBER,
                _ => REQUEST_EXISTS,
            };
            let can_request = self.fail_if::<()>(
                FN,
                true,
                Check::with_code(reason, 409)
                    .cause(e)
                    .context(json!({ "teamName": team.name, "userName": user.name })),
            );
            return Ok(can_request.fail());
        }

        let request = TeamRequest::new(team.id, user.id, message.unwrap_or_default().to_string());
        match self.repos.team_requests.create(&request).await {
            Ok(_) => {}
            Err(RepositoryError::AlreadyExists) => {
                let request_is_unique = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code(REQUEST_EXISTS, 409).cause("unique constraint on team request"),
                );
                return Ok(request_is_unique.fail());
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(team_id = %team.id, user_id = %user.id, "Team request created");

        Ok(Outcome::empty())
    }

    /// Turn a pending request into a membership
    pub async fn accept_team_request(
        &self,
        owner_email: Option<&str>,
        team_name: Option<&str>,
        requester_name: Option<&str>,
    ) -> Result<Outcome<()>> {
        const FN: &str = "accept_team_request";

        let action = match self
            .resolve_owner_action(
                FN,
                owner_email,
                team_name,
                requester_name,
                // Do not confirm whether the requester exists
                Check::with_code(REQUEST_MISSING, 404).internal("User does not exist.", 404),
                "Forbidden. Only team owner can accept requests.",
            )
            .await?
        {
            Ok(action) => action,
            Err(failure) => return Ok(failure),
        };
        let OwnerAction { team, requester } = action;

        let Some(request) = self
            .repos
            .team_requests
            .find_first(team.id, requester.id)
            .await?
        else {
            let request_exists =
                self.fail_if::<()>(FN, true, Check::with_code(REQUEST_MISSING, 404));
            return Ok(request_exists.fail());
        };

        let is_member = self.repos.memberships.exists(team.id, requester.id).await?;
        let seats = JoinGuardContext {
            member_count: self.repos.memberships.count_for_team(team.id).await?,
            max_member_count: team.max_member_count,
        };
        let current = JoinState::derive(true, is_member);

        if let Err(e) = JoinStateMachine::transition(current, JoinEvent::Accept, Some(&seats)) {
            let check = match e {
                StateError::GuardFailed(_) => Check::with_code("Team is full.", 409),
                StateError::TerminalState(_) => Check::with_code(ALREADY_MEMBER, 409),
                StateError::InvalidTransition { .. } => Check::with_code(REQUEST_MISSING, 404),
            };
            let can_accept = self.fail_if::<()>(
                FN,
                true,
                check.cause(e).context(json!({
                    "teamName": team.name,
                    "memberCount": seats.member_count,
                    "maxMemberCount": seats.max_member_count,
                })),
            );
            return Ok(can_accept.fail());
        }

        let membership = TeamMembership::new(team.id, requester.id);
        match self
            .repos
            .team_requests
            .accept(request.id, &membership, team.max_member_count)
            .await
        {
            Ok(_) => {}
            Err(RepositoryError::CapacityReached) => {
                let has_seat = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code("Team is full.", 409)
                        .cause("capacity reached at write")
                        .context(json!({
                            "teamName": team.name,
                            "maxMemberCount": team.max_member_count,
                        })),
                );
                return Ok(has_seat.fail());
            }
            Err(RepositoryError::NotFound) => {
                let request_consumed = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code(REQUEST_NOT_FOUND, 404).cause("request consumed concurrently"),
                );
                return Ok(request_consumed.fail());
            }
            Err(RepositoryError::AlreadyExists) => {
                let not_member = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code(ALREADY_MEMBER, 409).cause("unique constraint on membership"),
                );
                return Ok(not_member.fail());
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(team_id = %team.id, user_id = %requester.id, "Team request accepted");

        Ok(Outcome::empty())
    }

    /// Reject or withdraw every pending request of a user for a team
    pub async fn delete_team_request(
        &self,
        owner_email: Option<&str>,
        team_name: Option<&str>,
        requester_name: Option<&str>,
    ) -> Result<Outcome<()>> {
        const FN: &str = "delete_team_request";

        let action = match self
            .resolve_owner_action(
                FN,
                owner_email,
                team_name,
                requester_name,
                Check::with_code("User does not exist.", 404),
                "Forbidden. Only team owner can delete requests.",
            )
            .await?
        {
            Ok(action) => action,
            Err(failure) => return Ok(failure),
        };

        let has_request = self
            .repos
            .team_requests
            .find_first(action.team.id, action.requester.id)
            .await?
            .is_some();
        // Membership never blocks removing a leftover request
        let current = JoinState::derive(has_request, false);
        if let Err(e) = JoinStateMachine::transition(current, JoinEvent::Withdraw, None) {
            let request_exists = self.fail_if::<()>(
                FN,
                true,
                Check::with_code(REQUEST_NOT_FOUND, 404).cause(e),
            );
            return Ok(request_exists.fail());
        }

        let deleted = self
            .repos
            .team_requests
            .delete_for_user(action.team.id, action.requester.id)
            .await?;
        let request_deleted = self.fail_if::<()>(
            FN,
            deleted == 0,
            Check::with_code(REQUEST_NOT_FOUND, 404).cause("request removed concurrently"),
        );
        if request_deleted.is_error() {
            return Ok(request_deleted.fail());
        }

        tracing::info!(
            team_id = %action.team.id,
            user_id = %action.requester.id,
            deleted,
            "Team request deleted"
        );

        Ok(Outcome::empty())
    }

    /// Pending requests for a team, visible to its owner only
    pub async fn get_all_team_requests(
        &self,
        owner_email: Option<&str>,
        team_name: Option<&str>,
    ) -> Result<Outcome<Vec<TeamRequestDto>>> {
        const FN: &str = "get_all_team_requests";

        let (Some(owner_email), Some(team_name)) = (provided(owner_email), provided(team_name))
        else {
            let params_are_valid =
                self.fail_if::<()>(FN, true, Check::new("Owner and team name must be provided."));
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
            Check::with_code("Forbidden. Only team owner can fetch join requests.", 403),
        );
        if is_owner.is_error() {
            return Ok(is_owner.fail());
        }

        let requests = self.repos.team_requests.find_by_team(team.id).await?;
        Ok(Outcome::ok(
            requests.into_iter().map(TeamRequestDto::from).collect(),
        ))
    }

    /// Shared resolution for accept and delete.
    ///
    /// Missing requester, owner and team are reported together in that order;
    /// ownership is checked afterwards and fails on its own.
    async fn resolve_owner_action<T>(
        &self,
        function: &'static str,
        owner_email: Option<&str>,
        team_name: Option<&str>,
        requester_name: Option<&str>,
        requester_missing: Check,
        forbidden: &'static str,
    ) -> Result<std::result::Result<OwnerAction, Outcome<T>>> {
        let (Some(owner_email), Some(team_name), Some(requester_name)) = (
            provided(owner_email),
            provided(team_name),
            provided(requester_name),
        ) else {
            let params_are_valid = self.fail_if::<()>(
                function,
                true,
                Check::new("Owner, user and team name must be provided."),
            );
            return Ok(Err(params_are_valid.fail()));
        };

        let owner = self.repos.users.find_by_email(owner_email).await?;
        let team = self.repos.teams.find_by_name(team_name).await?;
        let requester = self.repos.users.find_by_name(requester_name).await?;

        let validation = merge([
            self.fail_if::<()>(function, requester.is_none(), requester_missing),
            self.fail_if(
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
        let (Some(owner), Some(team), Some(requester), false) =
            (owner, team, requester, validation.is_error())
        else {
            return Ok(Err(validation.fail()));
        };

        let is_owner = self.fail_if::<()>(
            function,
            !team.is_owned_by(&owner),
            Check::with_code(forbidden, 403),
        );
        if is_owner.is_error() {
            return Ok(Err(is_owner.fail()));
        }

        Ok(Ok(OwnerAction { team, requester }))
    }
}
