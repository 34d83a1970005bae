//! State machines for teams domain entities
//!
//! A user's relationship to a team moves through:
//! - NotRequested: no pending request and not a member
//! - Pending: one join request awaiting the owner
//! - Member: request accepted, membership row exists
//!
//! Withdrawing (or rejecting) a pending request returns to NotRequested.
//! Membership is terminal for this domain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} to {to} via {event}")]
    InvalidTransition {
        from: String,
        to: String,
        event: String,
    },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

// ============================================================================
// Join Request State Machine
// ============================================================================

/// Derived state of a (team, user) pair; never stored directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinState {
    NotRequested,
    Pending,
    Member,
}

impl JoinState {
    /// Derive the state from what the store holds for the pair
    pub fn derive(has_request: bool, is_member: bool) -> Self {
        if is_member {
            Self::Member
        } else if has_request {
            Self::Pending
        } else {
            Self::NotRequested
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Member)
    }
}

impl std::fmt::Display for JoinState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRequested => write!(f, "not_requested"),
            Self::Pending => write!(f, "pending"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// Events that move a join request along
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoinEvent {
    /// User asks to join
    Request,
    /// Owner accepts the pending request
    Accept,
    /// Owner deletes the pending request
    Withdraw,
}

impl std::fmt::Display for JoinEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request => write!(f, "request"),
            Self::Accept => write!(f, "accept"),
            Self::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// Guard context for accepting a request
#[derive(Debug, Clone)]
pub struct JoinGuardContext {
    pub member_count: i64,
    pub max_member_count: i32,
}

impl JoinGuardContext {
    pub fn is_full(&self) -> bool {
        self.member_count >= i64::from(self.max_member_count)
    }
}

/// Join request state machine
pub struct JoinStateMachine;

impl JoinStateMachine {
    /// Attempt a state transition with guard conditions
    pub fn transition(
        current: JoinState,
        event: JoinEvent,
        context: Option<&JoinGuardContext>,
    ) -> Result<JoinState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (&current, &event) {
            (JoinState::NotRequested, JoinEvent::Request) => JoinState::Pending,

            (JoinState::Pending, JoinEvent::Accept) => {
                // Guard: team must have a free seat
                if let Some(ctx) = context {
                    if ctx.is_full() {
                        return Err(StateError::GuardFailed("Team is full".to_string()));
                    }
                }
                JoinState::Member
            }
            (JoinState::Pending, JoinEvent::Withdraw) => JoinState::NotRequested,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    to: "unknown".to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }
}

// ============================================================================
// Tests
// ============================================================================
