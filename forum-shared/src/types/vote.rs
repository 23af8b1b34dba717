use crate::types::{AnswerId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents the direction of a vote cast by a user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    /// Indicates an upvote or positive endorsement.
    Up,
    /// Indicates a downvote or negative endorsement.
    Down,
}

impl VoteDirection {
    /// Returns the wire representation of the direction (`"up"` / `"down"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a direction string is neither `"up"` nor `"down"`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid vote type: {0}")]
pub struct InvalidDirection(pub String);

impl FromStr for VoteDirection {
    type Err = InvalidDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            other => Err(InvalidDirection(other.to_string())),
        }
    }
}

/// Classification of the effect a `cast_vote` call had on the ledger.
///
/// Exactly one of these is produced per successful call, and each maps to a
/// distinct user-facing confirmation message.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    /// A new vote was recorded for the (voter, answer) pair.
    Created,
    /// An existing vote switched direction.
    Updated,
    /// An existing same-direction vote was toggled off.
    Removed,
}

impl VoteOutcome {
    /// The confirmation message returned to the caller for this outcome.
    pub fn confirmation_message(&self) -> &'static str {
        match self {
            VoteOutcome::Created => "Vote recorded successfully",
            VoteOutcome::Updated => "Vote updated successfully",
            VoteOutcome::Removed => "Vote removed successfully",
        }
    }
}

/// A user's current directional opinion on one answer.
///
/// At most one live `Vote` exists per (voter, answer) pair; the composite
/// key is enforced by the persistent store, not by application locking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote {
    pub voter_id: UserId,
    pub answer_id: AnswerId,
    pub direction: VoteDirection,
    pub voted_at: DateTime<Utc>,
}
