//! Comment vote ledger rules.
//!
//! A voting slot is keyed by `(comment_id, voter ip)` and is in one of three
//! states: no vote, upvoted or downvoted. Casting the same value again
//! retracts the vote; casting the opposite value flips it in place.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single vote direction. Stored as `+1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum VoteValue {
    Up,
    Down,
}

impl VoteValue {
    /// Numeric weight of the vote in a comment's score.
    pub fn as_i64(self) -> i64 {
        match self {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            other => Err(CoreError::Validation(format!(
                "Vote value must be 1 or -1, got {other}"
            ))),
        }
    }
}

impl From<VoteValue> for i64 {
    fn from(value: VoteValue) -> Self {
        value.as_i64()
    }
}

/// State of one voting slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteState {
    NoVote,
    Upvoted,
    Downvoted,
}

impl VoteState {
    /// State corresponding to the currently stored vote, if any.
    pub fn from_stored(value: Option<VoteValue>) -> Self {
        match value {
            None => VoteState::NoVote,
            Some(VoteValue::Up) => VoteState::Upvoted,
            Some(VoteValue::Down) => VoteState::Downvoted,
        }
    }
}

/// Storage mutation required to move a slot to its next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No row exists; insert one with this value.
    Insert(VoteValue),
    /// A row with the same value exists; delete it.
    Retract,
    /// A row with the opposite value exists; overwrite its value.
    Flip(VoteValue),
}

impl VoteTransition {
    /// Compute the transition for a slot currently holding `current` when
    /// `requested` is cast.
    pub fn for_request(current: Option<VoteValue>, requested: VoteValue) -> Self {
        match current {
            None => VoteTransition::Insert(requested),
            Some(existing) if existing == requested => VoteTransition::Retract,
            Some(_) => VoteTransition::Flip(requested),
        }
    }

    /// State of the slot after this transition is applied.
    pub fn resulting_state(self) -> VoteState {
        match self {
            VoteTransition::Retract => VoteState::NoVote,
            VoteTransition::Insert(value) | VoteTransition::Flip(value) => {
                VoteState::from_stored(Some(value))
            }
        }
    }
}

/// Score of a comment: the sum of all its vote values.
pub fn score<I>(values: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    values.into_iter().sum()
}
