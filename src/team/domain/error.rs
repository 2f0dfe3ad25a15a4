//! Error types for team domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating team values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamDomainError {
    /// The team name is empty after trimming.
    #[error("team name must not be empty")]
    EmptyTeamName,

    /// The team name exceeds the 64 character limit.
    #[error("team name is {0} characters, limit is 64")]
    TeamNameTooLong(usize),

    /// The team description exceeds the 128 character limit.
    #[error("team description is {0} characters, limit is 128")]
    DescriptionTooLong(usize),

    /// A membership change named more users than one call may carry.
    #[error("{0} users in one membership change, limit is 50")]
    TooManyMembers(usize),

    /// An update tried to change the team name.
    #[error("team name '{current}' cannot be changed to '{requested}'")]
    TeamNameImmutable {
        /// Stored team name.
        current: String,
        /// Name supplied by the update.
        requested: String,
    },
}
