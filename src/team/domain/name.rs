//! Validated team text fields.

use super::TeamDomainError;
use crate::text::{TextViolation, bounded_name, bounded_text};
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_TEAM_NAME_LENGTH: usize = 64;
const MAX_DESCRIPTION_LENGTH: usize = 128;

/// Unique team name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a validated team name from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::EmptyTeamName`] for blank input or
    /// [`TeamDomainError::TeamNameTooLong`] above 64 characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TeamDomainError> {
        bounded_name(value.as_ref(), MAX_TEAM_NAME_LENGTH)
            .map(Self)
            .map_err(|violation| match violation {
                TextViolation::Empty => TeamDomainError::EmptyTeamName,
                TextViolation::TooLong(length) => TeamDomainError::TeamNameTooLong(length),
            })
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-text team description of at most 128 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamDescription(String);

impl TeamDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::DescriptionTooLong`] above 128 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TeamDomainError> {
        bounded_text(value.into(), MAX_DESCRIPTION_LENGTH)
            .map(Self)
            .map_err(TeamDomainError::DescriptionTooLong)
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
