//! Validated text fields for boards and tasks.

use super::BoardDomainError;
use crate::text::{TextViolation, bounded_name, bounded_text};
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_NAME_LENGTH: usize = 64;
const MAX_DESCRIPTION_LENGTH: usize = 128;

/// Board name, unique within its team.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardName(String);

impl BoardName {
    /// Creates a validated board name from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBoardName`] for blank input or
    /// [`BoardDomainError::BoardNameTooLong`] above 64 characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        bounded_name(value.as_ref(), MAX_NAME_LENGTH)
            .map(Self)
            .map_err(|violation| match violation {
                TextViolation::Empty => BoardDomainError::EmptyBoardName,
                TextViolation::TooLong(length) => BoardDomainError::BoardNameTooLong(length),
            })
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task title, unique within its board.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated task title from trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] for blank input or
    /// [`BoardDomainError::TaskTitleTooLong`] above 64 characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        bounded_name(value.as_ref(), MAX_NAME_LENGTH)
            .map(Self)
            .map_err(|violation| match violation {
                TextViolation::Empty => BoardDomainError::EmptyTaskTitle,
                TextViolation::TooLong(length) => BoardDomainError::TaskTitleTooLong(length),
            })
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Board or task description of at most 128 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DescriptionTooLong`] above 128 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        bounded_text(value.into(), MAX_DESCRIPTION_LENGTH)
            .map(Self)
            .map_err(BoardDomainError::DescriptionTooLong)
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
