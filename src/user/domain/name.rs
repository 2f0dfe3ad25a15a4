//! Validated user name types.

use super::UserDomainError;
use crate::text::{TextViolation, bounded_name};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for user names, matching the `VARCHAR(64)` column.
const MAX_USER_NAME_LENGTH: usize = 64;

/// Maximum length for display names, matching the `VARCHAR(64)` column.
const MAX_DISPLAY_NAME_LENGTH: usize = 64;

/// Unique login-style user name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Creates a validated user name.
    ///
    /// The input is trimmed before checking.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUserName`] when the value is blank or
    /// [`UserDomainError::UserNameTooLong`] when it exceeds 64 characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserDomainError> {
        bounded_name(value.as_ref(), MAX_USER_NAME_LENGTH)
            .map(Self)
            .map_err(|violation| match violation {
                TextViolation::Empty => UserDomainError::EmptyUserName,
                TextViolation::TooLong(length) => UserDomainError::UserNameTooLong(length),
            })
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-readable name shown for a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Creates a validated display name.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyDisplayName`] when the value is blank
    /// or [`UserDomainError::DisplayNameTooLong`] when it exceeds 64
    /// characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, UserDomainError> {
        bounded_name(value.as_ref(), MAX_DISPLAY_NAME_LENGTH)
            .map(Self)
            .map_err(|violation| match violation {
                TextViolation::Empty => UserDomainError::EmptyDisplayName,
                TextViolation::TooLong(length) => UserDomainError::DisplayNameTooLong(length),
            })
    }

    /// Returns the display name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
