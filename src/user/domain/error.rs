//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing or mutating user values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The user name exceeds the 64 character limit.
    #[error("user name is {0} characters, limit is 64")]
    UserNameTooLong(usize),

    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The display name exceeds the 64 character limit.
    #[error("display name is {0} characters, limit is 64")]
    DisplayNameTooLong(usize),

    /// An update tried to change the user name.
    #[error("user name '{current}' cannot be changed to '{requested}'")]
    UserNameImmutable {
        /// Stored user name.
        current: String,
        /// Name supplied by the update.
        requested: String,
    },
}
