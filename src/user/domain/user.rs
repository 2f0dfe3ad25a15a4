//! User aggregate.

use super::{DisplayName, UserDomainError, UserId, UserName};
use serde::{Deserialize, Serialize};

/// Validated fields for a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique user name.
    pub name: UserName,
    /// Initial display name.
    pub display_name: DisplayName,
}

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: UserName,
    display_name: DisplayName,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted user name.
    pub name: UserName,
    /// Persisted display name.
    pub display_name: DisplayName,
}

impl User {
    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            display_name: data.display_name,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the unique user name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Returns the display name.
    #[must_use]
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Rejects any attempt to rename the user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::UserNameImmutable`] when `requested` is not
    /// the stored name.
    pub fn ensure_name_unchanged(&self, requested: &str) -> Result<(), UserDomainError> {
        if requested.trim() == self.name.as_str() {
            return Ok(());
        }
        Err(UserDomainError::UserNameImmutable {
            current: self.name.as_str().to_owned(),
            requested: requested.to_owned(),
        })
    }

    /// Replaces the display name.
    pub fn rename_display(&mut self, display_name: DisplayName) {
        self.display_name = display_name;
    }
}
