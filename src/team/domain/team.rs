//! Team aggregate root.

use super::{MemberBatch, TeamDescription, TeamDomainError, TeamId, TeamName};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Validated fields for a team that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeam {
    /// Unique team name.
    pub name: TeamName,
    /// Initial description.
    pub description: TeamDescription,
    /// Administering user.
    pub admin: UserId,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
}

/// Team aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: TeamName,
    description: TeamDescription,
    admin: UserId,
    creation_time: DateTime<Utc>,
    members: BTreeSet<UserId>,
}

/// Parameter object for reconstructing a persisted team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted identifier.
    pub id: TeamId,
    /// Persisted name.
    pub name: TeamName,
    /// Persisted description.
    pub description: TeamDescription,
    /// Persisted admin reference.
    pub admin: UserId,
    /// Persisted creation timestamp.
    pub creation_time: DateTime<Utc>,
    /// Persisted member ids.
    pub members: BTreeSet<UserId>,
}

impl Team {
    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            admin: data.admin,
            creation_time: data.creation_time,
            members: data.members,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &TeamName {
        &self.name
    }

    /// Returns the team description.
    #[must_use]
    pub const fn description(&self) -> &TeamDescription {
        &self.description
    }

    /// Returns the administering user.
    #[must_use]
    pub const fn admin(&self) -> UserId {
        self.admin
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// Returns the member ids in ascending order.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<UserId> {
        &self.members
    }

    /// Returns `true` when `user` belongs to the team.
    #[must_use]
    pub fn is_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    /// Rejects any attempt to rename the team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::TeamNameImmutable`] when `requested` is not
    /// the stored name.
    pub fn ensure_name_unchanged(&self, requested: &str) -> Result<(), TeamDomainError> {
        if requested.trim() == self.name.as_str() {
            return Ok(());
        }
        Err(TeamDomainError::TeamNameImmutable {
            current: self.name.as_str().to_owned(),
            requested: requested.to_owned(),
        })
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: TeamDescription) {
        self.description = description;
    }

    /// Hands administration to another user.
    pub const fn set_admin(&mut self, admin: UserId) {
        self.admin = admin;
    }

    /// Adds every user in the batch and returns how many were new members.
    pub fn add_members(&mut self, batch: &MemberBatch) -> usize {
        batch.iter().filter(|user| self.members.insert(*user)).count()
    }

    /// Removes every user in the batch and returns how many were members.
    pub fn remove_members(&mut self, batch: &MemberBatch) -> usize {
        batch.iter().filter(|user| self.members.remove(user)).count()
    }
}
