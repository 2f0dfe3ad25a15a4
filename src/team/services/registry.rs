//! Service layer for team creation, updates, and membership changes.

use crate::{
    error::FailureKind,
    store::{RecordStore, StoreError, StoreTransaction, Table},
    team::domain::{
        MemberBatch, NewTeam, Team, TeamDescription, TeamDomainError, TeamId, TeamName,
    },
    user::domain::{User, UserId},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    name: String,
    description: String,
    admin: UserId,
}

impl CreateTeamRequest {
    /// Creates a request for a team administered by `admin`.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, admin: UserId) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            admin,
        }
    }
}

/// Request payload for updating a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTeamRequest {
    team_id: TeamId,
    description: String,
    name: Option<String>,
    admin: Option<UserId>,
}

impl UpdateTeamRequest {
    /// Creates a request replacing the description of `team_id`.
    #[must_use]
    pub fn new(team_id: TeamId, description: impl Into<String>) -> Self {
        Self {
            team_id,
            description: description.into(),
            name: None,
            admin: None,
        }
    }

    /// Echoes the team name; it must match the stored one.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Hands administration to another user.
    #[must_use]
    pub const fn with_admin(mut self, admin: UserId) -> Self {
        self.admin = Some(admin);
        self
    }
}

/// Service-level errors for team registry operations.
#[derive(Debug, Error)]
pub enum TeamRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TeamDomainError),

    /// Another team already has the name.
    #[error("team name already registered: {0}")]
    DuplicateName(TeamName),

    /// The team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// A referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Record store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TeamRegistryError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) => FailureKind::Validation,
            Self::DuplicateName(_) => FailureKind::Conflict,
            Self::TeamNotFound(_) | Self::UserNotFound(_) => FailureKind::NotFound,
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for team registry operations.
pub type TeamRegistryResult<T> = Result<T, TeamRegistryError>;

/// Team creation and membership service.
#[derive(Clone)]
pub struct TeamRegistryService<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TeamRegistryService<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Creates a new team registry service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates a team with no members.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::Domain`] for invalid fields,
    /// [`TeamRegistryError::UserNotFound`] when the admin does not exist,
    /// [`TeamRegistryError::DuplicateName`] when the name is taken, or
    /// [`TeamRegistryError::Store`] when persistence fails.
    pub async fn create_team(&self, request: CreateTeamRequest) -> TeamRegistryResult<Team> {
        let CreateTeamRequest {
            name,
            description,
            admin,
        } = request;
        let new_team = NewTeam {
            name: TeamName::new(name)?,
            description: TeamDescription::new(description)?,
            admin,
            creation_time: self.clock.utc(),
        };

        let team = self
            .store
            .atomically(move |tx| -> TeamRegistryResult<Team> {
                require_user(tx, new_team.admin)?;
                if tx.find_team_by_name(&new_team.name)?.is_some() {
                    return Err(TeamRegistryError::DuplicateName(new_team.name));
                }
                Ok(tx.insert_team(&new_team)?)
            })
            .await?;
        info!(team_id = %team.id(), name = %team.name(), admin = %team.admin(), "team created");
        Ok(team)
    }

    /// Returns every team ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::Store`] when persistence fails.
    pub async fn list_teams(&self) -> TeamRegistryResult<Vec<Team>> {
        self.store
            .atomically(|tx| -> TeamRegistryResult<Vec<Team>> { Ok(tx.list_teams()?) })
            .await
    }

    /// Returns one team with its members.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::TeamNotFound`] when the team does not
    /// exist.
    pub async fn describe_team(&self, team_id: TeamId) -> TeamRegistryResult<Team> {
        self.store
            .atomically(move |tx| -> TeamRegistryResult<Team> { require_team(tx, team_id) })
            .await
    }

    /// Replaces a team's description and optionally its admin.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::Domain`] for an oversized description or
    /// a differing name, [`TeamRegistryError::TeamNotFound`] or
    /// [`TeamRegistryError::UserNotFound`] for missing references, or
    /// [`TeamRegistryError::Store`] when persistence fails.
    pub async fn update_team(&self, request: UpdateTeamRequest) -> TeamRegistryResult<Team> {
        let UpdateTeamRequest {
            team_id,
            description: raw_description,
            name,
            admin,
        } = request;
        let description = TeamDescription::new(raw_description)?;

        let team = self
            .store
            .atomically(move |tx| -> TeamRegistryResult<Team> {
                let mut team = lock_team(tx, team_id)?;
                if let Some(requested) = name {
                    team.ensure_name_unchanged(&requested)?;
                }
                if let Some(new_admin) = admin {
                    require_user(tx, new_admin)?;
                    team.set_admin(new_admin);
                }
                team.set_description(description);
                tx.update_team(&team)?;
                Ok(team)
            })
            .await?;
        info!(team_id = %team.id(), admin = %team.admin(), "team updated");
        Ok(team)
    }

    /// Adds users to a team. Existing members are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::Domain`] when more than 50 users are
    /// named, [`TeamRegistryError::TeamNotFound`] or
    /// [`TeamRegistryError::UserNotFound`] for missing references, or
    /// [`TeamRegistryError::Store`] when persistence fails.
    pub async fn add_users_to_team(
        &self,
        team_id: TeamId,
        users: Vec<UserId>,
    ) -> TeamRegistryResult<Team> {
        let batch = MemberBatch::new(users)?;

        let (team, added) = self
            .store
            .atomically(move |tx| -> TeamRegistryResult<(Team, usize)> {
                let mut team = lock_team(tx, team_id)?;
                for user in batch.iter() {
                    require_user(tx, user)?;
                }
                let added = team.add_members(&batch);
                if added > 0 {
                    tx.update_team(&team)?;
                }
                Ok((team, added))
            })
            .await?;
        info!(team_id = %team.id(), added, "team members added");
        Ok(team)
    }

    /// Removes users from a team. Non-members are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::Domain`] when more than 50 users are
    /// named, [`TeamRegistryError::TeamNotFound`] when the team does not
    /// exist, or [`TeamRegistryError::Store`] when persistence fails.
    pub async fn remove_users_from_team(
        &self,
        team_id: TeamId,
        users: Vec<UserId>,
    ) -> TeamRegistryResult<Team> {
        let batch = MemberBatch::new(users)?;

        let (team, removed) = self
            .store
            .atomically(move |tx| -> TeamRegistryResult<(Team, usize)> {
                let mut team = lock_team(tx, team_id)?;
                let removed = team.remove_members(&batch);
                if removed > 0 {
                    tx.update_team(&team)?;
                }
                Ok((team, removed))
            })
            .await?;
        info!(team_id = %team.id(), removed, "team members removed");
        Ok(team)
    }

    /// Returns the member users of a team ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`TeamRegistryError::TeamNotFound`] when the team does not
    /// exist, or [`TeamRegistryError::Store`] when a member record is
    /// missing or persistence fails.
    pub async fn list_team_users(&self, team_id: TeamId) -> TeamRegistryResult<Vec<User>> {
        self.store
            .atomically(move |tx| -> TeamRegistryResult<Vec<User>> {
                let team = require_team(tx, team_id)?;
                team.members()
                    .iter()
                    .map(|member| {
                        tx.find_user(*member)?.ok_or_else(|| {
                            TeamRegistryError::Store(StoreError::not_found(Table::Users, *member))
                        })
                    })
                    .collect()
            })
            .await
    }
}

fn require_team(tx: &mut dyn StoreTransaction, team_id: TeamId) -> TeamRegistryResult<Team> {
    tx.find_team(team_id)?
        .ok_or(TeamRegistryError::TeamNotFound(team_id))
}

fn lock_team(tx: &mut dyn StoreTransaction, team_id: TeamId) -> TeamRegistryResult<Team> {
    tx.lock_team(team_id)?
        .ok_or(TeamRegistryError::TeamNotFound(team_id))
}

fn require_user(tx: &mut dyn StoreTransaction, user_id: UserId) -> TeamRegistryResult<User> {
    tx.find_user(user_id)?
        .ok_or(TeamRegistryError::UserNotFound(user_id))
}
