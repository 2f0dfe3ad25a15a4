//! Service layer for user registration, lookup, and team membership lookup.

use crate::{
    error::FailureKind,
    store::{RecordStore, StoreError},
    team::domain::Team,
    user::domain::{DisplayName, NewUser, User, UserDomainError, UserId, UserName},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    name: String,
    display_name: String,
}

impl CreateUserRequest {
    /// Creates a request with the required user fields.
    #[must_use]
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }
}

/// Request payload for updating a user's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    user_id: UserId,
    display_name: String,
    name: Option<String>,
}

impl UpdateUserRequest {
    /// Creates a request replacing the display name of `user_id`.
    #[must_use]
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            name: None,
        }
    }

    /// Echoes the user name; it must match the stored one.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Service-level errors for user registry operations.
#[derive(Debug, Error)]
pub enum UserRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),

    /// Another user already has the name.
    #[error("user name already registered: {0}")]
    DuplicateName(UserName),

    /// The user does not exist.
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Record store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UserRegistryError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(_) => FailureKind::Validation,
            Self::DuplicateName(_) => FailureKind::Conflict,
            Self::NotFound(_) => FailureKind::NotFound,
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for user registry operations.
pub type UserRegistryResult<T> = Result<T, UserRegistryError>;

/// User registration and lookup service.
#[derive(Clone)]
pub struct UserRegistryService<S>
where
    S: RecordStore,
{
    store: Arc<S>,
}

impl<S> UserRegistryService<S>
where
    S: RecordStore,
{
    /// Creates a new user registry service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::Domain`] for invalid names,
    /// [`UserRegistryError::DuplicateName`] when the name is taken, or
    /// [`UserRegistryError::Store`] when persistence fails.
    pub async fn create_user(&self, request: CreateUserRequest) -> UserRegistryResult<User> {
        let CreateUserRequest { name, display_name } = request;
        let new_user = NewUser {
            name: UserName::new(name)?,
            display_name: DisplayName::new(display_name)?,
        };

        let user = self
            .store
            .atomically(move |tx| -> UserRegistryResult<User> {
                if tx.find_user_by_name(&new_user.name)?.is_some() {
                    return Err(UserRegistryError::DuplicateName(new_user.name));
                }
                Ok(tx.insert_user(&new_user)?)
            })
            .await?;
        info!(user_id = %user.id(), name = %user.name(), "user registered");
        Ok(user)
    }

    /// Returns every user ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::Store`] when persistence fails.
    pub async fn list_users(&self) -> UserRegistryResult<Vec<User>> {
        self.store
            .atomically(|tx| -> UserRegistryResult<Vec<User>> { Ok(tx.list_users()?) })
            .await
    }

    /// Returns one user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::NotFound`] when the user does not exist.
    pub async fn describe_user(&self, user_id: UserId) -> UserRegistryResult<User> {
        self.store
            .atomically(move |tx| -> UserRegistryResult<User> {
                tx.find_user(user_id)?
                    .ok_or(UserRegistryError::NotFound(user_id))
            })
            .await
    }

    /// Replaces a user's display name. The user name never changes.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::Domain`] for an invalid display name or a
    /// differing user name, [`UserRegistryError::NotFound`] when the user
    /// does not exist, or [`UserRegistryError::Store`] when persistence fails.
    pub async fn update_user(&self, request: UpdateUserRequest) -> UserRegistryResult<User> {
        let UpdateUserRequest {
            user_id,
            display_name: raw_display_name,
            name,
        } = request;
        let display_name = DisplayName::new(raw_display_name)?;

        let user = self
            .store
            .atomically(move |tx| -> UserRegistryResult<User> {
                let mut user = tx
                    .find_user(user_id)?
                    .ok_or(UserRegistryError::NotFound(user_id))?;
                if let Some(requested) = name {
                    user.ensure_name_unchanged(&requested)?;
                }
                user.rename_display(display_name);
                tx.update_user(&user)?;
                Ok(user)
            })
            .await?;
        info!(user_id = %user.id(), "user display name updated");
        Ok(user)
    }

    /// Returns the teams the user belongs to, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`UserRegistryError::NotFound`] when the user does not exist.
    pub async fn get_user_teams(&self, user_id: UserId) -> UserRegistryResult<Vec<Team>> {
        self.store
            .atomically(move |tx| -> UserRegistryResult<Vec<Team>> {
                if tx.find_user(user_id)?.is_none() {
                    return Err(UserRegistryError::NotFound(user_id));
                }
                Ok(tx.list_teams_for_member(user_id)?)
            })
            .await
    }
}
