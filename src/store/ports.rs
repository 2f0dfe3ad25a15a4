//! Port contracts for record persistence.

use crate::{
    board::domain::{Board, BoardId, BoardName, NewBoard, NewTask, Task, TaskId, TaskTitle},
    error::FailureKind,
    team::domain::{NewTeam, Team, TeamId, TeamName},
    user::domain::{NewUser, User, UserId, UserName},
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Tables managed by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// User records.
    Users,
    /// Team records and their membership.
    Teams,
    /// Project boards.
    Boards,
    /// Tasks on project boards.
    Tasks,
}

impl Table {
    /// Returns the storage name of the table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Teams => "teams",
            Self::Boards => "project_boards",
            Self::Tasks => "tasks",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transactional access to the record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Runs `operation` inside a single transaction.
    ///
    /// Writes made through the transaction become visible only when
    /// `operation` returns `Ok`; an `Err` discards them.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `operation`, or a [`StoreError`]
    /// converted into `E` when the transaction cannot be opened or
    /// committed.
    async fn atomically<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static;
}

/// Typed record access inside one open transaction.
///
/// Lists are ordered by ascending id. `update_*` methods fail with
/// [`StoreError::NotFound`] when the record does not exist.
pub trait StoreTransaction {
    /// Inserts a user and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] when the name is taken.
    fn insert_user(&mut self, user: &NewUser) -> StoreResult<User>;

    /// Persists the mutable fields of an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the user does not exist.
    fn update_user(&mut self, user: &User) -> StoreResult<()>;

    /// Finds a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_user(&mut self, id: UserId) -> StoreResult<Option<User>>;

    /// Finds a user by unique name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_user_by_name(&mut self, name: &UserName) -> StoreResult<Option<User>>;

    /// Lists every user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn list_users(&mut self) -> StoreResult<Vec<User>>;

    /// Inserts a team and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] when the name is taken.
    fn insert_team(&mut self, team: &NewTeam) -> StoreResult<Team>;

    /// Persists description, admin, and membership of an existing team.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the team does not exist.
    fn update_team(&mut self, team: &Team) -> StoreResult<()>;

    /// Finds a team by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_team(&mut self, id: TeamId) -> StoreResult<Option<Team>>;

    /// Finds a team by id and holds it, with its member set, against
    /// concurrent writers until the transaction ends.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn lock_team(&mut self, id: TeamId) -> StoreResult<Option<Team>>;

    /// Finds a team by unique name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_team_by_name(&mut self, name: &TeamName) -> StoreResult<Option<Team>>;

    /// Lists every team.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn list_teams(&mut self) -> StoreResult<Vec<Team>>;

    /// Lists the teams `user` belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn list_teams_for_member(&mut self, user: UserId) -> StoreResult<Vec<Team>>;

    /// Inserts a board and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] when the team already has a
    /// board with that name.
    fn insert_board(&mut self, board: &NewBoard) -> StoreResult<Board>;

    /// Persists status and end time of an existing board.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the board does not exist.
    fn update_board(&mut self, board: &Board) -> StoreResult<()>;

    /// Finds a board by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_board(&mut self, id: BoardId) -> StoreResult<Option<Board>>;

    /// Finds a board by id and holds it against concurrent writers until the
    /// transaction ends.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn lock_board(&mut self, id: BoardId) -> StoreResult<Option<Board>>;

    /// Finds a board by name within a team.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_board_by_name(&mut self, team: TeamId, name: &BoardName)
    -> StoreResult<Option<Board>>;

    /// Lists the boards of a team.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn list_boards_for_team(&mut self, team: TeamId) -> StoreResult<Vec<Board>>;

    /// Inserts a task and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] when the board already has a
    /// task with that title.
    fn insert_task(&mut self, task: &NewTask) -> StoreResult<Task>;

    /// Persists the status of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the task does not exist.
    fn update_task(&mut self, task: &Task) -> StoreResult<()>;

    /// Finds a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_task(&mut self, id: TaskId) -> StoreResult<Option<Task>>;

    /// Finds a task by title within a board.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_task_by_title(&mut self, board: BoardId, title: &TaskTitle)
    -> StoreResult<Option<Task>>;

    /// Lists the tasks of a board.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn list_tasks_for_board(&mut self, board: BoardId) -> StoreResult<Vec<Task>>;
}

/// Errors returned by record store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The record to update does not exist.
    #[error("{table} record {id} not found")]
    NotFound {
        /// Table that was addressed.
        table: Table,
        /// Missing record id.
        id: i64,
    },

    /// A uniqueness constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Creates a not-found error for `id` in `table`.
    pub fn not_found(table: Table, id: impl Into<i64>) -> Self {
        Self::NotFound {
            table,
            id: id.into(),
        }
    }

    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NotFound,
            Self::UniqueViolation(_) => FailureKind::Conflict,
            Self::InvalidPersistedData(_) | Self::Persistence(_) => FailureKind::Storage,
        }
    }
}
