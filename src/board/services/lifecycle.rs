//! Board and task lifecycle orchestration.
//!
//! Every operation runs its read-validate-write sequence inside one record
//! store transaction. Operations that depend on a board's status take the
//! board lock first so that closing a board, adding a task to it, and moving
//! its tasks cannot interleave.

use crate::{
    board::domain::{
        Board, BoardDomainError, BoardId, BoardName, Description, NewBoard, NewTask,
        ParseTaskStatusError, Task, TaskId, TaskStatus, TaskTitle,
    },
    error::FailureKind,
    store::{RecordStore, StoreError, StoreTransaction, Table},
    team::domain::TeamId,
    user::domain::UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBoardRequest {
    name: String,
    description: String,
    team_id: TeamId,
    creation_time: Option<DateTime<Utc>>,
}

impl CreateBoardRequest {
    /// Creates a request for a board under `team_id`.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, team_id: TeamId) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            team_id,
            creation_time: None,
        }
    }

    /// Uses a caller-supplied creation timestamp instead of the clock.
    #[must_use]
    pub const fn with_creation_time(mut self, creation_time: DateTime<Utc>) -> Self {
        self.creation_time = Some(creation_time);
        self
    }
}

/// Request payload for adding a task to a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    board_id: BoardId,
    title: String,
    description: String,
    assignee: UserId,
    creation_time: Option<DateTime<Utc>>,
}

impl AddTaskRequest {
    /// Creates a request for a task on `board_id` assigned to `assignee`.
    #[must_use]
    pub fn new(
        board_id: BoardId,
        title: impl Into<String>,
        description: impl Into<String>,
        assignee: UserId,
    ) -> Self {
        Self {
            board_id,
            title: title.into(),
            description: description.into(),
            assignee,
            creation_time: None,
        }
    }

    /// Uses a caller-supplied creation timestamp instead of the clock.
    #[must_use]
    pub const fn with_creation_time(mut self, creation_time: DateTime<Utc>) -> Self {
        self.creation_time = Some(creation_time);
        self
    }
}

/// Request payload for moving a task to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskStatusRequest {
    task_id: TaskId,
    status: String,
}

impl UpdateTaskStatusRequest {
    /// Creates a request; `status` is parsed case-insensitively.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }
}

/// Identifier and name of a board, as returned by board listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSummary {
    /// Board identifier.
    pub id: BoardId,
    /// Board name.
    pub name: BoardName,
}

impl From<&Board> for BoardSummary {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id(),
            name: board.name().clone(),
        }
    }
}

/// Service-level errors for board lifecycle operations.
#[derive(Debug, Error)]
pub enum BoardLifecycleError {
    /// Domain validation or a lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The requested task status is not recognised.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The team does not exist.
    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    /// The board does not exist.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The assigned user does not exist.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(UserId),

    /// The team already has a board with this name.
    #[error("team {team_id} already has a board named '{name}'")]
    DuplicateBoardName {
        /// Owning team.
        team_id: TeamId,
        /// Conflicting name.
        name: BoardName,
    },

    /// The board already has a task with this title.
    #[error("board {board_id} already has a task titled '{title}'")]
    DuplicateTaskTitle {
        /// Owning board.
        board_id: BoardId,
        /// Conflicting title.
        title: TaskTitle,
    },

    /// Record store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BoardLifecycleError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Domain(err) => err.kind(),
            Self::InvalidStatus(_) => FailureKind::Validation,
            Self::TeamNotFound(_)
            | Self::BoardNotFound(_)
            | Self::TaskNotFound(_)
            | Self::AssigneeNotFound(_) => FailureKind::NotFound,
            Self::DuplicateBoardName { .. } | Self::DuplicateTaskTitle { .. } => {
                FailureKind::Conflict
            }
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for board lifecycle operations.
pub type BoardLifecycleResult<T> = Result<T, BoardLifecycleError>;

/// Board and task lifecycle service.
#[derive(Clone)]
pub struct BoardLifecycleService<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> BoardLifecycleService<S, C>
where
    S: RecordStore,
    C: Clock + Send + Sync,
{
    /// Creates a new board lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates an open board under an existing team.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLifecycleError::Domain`] for invalid fields,
    /// [`BoardLifecycleError::TeamNotFound`] when the team does not exist,
    /// [`BoardLifecycleError::DuplicateBoardName`] when the team already has
    /// a board of that name, or [`BoardLifecycleError::Store`] when
    /// persistence fails.
    pub async fn create_board(&self, request: CreateBoardRequest) -> BoardLifecycleResult<Board> {
        let CreateBoardRequest {
            name,
            description,
            team_id,
            creation_time,
        } = request;
        let new_board = NewBoard {
            name: BoardName::new(name)?,
            description: Description::new(description)?,
            team_id,
            creation_time: creation_time.unwrap_or_else(|| self.clock.utc()),
        };

        let board = self
            .store
            .atomically(move |tx| -> BoardLifecycleResult<Board> {
                if tx.find_team(new_board.team_id)?.is_none() {
                    return Err(BoardLifecycleError::TeamNotFound(new_board.team_id));
                }
                if tx
                    .find_board_by_name(new_board.team_id, &new_board.name)?
                    .is_some()
                {
                    return Err(BoardLifecycleError::DuplicateBoardName {
                        team_id: new_board.team_id,
                        name: new_board.name,
                    });
                }
                Ok(tx.insert_board(&new_board)?)
            })
            .await?;
        info!(board_id = %board.id(), team_id = %board.team_id(), "board created");
        Ok(board)
    }

    /// Closes a board whose tasks are all complete.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLifecycleError::BoardNotFound`] when the board does not
    /// exist, [`BoardLifecycleError::Domain`] when the board is already
    /// closed or has incomplete tasks, or [`BoardLifecycleError::Store`]
    /// when persistence fails.
    pub async fn close_board(&self, board_id: BoardId) -> BoardLifecycleResult<Board> {
        let ended_at = self.clock.utc();

        let board = self
            .store
            .atomically(move |tx| -> BoardLifecycleResult<Board> {
                let mut board = lock_board(tx, board_id)?;
                let tasks = tx.list_tasks_for_board(board_id)?;
                board.close(&tasks, ended_at)?;
                tx.update_board(&board)?;
                Ok(board)
            })
            .await
            .inspect_err(|err| note_rejection("close_board", err))?;
        info!(board_id = %board.id(), "board closed");
        Ok(board)
    }

    /// Adds an open task to an open board.
    ///
    /// Checks run in order: field validation, board existence, board status,
    /// assignee existence, title uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLifecycleError::Domain`] for invalid fields or a
    /// closed board, [`BoardLifecycleError::BoardNotFound`] or
    /// [`BoardLifecycleError::AssigneeNotFound`] for missing references,
    /// [`BoardLifecycleError::DuplicateTaskTitle`] when the board already has
    /// a task of that title, or [`BoardLifecycleError::Store`] when
    /// persistence fails.
    pub async fn add_task(&self, request: AddTaskRequest) -> BoardLifecycleResult<Task> {
        let AddTaskRequest {
            board_id,
            title,
            description,
            assignee,
            creation_time,
        } = request;
        let new_task = NewTask {
            title: TaskTitle::new(title)?,
            description: Description::new(description)?,
            board_id,
            assignee,
            creation_time: creation_time.unwrap_or_else(|| self.clock.utc()),
        };

        let task = self
            .store
            .atomically(move |tx| -> BoardLifecycleResult<Task> {
                let board = lock_board(tx, new_task.board_id)?;
                board.ensure_accepts_tasks()?;
                if tx.find_user(new_task.assignee)?.is_none() {
                    return Err(BoardLifecycleError::AssigneeNotFound(new_task.assignee));
                }
                if tx
                    .find_task_by_title(new_task.board_id, &new_task.title)?
                    .is_some()
                {
                    return Err(BoardLifecycleError::DuplicateTaskTitle {
                        board_id: new_task.board_id,
                        title: new_task.title,
                    });
                }
                Ok(tx.insert_task(&new_task)?)
            })
            .await
            .inspect_err(|err| note_rejection("add_task", err))?;
        info!(task_id = %task.id(), board_id = %task.board_id(), "task added");
        Ok(task)
    }

    /// Moves a task to another status.
    ///
    /// Transitions between the three statuses are unrestricted while the
    /// board is open. Re-applying the current status always succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLifecycleError::InvalidStatus`] for an unknown status,
    /// [`BoardLifecycleError::TaskNotFound`] when the task does not exist,
    /// [`BoardLifecycleError::Domain`] when the board is closed and the
    /// status would change, or [`BoardLifecycleError::Store`] when
    /// persistence fails.
    pub async fn update_task_status(
        &self,
        request: UpdateTaskStatusRequest,
    ) -> BoardLifecycleResult<Task> {
        let UpdateTaskStatusRequest {
            task_id,
            status: raw_status,
        } = request;
        let status = TaskStatus::try_from(raw_status.as_str())?;

        let task = self
            .store
            .atomically(move |tx| -> BoardLifecycleResult<Task> {
                let board_id = require_task(tx, task_id)?.board_id();
                let board = tx
                    .lock_board(board_id)?
                    .ok_or_else(|| StoreError::not_found(Table::Boards, board_id))?;
                // Re-read under the board lock.
                let mut task = require_task(tx, task_id)?;
                task.set_status(status, &board)?;
                tx.update_task(&task)?;
                Ok(task)
            })
            .await
            .inspect_err(|err| note_rejection("update_task_status", err))?;
        info!(task_id = %task.id(), status = %task.status(), "task status updated");
        Ok(task)
    }

    /// Lists the boards of a team ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLifecycleError::TeamNotFound`] when the team does not
    /// exist, or [`BoardLifecycleError::Store`] when persistence fails.
    pub async fn list_boards(&self, team_id: TeamId) -> BoardLifecycleResult<Vec<BoardSummary>> {
        self.store
            .atomically(move |tx| -> BoardLifecycleResult<Vec<BoardSummary>> {
                if tx.find_team(team_id)?.is_none() {
                    return Err(BoardLifecycleError::TeamNotFound(team_id));
                }
                let boards = tx.list_boards_for_team(team_id)?;
                Ok(boards.iter().map(BoardSummary::from).collect())
            })
            .await
    }

    /// Returns one board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLifecycleError::BoardNotFound`] when the board does not
    /// exist, or [`BoardLifecycleError::Store`] when persistence fails.
    pub async fn describe_board(&self, board_id: BoardId) -> BoardLifecycleResult<Board> {
        self.store
            .atomically(move |tx| -> BoardLifecycleResult<Board> { require_board(tx, board_id) })
            .await
    }

    /// Lists the tasks of a board ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`BoardLifecycleError::BoardNotFound`] when the board does not
    /// exist, or [`BoardLifecycleError::Store`] when persistence fails.
    pub async fn list_tasks(&self, board_id: BoardId) -> BoardLifecycleResult<Vec<Task>> {
        self.store
            .atomically(move |tx| -> BoardLifecycleResult<Vec<Task>> {
                require_board(tx, board_id)?;
                Ok(tx.list_tasks_for_board(board_id)?)
            })
            .await
    }
}

fn require_board(tx: &mut dyn StoreTransaction, board_id: BoardId) -> BoardLifecycleResult<Board> {
    tx.find_board(board_id)?
        .ok_or(BoardLifecycleError::BoardNotFound(board_id))
}

fn lock_board(tx: &mut dyn StoreTransaction, board_id: BoardId) -> BoardLifecycleResult<Board> {
    tx.lock_board(board_id)?
        .ok_or(BoardLifecycleError::BoardNotFound(board_id))
}

fn require_task(tx: &mut dyn StoreTransaction, task_id: TaskId) -> BoardLifecycleResult<Task> {
    tx.find_task(task_id)?
        .ok_or(BoardLifecycleError::TaskNotFound(task_id))
}

fn note_rejection(operation: &'static str, err: &BoardLifecycleError) {
    if err.kind() == FailureKind::Precondition {
        debug!(operation, error = %err, "lifecycle rule rejected operation");
    }
}
