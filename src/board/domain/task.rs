//! Task entity and its status rule.

use super::{Board, BoardDomainError, BoardId, Description, TaskId, TaskStatus, TaskTitle};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated fields for a task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title, unique within the board.
    pub title: TaskTitle,
    /// Task description.
    pub description: Description,
    /// Owning board.
    pub board_id: BoardId,
    /// Assigned user.
    pub assignee: UserId,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
}

/// Task on a project board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Description,
    board_id: BoardId,
    assignee: UserId,
    status: TaskStatus,
    creation_time: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Description,
    /// Persisted board reference.
    pub board_id: BoardId,
    /// Persisted assignee reference.
    pub assignee: UserId,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub creation_time: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            board_id: data.board_id,
            assignee: data.assignee,
            status: data.status,
            creation_time: data.creation_time,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn assignee(&self) -> UserId {
        self.assignee
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// Moves the task to `status`.
    ///
    /// Any of the three statuses may follow any other while the owning board
    /// is open. On a closed board only the current status may be re-applied.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::TaskFrozen`] when `board` is closed and
    /// `status` differs from the current one.
    pub fn set_status(&mut self, status: TaskStatus, board: &Board) -> Result<(), BoardDomainError> {
        if status != self.status && !board.is_open() {
            return Err(BoardDomainError::TaskFrozen {
                task_id: self.id,
                board_id: board.id(),
                requested: status,
            });
        }
        self.status = status;
        Ok(())
    }
}
