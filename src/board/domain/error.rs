//! Error types for board and task validation and lifecycle rules.

use super::{BoardId, TaskId, TaskStatus};
use crate::error::FailureKind;
use thiserror::Error;

/// Errors returned while constructing board values or applying lifecycle
/// rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The board name is empty after trimming.
    #[error("board name must not be empty")]
    EmptyBoardName,

    /// The board name exceeds the 64 character limit.
    #[error("board name is {0} characters, limit is 64")]
    BoardNameTooLong(usize),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the 64 character limit.
    #[error("task title is {0} characters, limit is 64")]
    TaskTitleTooLong(usize),

    /// A board or task description exceeds the 128 character limit.
    #[error("description is {0} characters, limit is 128")]
    DescriptionTooLong(usize),

    /// Tasks can only be added to an open board.
    #[error("board {0} is closed")]
    BoardClosed(BoardId),

    /// A closed board cannot be closed again.
    #[error("board {0} is already closed")]
    BoardAlreadyClosed(BoardId),

    /// The board still has tasks that are not complete.
    #[error("board {board_id} has {incomplete} task(s) that are not complete")]
    IncompleteTasks {
        /// Board that was asked to close.
        board_id: BoardId,
        /// Number of tasks whose status is not `COMPLETE`.
        incomplete: usize,
    },

    /// Tasks on a closed board keep their final status.
    #[error("task {task_id} on closed board {board_id} cannot move to {requested}")]
    TaskFrozen {
        /// Task that was asked to change.
        task_id: TaskId,
        /// Closed board owning the task.
        board_id: BoardId,
        /// Requested status.
        requested: TaskStatus,
    },
}

impl BoardDomainError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::EmptyBoardName
            | Self::BoardNameTooLong(_)
            | Self::EmptyTaskTitle
            | Self::TaskTitleTooLong(_)
            | Self::DescriptionTooLong(_) => FailureKind::Validation,
            Self::BoardClosed(_)
            | Self::BoardAlreadyClosed(_)
            | Self::IncompleteTasks { .. }
            | Self::TaskFrozen { .. } => FailureKind::Precondition,
        }
    }
}

/// Error returned while parsing a task status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status '{0}', expected OPEN, IN_PROGRESS or COMPLETE")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a board status from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown board status: {0}")]
pub struct ParseBoardStatusError(pub String);
