//! Board aggregate root and its closure rule.

use super::{BoardDomainError, BoardId, BoardName, BoardStatus, Description, Task};
use crate::team::domain::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated fields for a board that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    /// Board name, unique within the team.
    pub name: BoardName,
    /// Board description.
    pub description: Description,
    /// Owning team.
    pub team_id: TeamId,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
}

/// Project board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    name: BoardName,
    description: Description,
    team_id: TeamId,
    status: BoardStatus,
    creation_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted identifier.
    pub id: BoardId,
    /// Persisted name.
    pub name: BoardName,
    /// Persisted description.
    pub description: Description,
    /// Persisted team reference.
    pub team_id: TeamId,
    /// Persisted status.
    pub status: BoardStatus,
    /// Persisted creation timestamp.
    pub creation_time: DateTime<Utc>,
    /// Persisted closure timestamp, if closed.
    pub end_time: Option<DateTime<Utc>>,
}

impl Board {
    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            team_id: data.team_id,
            status: data.status,
            creation_time: data.creation_time,
            end_time: data.end_time,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board name.
    #[must_use]
    pub const fn name(&self) -> &BoardName {
        &self.name
    }

    /// Returns the board description.
    #[must_use]
    pub const fn description(&self) -> &Description {
        &self.description
    }

    /// Returns the owning team.
    #[must_use]
    pub const fn team_id(&self) -> TeamId {
        self.team_id
    }

    /// Returns the board status.
    #[must_use]
    pub const fn status(&self) -> BoardStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// Returns the closure timestamp, set only once the board is closed.
    #[must_use]
    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Returns `true` while the board accepts tasks.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.status, BoardStatus::Open)
    }

    /// Checks that the board still accepts new tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::BoardClosed`] when the board is closed.
    pub const fn ensure_accepts_tasks(&self) -> Result<(), BoardDomainError> {
        if self.is_open() {
            return Ok(());
        }
        Err(BoardDomainError::BoardClosed(self.id))
    }

    /// Closes the board.
    ///
    /// Only tasks belonging to this board are considered; an empty task set
    /// closes vacuously. The board is left untouched on failure.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::BoardAlreadyClosed`] when the board is
    /// closed, or [`BoardDomainError::IncompleteTasks`] when any task on the
    /// board is not `COMPLETE`.
    pub fn close(&mut self, tasks: &[Task], ended_at: DateTime<Utc>) -> Result<(), BoardDomainError> {
        if !self.is_open() {
            return Err(BoardDomainError::BoardAlreadyClosed(self.id));
        }

        let incomplete = tasks
            .iter()
            .filter(|task| task.board_id() == self.id && !task.status().is_complete())
            .count();
        if incomplete > 0 {
            return Err(BoardDomainError::IncompleteTasks {
                board_id: self.id,
                incomplete,
            });
        }

        self.status = BoardStatus::Closed;
        self.end_time = Some(ended_at);
        Ok(())
    }
}
