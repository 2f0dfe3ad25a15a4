//! Text export of a board and its tasks.

use crate::{
    board::{
        domain::{Board, BoardId, Task},
        ports::{ArtifactId, ExportError, ExportSink},
    },
    error::FailureKind,
    store::{RecordStore, StoreError, StoreTransaction, Table},
    user::domain::UserId,
};
use chrono::{DateTime, Utc};
use minijinja::Environment;
use serde::Serialize;
use std::{
    collections::{BTreeMap, btree_map::Entry},
    sync::Arc,
};
use thiserror::Error;
use tracing::info;

const REPORT_TEMPLATE: &str = "\
Board {{ board.id }}: {{ board.name }}
Description: {{ board.description }}
Status: {{ board.status }}
Created: {{ board.created }}
Ended: {{ board.ended }}

Tasks:
{% for task in tasks %}
- {{ task.title }} [{{ task.status }}] assigned to {{ task.assignee }}
  {{ task.description }}
{% else %}
  (none)
{% endfor %}
";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Service-level errors for board export.
#[derive(Debug, Error)]
pub enum BoardExportError {
    /// The board does not exist.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The report template failed to render.
    #[error("failed to render board report: {0}")]
    Render(#[from] minijinja::Error),

    /// The export sink rejected the artifact.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Record store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BoardExportError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::BoardNotFound(_) => FailureKind::NotFound,
            Self::Render(_) => FailureKind::Storage,
            Self::Export(err) => err.kind(),
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for board export operations.
pub type BoardExportResult<T> = Result<T, BoardExportError>;

#[derive(Debug, Serialize)]
struct BoardReport {
    board: BoardSection,
    tasks: Vec<TaskLine>,
}

#[derive(Debug, Serialize)]
struct BoardSection {
    id: String,
    name: String,
    description: String,
    status: String,
    created: String,
    ended: String,
}

#[derive(Debug, Serialize)]
struct TaskLine {
    title: String,
    description: String,
    status: String,
    assignee: String,
}

/// Renders boards as text reports and hands them to an export sink.
#[derive(Clone)]
pub struct BoardExportService<S, X>
where
    S: RecordStore,
    X: ExportSink,
{
    store: Arc<S>,
    sink: Arc<X>,
}

impl<S, X> BoardExportService<S, X>
where
    S: RecordStore,
    X: ExportSink,
{
    /// Creates a new board export service.
    #[must_use]
    pub const fn new(store: Arc<S>, sink: Arc<X>) -> Self {
        Self { store, sink }
    }

    /// Writes a report for one board as `board-<id>.txt`.
    ///
    /// The board, its tasks and their assignees are read in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`BoardExportError::BoardNotFound`] when the board does not
    /// exist, [`BoardExportError::Render`] when the template fails,
    /// [`BoardExportError::Export`] when the sink fails, or
    /// [`BoardExportError::Store`] when persistence fails.
    pub async fn export_board(&self, board_id: BoardId) -> BoardExportResult<ArtifactId> {
        let report = self
            .store
            .atomically(move |tx| -> BoardExportResult<BoardReport> {
                let board = tx
                    .find_board(board_id)?
                    .ok_or(BoardExportError::BoardNotFound(board_id))?;
                let tasks = tx.list_tasks_for_board(board_id)?;
                build_report(tx, &board, &tasks)
            })
            .await?;

        let content = render_report(&report)?;
        let artifact = self
            .sink
            .write_text_artifact(&artifact_name(board_id), &content)
            .await?;
        info!(board_id = %board_id, artifact = %artifact, "board exported");
        Ok(artifact)
    }
}

/// Returns the artifact name used for a board report.
#[must_use]
pub fn artifact_name(board_id: BoardId) -> String {
    format!("board-{board_id}.txt")
}

fn build_report(
    tx: &mut dyn StoreTransaction,
    board: &Board,
    tasks: &[Task],
) -> BoardExportResult<BoardReport> {
    let mut assignees: BTreeMap<UserId, String> = BTreeMap::new();
    for user_id in tasks.iter().map(Task::assignee) {
        if let Entry::Vacant(slot) = assignees.entry(user_id) {
            let user = tx
                .find_user(user_id)?
                .ok_or_else(|| StoreError::not_found(Table::Users, user_id))?;
            slot.insert(user.display_name().to_string());
        }
    }

    let lines = tasks
        .iter()
        .map(|task| TaskLine {
            title: task.title().to_string(),
            description: task.description().to_string(),
            status: task.status().to_string(),
            assignee: assignees.get(&task.assignee()).cloned().unwrap_or_default(),
        })
        .collect();

    Ok(BoardReport {
        board: BoardSection {
            id: board.id().to_string(),
            name: board.name().to_string(),
            description: board.description().to_string(),
            status: board.status().to_string(),
            created: format_timestamp(board.creation_time()),
            ended: board
                .end_time()
                .map_or_else(|| "-".to_owned(), format_timestamp),
        },
        tasks: lines,
    })
}

fn render_report(report: &BoardReport) -> Result<String, minijinja::Error> {
    let mut environment = Environment::new();
    environment.set_trim_blocks(true);
    environment.set_lstrip_blocks(true);
    environment.render_str(REPORT_TEMPLATE, report)
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
