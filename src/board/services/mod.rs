//! Application services for board lifecycle and export.

mod export;
mod lifecycle;

pub use export::{BoardExportError, BoardExportResult, BoardExportService, artifact_name};
pub use lifecycle::{
    AddTaskRequest, BoardLifecycleError, BoardLifecycleResult, BoardLifecycleService,
    BoardSummary, CreateBoardRequest, UpdateTaskStatusRequest,
};
