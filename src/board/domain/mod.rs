//! Domain model for project boards and their tasks.
//!
//! A board moves `OPEN -> CLOSED` exactly once, and only when every task on
//! it is `COMPLETE`. Tasks move freely between `OPEN`, `IN_PROGRESS` and
//! `COMPLETE` while their board is open.

mod board;
mod error;
mod ids;
mod status;
mod task;
mod text;

pub use board::{Board, NewBoard, PersistedBoardData};
pub use error::{BoardDomainError, ParseBoardStatusError, ParseTaskStatusError};
pub use ids::{BoardId, TaskId};
pub use status::{BoardStatus, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task};
pub use text::{BoardName, Description, TaskTitle};
