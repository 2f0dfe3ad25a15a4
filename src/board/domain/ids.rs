//! Identifier types for boards and tasks.

use crate::ids::record_id;

record_id! {
    /// Store-assigned identifier of a project board.
    BoardId
}

record_id! {
    /// Store-assigned identifier of a task.
    TaskId
}
