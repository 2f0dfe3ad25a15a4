//! When steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::board::services::{AddTaskRequest, UpdateTaskStatusRequest};

#[when(r#"the task status is set to "{status}""#)]
fn set_task_status(world: &mut BoardWorld, status: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let result = run_async(
        world
            .boards
            .update_task_status(UpdateTaskStatusRequest::new(task, status)),
    );
    world.last_failure = result.err().map(|err| err.kind());
    Ok(())
}

#[when(r#"a task titled "{title}" is added for "{assignee}""#)]
fn add_task(world: &mut BoardWorld, title: String, assignee: String) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let assignee_id = world.user(&assignee)?;
    let result = run_async(
        world
            .boards
            .add_task(AddTaskRequest::new(board, title, "", assignee_id)),
    );
    match result {
        Ok(task) => {
            world.task = Some(task.id());
            world.last_failure = None;
        }
        Err(err) => world.last_failure = Some(err.kind()),
    }
    Ok(())
}

#[when("the board is closed")]
fn close_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board = world.board()?;
    run_async(world.boards.close_board(board)).wrap_err("close board")?;
    Ok(())
}

#[when("the board is exported")]
fn export_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let artifact = run_async(world.exports.export_board(board)).wrap_err("export board")?;
    world.last_report = world.sink.artifact(artifact.as_str());
    Ok(())
}
