//! Then steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::error::FailureKind;

#[then("closing the board fails with a precondition failure")]
fn closing_fails(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board = world.board()?;
    match run_async(world.boards.close_board(board)) {
        Ok(closed) => Err(eyre::eyre!(
            "expected close to be rejected, board is {}",
            closed.status()
        )),
        Err(err) if err.kind() == FailureKind::Precondition => Ok(()),
        Err(err) => Err(eyre::eyre!("expected a precondition failure, got {err}")),
    }
}

#[then("the request fails with a {kind} failure")]
fn request_fails_with(world: &mut BoardWorld, kind: String) -> Result<(), eyre::Report> {
    let failure = world
        .last_failure
        .ok_or_else(|| eyre::eyre!("expected the last request to fail"))?;
    if failure.as_str() != kind {
        return Err(eyre::eyre!("expected a {kind} failure, got {failure}"));
    }
    Ok(())
}

#[then(r#"the board status is "{status}""#)]
fn board_status_is(world: &mut BoardWorld, status: String) -> Result<(), eyre::Report> {
    let board = run_async(world.boards.describe_board(world.board()?))
        .map_err(|err| eyre::eyre!("describe_board failed: {err}"))?;
    if board.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected board status {status}, found {}",
            board.status()
        ));
    }
    Ok(())
}

#[then("the board has an end time")]
fn board_has_end_time(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board = run_async(world.boards.describe_board(world.board()?))
        .map_err(|err| eyre::eyre!("describe_board failed: {err}"))?;
    if board.end_time().is_none() {
        return Err(eyre::eyre!("closed board should record an end time"));
    }
    Ok(())
}

#[then("the board lists {count:usize} tasks")]
fn board_lists_tasks(world: &mut BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let tasks = run_async(world.boards.list_tasks(world.board()?))
        .map_err(|err| eyre::eyre!("list_tasks failed: {err}"))?;
    if tasks.len() != count {
        return Err(eyre::eyre!("expected {count} tasks, found {}", tasks.len()));
    }
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &mut BoardWorld, status: String) -> Result<(), eyre::Report> {
    let task = world.task()?;
    let tasks = run_async(world.boards.list_tasks(world.board()?))
        .map_err(|err| eyre::eyre!("list_tasks failed: {err}"))?;
    let found = tasks
        .iter()
        .find(|listed| listed.id() == task)
        .ok_or_else(|| eyre::eyre!("task {task} is missing from its board"))?;
    if found.status().as_str() != status {
        return Err(eyre::eyre!(
            "expected task status {status}, found {}",
            found.status()
        ));
    }
    Ok(())
}

#[then(r#"the report contains "{text}""#)]
fn report_contains(world: &mut BoardWorld, text: String) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .as_deref()
        .ok_or_else(|| eyre::eyre!("no report was exported"))?;
    if !report.contains(&text) {
        return Err(eyre::eyre!("report is missing {text:?}:\n{report}"));
    }
    Ok(())
}
