//! In-memory integration tests for the board and task lifecycle.

use super::helpers::{Services, services};
use rstest::rstest;
use taskboard::{
    board::{
        domain::{BoardStatus, TaskStatus},
        services::{AddTaskRequest, CreateBoardRequest, UpdateTaskStatusRequest, artifact_name},
    },
    error::FailureKind,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sprint_runs_from_creation_to_export(services: Services) -> Result<(), eyre::Report> {
    let ada = services.user("ada").await?;
    let grace = services.user("grace").await?;
    let team = services.team("compilers", ada).await?;

    let board = services
        .boards
        .create_board(CreateBoardRequest::new("Sprint 1", "first sprint", team))
        .await?;
    let parser = services
        .boards
        .add_task(AddTaskRequest::new(board.id(), "Parser", "write it", ada))
        .await?;
    let lexer = services
        .boards
        .add_task(AddTaskRequest::new(board.id(), "Lexer", "", grace))
        .await?;

    for task in [parser.id(), lexer.id()] {
        services
            .boards
            .update_task_status(UpdateTaskStatusRequest::new(task, "IN_PROGRESS"))
            .await?;
        services
            .boards
            .update_task_status(UpdateTaskStatusRequest::new(task, "COMPLETE"))
            .await?;
    }
    let closed = services.boards.close_board(board.id()).await?;
    eyre::ensure!(closed.status() == BoardStatus::Closed, "board should be closed");
    eyre::ensure!(closed.end_time().is_some(), "closed board records an end time");

    let artifact = services.exports.export_board(board.id()).await?;
    eyre::ensure!(
        artifact.as_str() == artifact_name(board.id()),
        "unexpected artifact id {artifact}"
    );
    let report = services
        .sink
        .artifact(artifact.as_str())
        .ok_or_else(|| eyre::eyre!("artifact was not written"))?;
    eyre::ensure!(report.contains("Status: CLOSED"), "report: {report}");
    eyre::ensure!(
        report.contains("- Parser [COMPLETE] assigned to Ada"),
        "report: {report}"
    );
    eyre::ensure!(
        report.contains("- Lexer [COMPLETE] assigned to Grace"),
        "report: {report}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_board_freezes_tasks_but_keeps_them_readable(
    services: Services,
) -> Result<(), eyre::Report> {
    let ada = services.user("ada").await?;
    let team = services.team("compilers", ada).await?;
    let board = services
        .boards
        .create_board(CreateBoardRequest::new("Sprint 1", "", team))
        .await?;
    let task = services
        .boards
        .add_task(AddTaskRequest::new(board.id(), "Parser", "", ada))
        .await?;
    services
        .boards
        .update_task_status(UpdateTaskStatusRequest::new(task.id(), "COMPLETE"))
        .await?;
    services.boards.close_board(board.id()).await?;

    let reopen = services
        .boards
        .update_task_status(UpdateTaskStatusRequest::new(task.id(), "OPEN"))
        .await
        .expect_err("tasks on a closed board are frozen");
    let late_task = services
        .boards
        .add_task(AddTaskRequest::new(board.id(), "Late", "", ada))
        .await
        .expect_err("closed boards reject tasks");

    eyre::ensure!(
        reopen.kind() == FailureKind::Precondition,
        "status change on closed board: {reopen}"
    );
    eyre::ensure!(
        late_task.kind() == FailureKind::Precondition,
        "task added to closed board: {late_task}"
    );
    let tasks = services.boards.list_tasks(board.id()).await?;
    let statuses: Vec<TaskStatus> = tasks.iter().map(|listed| listed.status()).collect();
    eyre::ensure!(
        statuses == vec![TaskStatus::Complete],
        "unexpected task statuses {statuses:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn boards_are_listed_per_team(services: Services) -> Result<(), eyre::Report> {
    let ada = services.user("ada").await?;
    let compilers = services.team("compilers", ada).await?;
    let runtime = services.team("runtime", ada).await?;
    for (team, name) in [
        (compilers, "Sprint 1"),
        (runtime, "Sprint 1"),
        (compilers, "Sprint 2"),
    ] {
        services
            .boards
            .create_board(CreateBoardRequest::new(name, "", team))
            .await?;
    }

    let listed = services.boards.list_boards(compilers).await?;

    let names: Vec<&str> = listed.iter().map(|summary| summary.name.as_str()).collect();
    eyre::ensure!(
        names == ["Sprint 1", "Sprint 2"],
        "unexpected boards {names:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn incomplete_task_blocks_close_until_finished(
    services: Services,
) -> Result<(), eyre::Report> {
    let ada = services.user("ada").await?;
    let team = services.team("compilers", ada).await?;
    let board = services
        .boards
        .create_board(CreateBoardRequest::new("Sprint 1", "", team))
        .await?;
    let task = services
        .boards
        .add_task(AddTaskRequest::new(board.id(), "Parser", "", ada))
        .await?;

    let blocked = services
        .boards
        .close_board(board.id())
        .await
        .expect_err("open task blocks close");
    eyre::ensure!(
        blocked.kind() == FailureKind::Precondition,
        "close with open task: {blocked}"
    );
    let unchanged = services.boards.describe_board(board.id()).await?;
    eyre::ensure!(
        unchanged.status() == BoardStatus::Open,
        "rejected close must leave the board open"
    );

    services
        .boards
        .update_task_status(UpdateTaskStatusRequest::new(task.id(), "complete"))
        .await?;
    let closed = services.boards.close_board(board.id()).await?;
    eyre::ensure!(closed.status() == BoardStatus::Closed, "board should be closed");
    Ok(())
}
