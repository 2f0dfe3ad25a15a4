//! Given steps for board lifecycle BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::{
    board::services::{AddTaskRequest, CreateBoardRequest},
    team::services::CreateTeamRequest,
    user::services::CreateUserRequest,
};

#[given(r#"a user named "{name}" displayed as "{display_name}""#)]
fn a_user_named(
    world: &mut BoardWorld,
    name: String,
    display_name: String,
) -> Result<(), eyre::Report> {
    let user = run_async(
        world
            .users
            .create_user(CreateUserRequest::new(name.as_str(), display_name)),
    )
    .wrap_err("register user for scenario")?;
    world.user_ids.insert(name, user.id());
    Ok(())
}

#[given(r#"a team named "{name}" administered by "{admin}""#)]
fn a_team_named(world: &mut BoardWorld, name: String, admin: String) -> Result<(), eyre::Report> {
    let admin_id = world.user(&admin)?;
    let team = run_async(
        world
            .teams
            .create_team(CreateTeamRequest::new(name, "scenario team", admin_id)),
    )
    .wrap_err("create team for scenario")?;
    world.team = Some(team.id());
    Ok(())
}

#[given(r#"an open board named "{name}""#)]
fn an_open_board(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let team = world
        .team
        .ok_or_else(|| eyre::eyre!("no team in scenario world"))?;
    let board = run_async(
        world
            .boards
            .create_board(CreateBoardRequest::new(name, "", team)),
    )
    .wrap_err("create board for scenario")?;
    world.board = Some(board.id());
    Ok(())
}

#[given(r#"a task titled "{title}" assigned to "{assignee}""#)]
fn a_task_titled(world: &mut BoardWorld, title: String, assignee: String) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let assignee_id = world.user(&assignee)?;
    let task = run_async(
        world
            .boards
            .add_task(AddTaskRequest::new(board, title, "", assignee_id)),
    )
    .wrap_err("add task for scenario")?;
    world.task = Some(task.id());
    Ok(())
}

#[given("the board is closed")]
fn board_already_closed(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board = world.board()?;
    run_async(world.boards.close_board(board)).wrap_err("close board for scenario")?;
    Ok(())
}
