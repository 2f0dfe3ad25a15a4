//! [`StoreTransaction`] implementation over an open Diesel transaction.

use super::{
    models::{
        BoardRow, NewBoardRow, NewTaskRow, NewTeamRow, NewUserRow, TaskRow, TeamMemberRow, TeamRow,
        UserRow,
    },
    schema::{project_boards, tasks, team_members, teams, users},
};
use crate::{
    board::domain::{
        Board, BoardId, BoardName, BoardStatus, Description, NewBoard, NewTask,
        PersistedBoardData, PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle,
    },
    store::ports::{StoreError, StoreResult, StoreTransaction, Table},
    team::domain::{NewTeam, PersistedTeamData, Team, TeamDescription, TeamId, TeamName},
    user::domain::{DisplayName, NewUser, PersistedUserData, User, UserId, UserName},
};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeMap, BTreeSet};

/// Record access bound to one open database transaction.
pub struct PgStoreTransaction<'conn> {
    connection: &'conn mut PgConnection,
}

impl<'conn> PgStoreTransaction<'conn> {
    /// Wraps a connection that is already inside a transaction.
    pub const fn new(connection: &'conn mut PgConnection) -> Self {
        Self { connection }
    }

    fn members_by_team(&mut self, team_ids: &[i64]) -> StoreResult<BTreeMap<i64, BTreeSet<UserId>>> {
        let pairs = team_members::table
            .filter(team_members::team_id.eq_any(team_ids))
            .select((team_members::team_id, team_members::user_id))
            .load::<(i64, i64)>(self.connection)
            .map_err(StoreError::persistence)?;

        let mut grouped: BTreeMap<i64, BTreeSet<UserId>> = BTreeMap::new();
        for (team_id, user_id) in pairs {
            grouped.entry(team_id).or_default().insert(UserId::new(user_id));
        }
        Ok(grouped)
    }

    fn assemble_teams(&mut self, rows: Vec<TeamRow>) -> StoreResult<Vec<Team>> {
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut members = self.members_by_team(&ids)?;
        rows.into_iter()
            .map(|row| {
                let member_ids = members.remove(&row.id).unwrap_or_default();
                row_to_team(row, member_ids)
            })
            .collect()
    }
}

impl StoreTransaction for PgStoreTransaction<'_> {
    fn insert_user(&mut self, user: &NewUser) -> StoreResult<User> {
        let row = NewUserRow {
            name: user.name.as_str().to_owned(),
            display_name: user.display_name.as_str().to_owned(),
        };
        let stored = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(self.connection)
            .map_err(map_write_error)?;
        row_to_user(stored)
    }

    fn update_user(&mut self, user: &User) -> StoreResult<()> {
        let updated = diesel::update(users::table.filter(users::id.eq(user.id().value())))
            .set(users::display_name.eq(user.display_name().as_str()))
            .execute(self.connection)
            .map_err(map_write_error)?;
        ensure_updated(updated, Table::Users, user.id())
    }

    fn find_user(&mut self, id: UserId) -> StoreResult<Option<User>> {
        users::table
            .filter(users::id.eq(id.value()))
            .select(UserRow::as_select())
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_user)
            .transpose()
    }

    fn find_user_by_name(&mut self, name: &UserName) -> StoreResult<Option<User>> {
        users::table
            .filter(users::name.eq(name.as_str()))
            .select(UserRow::as_select())
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_user)
            .transpose()
    }

    fn list_users(&mut self) -> StoreResult<Vec<User>> {
        users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(self.connection)
            .map_err(StoreError::persistence)?
            .into_iter()
            .map(row_to_user)
            .collect()
    }

    fn insert_team(&mut self, team: &NewTeam) -> StoreResult<Team> {
        let row = NewTeamRow {
            name: team.name.as_str().to_owned(),
            description: team.description.as_str().to_owned(),
            admin_id: team.admin.value(),
            creation_time: team.creation_time,
        };
        let stored = diesel::insert_into(teams::table)
            .values(&row)
            .returning(TeamRow::as_returning())
            .get_result(self.connection)
            .map_err(map_write_error)?;
        row_to_team(stored, BTreeSet::new())
    }

    fn update_team(&mut self, team: &Team) -> StoreResult<()> {
        let team_id = team.id().value();
        let updated = diesel::update(teams::table.filter(teams::id.eq(team_id)))
            .set((
                teams::description.eq(team.description().as_str()),
                teams::admin_id.eq(team.admin().value()),
            ))
            .execute(self.connection)
            .map_err(map_write_error)?;
        ensure_updated(updated, Table::Teams, team.id())?;

        diesel::delete(team_members::table.filter(team_members::team_id.eq(team_id)))
            .execute(self.connection)
            .map_err(StoreError::persistence)?;
        let pairs: Vec<TeamMemberRow> = team
            .members()
            .iter()
            .map(|user| TeamMemberRow {
                team_id,
                user_id: user.value(),
            })
            .collect();
        if !pairs.is_empty() {
            diesel::insert_into(team_members::table)
                .values(&pairs)
                .execute(self.connection)
                .map_err(map_write_error)?;
        }
        Ok(())
    }

    fn find_team(&mut self, id: TeamId) -> StoreResult<Option<Team>> {
        let row = teams::table
            .filter(teams::id.eq(id.value()))
            .select(TeamRow::as_select())
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?;
        Ok(self.assemble_teams(row.into_iter().collect())?.pop())
    }

    fn lock_team(&mut self, id: TeamId) -> StoreResult<Option<Team>> {
        let row = teams::table
            .filter(teams::id.eq(id.value()))
            .select(TeamRow::as_select())
            .for_update()
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?;
        Ok(self.assemble_teams(row.into_iter().collect())?.pop())
    }

    fn find_team_by_name(&mut self, name: &TeamName) -> StoreResult<Option<Team>> {
        let row = teams::table
            .filter(teams::name.eq(name.as_str()))
            .select(TeamRow::as_select())
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?;
        Ok(self.assemble_teams(row.into_iter().collect())?.pop())
    }

    fn list_teams(&mut self) -> StoreResult<Vec<Team>> {
        let rows = teams::table
            .order(teams::id.asc())
            .select(TeamRow::as_select())
            .load(self.connection)
            .map_err(StoreError::persistence)?;
        self.assemble_teams(rows)
    }

    fn list_teams_for_member(&mut self, user: UserId) -> StoreResult<Vec<Team>> {
        let rows = teams::table
            .inner_join(team_members::table)
            .filter(team_members::user_id.eq(user.value()))
            .order(teams::id.asc())
            .select(TeamRow::as_select())
            .load(self.connection)
            .map_err(StoreError::persistence)?;
        self.assemble_teams(rows)
    }

    fn insert_board(&mut self, board: &NewBoard) -> StoreResult<Board> {
        let row = NewBoardRow {
            name: board.name.as_str().to_owned(),
            description: board.description.as_str().to_owned(),
            team_id: board.team_id.value(),
            status: BoardStatus::Open.as_str().to_owned(),
            creation_time: board.creation_time,
        };
        let stored = diesel::insert_into(project_boards::table)
            .values(&row)
            .returning(BoardRow::as_returning())
            .get_result(self.connection)
            .map_err(map_write_error)?;
        row_to_board(stored)
    }

    fn update_board(&mut self, board: &Board) -> StoreResult<()> {
        let updated =
            diesel::update(project_boards::table.filter(project_boards::id.eq(board.id().value())))
                .set((
                    project_boards::status.eq(board.status().as_str()),
                    project_boards::end_time.eq(board.end_time()),
                ))
                .execute(self.connection)
                .map_err(map_write_error)?;
        ensure_updated(updated, Table::Boards, board.id())
    }

    fn find_board(&mut self, id: BoardId) -> StoreResult<Option<Board>> {
        project_boards::table
            .filter(project_boards::id.eq(id.value()))
            .select(BoardRow::as_select())
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_board)
            .transpose()
    }

    fn lock_board(&mut self, id: BoardId) -> StoreResult<Option<Board>> {
        project_boards::table
            .filter(project_boards::id.eq(id.value()))
            .select(BoardRow::as_select())
            .for_update()
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_board)
            .transpose()
    }

    fn find_board_by_name(
        &mut self,
        team: TeamId,
        name: &BoardName,
    ) -> StoreResult<Option<Board>> {
        project_boards::table
            .filter(project_boards::team_id.eq(team.value()))
            .filter(project_boards::name.eq(name.as_str()))
            .select(BoardRow::as_select())
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_board)
            .transpose()
    }

    fn list_boards_for_team(&mut self, team: TeamId) -> StoreResult<Vec<Board>> {
        project_boards::table
            .filter(project_boards::team_id.eq(team.value()))
            .order(project_boards::id.asc())
            .select(BoardRow::as_select())
            .load(self.connection)
            .map_err(StoreError::persistence)?
            .into_iter()
            .map(row_to_board)
            .collect()
    }

    fn insert_task(&mut self, task: &NewTask) -> StoreResult<Task> {
        let row = NewTaskRow {
            title: task.title.as_str().to_owned(),
            description: task.description.as_str().to_owned(),
            board_id: task.board_id.value(),
            user_id: task.assignee.value(),
            status: TaskStatus::Open.as_str().to_owned(),
            creation_time: task.creation_time,
        };
        let stored = diesel::insert_into(tasks::table)
            .values(&row)
            .returning(TaskRow::as_returning())
            .get_result(self.connection)
            .map_err(map_write_error)?;
        row_to_task(stored)
    }

    fn update_task(&mut self, task: &Task) -> StoreResult<()> {
        let updated = diesel::update(tasks::table.filter(tasks::id.eq(task.id().value())))
            .set(tasks::status.eq(task.status().as_str()))
            .execute(self.connection)
            .map_err(map_write_error)?;
        ensure_updated(updated, Table::Tasks, task.id())
    }

    fn find_task(&mut self, id: TaskId) -> StoreResult<Option<Task>> {
        tasks::table
            .filter(tasks::id.eq(id.value()))
            .select(TaskRow::as_select())
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_task)
            .transpose()
    }

    fn find_task_by_title(
        &mut self,
        board: BoardId,
        title: &TaskTitle,
    ) -> StoreResult<Option<Task>> {
        tasks::table
            .filter(tasks::board_id.eq(board.value()))
            .filter(tasks::title.eq(title.as_str()))
            .select(TaskRow::as_select())
            .first(self.connection)
            .optional()
            .map_err(StoreError::persistence)?
            .map(row_to_task)
            .transpose()
    }

    fn list_tasks_for_board(&mut self, board: BoardId) -> StoreResult<Vec<Task>> {
        tasks::table
            .filter(tasks::board_id.eq(board.value()))
            .order(tasks::id.asc())
            .select(TaskRow::as_select())
            .load(self.connection)
            .map_err(StoreError::persistence)?
            .into_iter()
            .map(row_to_task)
            .collect()
    }
}

fn ensure_updated(count: usize, table: Table, id: impl Into<i64>) -> StoreResult<()> {
    if count == 0 {
        return Err(StoreError::not_found(table, id));
    }
    Ok(())
}

fn map_write_error(err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info
                .constraint_name()
                .map_or_else(|| info.message().to_owned(), str::to_owned);
            StoreError::UniqueViolation(constraint)
        }
        other => StoreError::persistence(other),
    }
}

fn row_to_user(row: UserRow) -> StoreResult<User> {
    let UserRow {
        id,
        name,
        display_name,
    } = row;
    Ok(User::from_persisted(PersistedUserData {
        id: UserId::new(id),
        name: UserName::new(&name).map_err(StoreError::invalid_persisted_data)?,
        display_name: DisplayName::new(&display_name)
            .map_err(StoreError::invalid_persisted_data)?,
    }))
}

fn row_to_team(row: TeamRow, members: BTreeSet<UserId>) -> StoreResult<Team> {
    let TeamRow {
        id,
        name,
        description,
        admin_id,
        creation_time,
    } = row;
    Ok(Team::from_persisted(PersistedTeamData {
        id: TeamId::new(id),
        name: TeamName::new(&name).map_err(StoreError::invalid_persisted_data)?,
        description: TeamDescription::new(description)
            .map_err(StoreError::invalid_persisted_data)?,
        admin: UserId::new(admin_id),
        creation_time,
        members,
    }))
}

fn row_to_board(row: BoardRow) -> StoreResult<Board> {
    let BoardRow {
        id,
        name,
        description,
        team_id,
        status,
        creation_time,
        end_time,
    } = row;
    Ok(Board::from_persisted(PersistedBoardData {
        id: BoardId::new(id),
        name: BoardName::new(&name).map_err(StoreError::invalid_persisted_data)?,
        description: Description::new(description).map_err(StoreError::invalid_persisted_data)?,
        team_id: TeamId::new(team_id),
        status: BoardStatus::try_from(status.as_str())
            .map_err(StoreError::invalid_persisted_data)?,
        creation_time,
        end_time,
    }))
}

fn row_to_task(row: TaskRow) -> StoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        board_id,
        user_id,
        status,
        creation_time,
    } = row;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title: TaskTitle::new(&title).map_err(StoreError::invalid_persisted_data)?,
        description: Description::new(description).map_err(StoreError::invalid_persisted_data)?,
        board_id: BoardId::new(board_id),
        assignee: UserId::new(user_id),
        status: TaskStatus::try_from(status.as_str())
            .map_err(StoreError::invalid_persisted_data)?,
        creation_time,
    }))
}
