//! In-memory record store for tests and the storeless binary mode.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::{
    board::domain::{
        Board, BoardId, BoardName, BoardStatus, NewBoard, NewTask, PersistedBoardData,
        PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle,
    },
    store::ports::{RecordStore, StoreError, StoreResult, StoreTransaction, Table},
    team::domain::{NewTeam, PersistedTeamData, Team, TeamId, TeamName},
    user::domain::{NewUser, PersistedUserData, User, UserId, UserName},
};

/// Thread-safe in-memory record store.
///
/// Transactions are serialised behind one lock and run against a working
/// copy that replaces the committed state only when the operation succeeds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Clone, Default)]
struct InMemoryStoreState {
    users: BTreeMap<UserId, User>,
    teams: BTreeMap<TeamId, Team>,
    boards: BTreeMap<BoardId, Board>,
    tasks: BTreeMap<TaskId, Task>,
    sequences: Sequences,
}

/// Last id handed out per table.
#[derive(Debug, Clone, Copy, Default)]
struct Sequences {
    users: i64,
    teams: i64,
    boards: i64,
    tasks: i64,
}

impl InMemoryRecordStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn atomically<T, E, F>(&self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let mut committed = self.state.write().map_err(|err| {
            E::from(StoreError::persistence(std::io::Error::other(
                err.to_string(),
            )))
        })?;
        let mut working = committed.clone();
        let output = operation(&mut working)?;
        *committed = working;
        Ok(output)
    }
}

const fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl StoreTransaction for InMemoryStoreState {
    fn insert_user(&mut self, user: &NewUser) -> StoreResult<User> {
        if self.users.values().any(|existing| existing.name() == &user.name) {
            return Err(StoreError::UniqueViolation(format!(
                "users.name = {}",
                user.name
            )));
        }
        let id = UserId::new(next_id(&mut self.sequences.users));
        let stored = User::from_persisted(PersistedUserData {
            id,
            name: user.name.clone(),
            display_name: user.display_name.clone(),
        });
        self.users.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_user(&mut self, user: &User) -> StoreResult<()> {
        let slot = self
            .users
            .get_mut(&user.id())
            .ok_or_else(|| StoreError::not_found(Table::Users, user.id()))?;
        *slot = user.clone();
        Ok(())
    }

    fn find_user(&mut self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }

    fn find_user_by_name(&mut self, name: &UserName) -> StoreResult<Option<User>> {
        Ok(self.users.values().find(|user| user.name() == name).cloned())
    }

    fn list_users(&mut self) -> StoreResult<Vec<User>> {
        Ok(self.users.values().cloned().collect())
    }

    fn insert_team(&mut self, team: &NewTeam) -> StoreResult<Team> {
        if self.teams.values().any(|existing| existing.name() == &team.name) {
            return Err(StoreError::UniqueViolation(format!(
                "teams.name = {}",
                team.name
            )));
        }
        let id = TeamId::new(next_id(&mut self.sequences.teams));
        let stored = Team::from_persisted(PersistedTeamData {
            id,
            name: team.name.clone(),
            description: team.description.clone(),
            admin: team.admin,
            creation_time: team.creation_time,
            members: std::collections::BTreeSet::new(),
        });
        self.teams.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_team(&mut self, team: &Team) -> StoreResult<()> {
        let slot = self
            .teams
            .get_mut(&team.id())
            .ok_or_else(|| StoreError::not_found(Table::Teams, team.id()))?;
        *slot = team.clone();
        Ok(())
    }

    fn find_team(&mut self, id: TeamId) -> StoreResult<Option<Team>> {
        Ok(self.teams.get(&id).cloned())
    }

    fn lock_team(&mut self, id: TeamId) -> StoreResult<Option<Team>> {
        self.find_team(id)
    }

    fn find_team_by_name(&mut self, name: &TeamName) -> StoreResult<Option<Team>> {
        Ok(self.teams.values().find(|team| team.name() == name).cloned())
    }

    fn list_teams(&mut self) -> StoreResult<Vec<Team>> {
        Ok(self.teams.values().cloned().collect())
    }

    fn list_teams_for_member(&mut self, user: UserId) -> StoreResult<Vec<Team>> {
        Ok(self
            .teams
            .values()
            .filter(|team| team.is_member(user))
            .cloned()
            .collect())
    }

    fn insert_board(&mut self, board: &NewBoard) -> StoreResult<Board> {
        let taken = self
            .boards
            .values()
            .any(|existing| existing.team_id() == board.team_id && existing.name() == &board.name);
        if taken {
            return Err(StoreError::UniqueViolation(format!(
                "project_boards(team_id, name) = ({}, {})",
                board.team_id, board.name
            )));
        }
        let id = BoardId::new(next_id(&mut self.sequences.boards));
        let stored = Board::from_persisted(PersistedBoardData {
            id,
            name: board.name.clone(),
            description: board.description.clone(),
            team_id: board.team_id,
            status: BoardStatus::Open,
            creation_time: board.creation_time,
            end_time: None,
        });
        self.boards.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_board(&mut self, board: &Board) -> StoreResult<()> {
        let slot = self
            .boards
            .get_mut(&board.id())
            .ok_or_else(|| StoreError::not_found(Table::Boards, board.id()))?;
        *slot = board.clone();
        Ok(())
    }

    fn find_board(&mut self, id: BoardId) -> StoreResult<Option<Board>> {
        Ok(self.boards.get(&id).cloned())
    }

    fn lock_board(&mut self, id: BoardId) -> StoreResult<Option<Board>> {
        // The store-wide write lock already excludes other transactions.
        self.find_board(id)
    }

    fn find_board_by_name(
        &mut self,
        team: TeamId,
        name: &BoardName,
    ) -> StoreResult<Option<Board>> {
        Ok(self
            .boards
            .values()
            .find(|board| board.team_id() == team && board.name() == name)
            .cloned())
    }

    fn list_boards_for_team(&mut self, team: TeamId) -> StoreResult<Vec<Board>> {
        Ok(self
            .boards
            .values()
            .filter(|board| board.team_id() == team)
            .cloned()
            .collect())
    }

    fn insert_task(&mut self, task: &NewTask) -> StoreResult<Task> {
        let taken = self
            .tasks
            .values()
            .any(|existing| existing.board_id() == task.board_id && existing.title() == &task.title);
        if taken {
            return Err(StoreError::UniqueViolation(format!(
                "tasks(board_id, title) = ({}, {})",
                task.board_id, task.title
            )));
        }
        let id = TaskId::new(next_id(&mut self.sequences.tasks));
        let stored = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title.clone(),
            description: task.description.clone(),
            board_id: task.board_id,
            assignee: task.assignee,
            status: TaskStatus::Open,
            creation_time: task.creation_time,
        });
        self.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_task(&mut self, task: &Task) -> StoreResult<()> {
        let slot = self
            .tasks
            .get_mut(&task.id())
            .ok_or_else(|| StoreError::not_found(Table::Tasks, task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    fn find_task(&mut self, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn find_task_by_title(
        &mut self,
        board: BoardId,
        title: &TaskTitle,
    ) -> StoreResult<Option<Task>> {
        Ok(self
            .tasks
            .values()
            .find(|task| task.board_id() == board && task.title() == title)
            .cloned())
    }

    fn list_tasks_for_board(&mut self, board: BoardId) -> StoreResult<Vec<Task>> {
        Ok(self
            .tasks
            .values()
            .filter(|task| task.board_id() == board)
            .cloned()
            .collect())
    }
}
