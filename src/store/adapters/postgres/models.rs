//! Diesel row models for record store persistence.

use super::schema::{project_boards, tasks, team_members, teams, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for users.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique user name.
    pub name: String,
    /// Display name.
    pub display_name: String,
}

/// Insert model for users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Unique user name.
    pub name: String,
    /// Display name.
    pub display_name: String,
}

/// Query result row for teams, without membership.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = teams)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TeamRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Unique team name.
    pub name: String,
    /// Team description.
    pub description: String,
    /// Administering user.
    pub admin_id: i64,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
}

/// Insert model for teams.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeamRow {
    /// Unique team name.
    pub name: String,
    /// Team description.
    pub description: String,
    /// Administering user.
    pub admin_id: i64,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
}

/// Insert model for membership pairs.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = team_members)]
pub struct TeamMemberRow {
    /// Team side of the pair.
    pub team_id: i64,
    /// User side of the pair.
    pub user_id: i64,
}

/// Query result row for boards.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = project_boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// Owning team.
    pub team_id: i64,
    /// Board status.
    pub status: String,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
    /// Closure timestamp.
    pub end_time: Option<DateTime<Utc>>,
}

/// Insert model for boards.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_boards)]
pub struct NewBoardRow {
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// Owning team.
    pub team_id: i64,
    /// Board status.
    pub status: String,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Owning board.
    pub board_id: i64,
    /// Assigned user.
    pub user_id: i64,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Owning board.
    pub board_id: i64,
    /// Assigned user.
    pub user_id: i64,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub creation_time: DateTime<Utc>,
}
