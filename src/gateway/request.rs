//! Typed gateway requests decoded from the JSON envelope.

use super::GatewayError;
use crate::{
    board::domain::{BoardId, TaskId},
    team::domain::TeamId,
    user::domain::UserId,
};
use chrono::{DateTime, Utc};
use serde::{
    Deserialize, Deserializer,
    de::{self, DeserializeOwned, Unexpected},
};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    operation: String,
    #[serde(default)]
    request: Value,
}

/// Reference to a user by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRef {
    /// User identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: UserId,
}

/// Reference to a team by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamRef {
    /// Team identifier.
    #[serde(alias = "team_id")]
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TeamId,
}

/// Reference to a board by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardRef {
    /// Board identifier.
    #[serde(alias = "board_id")]
    #[serde(deserialize_with = "deserialize_id")]
    pub id: BoardId,
}

/// Body of `create_user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserBody {
    /// Unique user name.
    pub name: String,
    /// Display name.
    pub display_name: String,
}

/// User fields carried by `update_user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserFields {
    /// Echoed user name, which must not change.
    #[serde(default)]
    pub name: Option<String>,
    /// New display name.
    pub display_name: String,
}

/// Body of `update_user`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserBody {
    /// User identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: UserId,
    /// Replacement fields.
    pub user: UserFields,
}

/// Body of `create_team`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTeamBody {
    /// Unique team name.
    pub name: String,
    /// Team description.
    #[serde(default)]
    pub description: String,
    /// Administering user.
    #[serde(deserialize_with = "deserialize_id")]
    pub admin: UserId,
}

/// Team fields carried by `update_team`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamFields {
    /// Echoed team name, which must not change.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    pub description: String,
    /// New administering user.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub admin: Option<UserId>,
}

/// Body of `update_team`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTeamBody {
    /// Team identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TeamId,
    /// Replacement fields.
    pub team: TeamFields,
}

/// Body of `add_users_to_team` and `remove_users_from_team`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MembershipBody {
    /// Team identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TeamId,
    /// Users to add or remove.
    #[serde(deserialize_with = "deserialize_id_list")]
    pub users: Vec<UserId>,
}

/// Body of `create_board`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBoardBody {
    /// Board name.
    pub name: String,
    /// Board description.
    #[serde(default)]
    pub description: String,
    /// Owning team.
    #[serde(deserialize_with = "deserialize_id")]
    pub team_id: TeamId,
    /// Creation timestamp; the clock is used when absent.
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
}

/// Body of `add_task`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddTaskBody {
    /// Task title.
    pub title: String,
    /// Task description.
    #[serde(default)]
    pub description: String,
    /// Assigned user.
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: UserId,
    /// Owning board.
    #[serde(deserialize_with = "deserialize_id")]
    pub board_id: BoardId,
    /// Creation timestamp; the clock is used when absent.
    #[serde(default)]
    pub creation_time: Option<DateTime<Utc>>,
}

/// Body of `update_task_status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateTaskStatusBody {
    /// Task identifier.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TaskId,
    /// Requested status name.
    pub status: String,
}

/// User registry operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRequest {
    /// Register a user.
    Create(CreateUserBody),
    /// List every user.
    List,
    /// Read one user.
    Describe(UserRef),
    /// Replace a user's display name.
    Update(UpdateUserBody),
    /// List the teams a user belongs to.
    Teams(UserRef),
}

/// Team registry operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeamRequest {
    /// Create a team.
    Create(CreateTeamBody),
    /// List every team.
    List,
    /// Read one team.
    Describe(TeamRef),
    /// Update a team's description or admin.
    Update(UpdateTeamBody),
    /// Add members to a team.
    AddUsers(MembershipBody),
    /// Remove members from a team.
    RemoveUsers(MembershipBody),
    /// List a team's members.
    Users(TeamRef),
}

/// Board lifecycle or export operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardRequest {
    /// Create a board.
    Create(CreateBoardBody),
    /// Close a board.
    Close(BoardRef),
    /// Add a task to a board.
    AddTask(AddTaskBody),
    /// Move a task to another status.
    UpdateTaskStatus(UpdateTaskStatusBody),
    /// List a team's boards.
    List(TeamRef),
    /// Read one board.
    Describe(BoardRef),
    /// List a board's tasks.
    Tasks(BoardRef),
    /// Export a board as a text report.
    Export(BoardRef),
}

/// Operation requested through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayRequest {
    /// User registry operation.
    User(UserRequest),
    /// Team registry operation.
    Team(TeamRequest),
    /// Board operation.
    Board(BoardRequest),
}

impl GatewayRequest {
    /// Decodes `{"operation": "<name>", "request": {...}}`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Malformed`] when the JSON or the request body
    /// does not match the operation, or [`GatewayError::UnknownOperation`]
    /// for an unrecognised operation name.
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        let Envelope { operation, request } =
            serde_json::from_str(raw).map_err(GatewayError::Malformed)?;

        if let Some(user) = UserRequest::parse(&operation, &request) {
            return user.map(Self::User);
        }
        if let Some(team) = TeamRequest::parse(&operation, &request) {
            return team.map(Self::Team);
        }
        if let Some(board) = BoardRequest::parse(&operation, &request) {
            return board.map(Self::Board);
        }
        Err(GatewayError::UnknownOperation(operation))
    }
}

impl UserRequest {
    fn parse(operation: &str, request: &Value) -> Option<Result<Self, GatewayError>> {
        let parsed = match operation {
            "create_user" => decode(request).map(Self::Create),
            "list_users" => Ok(Self::List),
            "describe_user" => decode(request).map(Self::Describe),
            "update_user" => decode(request).map(Self::Update),
            "get_user_teams" => decode(request).map(Self::Teams),
            _ => return None,
        };
        Some(parsed)
    }
}

impl TeamRequest {
    fn parse(operation: &str, request: &Value) -> Option<Result<Self, GatewayError>> {
        let parsed = match operation {
            "create_team" => decode(request).map(Self::Create),
            "list_teams" => Ok(Self::List),
            "describe_team" => decode(request).map(Self::Describe),
            "update_team" => decode(request).map(Self::Update),
            "add_users_to_team" => decode(request).map(Self::AddUsers),
            "remove_users_from_team" => decode(request).map(Self::RemoveUsers),
            "list_team_users" => decode(request).map(Self::Users),
            _ => return None,
        };
        Some(parsed)
    }
}

impl BoardRequest {
    fn parse(operation: &str, request: &Value) -> Option<Result<Self, GatewayError>> {
        let parsed = match operation {
            "create_board" => decode(request).map(Self::Create),
            "close_board" => decode(request).map(Self::Close),
            "add_task" => decode(request).map(Self::AddTask),
            "update_task_status" => decode(request).map(Self::UpdateTaskStatus),
            "list_boards" => decode(request).map(Self::List),
            "describe_board" => decode(request).map(Self::Describe),
            "list_tasks" => decode(request).map(Self::Tasks),
            "export_board" => decode(request).map(Self::Export),
            _ => return None,
        };
        Some(parsed)
    }
}

/// Identifier as it appears on the wire: a JSON number or a decimal string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    fn into_raw<E: de::Error>(self) -> Result<i64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text.trim().parse().map_err(|_| {
                E::invalid_value(Unexpected::Str(&text), &"a decimal record id")
            }),
        }
    }
}

fn deserialize_id<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    WireId::deserialize(deserializer)?
        .into_raw()
        .map(T::from)
}

fn deserialize_optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    Option::<WireId>::deserialize(deserializer)?
        .map(|id| id.into_raw().map(T::from))
        .transpose()
}

fn deserialize_id_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    Vec::<WireId>::deserialize(deserializer)?
        .into_iter()
        .map(|id| id.into_raw().map(T::from))
        .collect()
}

fn decode<T: DeserializeOwned>(request: &Value) -> Result<T, GatewayError> {
    T::deserialize(request).map_err(GatewayError::Malformed)
}
