//! String-encoded external boundary.
//!
//! A caller sends `{"operation": "<name>", "request": {...}}` and receives
//! `{"status": "ok", "result": ...}` or
//! `{"status": "error", "kind": "...", "message": "..."}`. Requests are
//! decoded into [`GatewayRequest`] and dispatched to the typed services;
//! JSON never travels past this module.

mod request;
mod response;


pub use request::{
    AddTaskBody, BoardRef, BoardRequest, CreateBoardBody, CreateTeamBody, CreateUserBody,
    GatewayRequest, MembershipBody, TeamFields, TeamRef, TeamRequest, UpdateTaskStatusBody,
    UpdateTeamBody, UpdateUserBody, UserFields, UserRef, UserRequest,
};
pub use response::GatewayResponse;

use crate::{
    board::{
        domain::BoardId,
        ports::{ArtifactId, ExportSink},
        services::{
            AddTaskRequest, BoardExportError, BoardExportService, BoardLifecycleError,
            BoardLifecycleService, CreateBoardRequest, UpdateTaskStatusRequest,
        },
    },
    error::FailureKind,
    store::RecordStore,
    team::services::{CreateTeamRequest, TeamRegistryError, TeamRegistryService, UpdateTeamRequest},
    user::services::{CreateUserRequest, UpdateUserRequest, UserRegistryError, UserRegistryService},
};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced through the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request is not valid JSON or does not fit the operation.
    #[error("malformed request: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The operation name is not recognised.
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    /// A user registry operation failed.
    #[error(transparent)]
    User(#[from] UserRegistryError),

    /// A team registry operation failed.
    #[error(transparent)]
    Team(#[from] TeamRegistryError),

    /// A board lifecycle operation failed.
    #[error(transparent)]
    Board(#[from] BoardLifecycleError),

    /// A board export failed.
    #[error(transparent)]
    Export(#[from] BoardExportError),

    /// The result could not be encoded.
    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl GatewayError {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Malformed(_) | Self::UnknownOperation(_) => FailureKind::Validation,
            Self::User(err) => err.kind(),
            Self::Team(err) => err.kind(),
            Self::Board(err) => err.kind(),
            Self::Export(err) => err.kind(),
            Self::Encode(_) => FailureKind::Storage,
        }
    }
}

/// Dispatches decoded requests to the user, team, and board services.
#[derive(Clone)]
pub struct Gateway<S, C, X>
where
    S: RecordStore,
    C: Clock + Send + Sync,
    X: ExportSink,
{
    users: UserRegistryService<S>,
    teams: TeamRegistryService<S, C>,
    boards: BoardLifecycleService<S, C>,
    exports: BoardExportService<S, X>,
}

impl<S, C, X> Gateway<S, C, X>
where
    S: RecordStore,
    C: Clock + Send + Sync,
    X: ExportSink,
{
    /// Creates a gateway whose services share one store and clock.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<C>, sink: Arc<X>) -> Self {
        Self {
            users: UserRegistryService::new(Arc::clone(&store)),
            teams: TeamRegistryService::new(Arc::clone(&store), Arc::clone(&clock)),
            boards: BoardLifecycleService::new(Arc::clone(&store), clock),
            exports: BoardExportService::new(store, sink),
        }
    }

    /// Handles one JSON request and returns the JSON response.
    pub async fn handle(&self, raw: &str) -> String {
        self.respond(raw).await.to_json()
    }

    /// Handles one JSON request and returns the typed response.
    pub async fn respond(&self, raw: &str) -> GatewayResponse {
        let outcome = match GatewayRequest::parse(raw) {
            Ok(request) => self.dispatch(request).await,
            Err(err) => Err(err),
        };
        match outcome {
            Ok(result) => GatewayResponse::Ok { result },
            Err(err) => {
                debug!(kind = %err.kind(), error = %err, "gateway request failed");
                GatewayResponse::Error {
                    kind: err.kind(),
                    message: err.to_string(),
                }
            }
        }
    }

    /// Runs one decoded request.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] wrapping the failing service's error.
    pub async fn dispatch(&self, request: GatewayRequest) -> Result<Value, GatewayError> {
        match request {
            GatewayRequest::User(user) => self.dispatch_user(user).await,
            GatewayRequest::Team(team) => self.dispatch_team(team).await,
            GatewayRequest::Board(board) => self.dispatch_board(board).await,
        }
    }

    async fn dispatch_user(&self, request: UserRequest) -> Result<Value, GatewayError> {
        match request {
            UserRequest::Create(body) => encode(
                self.users
                    .create_user(CreateUserRequest::new(body.name, body.display_name))
                    .await?,
            ),
            UserRequest::List => encode(self.users.list_users().await?),
            UserRequest::Describe(user) => encode(self.users.describe_user(user.id).await?),
            UserRequest::Update(body) => {
                encode(self.users.update_user(update_user_request(body)).await?)
            }
            UserRequest::Teams(user) => encode(self.users.get_user_teams(user.id).await?),
        }
    }

    async fn dispatch_team(&self, request: TeamRequest) -> Result<Value, GatewayError> {
        match request {
            TeamRequest::Create(body) => encode(
                self.teams
                    .create_team(CreateTeamRequest::new(
                        body.name,
                        body.description,
                        body.admin,
                    ))
                    .await?,
            ),
            TeamRequest::List => encode(self.teams.list_teams().await?),
            TeamRequest::Describe(team) => encode(self.teams.describe_team(team.id).await?),
            TeamRequest::Update(body) => {
                encode(self.teams.update_team(update_team_request(body)).await?)
            }
            TeamRequest::AddUsers(body) => {
                encode(self.teams.add_users_to_team(body.id, body.users).await?)
            }
            TeamRequest::RemoveUsers(body) => encode(
                self.teams
                    .remove_users_from_team(body.id, body.users)
                    .await?,
            ),
            TeamRequest::Users(team) => encode(self.teams.list_team_users(team.id).await?),
        }
    }

    async fn dispatch_board(&self, request: BoardRequest) -> Result<Value, GatewayError> {
        match request {
            BoardRequest::Create(body) => {
                encode(self.boards.create_board(create_board_request(body)).await?)
            }
            BoardRequest::Close(board) => encode(self.boards.close_board(board.id).await?),
            BoardRequest::AddTask(body) => encode(self.boards.add_task(add_task_request(body)).await?),
            BoardRequest::UpdateTaskStatus(body) => encode(
                self.boards
                    .update_task_status(UpdateTaskStatusRequest::new(body.id, body.status))
                    .await?,
            ),
            BoardRequest::List(team) => encode(self.boards.list_boards(team.id).await?),
            BoardRequest::Describe(board) => encode(self.boards.describe_board(board.id).await?),
            BoardRequest::Tasks(board) => encode(self.boards.list_tasks(board.id).await?),
            BoardRequest::Export(board) => {
                let artifact = self.exports.export_board(board.id).await?;
                encode(ExportResponse {
                    id: board.id,
                    out_file: artifact,
                })
            }
        }
    }
}

#[derive(Serialize)]
struct ExportResponse {
    id: BoardId,
    out_file: ArtifactId,
}

fn update_user_request(body: UpdateUserBody) -> UpdateUserRequest {
    let UpdateUserBody { id, user } = body;
    let mut request = UpdateUserRequest::new(id, user.display_name);
    if let Some(name) = user.name {
        request = request.with_name(name);
    }
    request
}

fn update_team_request(body: UpdateTeamBody) -> UpdateTeamRequest {
    let UpdateTeamBody { id, team } = body;
    let mut request = UpdateTeamRequest::new(id, team.description);
    if let Some(name) = team.name {
        request = request.with_name(name);
    }
    if let Some(admin) = team.admin {
        request = request.with_admin(admin);
    }
    request
}

fn create_board_request(body: CreateBoardBody) -> CreateBoardRequest {
    let CreateBoardBody {
        name,
        description,
        team_id,
        creation_time,
    } = body;
    let mut request = CreateBoardRequest::new(name, description, team_id);
    if let Some(timestamp) = creation_time {
        request = request.with_creation_time(timestamp);
    }
    request
}

fn add_task_request(body: AddTaskBody) -> AddTaskRequest {
    let AddTaskBody {
        title,
        description,
        user_id,
        board_id,
        creation_time,
    } = body;
    let mut request = AddTaskRequest::new(board_id, title, description, user_id);
    if let Some(timestamp) = creation_time {
        request = request.with_creation_time(timestamp);
    }
    request
}

fn encode(result: impl Serialize) -> Result<Value, GatewayError> {
    serde_json::to_value(result).map_err(GatewayError::Encode)
}
