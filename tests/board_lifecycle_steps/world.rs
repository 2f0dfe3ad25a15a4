//! Shared world state for board lifecycle BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::{
        adapters::export::InMemoryExportSink,
        domain::{BoardId, TaskId},
        services::{BoardExportService, BoardLifecycleService},
    },
    error::FailureKind,
    store::adapters::memory::InMemoryRecordStore,
    team::{domain::TeamId, services::TeamRegistryService},
    user::{domain::UserId, services::UserRegistryService},
};

/// Scenario world for board lifecycle behaviour tests.
pub struct BoardWorld {
    /// User registry.
    pub users: UserRegistryService<InMemoryRecordStore>,
    /// Team registry.
    pub teams: TeamRegistryService<InMemoryRecordStore, DefaultClock>,
    /// Board lifecycle service under test.
    pub boards: BoardLifecycleService<InMemoryRecordStore, DefaultClock>,
    /// Board export service.
    pub exports: BoardExportService<InMemoryRecordStore, InMemoryExportSink>,
    /// Sink receiving exported reports.
    pub sink: Arc<InMemoryExportSink>,
    /// Registered users by name.
    pub user_ids: HashMap<String, UserId>,
    /// Team the scenario's boards belong to.
    pub team: Option<TeamId>,
    /// Board the scenario operates on.
    pub board: Option<BoardId>,
    /// Most recently created task.
    pub task: Option<TaskId>,
    /// Failure category of the last rejected request.
    pub last_failure: Option<FailureKind>,
    /// Report written by the last export.
    pub last_report: Option<String>,
}

impl BoardWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryRecordStore::new());
        let clock = Arc::new(DefaultClock);
        let sink = Arc::new(InMemoryExportSink::new());
        Self {
            users: UserRegistryService::new(Arc::clone(&store)),
            teams: TeamRegistryService::new(Arc::clone(&store), Arc::clone(&clock)),
            boards: BoardLifecycleService::new(Arc::clone(&store), clock),
            exports: BoardExportService::new(store, Arc::clone(&sink)),
            sink,
            user_ids: HashMap::new(),
            team: None,
            board: None,
            task: None,
            last_failure: None,
            last_report: None,
        }
    }

    /// Looks up a user registered earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no user with `name` was registered.
    pub fn user(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.user_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("user '{name}' was not registered in this scenario"))
    }

    /// Returns the scenario's board.
    ///
    /// # Errors
    ///
    /// Returns an error if no board has been created yet.
    pub fn board(&self) -> Result<BoardId, eyre::Report> {
        self.board
            .ok_or_else(|| eyre::eyre!("no board in scenario world"))
    }

    /// Returns the scenario's most recent task.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn task(&self) -> Result<TaskId, eyre::Report> {
        self.task
            .ok_or_else(|| eyre::eyre!("no task in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
