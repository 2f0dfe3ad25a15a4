//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::{
        adapters::export::InMemoryExportSink,
        services::{BoardExportService, BoardLifecycleService},
    },
    store::adapters::memory::InMemoryRecordStore,
    team::{
        domain::TeamId,
        services::{CreateTeamRequest, TeamRegistryService},
    },
    user::{
        domain::UserId,
        services::{CreateUserRequest, UserRegistryService},
    },
};

/// All services wired to one shared in-memory store.
pub struct Services {
    /// User registry.
    pub users: UserRegistryService<InMemoryRecordStore>,
    /// Team registry.
    pub teams: TeamRegistryService<InMemoryRecordStore, DefaultClock>,
    /// Board lifecycle.
    pub boards: BoardLifecycleService<InMemoryRecordStore, DefaultClock>,
    /// Board export.
    pub exports: BoardExportService<InMemoryRecordStore, InMemoryExportSink>,
    /// Sink the export service writes to.
    pub sink: Arc<InMemoryExportSink>,
}

impl Services {
    /// Registers a user whose display name is the capitalized user name.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    pub async fn user(&self, name: &str) -> Result<UserId, eyre::Report> {
        let display_name = name
            .chars()
            .enumerate()
            .map(|(index, ch)| if index == 0 { ch.to_ascii_uppercase() } else { ch })
            .collect::<String>();
        let user = self
            .users
            .create_user(CreateUserRequest::new(name, display_name))
            .await?;
        Ok(user.id())
    }

    /// Creates a team administered by `admin`.
    ///
    /// # Errors
    ///
    /// Returns an error if team creation fails.
    pub async fn team(&self, name: &str, admin: UserId) -> Result<TeamId, eyre::Report> {
        let team = self
            .teams
            .create_team(CreateTeamRequest::new(name, "integration team", admin))
            .await?;
        Ok(team.id())
    }
}

/// Provides a fresh set of services over one empty store.
#[fixture]
pub fn services() -> Services {
    let store = Arc::new(InMemoryRecordStore::new());
    let clock = Arc::new(DefaultClock);
    let sink = Arc::new(InMemoryExportSink::new());
    Services {
        users: UserRegistryService::new(Arc::clone(&store)),
        teams: TeamRegistryService::new(Arc::clone(&store), Arc::clone(&clock)),
        boards: BoardLifecycleService::new(Arc::clone(&store), clock),
        exports: BoardExportService::new(store, Arc::clone(&sink)),
        sink,
    }
}
