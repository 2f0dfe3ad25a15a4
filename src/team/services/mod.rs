//! Application services for team management.

mod registry;

pub use registry::{
    CreateTeamRequest, TeamRegistryError, TeamRegistryResult, TeamRegistryService,
    UpdateTeamRequest,
};
