//! Domain model for teams and team membership.

mod error;
mod ids;
mod membership;
mod name;
mod team;

pub use error::TeamDomainError;
pub use ids::TeamId;
pub use membership::{MAX_MEMBERS_PER_CALL, MemberBatch};
pub use name::{TeamDescription, TeamName};
pub use team::{NewTeam, PersistedTeamData, Team};
