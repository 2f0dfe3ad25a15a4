//! Domain model for user records.

mod error;
mod ids;
mod name;
mod user;

pub use error::UserDomainError;
pub use ids::UserId;
pub use name::{DisplayName, UserName};
pub use user::{NewUser, PersistedUserData, User};
