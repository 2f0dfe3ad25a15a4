//! Application services for user registration.

mod registry;

pub use registry::{
    CreateUserRequest, UpdateUserRequest, UserRegistryError, UserRegistryResult,
    UserRegistryService,
};
