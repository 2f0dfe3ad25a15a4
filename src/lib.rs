//! Taskboard: a project-management data service.
//!
//! The crate manages users, teams, and project boards with tasks. Its core
//! is the board lifecycle: boards are created open, accept tasks while open,
//! and close only once every task on them is complete.
//!
//! # Architecture
//!
//! Each resource group is a bounded context following hexagonal
//! architecture:
//!
//! - **Domain**: validated values, aggregates, and lifecycle rules
//! - **Services**: request structs and orchestration over the record store
//! - **Ports/Adapters**: the record store and export sink contracts with
//!   in-memory, `PostgreSQL`, and filesystem implementations
//!
//! # Modules
//!
//! - [`user`]: user registration and lookup
//! - [`team`]: teams and team membership
//! - [`board`]: board and task lifecycle plus text export
//! - [`store`]: transactional record store shared by every service
//! - [`gateway`]: JSON request/response boundary
//! - [`config`], [`logging`], [`error`]: ambient configuration, tracing
//!   setup, and the failure taxonomy

pub mod board;
pub mod config;
pub mod error;
pub mod gateway;
mod ids;
pub mod logging;
pub mod store;
pub mod team;
mod text;
pub mod user;
