//! Project boards and their tasks.
//!
//! This is the lifecycle core of the service. A board is created open under
//! a team, accepts tasks while open, and closes once every task on it is
//! complete. Closed boards are terminal. Boards can be exported as text
//! reports through an [`ports::ExportSink`].
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
