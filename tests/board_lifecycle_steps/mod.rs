//! Step definitions for board lifecycle BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
