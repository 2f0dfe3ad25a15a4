//! Team registry.
//!
//! Teams have a unique immutable name, a mutable description, an admin user
//! reference, and a membership set that changes in batches of at most 50
//! users. Teams reference users by id and never own their lifecycle.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;
