//! User registration and lookup.
//!
//! Users carry a unique, immutable name and a mutable display name. The
//! registry validates input, enforces name uniqueness inside a store
//! transaction, and resolves team membership through the record store.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;
