//! Record store shared by the user, team, and board services.
//!
//! The store is the only collaborator the services share: no service calls
//! another, they all read and write through [`RecordStore`]. Each operation
//! runs its read-validate-write sequence inside one
//! [`RecordStore::atomically`] call so that uniqueness checks and lifecycle
//! preconditions cannot race with concurrent writers.
//!
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod ports;

pub use ports::{RecordStore, StoreError, StoreResult, StoreTransaction, Table};
