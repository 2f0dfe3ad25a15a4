//! In-memory integration tests for the taskboard services.
//!
//! Tests are organized into modules by functionality:
//! - `board_lifecycle_tests`: Board and task state machine across services
//! - `team_membership_tests`: Membership batches and user team lookups
//! - `gateway_tests`: JSON operations end to end

mod in_memory {
    pub mod helpers;

    mod board_lifecycle_tests;
    mod gateway_tests;
    mod team_membership_tests;
}
