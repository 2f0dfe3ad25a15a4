//! Identifier type for team records.

use crate::ids::record_id;

record_id! {
    /// Store-assigned identifier of a team record.
    TeamId
}
