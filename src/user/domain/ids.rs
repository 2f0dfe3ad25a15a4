//! Identifier type for user records.

use crate::ids::record_id;

record_id! {
    /// Store-assigned identifier of a user record.
    UserId
}
