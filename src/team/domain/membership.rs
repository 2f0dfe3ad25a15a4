//! Bounded batches of users for membership changes.

use super::TeamDomainError;
use crate::user::domain::UserId;
use std::collections::BTreeSet;

/// Largest number of user ids a single add or remove call may carry.
pub const MAX_MEMBERS_PER_CALL: usize = 50;

/// Deduplicated set of user ids named by one membership change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberBatch(BTreeSet<UserId>);

impl MemberBatch {
    /// Creates a batch from the ids supplied by a caller.
    ///
    /// The cap applies to the ids as supplied, before duplicates collapse.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::TooManyMembers`] when more than
    /// [`MAX_MEMBERS_PER_CALL`] ids are supplied.
    pub fn new(users: impl IntoIterator<Item = UserId>) -> Result<Self, TeamDomainError> {
        let supplied: Vec<UserId> = users.into_iter().collect();
        if supplied.len() > MAX_MEMBERS_PER_CALL {
            return Err(TeamDomainError::TooManyMembers(supplied.len()));
        }
        Ok(Self(supplied.into_iter().collect()))
    }

    /// Iterates the batch in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.0.iter().copied()
    }

    /// Returns the number of distinct ids in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the batch names no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
