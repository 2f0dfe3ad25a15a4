//! Failure taxonomy shared by every service.
//!
//! Each service error maps onto one [`FailureKind`] so callers at the
//! external boundary can branch on the category without matching every
//! variant.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed or oversized input.
    Validation,
    /// A uniqueness rule was violated.
    Conflict,
    /// A state-machine rule rejected the operation.
    Precondition,
    /// A referenced entity does not exist.
    NotFound,
    /// The backing store failed.
    Storage,
}

impl FailureKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Conflict => "conflict",
            Self::Precondition => "precondition",
            Self::NotFound => "not_found",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
