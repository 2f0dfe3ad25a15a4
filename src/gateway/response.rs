//! JSON response envelope.

use crate::error::FailureKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one gateway call, as written back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GatewayResponse {
    /// The operation succeeded.
    Ok {
        /// Operation result.
        result: Value,
    },
    /// The operation failed.
    Error {
        /// Failure category.
        kind: FailureKind,
        /// Human-readable failure description.
        message: String,
    },
}

impl GatewayResponse {
    /// Encodes the response as a single JSON line.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            format!(
                r#"{{"status":"error","kind":"storage","message":"failed to encode response: {}"}}"#,
                err.to_string().replace('"', "'")
            )
        })
    }
}
