//! Export sink port for rendered board reports.

use crate::error::FailureKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use thiserror::Error;

/// Identifier of a written artifact, such as its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Wraps an artifact identifier produced by a sink.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result type for export sink operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Destination for human-readable text artifacts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExportSink: Send + Sync {
    /// Writes `content` under `name`, replacing any artifact of that name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidArtifactName`] when `name` is not a
    /// plain file name, or [`ExportError::Io`] when writing fails.
    async fn write_text_artifact(&self, name: &str, content: &str) -> ExportResult<ArtifactId>;
}

/// Errors returned by export sinks.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// The artifact name is empty or escapes the sink.
    #[error("invalid artifact name '{0}'")]
    InvalidArtifactName(String),

    /// Writing the artifact failed.
    #[error("failed to write artifact: {0}")]
    Io(Arc<std::io::Error>),
}

impl ExportError {
    /// Wraps an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }

    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidArtifactName(_) => FailureKind::Validation,
            Self::Io(_) => FailureKind::Storage,
        }
    }
}

/// Checks that `name` is a single path component.
///
/// # Errors
///
/// Returns [`ExportError::InvalidArtifactName`] for empty names, names
/// containing a path separator, and the `.` and `..` components.
pub fn validate_artifact_name(name: &str) -> ExportResult<()> {
    let invalid = name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(ExportError::InvalidArtifactName(name.to_owned()));
    }
    Ok(())
}
