//! In-memory export sink for tests and ephemeral runs.

use crate::board::ports::{
    ArtifactId, ExportError, ExportResult, ExportSink, export::validate_artifact_name,
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

/// Thread-safe in-memory export sink.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExportSink {
    artifacts: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryExportSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the content written under `name`, if any.
    #[must_use]
    pub fn artifact(&self, name: &str) -> Option<String> {
        self.artifacts
            .read()
            .ok()
            .and_then(|artifacts| artifacts.get(name).cloned())
    }
}

#[async_trait]
impl ExportSink for InMemoryExportSink {
    async fn write_text_artifact(&self, name: &str, content: &str) -> ExportResult<ArtifactId> {
        validate_artifact_name(name)?;
        let mut artifacts = self
            .artifacts
            .write()
            .map_err(|err| ExportError::io(std::io::Error::other(err.to_string())))?;
        artifacts.insert(name.to_owned(), content.to_owned());
        Ok(ArtifactId::new(name))
    }
}
