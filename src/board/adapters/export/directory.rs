//! Export sink writing artifacts into one capability-scoped directory.

use crate::board::ports::{
    ArtifactId, ExportError, ExportResult, ExportSink, export::validate_artifact_name,
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use std::sync::Arc;
use tracing::debug;

/// Export sink backed by a directory on the local filesystem.
///
/// The directory is opened once; artifacts can only be written directly
/// inside it.
#[derive(Debug, Clone)]
pub struct DirectoryExportSink {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
}

impl DirectoryExportSink {
    /// Opens `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> ExportResult<Self> {
        let path = root.as_ref();
        Dir::create_ambient_dir_all(path, ambient_authority()).map_err(ExportError::io)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(ExportError::io)?;
        Ok(Self {
            root: path.to_owned(),
            dir: Arc::new(dir),
        })
    }

    /// Returns the directory artifacts are written to.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}

#[async_trait]
impl ExportSink for DirectoryExportSink {
    async fn write_text_artifact(&self, name: &str, content: &str) -> ExportResult<ArtifactId> {
        validate_artifact_name(name)?;
        let dir = Arc::clone(&self.dir);
        let file_name = name.to_owned();
        let contents = content.to_owned();

        tokio::task::spawn_blocking(move || dir.write(&file_name, contents))
            .await
            .map_err(|err| ExportError::io(std::io::Error::other(err)))?
            .map_err(ExportError::io)?;

        let path = self.root.join(name);
        debug!(artifact = %path, "export artifact written");
        Ok(ArtifactId::new(path.into_string()))
    }
}
