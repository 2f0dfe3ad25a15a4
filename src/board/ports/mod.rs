//! Port contracts for board collaborators outside the record store.

pub mod export;

#[cfg(test)]
pub use export::MockExportSink;
pub use export::{ArtifactId, ExportError, ExportResult, ExportSink};
