//! Export sink adapters.

mod directory;
mod memory;

pub use directory::DirectoryExportSink;
pub use memory::InMemoryExportSink;
