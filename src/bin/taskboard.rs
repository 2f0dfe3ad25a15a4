//! Serves taskboard requests over standard input and output.
//!
//! Usage:
//!
//! ```text
//! taskboard < requests.jsonl
//! ```
//!
//! Each input line is one JSON request such as
//! `{"operation": "create_user", "request": {"name": "ada", "display_name": "Ada"}}`.
//! Each response is written as one JSON line. Configuration is read from
//! `TASKBOARD_*` environment variables; logs go to standard error.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use taskboard::{
    board::{
        adapters::export::DirectoryExportSink,
        ports::{ExportError, ExportSink},
    },
    config::{ConfigError, ServiceConfig},
    gateway::Gateway,
    logging::{self, LoggingError},
    store::{
        RecordStore, StoreError,
        adapters::{memory::InMemoryRecordStore, postgres::PostgresRecordStore},
    },
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::runtime::Builder;
use tracing::info;

/// Errors that stop the service.
#[derive(Debug, Error)]
enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error("export directory unavailable: {0}")]
    Export(#[from] ExportError),
    #[error("record store unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("request stream failed: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> Result<(), ServiceError> {
    let config = ServiceConfig::from_env()?;
    logging::init(&config.log_filter)?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ServiceError::RuntimeInit)?;
    let sink = Arc::new(DirectoryExportSink::open(&config.export_dir)?);
    let clock = Arc::new(DefaultClock);

    if let Some(url) = config.database_url.as_deref() {
        let store = Arc::new(PostgresRecordStore::connect(url, config.pool_size)?);
        info!(pool_size = config.pool_size, "using PostgreSQL record store");
        return runtime.block_on(async move {
            store.ensure_schema().await?;
            let gateway = Gateway::new(store, clock, sink);
            serve(&gateway).await
        });
    }

    info!("using in-memory record store");
    let store = Arc::new(InMemoryRecordStore::new());
    let gateway = Gateway::new(store, clock, sink);
    runtime.block_on(serve(&gateway))
}

async fn serve<S, C, X>(gateway: &Gateway<S, C, X>) -> Result<(), ServiceError>
where
    S: RecordStore,
    C: Clock + Send + Sync,
    X: ExportSink,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = gateway.handle(&line).await;
        stdout.write_all(response.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("request stream closed");
    Ok(())
}
