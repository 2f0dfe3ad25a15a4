//! Service configuration read from environment variables.
//!
//! ```bash
//! TASKBOARD_DATABASE_URL=postgres://localhost/taskboard  # optional, in-memory when unset
//! TASKBOARD_POOL_SIZE=4                                  # connections, at least 1
//! TASKBOARD_EXPORT_DIR=out                               # board reports
//! TASKBOARD_LOG=info                                     # tracing filter directives
//! ```

use camino::Utf8PathBuf;
use std::env::{self, VarError};
use thiserror::Error;

/// Variable naming the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "TASKBOARD_DATABASE_URL";
/// Variable setting the connection pool size.
pub const POOL_SIZE_VAR: &str = "TASKBOARD_POOL_SIZE";
/// Variable naming the export directory.
pub const EXPORT_DIR_VAR: &str = "TASKBOARD_EXPORT_DIR";
/// Variable holding the log filter.
pub const LOG_FILTER_VAR: &str = "TASKBOARD_LOG";

const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_EXPORT_DIR: &str = "out";
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration for the taskboard service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `PostgreSQL` URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// Directory receiving exported board reports.
    pub export_dir: Utf8PathBuf,
    /// `tracing` filter directives.
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            export_dir: Utf8PathBuf::from(DEFAULT_EXPORT_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds bytes that are not valid Unicode.
    #[error("{0} is not valid unicode")]
    NotUnicode(&'static str),

    /// A variable is set but blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),

    /// The pool size is not a positive integer.
    #[error("TASKBOARD_POOL_SIZE must be a positive integer, got '{0}'")]
    InvalidPoolSize(String),
}

impl ServiceConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Loads configuration through `lookup`, which behaves like
    /// [`std::env::var`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();
        let database_url = read(&lookup, DATABASE_URL_VAR)?;
        let pool_size = read(&lookup, POOL_SIZE_VAR)?
            .map(|raw| parse_pool_size(&raw))
            .transpose()?
            .unwrap_or(defaults.pool_size);
        let export_dir = read(&lookup, EXPORT_DIR_VAR)?
            .map_or(defaults.export_dir, Utf8PathBuf::from);
        let log_filter = read(&lookup, LOG_FILTER_VAR)?.unwrap_or(defaults.log_filter);

        Ok(Self {
            database_url,
            pool_size,
            export_dir,
            log_filter,
        })
    }
}

fn read<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::Empty(name)),
        Ok(value) => Ok(Some(value.trim().to_owned())),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(name)),
    }
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    raw.parse::<u32>()
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| ConfigError::InvalidPoolSize(raw.to_owned()))
}
