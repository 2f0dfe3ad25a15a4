//! Structured logging setup.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        /// Directives as supplied.
        filter: String,
        /// Parser failure.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("log subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Builds an [`EnvFilter`] from comma-separated directives.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidFilter`] when a directive is malformed.
pub fn build_filter(filter: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(filter).map_err(|source| LoggingError::InvalidFilter {
        filter: filter.to_owned(),
        source,
    })
}

/// Installs a global `tracing` subscriber writing to standard error.
///
/// Standard output is left to the request/response stream.
///
/// # Errors
///
/// Returns [`LoggingError`] when `filter` is invalid or a subscriber is
/// already installed.
pub fn init(filter: &str) -> Result<(), LoggingError> {
    fmt()
        .with_env_filter(build_filter(filter)?)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|err| LoggingError::AlreadyInstalled(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("info")]
    #[case("taskboard=debug,diesel=warn")]
    fn valid_filters_parse(#[case] filter: &str) {
        assert!(build_filter(filter).is_ok());
    }

    #[rstest]
    fn invalid_filter_is_reported() {
        let result = build_filter("taskboard=loudest");
        assert!(matches!(result, Err(LoggingError::InvalidFilter { .. })));
    }
}
