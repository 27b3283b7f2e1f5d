use std::fmt;
use std::io;

use thiserror::Error;

/// The run configuration cannot start a search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no source method: a source file path is required")]
    MissingSource,
    #[error("no destination method: a destination file path is required")]
    MissingDestination,
    #[error("worker count must be at least 1")]
    InvalidWorkers,
    #[error("job prefix {0} is out of range (expected 0..=32)")]
    InvalidJobPrefix(u8),
}

/// Malformed CIDR text handed to the range-from-text entry point.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeParseError {
    #[error("missing '/prefix' in range '{0}'")]
    MissingPrefix(String),
    #[error("invalid IPv4 address '{0}'")]
    InvalidAddress(String),
    #[error("invalid prefix '{0}'")]
    InvalidPrefix(String),
    #[error("prefix /{0} is longer than 32 bits")]
    PrefixTooLong(u8),
}

/// Which file an IO failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoRole {
    Source,
    Destination,
}

impl fmt::Display for IoRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoRole::Source => f.write_str("source"),
            IoRole::Destination => f.write_str("destination"),
        }
    }
}

/// Failures that end a whole search run.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{role} io failure: {source}")]
    Io {
        role: IoRole,
        #[source]
        source: io::Error,
    },
    #[error("failed to spawn {0} thread: {1}")]
    Spawn(&'static str, #[source] io::Error),
    #[error("worker #{0} panicked")]
    WorkerPanicked(usize),
    #[error("result sink panicked")]
    SinkPanicked,
}

impl SearchError {
    pub fn source_io(source: io::Error) -> Self {
        SearchError::Io {
            role: IoRole::Source,
            source,
        }
    }

    pub fn destination_io(source: io::Error) -> Self {
        SearchError::Io {
            role: IoRole::Destination,
            source,
        }
    }
}
