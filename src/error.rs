//! Error types for audit log summarization.
//!
//! Parse failures are line-level and carry no position; the summarizer
//! wraps them in [`AuditError::Parse`] together with the line number.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a single log line into an event.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid structured audit record: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("could not parse audit line (expected at least 3 fields): {line}")]
    TooFewFields { line: String },

    #[error("could not parse audit line (part: {token:?}): {line}")]
    MissingSeparator { token: String, line: String },
}

/// Invalid user-supplied configuration, detected before any I/O.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid log type '{0}' (expected 'json' or 'legacy')")]
    UnknownLogFormat(String),

    #[error("unknown column '{0}'")]
    UnknownField(String),

    #[error("invalid sort field '{0}' (expected 'count' or 'user', optionally prefixed with '-')")]
    UnknownSortField(String),

    #[error("invalid ignore spec '{0}' (expected column=value)")]
    MalformedIgnore(String),
}

/// Failure to read or write a summary cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to access summary cache {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed summary cache: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported summary cache version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },

    #[error("summary cache contains duplicate entry {key}")]
    DuplicateEntry { key: String },
}

/// Top-level error for a summarization run.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("failed to read audit log: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub type Result<T> = std::result::Result<T, AuditError>;
