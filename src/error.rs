use std::path::PathBuf;
use std::{fmt, io};

/// Failures of one generation pass. Any of these aborts the pass; outputs
/// already written are left in place.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("failed to create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to format annotation text")]
    Format(#[from] fmt::Error),
}

/// Failures while locating and decoding descriptor documents.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid glob pattern `{pattern}`")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error(transparent)]
    GlobEntry(#[from] glob::GlobError),
    #[error("glob pattern matched no files: {0}")]
    NoMatch(String),
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("jq filter failed on {}: {message}", path.display())]
    Jq { path: PathBuf, message: String },
}
