//! Errors that surface to the top of a scan.
//!
//! Pattern misses inside the annotator are not errors; they degrade to empty
//! fields. Only file access, configuration and serialization faults end up here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot find input file at {}", .0.display())]
    MissingInput(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize entries: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
