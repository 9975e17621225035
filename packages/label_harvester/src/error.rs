//! Failures of a single unit of work (one fetch, one parse, one download) and
//! what the crawl does about them.

use log::{debug, error, warn};
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Error raised by one pipeline stage.
#[derive(Debug, Error)]
pub enum StageError {
    /// Request could not be sent, timed out, or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body is not the expected JSON shape.
    #[error("failed to parse {what} JSON: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Response decoded but carried nothing usable.
    #[error("no usable data: {0}")]
    NoData(String),

    #[error("download failed for {url}: {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("invalid content type for {url}: {content_type} (expected application/pdf)")]
    ContentType { url: String, content_type: String },

    #[error("downloaded 0 bytes for {url}; not creating file")]
    EmptyBody { url: String },

    #[error("failed to write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fieldless view of [`StageError`], used for counting and policy decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Decode,
    NoData,
    HttpStatus,
    ContentType,
    EmptyBody,
    Filesystem,
}

impl StageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StageError::Transport { .. } => ErrorKind::Transport,
            StageError::Decode { .. } => ErrorKind::Decode,
            StageError::NoData(_) => ErrorKind::NoData,
            StageError::HttpStatus { .. } => ErrorKind::HttpStatus,
            StageError::ContentType { .. } => ErrorKind::ContentType,
            StageError::EmptyBody { .. } => ErrorKind::EmptyBody,
            StageError::Filesystem { .. } => ErrorKind::Filesystem,
        }
    }
}

/// What the sweep does after a unit of work failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Drop the current unit and move on to the next ID or file.
    Continue,
}

/// Logs `err` and decides how the sweep proceeds. Every kind continues.
pub fn on_error(err: &StageError) -> Step {
    match err.kind() {
        ErrorKind::NoData => {
            debug!("{}", err);
            Step::Continue
        }
        ErrorKind::Decode | ErrorKind::HttpStatus | ErrorKind::ContentType | ErrorKind::EmptyBody => {
            warn!("{}", err);
            Step::Continue
        }
        ErrorKind::Transport | ErrorKind::Filesystem => {
            error!("{}", err);
            Step::Continue
        }
    }
}
