//! Error types for the extraction pipeline.
//!
//! [`PipelineError`] is the error every run reports. Its variants are the
//! failure kinds a caller needs to tell apart: a missing credential, a failed
//! document fetch, an unreadable prior snapshot and a failed write. A missing
//! prior snapshot is not an error; sources report it as
//! [`SnapshotState::Empty`](crate::snapshot::SnapshotState::Empty).

use std::path::PathBuf;

use thiserror::Error;

/// Errors reading a persisted snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot entry '{name}' is not a string")]
    NonStringValue { name: String },
}

/// Errors retrieving the source document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The credential was rejected.
    #[error("authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Any other non-success response.
    #[error("unexpected response status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body is not a design document.
    #[error("could not parse document: {0}")]
    Parse(String),
}

/// Errors reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: SnapshotError,
    },

    #[error("could not render output: {0}")]
    Render(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A failed run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The credential is not set. Checked before any I/O.
    #[error("missing credential: set the {0} environment variable")]
    MissingCredential(String),

    #[error("failed to fetch document: {0}")]
    SourceFetch(#[from] FetchError),

    #[error("failed to read prior snapshot: {0}")]
    PriorStateRead(#[source] StoreError),

    #[error("failed to persist outputs: {0}")]
    Persistence(#[source] StoreError),
}

impl PipelineError {
    /// Short machine-friendly name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingCredential(_) => "precondition",
            PipelineError::SourceFetch(_) => "source-fetch",
            PipelineError::PriorStateRead(_) => "prior-state-read",
            PipelineError::Persistence(_) => "persistence",
        }
    }
}
