//! Run orchestration.
//!
//! A run loads the previous snapshot, fetches the document, resolves its
//! colour styles, builds the new snapshot, diffs and classifies. Only when all
//! of that succeeded are the records and the bump handed to the output sink,
//! so a failed run never leaves a half-written output set behind.
//!
//! The I/O collaborators are traits:
//!
//! - [`DocumentSource`]: retrieves the design document by key
//! - [`PriorStateSource`]: loads the previous run's snapshot, mapping "not
//!   found" to [`SnapshotState::Empty`]
//! - [`OutputSink`]: renders and writes records plus the bump label
//!
//! [`Pipeline::plan`] is the pure core: given a document and a prior state it
//! computes everything without touching any collaborator.

use serde::Serialize;

use crate::diff::{detect_changes, ChangeSet};
use crate::document::Document;
use crate::env::EnvReader;
use crate::error::{FetchError, PipelineError, StoreError};
use crate::resolve::{ColorStyleRecord, StyleResolver};
use crate::snapshot::{Snapshot, SnapshotState};
use crate::version::{classify, VersionBump};

/// Retrieves a design document.
pub trait DocumentSource {
    fn fetch_document(&self, key: &str) -> Result<Document, FetchError>;
}

/// Loads the snapshot persisted by the previous run.
pub trait PriorStateSource {
    /// Returns [`SnapshotState::Empty`] when nothing was persisted yet. Any
    /// other read failure is an error.
    fn load_prior_snapshot(&self) -> Result<SnapshotState, StoreError>;
}

/// Persists a run's records and version bump.
pub trait OutputSink {
    /// Writes every output of the run. Implementations must not leave a
    /// partial set of outputs behind when they fail.
    fn persist(&self, records: &[ColorStyleRecord], bump: VersionBump) -> Result<(), StoreError>;
}

/// Everything a run computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub records: Vec<ColorStyleRecord>,
    pub snapshot: Snapshot,
    pub changes: ChangeSet,
    pub bump: VersionBump,
}

/// Checks that the credential variable is set and non-empty.
///
/// Callers run this before any I/O; a missing credential aborts the run.
pub fn check_credential(env: &dyn EnvReader, var: &str) -> Result<String, PipelineError> {
    match env.var(var) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PipelineError::MissingCredential(var.to_string())),
    }
}

/// Composes resolution, snapshotting, diffing and classification.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    resolver: StyleResolver,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: StyleResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn resolver(&self) -> &StyleResolver {
        &self.resolver
    }

    /// Computes a run's results from an already fetched document.
    pub fn plan(&self, document: &Document, prior: &SnapshotState) -> RunReport {
        let records = self.resolver.color_records(document);
        let snapshot = Snapshot::from_records(&records);
        let changes = detect_changes(prior, &snapshot);
        let bump = classify(&changes);

        RunReport {
            records,
            snapshot,
            changes,
            bump,
        }
    }

    /// Loads the prior state, fetches the document and plans, without
    /// persisting anything.
    pub fn preview<D, P>(
        &self,
        key: &str,
        source: &D,
        prior: &P,
    ) -> Result<RunReport, PipelineError>
    where
        D: DocumentSource + ?Sized,
        P: PriorStateSource + ?Sized,
    {
        let prior_state = prior
            .load_prior_snapshot()
            .map_err(PipelineError::PriorStateRead)?;
        tracing::info!(retrieved = prior_state.is_retrieved(), "loaded prior snapshot");

        let document = source.fetch_document(key)?;
        tracing::info!(key, styles = document.styles.len(), "fetched document");

        let report = self.plan(&document, &prior_state);
        tracing::info!(
            records = report.records.len(),
            bump = %report.bump,
            "resolved colour styles"
        );
        Ok(report)
    }

    /// Runs the whole pipeline and persists its outputs.
    pub fn run<D, P, S>(
        &self,
        key: &str,
        source: &D,
        prior: &P,
        sink: &S,
    ) -> Result<RunReport, PipelineError>
    where
        D: DocumentSource + ?Sized,
        P: PriorStateSource + ?Sized,
        S: OutputSink + ?Sized,
    {
        let report = self.preview(key, source, prior)?;

        sink.persist(&report.records, report.bump)
            .map_err(PipelineError::Persistence)?;
        tracing::info!(records = report.records.len(), "persisted outputs");

        Ok(report)
    }
}
