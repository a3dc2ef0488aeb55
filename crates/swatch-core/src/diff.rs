//! Change detection between two snapshots.
//!
//! ```rust
//! use swatch_core::diff::detect_changes;
//! use swatch_core::snapshot::{Snapshot, SnapshotState};
//!
//! let previous: Snapshot = [("RED", "rgb(255, 0, 0)")].into_iter().collect();
//! let current: Snapshot = [("RED", "rgb(255, 0, 0)"), ("BLUE", "rgb(0, 0, 255)")]
//!     .into_iter()
//!     .collect();
//!
//! let changes = detect_changes(&SnapshotState::Retrieved(previous), &current);
//! assert_eq!(changes.added, vec!["BLUE"]);
//! assert!(changes.updated.is_empty());
//! assert!(changes.deleted.is_empty());
//! ```

use serde::Serialize;

use crate::snapshot::{Snapshot, SnapshotState};

/// Names added, updated and deleted between two snapshots.
///
/// `added` and `updated` follow the current snapshot's order, `deleted` the
/// previous snapshot's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub deleted: Vec<String>,
    /// Set when there was no previous snapshot, so every current name is
    /// reported as added.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub initial: bool,
}

impl ChangeSet {
    /// True when nothing was added, updated or deleted.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.deleted.is_empty()
    }
}

/// Compares the current snapshot against the previous run's state.
///
/// With no previous snapshot, every current name is added and
/// [`ChangeSet::initial`] is set. Otherwise a name is added when it is new,
/// deleted when it disappeared and updated when both snapshots have it with
/// different colour strings.
pub fn detect_changes(previous: &SnapshotState, current: &Snapshot) -> ChangeSet {
    let previous = match previous {
        SnapshotState::Empty => {
            return ChangeSet {
                added: current.names().map(str::to_string).collect(),
                initial: true,
                ..ChangeSet::default()
            };
        }
        SnapshotState::Retrieved(snapshot) => snapshot,
    };

    let changes = ChangeSet {
        added: added_names(previous, current),
        updated: updated_names(previous, current),
        deleted: deleted_names(previous, current),
        initial: false,
    };

    tracing::debug!(
        added = changes.added.len(),
        updated = changes.updated.len(),
        deleted = changes.deleted.len(),
        "compared snapshots"
    );
    changes
}

fn added_names(previous: &Snapshot, current: &Snapshot) -> Vec<String> {
    current
        .names()
        .filter(|name| !previous.contains(name))
        .map(str::to_string)
        .collect()
}

fn updated_names(previous: &Snapshot, current: &Snapshot) -> Vec<String> {
    current
        .iter()
        .filter(|(name, value)| previous.get(name).is_some_and(|old| old != *value))
        .map(|(name, _)| name.to_string())
        .collect()
}

fn deleted_names(previous: &Snapshot, current: &Snapshot) -> Vec<String> {
    previous
        .names()
        .filter(|name| !current.contains(name))
        .map(str::to_string)
        .collect()
}
