//! Flat name → colour snapshots of one run's output.
//!
//! A [`Snapshot`] maps formatted identifiers to formatted colour strings. It
//! keeps insertion order for rendering, but equality and every set operation
//! ignore order. [`SnapshotState`] is what a prior-state source hands back:
//! either nothing was persisted yet, or the snapshot of the previous run.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::error::SnapshotError;
use crate::format::{format_color, format_name};
use crate::resolve::ColorStyleRecord;

/// Insertion-ordered mapping from identifier to colour string.
///
/// Inserting an existing name replaces its value and keeps its position.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from resolved records, formatting names and colours.
    ///
    /// Records whose names format to the same identifier collapse; the later
    /// colour wins.
    pub fn from_records(records: &[ColorStyleRecord]) -> Self {
        records
            .iter()
            .map(|record| (format_name(&record.name), format_color(&record.color)))
            .collect()
    }

    /// Parses a persisted snapshot: a JSON object whose values are strings.
    pub fn from_json(source: &str) -> Result<Self, SnapshotError> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(source)?;
        let mut snapshot = Self::new();
        for (name, value) in object {
            match value {
                serde_json::Value::String(color) => {
                    snapshot.insert(name, color);
                }
                _ => return Err(SnapshotError::NonStringValue { name }),
            }
        }
        Ok(snapshot)
    }

    /// Renders the snapshot as a two-space indented JSON object.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Inserts or replaces an entry, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for Snapshot {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, value) in iter {
            snapshot.insert(name, value);
        }
        snapshot
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Persisted state of the previous run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SnapshotState {
    /// Nothing has been persisted yet.
    #[default]
    Empty,
    /// The previous run's snapshot.
    Retrieved(Snapshot),
}

impl SnapshotState {
    pub fn is_retrieved(&self) -> bool {
        matches!(self, SnapshotState::Retrieved(_))
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            SnapshotState::Empty => None,
            SnapshotState::Retrieved(snapshot) => Some(snapshot),
        }
    }
}
