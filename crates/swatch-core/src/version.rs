//! Version bump classification.
//!
//! A change set reduces to one [`VersionBump`]:
//!
//! | Change set | Bump |
//! |------------|------|
//! | any deletion | `MAJOR` |
//! | additions or updates only | `MINOR` |
//! | nothing | none (persisted as an empty string) |
//!
//! A deletion yields `MAJOR` whatever else changed in the same run. A first
//! run (no previous snapshot) follows the same rule: every colour is added,
//! so it is `MINOR` unless the palette is empty.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::diff::ChangeSet;

/// Severity of the change between two runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VersionBump {
    #[default]
    None,
    Minor,
    Major,
}

impl VersionBump {
    /// The persisted label: `""`, `"MINOR"` or `"MAJOR"`.
    pub fn label(&self) -> &'static str {
        match self {
            VersionBump::None => "",
            VersionBump::Minor => "MINOR",
            VersionBump::Major => "MAJOR",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, VersionBump::None)
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a persisted bump label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown version bump label '{0}'")]
pub struct ParseVersionBumpError(String);

impl FromStr for VersionBump {
    type Err = ParseVersionBumpError;

    /// Parses a persisted label. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(VersionBump::None),
            "MINOR" => Ok(VersionBump::Minor),
            "MAJOR" => Ok(VersionBump::Major),
            other => Err(ParseVersionBumpError(other.to_string())),
        }
    }
}

impl Serialize for VersionBump {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Reduces a change set to a version bump.
pub fn classify(changes: &ChangeSet) -> VersionBump {
    if !changes.deleted.is_empty() {
        VersionBump::Major
    } else if !changes.added.is_empty() || !changes.updated.is_empty() {
        VersionBump::Minor
    } else {
        VersionBump::None
    }
}
