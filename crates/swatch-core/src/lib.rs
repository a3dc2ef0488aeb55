//! # Swatch Core - Colour Tokens from Design Documents
//!
//! `swatch-core` extracts named colour tokens from a design document and
//! classifies how much they changed since the previous run.
//!
//! ## Core Concepts
//!
//! - [`Document`]: the design tree plus its file-level style table
//! - [`StyleResolver`]: finds the first eligible leaf that uses a style
//! - [`format_name`] / [`format_color`]: identifier and colour normalization
//! - [`Snapshot`]: flat identifier → colour mapping of one run
//! - [`detect_changes`]: added / updated / deleted names between two snapshots
//! - [`classify`]: reduces a [`ChangeSet`] to a [`VersionBump`]
//! - [`Pipeline`]: composes the above behind the [`DocumentSource`],
//!   [`PriorStateSource`] and [`OutputSink`] traits
//!
//! ## Quick Start
//!
//! ```rust
//! use swatch_core::{
//!     ColorValue, Document, DocumentNode, NodeType, Pipeline, SnapshotState,
//!     StyleDefinition, VersionBump,
//! };
//!
//! let tree = DocumentNode::container(NodeType::Document, vec![
//!     DocumentNode::leaf(NodeType::Ellipse)
//!         .with_style("fill", "S:1")
//!         .with_fill(ColorValue::rgb(0.0, 0.0, 1.0)),
//! ]);
//! let document = Document::new(tree, vec![StyleDefinition::fill("S:1", "Brand/Blue")]);
//!
//! let report = Pipeline::new().plan(&document, &SnapshotState::Empty);
//! assert_eq!(report.snapshot.get("BRAND_BLUE"), Some("rgb(0, 0, 255)"));
//! assert_eq!(report.bump, VersionBump::Minor);
//! ```
//!
//! ## Change Classification
//!
//! | Change set | Bump |
//! |------------|------|
//! | any deletion | [`VersionBump::Major`] |
//! | additions or updates | [`VersionBump::Minor`] |
//! | nothing | [`VersionBump::None`] |

pub mod diff;
pub mod document;
pub mod env;
mod error;
pub mod format;
pub mod pipeline;
pub mod resolve;
pub mod snapshot;
pub mod version;

pub use diff::{detect_changes, ChangeSet};
pub use document::{
    ColorValue, Document, DocumentNode, NodeType, Paint, StyleDefinition, StyleType, FILL_SLOT,
};
pub use env::{EnvReader, MockEnv, RealEnv};
pub use error::{FetchError, PipelineError, SnapshotError, StoreError};
pub use format::{format_color, format_name, scale_channel};
pub use pipeline::{
    check_credential, DocumentSource, OutputSink, Pipeline, PriorStateSource, RunReport,
};
pub use resolve::{collect_color_styles, find_style_node, ColorStyleRecord, StyleResolver};
pub use snapshot::{Snapshot, SnapshotState};
pub use version::{classify, ParseVersionBumpError, VersionBump};
