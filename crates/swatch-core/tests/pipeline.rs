//! End-to-end pipeline behavior with in-memory collaborators.

use std::cell::RefCell;

use swatch_core::{
    ColorStyleRecord, ColorValue, Document, DocumentNode, DocumentSource, FetchError, NodeType,
    OutputSink, Pipeline, PipelineError, PriorStateSource, Snapshot, SnapshotState, StoreError,
    StyleDefinition, VersionBump,
};

// ============================================================================
// Test collaborators
// ============================================================================

struct StaticSource(Document);

impl DocumentSource for StaticSource {
    fn fetch_document(&self, _key: &str) -> Result<Document, FetchError> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

impl DocumentSource for FailingSource {
    fn fetch_document(&self, _key: &str) -> Result<Document, FetchError> {
        Err(FetchError::Auth {
            status: 403,
            message: "Invalid token".to_string(),
        })
    }
}

/// Prior state and sink backed by memory; persisting replaces the prior state.
#[derive(Default)]
struct MemoryStore {
    state: RefCell<SnapshotState>,
    bump: RefCell<Option<VersionBump>>,
    writes: RefCell<usize>,
}

impl MemoryStore {
    fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: RefCell::new(SnapshotState::Retrieved(snapshot)),
            ..Self::default()
        }
    }
}

impl PriorStateSource for MemoryStore {
    fn load_prior_snapshot(&self) -> Result<SnapshotState, StoreError> {
        Ok(self.state.borrow().clone())
    }
}

impl OutputSink for MemoryStore {
    fn persist(&self, records: &[ColorStyleRecord], bump: VersionBump) -> Result<(), StoreError> {
        *self.state.borrow_mut() = SnapshotState::Retrieved(Snapshot::from_records(records));
        *self.bump.borrow_mut() = Some(bump);
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

struct UnreadableStore;

impl PriorStateSource for UnreadableStore {
    fn load_prior_snapshot(&self) -> Result<SnapshotState, StoreError> {
        Err(StoreError::io(
            "build/colors.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        ))
    }
}

struct FullDisk;

impl OutputSink for FullDisk {
    fn persist(&self, _records: &[ColorStyleRecord], _bump: VersionBump) -> Result<(), StoreError> {
        Err(StoreError::io(
            "build/colors.scss",
            std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"),
        ))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn swatch(style: &str, color: ColorValue) -> DocumentNode {
    DocumentNode::leaf(NodeType::Ellipse)
        .with_style("fill", style)
        .with_fill(color)
}

fn palette(styles: &[(&str, &str, ColorValue)]) -> Document {
    let leaves = styles
        .iter()
        .map(|(id, _, color)| swatch(id, *color))
        .collect();
    let page = DocumentNode::container(NodeType::Canvas, vec![DocumentNode::container(
        NodeType::Frame,
        leaves,
    )]);
    let definitions = styles
        .iter()
        .map(|(id, name, _)| StyleDefinition::fill(*id, *name))
        .collect();
    Document::new(
        DocumentNode::container(NodeType::Document, vec![page]),
        definitions,
    )
}

fn red() -> ColorValue {
    ColorValue::rgb(1.0, 0.0, 0.0)
}

fn blue() -> ColorValue {
    ColorValue::rgb(0.0, 0.0, 1.0)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn first_run_adds_everything_and_persists() {
    let source = StaticSource(palette(&[("S:1", "Red", red()), ("S:2", "Blue", blue())]));
    let store = MemoryStore::default();

    let report = Pipeline::new().run("key", &source, &store, &store).unwrap();

    assert_eq!(report.changes.added, vec!["RED", "BLUE"]);
    assert!(report.changes.initial);
    assert_eq!(report.bump, VersionBump::Minor);
    assert_eq!(*store.bump.borrow(), Some(VersionBump::Minor));
    assert_eq!(*store.writes.borrow(), 1);
}

#[test]
fn second_run_with_unchanged_document_is_a_no_op_bump() {
    let source = StaticSource(palette(&[("S:1", "Red", red()), ("S:2", "Blue", blue())]));
    let store = MemoryStore::default();
    let pipeline = Pipeline::new();

    pipeline.run("key", &source, &store, &store).unwrap();
    let report = pipeline.run("key", &source, &store, &store).unwrap();

    assert!(report.changes.added.is_empty());
    assert!(report.changes.updated.is_empty());
    assert!(report.changes.deleted.is_empty());
    assert_eq!(report.bump, VersionBump::None);
    assert_eq!(*store.bump.borrow(), Some(VersionBump::None));
}

#[test]
fn added_colour_is_minor() {
    let prior: Snapshot = [("RED", "rgb(255, 0, 0)")].into_iter().collect();
    let store = MemoryStore::with_snapshot(prior);
    let source = StaticSource(palette(&[("S:1", "Red", red()), ("S:2", "Blue", blue())]));

    let report = Pipeline::new().run("key", &source, &store, &store).unwrap();

    assert_eq!(report.changes.added, vec!["BLUE"]);
    assert!(report.changes.updated.is_empty());
    assert!(report.changes.deleted.is_empty());
    assert_eq!(report.bump, VersionBump::Minor);
}

#[test]
fn removed_colour_is_major() {
    let prior: Snapshot = [("RED", "rgb(255, 0, 0)")].into_iter().collect();
    let store = MemoryStore::with_snapshot(prior);
    let source = StaticSource(palette(&[]));

    let report = Pipeline::new().run("key", &source, &store, &store).unwrap();

    assert_eq!(report.changes.deleted, vec!["RED"]);
    assert_eq!(report.bump, VersionBump::Major);
}

#[test]
fn removal_with_concurrent_addition_is_still_major() {
    let prior: Snapshot = [("RED", "rgb(255, 0, 0)")].into_iter().collect();
    let store = MemoryStore::with_snapshot(prior);
    let source = StaticSource(palette(&[("S:2", "Blue", blue())]));

    let report = Pipeline::new().run("key", &source, &store, &store).unwrap();

    assert_eq!(report.changes.added, vec!["BLUE"]);
    assert_eq!(report.changes.deleted, vec!["RED"]);
    assert_eq!(report.bump, VersionBump::Major);
}

#[test]
fn recoloured_style_is_minor() {
    let prior: Snapshot = [("RED", "rgb(255, 0, 0)")].into_iter().collect();
    let store = MemoryStore::with_snapshot(prior);
    let source = StaticSource(palette(&[("S:1", "Red", ColorValue::rgb(0.8, 0.0, 0.0))]));

    let report = Pipeline::new().run("key", &source, &store, &store).unwrap();

    assert_eq!(report.changes.updated, vec!["RED"]);
    assert_eq!(report.bump, VersionBump::Minor);
}

#[test]
fn unused_styles_are_silently_excluded() {
    let mut document = palette(&[("S:1", "Red", red())]);
    document.styles.push(StyleDefinition::fill("S:ghost", "Ghost"));
    let source = StaticSource(document);
    let store = MemoryStore::default();

    let report = Pipeline::new().run("key", &source, &store, &store).unwrap();

    assert_eq!(report.records.len(), 1);
    assert!(!report.snapshot.contains("GHOST"));
}

#[test]
fn fetch_failure_aborts_before_persisting() {
    let store = MemoryStore::default();

    let err = Pipeline::new()
        .run("key", &FailingSource, &store, &store)
        .unwrap_err();

    assert!(matches!(err, PipelineError::SourceFetch(FetchError::Auth { status: 403, .. })));
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn unreadable_prior_state_is_reported() {
    let source = StaticSource(palette(&[("S:1", "Red", red())]));
    let store = MemoryStore::default();

    let err = Pipeline::new()
        .run("key", &source, &UnreadableStore, &store)
        .unwrap_err();

    assert!(matches!(err, PipelineError::PriorStateRead(StoreError::Io { .. })));
    assert_eq!(*store.writes.borrow(), 0);
}

#[test]
fn persistence_failure_is_reported() {
    let source = StaticSource(palette(&[("S:1", "Red", red())]));
    let store = MemoryStore::default();

    let err = Pipeline::new()
        .run("key", &source, &store, &FullDisk)
        .unwrap_err();

    assert_eq!(err.kind(), "persistence");
    assert!(err.to_string().contains("no space left"));
}

#[test]
fn preview_never_persists() {
    let source = StaticSource(palette(&[("S:1", "Red", red())]));
    let store = MemoryStore::default();

    let report = Pipeline::new().preview("key", &source, &store).unwrap();

    assert_eq!(report.bump, VersionBump::Minor);
    assert_eq!(*store.writes.borrow(), 0);
    assert_eq!(*store.state.borrow(), SnapshotState::Empty);
}

#[test]
fn document_json_end_to_end() {
    let document = Document::from_json(
        r#"{
            "name": "Design System",
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "type": "CANVAS",
                    "children": [
                        { "id": "1:1", "type": "ELLIPSE", "styles": { "fill": "S:overlay" },
                          "fills": [{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 0, "a": 0.5 } }] },
                        { "id": "1:2", "type": "RECTANGLE", "styles": { "fill": "S:primary" },
                          "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1, "a": 1 } }] },
                        { "id": "1:3", "type": "ELLIPSE", "styles": { "fill": "S:primary", "stroke": "S:line" },
                          "fills": [{ "type": "SOLID", "color": { "r": 0.2, "g": 0.4, "b": 0.6, "a": 1 } }] },
                        { "id": "1:4", "type": "TEXT", "styles": { "text": "S:body" } }
                    ]
                }]
            },
            "styles": {
                "S:primary": { "key": "k1", "name": "Brand/Primary é", "styleType": "FILL", "remote": false },
                "S:overlay": { "key": "k2", "name": "Overlay", "styleType": "FILL" },
                "S:body": { "key": "k3", "name": "Body", "styleType": "TEXT" },
                "S:line": { "key": "k4", "name": "Line", "styleType": "FILL" }
            }
        }"#,
    )
    .unwrap();

    let report = Pipeline::new().plan(&document, &SnapshotState::Empty);

    let entries: Vec<(&str, &str)> = report.snapshot.iter().collect();
    assert_eq!(
        entries,
        vec![
            ("BRAND_PRIMARYE", "rgb(51, 102, 153)"),
            ("OVERLAY", "rgba(0, 0, 0, 128)"),
        ]
    );
}
