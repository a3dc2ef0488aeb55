//! FileStore against a real temporary directory.

use std::fs;

use swatch::FileStore;
use swatch_core::{
    ColorStyleRecord, ColorValue, OutputSink, PriorStateSource, Snapshot, SnapshotState,
    StoreError, VersionBump,
};
use swatch_render::{OutputFormat, Renderer};
use tempfile::TempDir;

fn records() -> Vec<ColorStyleRecord> {
    vec![
        ColorStyleRecord::new("Red", ColorValue::rgb(1.0, 0.0, 0.0)),
        ColorStyleRecord::new("Blue", ColorValue::rgb(0.0, 0.0, 1.0)),
    ]
}

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::new(
        dir.path().join("build"),
        dir.path().join("VERSION_BUMP_TYPE"),
        Renderer::new().unwrap(),
    )
}

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn missing_snapshot_is_empty_state() {
    let dir = TempDir::new().unwrap();
    let state = store_in(&dir).load_prior_snapshot().unwrap();
    assert_eq!(state, SnapshotState::Empty);
}

#[test]
fn persist_writes_every_output_and_the_bump() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.persist(&records(), VersionBump::Minor).unwrap();

    let build = dir.path().join("build");
    assert_eq!(
        entries(&build),
        vec!["colors.json", "colors.scss", "colors.ts"]
    );
    assert_eq!(
        fs::read_to_string(build.join("colors.scss")).unwrap(),
        "$RED: rgb(255, 0, 0);\n$BLUE: rgb(0, 0, 255);"
    );
    assert_eq!(
        fs::read_to_string(build.join("colors.ts")).unwrap(),
        "const RED = 'rgb(255, 0, 0)';\nconst BLUE = 'rgb(0, 0, 255)';"
    );
    assert_eq!(
        fs::read_to_string(build.join("colors.json")).unwrap(),
        "{\n  \"RED\": \"rgb(255, 0, 0)\",\n  \"BLUE\": \"rgb(0, 0, 255)\"\n}"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("VERSION_BUMP_TYPE")).unwrap(),
        "MINOR"
    );
}

#[test]
fn persisted_snapshot_is_next_prior_state() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.persist(&records(), VersionBump::Minor).unwrap();
    let state = store.load_prior_snapshot().unwrap();

    assert_eq!(state, SnapshotState::Retrieved(Snapshot::from_records(&records())));
}

#[test]
fn no_change_bump_writes_empty_label() {
    let dir = TempDir::new().unwrap();
    store_in(&dir).persist(&records(), VersionBump::None).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("VERSION_BUMP_TYPE")).unwrap(),
        ""
    );
}

#[test]
fn nested_output_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("a").join("b").join("tokens");
    let store = FileStore::new(&out, dir.path().join("meta/BUMP"), Renderer::new().unwrap());

    store.persist(&records(), VersionBump::Major).unwrap();

    assert!(out.join("colors.json").is_file());
    assert_eq!(
        fs::read_to_string(dir.path().join("meta/BUMP")).unwrap(),
        "MAJOR"
    );
}

#[test]
fn selected_formats_still_write_json() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir).with_formats(vec![OutputFormat::TypeScript]);

    store.persist(&records(), VersionBump::Minor).unwrap();

    assert_eq!(
        entries(&dir.path().join("build")),
        vec!["colors.json", "colors.ts"]
    );
}

#[test]
fn invalid_snapshot_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let build = dir.path().join("build");
    fs::create_dir_all(&build).unwrap();
    fs::write(build.join("colors.json"), "{ not json").unwrap();

    let err = store_in(&dir).load_prior_snapshot().unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
}

#[test]
fn non_string_snapshot_value_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let build = dir.path().join("build");
    fs::create_dir_all(&build).unwrap();
    fs::write(build.join("colors.json"), r#"{ "RED": 255 }"#).unwrap();

    let err = store_in(&dir).load_prior_snapshot().unwrap_err();
    assert!(err.to_string().contains("colors.json"));
}

#[test]
fn unreadable_snapshot_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("build").join("colors.json")).unwrap();

    let err = store_in(&dir).load_prior_snapshot().unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}

#[test]
fn legacy_empty_snapshot_parses() {
    let dir = TempDir::new().unwrap();
    let build = dir.path().join("build");
    fs::create_dir_all(&build).unwrap();
    fs::write(build.join("colors.json"), "{\n\n}").unwrap();

    let state = store_in(&dir).load_prior_snapshot().unwrap();
    assert_eq!(state, SnapshotState::Retrieved(Snapshot::new()));
}

#[test]
fn render_failure_leaves_previous_outputs_untouched() {
    let dir = TempDir::new().unwrap();
    store_in(&dir).persist(&records(), VersionBump::Minor).unwrap();
    let build = dir.path().join("build");
    let before = fs::read_to_string(build.join("colors.scss")).unwrap();

    let mut renderer = Renderer::new().unwrap();
    renderer
        .add_template("colors.kt", r#"{% include "missing.kt" %}"#)
        .unwrap();
    let broken = FileStore::new(&build, dir.path().join("VERSION_BUMP_TYPE"), renderer);

    let err = broken.persist(&[], VersionBump::Major).unwrap_err();

    assert!(matches!(err, StoreError::Render(_)));
    assert_eq!(fs::read_to_string(build.join("colors.scss")).unwrap(), before);
    assert_eq!(
        fs::read_to_string(dir.path().join("VERSION_BUMP_TYPE")).unwrap(),
        "MINOR"
    );
    assert_eq!(
        entries(&build),
        vec!["colors.json", "colors.scss", "colors.ts"]
    );
}
