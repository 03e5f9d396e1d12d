//! Registry tests: build-root changes, editor updates and file identity.

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;
use valence::project::{Registry, StaticBuildConfig};
use valence::syntax::dump;

use crate::helpers::project_helpers::{options, write_files};

fn nested() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_files(
        dir.path(),
        &[
            ("top.vala", "class Top { }\n"),
            ("src/inner.vala", "class Inner { }\n"),
        ],
    );
    dir
}

#[test]
fn test_unchanged_build_root_keeps_program() {
    let dir = nested();
    let src = dir.path().join("src");
    let inner = src.join("inner.vala");
    let mut registry = Registry::with_options(Arc::new(StaticBuildConfig::new()), options(Vec::new()));
    registry.program_for_dir(&src);
    registry.run_to_completion();
    registry.update(&inner, "class Edited { }\n").unwrap();

    assert!(!registry.rescan_build_root(&src));
    assert!(dump(registry.file(&inner).unwrap()).contains("class Edited"));
}

#[test]
fn test_changed_build_root_replaces_program() {
    let dir = nested();
    let src = dir.path().join("src");
    let inner = src.join("inner.vala");
    let config = Arc::new(StaticBuildConfig::new());
    let mut registry = Registry::with_options(config.clone(), options(Vec::new()));
    registry.program_for_dir(&src);
    registry.run_to_completion();
    registry.update(&inner, "class Edited { }\n").unwrap();
    let inner_id = registry.file(&inner).unwrap().id();

    config.add_root(dir.path(), true);
    assert!(registry.rescan_build_root(&src));
    assert!(registry.program(&src).is_none(), "old program is discarded");
    assert!(registry.file(&inner).is_none(), "new program starts empty");

    registry.run_to_completion();
    let program = registry.program_of(&inner).unwrap();
    assert_eq!(program.root().path, dir.path());
    assert_eq!(program.sources().len(), 2);

    // Rescanned from disk: the in-memory edit went with the old program.
    let file = registry.file(&inner).unwrap();
    assert!(dump(file).contains("class Inner"));
    assert_eq!(file.id(), inner_id, "file ids survive replacement");
}

#[test]
fn test_recursive_flag_change_replaces_program() {
    let dir = nested();
    let config = Arc::new(StaticBuildConfig::new().with_root(dir.path(), false));
    let mut registry = Registry::with_options(config.clone(), options(Vec::new()));
    registry.program_for_dir(dir.path());
    registry.run_to_completion();
    assert_eq!(registry.program(dir.path()).unwrap().sources().len(), 1);

    config.add_root(dir.path(), true);
    assert!(registry.rescan_build_root(dir.path()));
    registry.run_to_completion();
    assert_eq!(registry.program(dir.path()).unwrap().sources().len(), 2);
}

#[test]
fn test_removed_root_falls_back_to_directory() {
    let dir = nested();
    let src = dir.path().join("src");
    let config = Arc::new(StaticBuildConfig::new().with_root(dir.path(), true));
    let mut registry = Registry::with_options(config.clone(), options(Vec::new()));
    registry.program_for_dir(&src);
    registry.run_to_completion();
    assert!(registry.program(dir.path()).is_some());

    config.remove_root(dir.path());
    assert!(registry.rescan_build_root(&src));
    registry.run_to_completion();

    let program = registry.program(&src).unwrap();
    assert!(!program.root().recursive);
    assert_eq!(program.sources().len(), 1);
}

#[test]
fn test_update_of_unsaved_file_wins_over_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("draft.vala");
    let mut registry = Registry::with_options(Arc::new(StaticBuildConfig::new()), options(Vec::new()));

    // The editor opens the file before the scan reaches it.
    registry.update(&path, "class FromEditor { }\n").unwrap();
    fs::write(&path, "class FromDisk { }\n").unwrap();
    registry.run_to_completion();

    assert!(dump(registry.file(&path).unwrap()).contains("class FromEditor"));
}

#[test]
fn test_programs_share_file_ids() {
    let first = nested();
    let second = nested();
    let mut registry = Registry::with_options(Arc::new(StaticBuildConfig::new()), options(Vec::new()));
    registry.program_for_dir(first.path());
    registry.program_for_dir(second.path());
    registry.run_to_completion();

    let a = registry.file(&first.path().join("top.vala")).unwrap().id();
    let b = registry.file(&second.path().join("top.vala")).unwrap().id();
    assert_ne!(a, b);
    assert_eq!(registry.programs().count(), 2);
    assert_eq!(registry.file_ids().len(), 2);
}

#[test]
fn test_directory_joining_existing_root_keeps_its_program() {
    let dir = nested();
    let src = dir.path().join("src");
    let top = dir.path().join("top.vala");
    let config = Arc::new(
        StaticBuildConfig::new()
            .with_root(dir.path(), true)
            .with_root(&src, false),
    );
    let mut registry = Registry::with_options(config.clone(), options(Vec::new()));
    registry.program_for_dir(dir.path());
    registry.program_for_dir(&src);
    registry.run_to_completion();
    registry.update(&top, "class FromEditor { }\n").unwrap();

    config.remove_root(&src);
    assert!(registry.rescan_build_root(&src), "the program for src is discarded");
    assert!(registry.program(&src).is_none());
    registry.run_to_completion();

    assert_eq!(registry.programs().count(), 1);
    let program = registry.program_of(&src.join("inner.vala")).unwrap();
    assert_eq!(program.root().path, dir.path());
    assert!(dump(registry.file(&top).unwrap()).contains("class FromEditor"));
}

#[test]
fn test_rescan_into_existing_root_without_own_program() {
    let dir = nested();
    let src = dir.path().join("src");
    let config = Arc::new(StaticBuildConfig::new().with_root(dir.path(), true));
    let mut registry = Registry::with_options(config, options(Vec::new()));
    registry.program_for_dir(dir.path());
    registry.run_to_completion();
    let inner = src.join("inner.vala");
    registry.update(&inner, "class Edited { }\n").unwrap();

    assert!(!registry.rescan_build_root(&src));
    assert!(dump(registry.file(&inner).unwrap()).contains("class Edited"));
}
