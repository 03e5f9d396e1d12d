//! Scan behavior observed through the registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use valence::project::{
    BuildConfig, BuildRoot, LoadResult, Registry, ScanPhase, StaticBuildConfig,
};

use crate::helpers::project_helpers::{options, write_files};

fn loaded_names(registry: &Registry, root: &Path) -> Vec<String> {
    let mut names: Vec<String> = registry
        .program(root)
        .unwrap()
        .sources()
        .iter()
        .map(|file| file.path().strip_prefix(root).unwrap().display().to_string())
        .collect();
    names.sort();
    names
}

fn tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_files(
        dir.path(),
        &[
            ("main.vala", "class Main { }\n"),
            ("api.vapi", "namespace Api { }\n"),
            ("README.md", "# not source\n"),
            ("lib/util.vala", "class Util { }\n"),
            (".cache/stale.vala", "class Stale { }\n"),
        ],
    );
    dir
}

#[test]
fn test_non_recursive_root_loads_top_level_only() {
    let dir = tree();
    let mut registry = Registry::with_options(Arc::new(StaticBuildConfig::new()), options(Vec::new()));
    registry.program_for_dir(dir.path());
    registry.run_to_completion();

    assert_eq!(loaded_names(&registry, dir.path()), vec!["api.vapi", "main.vala"]);
}

#[test]
fn test_recursive_root_loads_subdirectories() {
    let dir = tree();
    let config = StaticBuildConfig::new().with_root(dir.path(), true);
    let mut registry = Registry::with_options(Arc::new(config), options(Vec::new()));
    registry.program_for_dir(&dir.path().join("lib"));
    registry.run_to_completion();

    assert_eq!(
        loaded_names(&registry, dir.path()),
        vec!["api.vapi", "lib/util.vala", "main.vala"]
    );
    let util = dir.path().join("lib/util.vala");
    assert!(registry.file(&util).is_some());
}

#[test]
fn test_declaration_only_flag_follows_extension() {
    let dir = tree();
    let mut registry = Registry::with_options(Arc::new(StaticBuildConfig::new()), options(Vec::new()));
    registry.program_for_dir(dir.path());
    registry.run_to_completion();

    assert!(registry.file(&dir.path().join("api.vapi")).unwrap().is_declaration_only());
    assert!(!registry.file(&dir.path().join("main.vala")).unwrap().is_declaration_only());
}

#[test]
fn test_broken_file_does_not_stop_scan() {
    let dir = TempDir::new().unwrap();
    write_files(
        dir.path(),
        &[
            ("a.vala", "class A { }\n"),
            ("b.vala", "class B { string s = \"unterminated; }\n"),
            ("c.vala", "class C { }\n"),
        ],
    );
    let mut registry = Registry::with_options(Arc::new(StaticBuildConfig::new()), options(Vec::new()));
    registry.program_for_dir(dir.path());
    registry.run_to_completion();

    let program = registry.program(dir.path()).unwrap();
    assert_eq!(program.scan().phase(), ScanPhase::Complete);
    assert_eq!(program.scan().paths().len(), 3);
    assert_eq!(loaded_names(&registry, dir.path()), vec!["a.vala", "c.vala"]);
}

#[test]
fn test_files_with_comment_headers_are_loaded() {
    let dir = TempDir::new().unwrap();
    write_files(
        dir.path(),
        &[
            (
                "licensed.vala",
                "/*\n * Copyright (C) 2014 Example\n * SPDX-License-Identifier: LGPL-2.1+\n */\n\nnamespace Demo {\n    /** Documented. */\n    public class Licensed { }\n}\n",
            ),
            ("bindings.vapi", "/* generated */\n[CCode (cheader_filename = \"demo.h\")]\nnamespace Demo { public class Bound { } }\n"),
        ],
    );
    let mut registry = Registry::with_options(Arc::new(StaticBuildConfig::new()), options(Vec::new()));
    registry.program_for_dir(dir.path());
    registry.run_to_completion();

    assert_eq!(loaded_names(&registry, dir.path()), vec!["bindings.vapi", "licensed.vala"]);
    let licensed = registry.file(&dir.path().join("licensed.vala")).unwrap();
    assert!(licensed.errors().is_empty());
    assert!(valence::syntax::dump(licensed).contains("class Licensed"));
}

/// A build configuration that lists its sources explicitly, the way a
/// build-file integration would.
struct ListedSources {
    root: PathBuf,
    files: Vec<&'static str>,
}

impl BuildConfig for ListedSources {
    fn build_root(&self, dir: &Path) -> Option<BuildRoot> {
        dir.starts_with(&self.root).then(|| BuildRoot::new(&self.root, true))
    }

    fn source_files(&self, root: &BuildRoot, _extensions: &[&str]) -> LoadResult<Vec<PathBuf>> {
        Ok(self.files.iter().map(|file| root.path.join(file)).collect())
    }
}

#[test]
fn test_injected_source_list() {
    let dir = tree();
    let config = ListedSources {
        root: dir.path().to_path_buf(),
        files: vec!["lib/util.vala", "missing.vala"],
    };
    let mut registry = Registry::with_options(Arc::new(config), options(Vec::new()));
    registry.program_for_dir(dir.path());
    registry.run_to_completion();

    assert_eq!(loaded_names(&registry, dir.path()), vec!["lib/util.vala"]);
}
