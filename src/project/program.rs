//! One project's parsed sources.

use std::path::Path;

use super::build_config::BuildRoot;
use super::scan::{ScanContext, ScanTarget, SourceScan};
use crate::base::constants::PROJECT_EXTENSIONS;
use crate::hir::SourceSet;
use crate::syntax::SourceFile;

/// The files of one build root and the scan that loads them.
///
/// Dropping a program drops its scan with it, so a replaced program can
/// never be advanced again.
#[derive(Debug)]
pub struct Program {
    root: BuildRoot,
    sources: SourceSet,
    scan: SourceScan,
}

impl Program {
    /// Create a program and start its scan.
    pub fn new(root: BuildRoot) -> Self {
        let mut scan = SourceScan::new(ScanTarget::Root(root.clone()), PROJECT_EXTENSIONS);
        scan.start();
        tracing::debug!(
            "program for {} created (recursive: {})",
            root.path.display(),
            root.recursive
        );
        Self {
            root,
            sources: SourceSet::new(),
            scan,
        }
    }

    pub fn root(&self) -> &BuildRoot {
        &self.root
    }

    pub fn sources(&self) -> &SourceSet {
        &self.sources
    }

    pub fn scan(&self) -> &SourceScan {
        &self.scan
    }

    /// Swap in a freshly parsed tree, returning the one it replaces.
    pub fn update(&mut self, file: SourceFile) -> Option<SourceFile> {
        self.sources.insert(file)
    }

    pub fn tick(&mut self, ctx: &ScanContext<'_>) -> bool {
        self.scan.tick(&mut self.sources, ctx)
    }

    pub fn is_scanned(&self) -> bool {
        self.scan.is_complete()
    }

    /// Whether `path` lies inside this program's root.
    pub fn governs(&self, path: &Path) -> bool {
        if self.root.recursive {
            path.starts_with(&self.root.path)
        } else {
            path.parent() == Some(self.root.path.as_path())
        }
    }
}
