//! System declaration files, shared by every program.

use std::env;
use std::path::{Path, PathBuf};

use super::scan::{ScanContext, ScanTarget, SourceScan};
use crate::base::constants::{DEFAULT_SYSTEM_DIRS, SYSTEM_DIRS_ENV, SYSTEM_EXTENSIONS};
use crate::hir::SourceSet;

/// Declarations installed with the toolchain (`*.vapi` bindings).
///
/// Loaded lazily: nothing is scanned until the first [`demand`], and what
/// is loaded then stays for the lifetime of the owner.
///
/// [`demand`]: SystemDeclarations::demand
#[derive(Debug)]
pub struct SystemDeclarations {
    dirs: Vec<PathBuf>,
    sources: SourceSet,
    scan: SourceScan,
    demanded: bool,
}

impl SystemDeclarations {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        let scan = SourceScan::new(ScanTarget::Dirs(dirs.clone()), SYSTEM_EXTENSIONS);
        Self {
            dirs,
            sources: SourceSet::new(),
            scan,
            demanded: false,
        }
    }

    /// Directories to load from.
    ///
    /// Uses `VALENCE_SYSTEM_DIRS` when set, otherwise the standard install
    /// locations that exist on this machine.
    pub fn discover_dirs() -> Vec<PathBuf> {
        if let Some(value) = env::var_os(SYSTEM_DIRS_ENV) {
            return env::split_paths(&value)
                .filter(|dir| !dir.as_os_str().is_empty())
                .collect();
        }
        DEFAULT_SYSTEM_DIRS
            .iter()
            .map(PathBuf::from)
            .filter(|dir| dir.is_dir())
            .collect()
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Request loading. Idempotent.
    pub fn demand(&mut self) {
        if !self.demanded {
            tracing::debug!("system declarations demanded from {} dir(s)", self.dirs.len());
            self.demanded = true;
            self.scan.start();
        }
    }

    pub fn is_demanded(&self) -> bool {
        self.demanded
    }

    pub fn is_loaded(&self) -> bool {
        self.scan.is_complete()
    }

    /// Whatever has been loaded so far, or `None` before the first demand.
    pub fn sources(&self) -> Option<&SourceSet> {
        self.demanded.then_some(&self.sources)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.sources.contains(path)
    }

    pub fn tick(&mut self, ctx: &ScanContext<'_>) -> bool {
        self.scan.tick(&mut self.sources, ctx)
    }
}
