//! AnalysisHost and Analysis: state ownership and per-file query snapshots.
//!
//! The `AnalysisHost` owns the [`Registry`] and hands out [`Analysis`]
//! snapshots for querying. Every symbol handle a snapshot returns borrows
//! the host, so a reparse (which needs `&mut AnalysisHost`) cannot happen
//! while one is alive.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new(Arc::new(StaticBuildConfig::new()));
//! host.update(Path::new("/proj/main.vala"), text)?;
//! while host.tick() {}
//!
//! let analysis = host.analysis(Path::new("/proj/main.vala")).unwrap();
//! let target = analysis.resolve(&CompoundName::parse("x.Bar").unwrap(), offset);
//! ```

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

use crate::base::{LineCol, TextSize};
use crate::hir::{Resolver, ScopeChain, SymbolRef};
use crate::project::{BuildConfig, LoadResult, Program, Registry, ScanOptions};
use crate::syntax::{CompoundName, SourceFile, dump};

/// Owns all mutable state for the IDE layer.
///
/// Apply changes with [`update`](Self::update), advance scans with
/// [`tick`](Self::tick), then query through [`analysis`](Self::analysis).
#[derive(Debug)]
pub struct AnalysisHost {
    registry: Registry,
    /// Set by a query once system declarations are needed; the next tick
    /// starts loading them.
    system_wanted: AtomicBool,
}

impl AnalysisHost {
    pub fn new(config: Arc<dyn BuildConfig>) -> Self {
        Self::from_registry(Registry::new(config))
    }

    pub fn with_options(config: Arc<dyn BuildConfig>, options: ScanOptions) -> Self {
        Self::from_registry(Registry::with_options(config, options))
    }

    pub fn from_registry(registry: Registry) -> Self {
        Self {
            registry,
            system_wanted: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Open the project governing `dir` and start scanning it.
    pub fn open(&mut self, dir: &Path) -> &Program {
        self.registry.program_for_dir(dir)
    }

    /// Replace a file's tree with a parse of `text`.
    pub fn update(&mut self, path: &Path, text: &str) -> LoadResult<()> {
        self.registry.update(path, text)
    }

    /// Re-detect the build root of `dir`, replacing its program if it moved.
    pub fn rescan_build_root(&mut self, dir: &Path) -> bool {
        self.registry.rescan_build_root(dir)
    }

    /// Advance background work by one step. Returns `false` when idle.
    pub fn tick(&mut self) -> bool {
        if self.system_wanted.swap(false, Ordering::Relaxed) {
            self.registry.demand_system();
        }
        self.registry.tick()
    }

    pub fn run_to_completion(&mut self) {
        while self.tick() {}
    }

    /// A query snapshot for `path`, or `None` if the file is not loaded.
    ///
    /// Results are best effort while scans are still running.
    pub fn analysis(&self, path: &Path) -> Option<Analysis<'_>> {
        if !self.registry.system().is_demanded() {
            self.system_wanted.store(true, Ordering::Relaxed);
        }
        let file = self.registry.file(path)?;
        let sources = self.registry.sources_for(path)?;
        Some(Analysis {
            file,
            resolver: Resolver::new(sources),
        })
    }
}

/// Queries against one file as currently parsed.
#[derive(Debug)]
pub struct Analysis<'a> {
    file: &'a SourceFile,
    resolver: Resolver<'a>,
}

impl<'a> Analysis<'a> {
    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    pub fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    /// What `name` means at `offset`.
    pub fn resolve(&self, name: &CompoundName, offset: TextSize) -> Option<SymbolRef<'a>> {
        self.resolver.resolve(name, self.file, offset)
    }

    pub fn resolve_type(&self, name: &CompoundName, offset: TextSize) -> Vec<SymbolRef<'a>> {
        self.resolver.resolve_type(name, self.file, offset)
    }

    pub fn resolve_prefix(
        &self,
        prefix: &CompoundName,
        offset: TextSize,
        constructors: bool,
    ) -> Vec<SymbolRef<'a>> {
        self.resolver
            .resolve_prefix(prefix, self.file, offset, constructors)
    }

    pub fn resolve_constructor(
        &self,
        name: &CompoundName,
        offset: TextSize,
    ) -> Option<SymbolRef<'a>> {
        self.resolver.resolve_constructor(name, self.file, offset)
    }

    pub fn scope_chain(&self, offset: TextSize) -> ScopeChain<'a> {
        ScopeChain::at(self.file, offset)
    }

    /// Indented rendering of the file's tree.
    pub fn dump(&self) -> String {
        dump(self.file)
    }

    pub fn line_col(&self, offset: TextSize) -> LineCol {
        self.file.line_index().line_col(offset)
    }

    pub fn offset(&self, position: LineCol) -> Option<TextSize> {
        self.file.line_index().offset(position)
    }
}

/// An [`AnalysisHost`] shared between threads.
///
/// Updates and ticks take the write lock and queries the read lock, so a
/// tree is never replaced while a query is reading it.
#[derive(Clone, Debug)]
pub struct SharedAnalysisHost {
    inner: Arc<RwLock<AnalysisHost>>,
}

impl SharedAnalysisHost {
    pub fn new(host: AnalysisHost) -> Self {
        Self {
            inner: Arc::new(RwLock::new(host)),
        }
    }

    pub fn update(&self, path: &Path, text: &str) -> LoadResult<()> {
        self.inner.write().update(path, text)
    }

    pub fn rescan_build_root(&self, dir: &Path) -> bool {
        self.inner.write().rescan_build_root(dir)
    }

    pub fn tick(&self) -> bool {
        self.inner.write().tick()
    }

    /// Run `f` against a snapshot of `path` under the read lock.
    pub fn with_analysis<R>(&self, path: &Path, f: impl FnOnce(&Analysis<'_>) -> R) -> Option<R> {
        let host = self.inner.read();
        let analysis = host.analysis(path)?;
        Some(f(&analysis))
    }
}
