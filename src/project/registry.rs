//! The registry of programs.
//!
//! Owns every [`Program`] (one per build root), the shared
//! [`SystemDeclarations`], and the [`FileSet`] that numbers their files.
//! A registry is created when the first project is opened and torn down
//! with its owner; there is no global state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::build_config::{BuildConfig, detect};
use super::error::{LoadError, LoadResult};
use super::file_set::FileSet;
use super::program::Program;
use super::scan::ScanContext;
use super::system::SystemDeclarations;
use crate::base::constants::SCAN_BATCH_SIZE;
use crate::hir::Sources;
use crate::parser::{DefaultParser, SourceParser};
use crate::syntax::SourceFile;

/// Scan tuning.
#[derive(Clone, Debug)]
pub struct ScanOptions {
    /// Files parsed per tick.
    pub batch_size: usize,
    /// Where system declarations live.
    pub system_dirs: Vec<PathBuf>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            batch_size: SCAN_BATCH_SIZE,
            system_dirs: SystemDeclarations::discover_dirs(),
        }
    }
}

pub struct Registry {
    config: Arc<dyn BuildConfig>,
    parser: Arc<dyn SourceParser>,
    file_ids: FileSet,
    /// Keyed by build root path, in creation order.
    programs: IndexMap<PathBuf, Program>,
    /// Directory → build root path it was last detected under.
    roots_by_dir: FxHashMap<PathBuf, PathBuf>,
    system: SystemDeclarations,
    options: ScanOptions,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("programs", &self.programs.keys().collect::<Vec<_>>())
            .field("files", &self.file_ids.len())
            .field("system", &self.system.is_demanded())
            .finish()
    }
}

impl Registry {
    pub fn new(config: Arc<dyn BuildConfig>) -> Self {
        Self::with_options(config, ScanOptions::default())
    }

    pub fn with_options(config: Arc<dyn BuildConfig>, options: ScanOptions) -> Self {
        Self::with_parser(config, Arc::new(DefaultParser), options)
    }

    pub fn with_parser(
        config: Arc<dyn BuildConfig>,
        parser: Arc<dyn SourceParser>,
        options: ScanOptions,
    ) -> Self {
        let system = SystemDeclarations::new(options.system_dirs.clone());
        Self {
            config,
            parser,
            file_ids: FileSet::new(),
            programs: IndexMap::new(),
            roots_by_dir: FxHashMap::default(),
            system,
            options,
        }
    }

    pub fn file_ids(&self) -> &FileSet {
        &self.file_ids
    }

    /// The program governing `dir`, created (and its scan started) on first
    /// use.
    pub fn program_for_dir(&mut self, dir: &Path) -> &Program {
        let known = self
            .roots_by_dir
            .get(dir)
            .filter(|path| self.programs.contains_key(*path))
            .cloned();
        let root_path = match known {
            Some(path) => path,
            None => {
                let root = detect(self.config.as_ref(), dir);
                let path = root.path.clone();
                self.roots_by_dir.insert(dir.to_path_buf(), path.clone());
                self.programs
                    .entry(path.clone())
                    .or_insert_with(|| Program::new(root));
                path
            }
        };
        &self.programs[&root_path]
    }

    /// The program whose build root is exactly `root`.
    pub fn program(&self, root: &Path) -> Option<&Program> {
        self.programs.get(root)
    }

    pub fn programs(&self) -> impl Iterator<Item = &Program> {
        self.programs.values()
    }

    /// The program a file belongs to.
    pub fn program_of(&self, path: &Path) -> Option<&Program> {
        let memo = path
            .parent()
            .and_then(|dir| self.roots_by_dir.get(dir))
            .and_then(|root| self.programs.get(root));
        memo.or_else(|| {
            self.programs
                .values()
                .filter(|program| program.governs(path))
                .max_by_key(|program| program.root().path.components().count())
        })
    }

    /// Re-detect the build root of `dir`. When it changed, the program that
    /// governed `dir` is discarded and a new one is created and scanned from
    /// scratch, unless a program for the new root already exists, in which
    /// case `dir` joins it. Returns whether a program was discarded or
    /// created.
    pub fn rescan_build_root(&mut self, dir: &Path) -> bool {
        let root = detect(self.config.as_ref(), dir);
        let previous = self.roots_by_dir.insert(dir.to_path_buf(), root.path.clone());

        let current = previous
            .as_ref()
            .and_then(|path| self.programs.get(path))
            .or_else(|| self.programs.get(&root.path));
        if current.is_some_and(|program| program.root() == &root) {
            return false;
        }

        let mut changed = false;
        if let Some(previous) = previous {
            if self.programs.shift_remove(&previous).is_some() {
                tracing::debug!(
                    "build root of {} changed, discarding program for {}",
                    dir.display(),
                    previous.display()
                );
                changed = true;
            }
            self.roots_by_dir
                .retain(|memo_dir, memo_root| memo_root != &previous || memo_dir == dir);
        }

        // A program that already lives at the new root keeps its files.
        if self
            .programs
            .get(&root.path)
            .is_some_and(|program| program.root() == &root)
        {
            tracing::debug!("{} joins program for {}", dir.display(), root.path.display());
            return changed;
        }
        self.programs.insert(root.path.clone(), Program::new(root));
        true
    }

    /// Replace (or create) the tree of `path` from editor text.
    ///
    /// On a parse failure the previous tree is kept.
    pub fn update(&mut self, path: &Path, text: &str) -> LoadResult<()> {
        let dir = path.parent().unwrap_or(path).to_path_buf();
        let root_path = self.program_for_dir(&dir).root().path.clone();

        let id = self.file_ids.file_id(path);
        let mut file = SourceFile::new(id, path);
        if let Err(source) = self.parser.parse_into(text, &mut file) {
            tracing::warn!("keeping previous tree of {}: {source}", path.display());
            return Err(LoadError::Parse {
                path: path.to_path_buf(),
                source,
            });
        }

        if let Some(program) = self.programs.get_mut(&root_path) {
            let replaced = program.update(file).is_some();
            tracing::trace!("updated {} (replaced: {replaced})", path.display());
        }
        Ok(())
    }

    /// Run one step of one pending pass: programs in creation order, then the
    /// system declarations. Returns `false` when everything is idle.
    pub fn tick(&mut self) -> bool {
        let ctx = ScanContext {
            config: self.config.as_ref(),
            parser: self.parser.as_ref(),
            file_ids: &self.file_ids,
            batch_size: self.options.batch_size,
        };
        for program in self.programs.values_mut() {
            if program.tick(&ctx) {
                return true;
            }
        }
        self.system.tick(&ctx)
    }

    /// Tick until every started pass is complete.
    pub fn run_to_completion(&mut self) {
        while self.tick() {}
    }

    pub fn demand_system(&mut self) {
        self.system.demand();
    }

    pub fn system(&self) -> &SystemDeclarations {
        &self.system
    }

    pub fn is_idle(&self) -> bool {
        self.programs.values().all(Program::is_scanned)
            && (!self.system.is_demanded() || self.system.is_loaded())
    }

    /// Everything a query in `path` can see.
    pub fn sources_for(&self, path: &Path) -> Option<Sources<'_>> {
        let program = self.program_of(path)?;
        Some(Sources::new(program.sources(), self.system.sources()))
    }

    /// The current tree of `path`, local or system.
    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.program_of(path)
            .and_then(|program| program.sources().get(path))
            .or_else(|| self.system.sources().and_then(|system| system.get(path)))
    }
}
