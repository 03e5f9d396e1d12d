//! Resumable source scans.
//!
//! A scan lists its files once, then parses a bounded batch per
//! [`SourceScan::tick`]. Queries may run between ticks and see whatever has
//! been parsed so far.
//!
//! ```text
//! Idle ──start──▶ ScanningPaths ──▶ ParsingBatch { next } ──▶ Complete
//!                                      ▲          │
//!                                      └──────────┘ next += batch
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::{DirEntry, WalkDir};

use super::build_config::{BuildConfig, BuildRoot};
use super::error::{LoadError, LoadResult};
use super::file_set::FileSet;
use crate::base::FileId;
use crate::hir::SourceSet;
use crate::parser::SourceParser;
use crate::syntax::SourceFile;

/// Source files under `dir` with one of `extensions`, sorted by path.
///
/// Hidden files and directories are skipped. Only `dir` itself is listed
/// unless `recursive` is set.
pub fn discover_sources(
    dir: &Path,
    recursive: bool,
    extensions: &[&str],
) -> LoadResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(LoadError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut paths = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
    {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            LoadError::Io {
                path,
                source: err.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext));
        if matches {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Read and parse one file.
pub fn load_source(path: &Path, id: FileId, parser: &dyn SourceParser) -> LoadResult<SourceFile> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut file = SourceFile::new(id, path);
    parser
        .parse_into(&text, &mut file)
        .map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(file)
}

/// Where a scan is in its pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    ScanningPaths,
    ParsingBatch { next: usize },
    Complete,
}

/// What a scan lists.
#[derive(Clone, Debug)]
pub enum ScanTarget {
    /// A project: the build configuration supplies the file list.
    Root(BuildRoot),
    /// Plain directories, listed non-recursively in order. Missing ones are
    /// skipped.
    Dirs(Vec<PathBuf>),
}

/// Collaborators a scan needs on each tick.
#[derive(Clone, Copy)]
pub struct ScanContext<'c> {
    pub config: &'c dyn BuildConfig,
    pub parser: &'c dyn SourceParser,
    pub file_ids: &'c FileSet,
    pub batch_size: usize,
}

/// One pass over a set of files.
#[derive(Clone, Debug)]
pub struct SourceScan {
    target: ScanTarget,
    extensions: &'static [&'static str],
    paths: Vec<PathBuf>,
    phase: ScanPhase,
}

impl SourceScan {
    pub fn new(target: ScanTarget, extensions: &'static [&'static str]) -> Self {
        Self {
            target,
            extensions,
            paths: Vec::new(),
            phase: ScanPhase::Idle,
        }
    }

    /// Begin the pass. Does nothing unless the scan is idle.
    pub fn start(&mut self) {
        if self.phase == ScanPhase::Idle {
            self.phase = ScanPhase::ScanningPaths;
        }
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn target(&self) -> &ScanTarget {
        &self.target
    }

    pub fn is_complete(&self) -> bool {
        self.phase == ScanPhase::Complete
    }

    /// The listed files, empty until paths have been scanned.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Advance by one step. Returns `false` when there was nothing to do.
    pub fn tick(&mut self, sources: &mut SourceSet, ctx: &ScanContext<'_>) -> bool {
        match self.phase {
            ScanPhase::Idle | ScanPhase::Complete => false,
            ScanPhase::ScanningPaths => {
                self.paths = self.list_paths(ctx);
                tracing::debug!("scan of {} found {} file(s)", self.describe(), self.paths.len());
                self.phase = if self.paths.is_empty() {
                    ScanPhase::Complete
                } else {
                    ScanPhase::ParsingBatch { next: 0 }
                };
                true
            }
            ScanPhase::ParsingBatch { next } => {
                let end = (next + ctx.batch_size.max(1)).min(self.paths.len());
                self.parse_batch(&self.paths[next..end], sources, ctx);
                self.phase = if end >= self.paths.len() {
                    tracing::debug!(
                        "scan of {} complete: {} file(s) loaded",
                        self.describe(),
                        sources.len()
                    );
                    ScanPhase::Complete
                } else {
                    ScanPhase::ParsingBatch { next: end }
                };
                true
            }
        }
    }

    fn list_paths(&self, ctx: &ScanContext<'_>) -> Vec<PathBuf> {
        match &self.target {
            ScanTarget::Root(root) => match ctx.config.source_files(root, self.extensions) {
                Ok(paths) => paths,
                Err(err) => {
                    tracing::warn!("cannot list sources: {err}");
                    Vec::new()
                }
            },
            ScanTarget::Dirs(dirs) => dirs
                .iter()
                .flat_map(|dir| match discover_sources(dir, false, self.extensions) {
                    Ok(paths) => paths,
                    Err(err) => {
                        tracing::debug!("skipping declaration directory: {err}");
                        Vec::new()
                    }
                })
                .collect(),
        }
    }

    fn parse_batch(&self, batch: &[PathBuf], sources: &mut SourceSet, ctx: &ScanContext<'_>) {
        // A path already present was supplied by an editor update and is
        // newer than the disk copy.
        let pending: Vec<(&PathBuf, FileId)> = batch
            .iter()
            .filter(|path| !sources.contains(path))
            .map(|path| (path, ctx.file_ids.file_id(path)))
            .collect();

        let results: Vec<_> = pending
            .par_iter()
            .map(|&(path, id)| load_source(path, id, ctx.parser))
            .collect();

        for result in results {
            match result {
                Ok(file) => {
                    sources.insert(file);
                }
                Err(err) => tracing::warn!("skipping file: {err}"),
            }
        }
    }

    fn describe(&self) -> String {
        match &self.target {
            ScanTarget::Root(root) => root.path.display().to_string(),
            ScanTarget::Dirs(_) => "system declarations".to_string(),
        }
    }
}
