//! The build-configuration collaborator.
//!
//! The engine never reads build files. Something that does (a meson or
//! CMake integration, an editor's project model, a test) implements
//! [`BuildConfig`] and tells the registry which directory is a project's
//! root and which files belong to it.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::error::LoadResult;
use super::scan::discover_sources;

/// A project's top-level source directory.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BuildRoot {
    pub path: PathBuf,
    /// Whether the project spans the subdirectories of `path`.
    pub recursive: bool,
}

impl BuildRoot {
    pub fn new(path: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            path: path.into(),
            recursive,
        }
    }

    /// A directory nobody claims is its own, non-recursive root.
    pub fn fallback(dir: &Path) -> Self {
        Self::new(dir, false)
    }
}

/// Injected source-list provider.
pub trait BuildConfig: Send + Sync {
    /// The root governing `dir`, or `None` when the configuration has no
    /// answer for it.
    fn build_root(&self, dir: &Path) -> Option<BuildRoot>;

    /// The ordered source files of `root`.
    fn source_files(&self, root: &BuildRoot, extensions: &[&str]) -> LoadResult<Vec<PathBuf>> {
        discover_sources(&root.path, root.recursive, extensions)
    }
}

/// The root for `dir`, falling back to `dir` itself.
pub fn detect(config: &dyn BuildConfig, dir: &Path) -> BuildRoot {
    config.build_root(dir).unwrap_or_else(|| {
        tracing::trace!("no build root for {}, using it as its own", dir.display());
        BuildRoot::fallback(dir)
    })
}

/// A [`BuildConfig`] backed by an explicit list of roots.
///
/// `dir` is governed by the deepest registered root that is either `dir`
/// itself or a recursive ancestor of it.
#[derive(Debug, Default)]
pub struct StaticBuildConfig {
    roots: RwLock<Vec<BuildRoot>>,
}

impl StaticBuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(self, path: impl Into<PathBuf>, recursive: bool) -> Self {
        self.add_root(path, recursive);
        self
    }

    /// Register a root, replacing any earlier registration of the same
    /// directory.
    pub fn add_root(&self, path: impl Into<PathBuf>, recursive: bool) {
        let root = BuildRoot::new(path, recursive);
        let mut roots = self.roots.write();
        roots.retain(|existing| existing.path != root.path);
        roots.push(root);
    }

    pub fn remove_root(&self, path: &Path) -> bool {
        let mut roots = self.roots.write();
        let before = roots.len();
        roots.retain(|existing| existing.path != path);
        roots.len() != before
    }
}

impl BuildConfig for StaticBuildConfig {
    fn build_root(&self, dir: &Path) -> Option<BuildRoot> {
        self.roots
            .read()
            .iter()
            .filter(|root| root.path == dir || (root.recursive && dir.starts_with(&root.path)))
            .max_by_key(|root| root.path.components().count())
            .cloned()
    }
}
