//! Source sets and program-wide namespace lookup.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::query::SymbolQuery;
use super::symbol::SymbolRef;
use crate::base::FileId;
use crate::syntax::{NodeKind, SourceFile};

/// An ordered set of parsed files, keyed by path.
///
/// Order is first-insertion order; replacing a file keeps its position so
/// lookups stay deterministic across reparses.
#[derive(Clone, Debug, Default)]
pub struct SourceSet {
    files: IndexMap<PathBuf, SourceFile>,
}

impl SourceSet {
    /// Create a new empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing (and returning) any tree for the same path.
    pub fn insert(&mut self, file: SourceFile) -> Option<SourceFile> {
        self.files.insert(file.path().to_path_buf(), file)
    }

    pub fn get(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn remove(&mut self, path: &Path) -> Option<SourceFile> {
        self.files.shift_remove(path)
    }

    /// Find a file by id.
    pub fn by_id(&self, id: FileId) -> Option<&SourceFile> {
        self.files.values().find(|file| file.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Offer the members of namespace `full_name` from every file accepted
    /// by `filter`, in file order. Stops as soon as the query does.
    pub fn lookup_in_namespace<'a>(
        &'a self,
        full_name: &str,
        query: &mut SymbolQuery<'a>,
        filter: impl Fn(&SourceFile) -> bool,
    ) -> bool {
        for file in self.files.values().filter(|file| filter(file)) {
            for &ns in file.namespaces() {
                let NodeKind::Namespace(data) = &file.node(ns).kind else {
                    continue;
                };
                if data.full_name != full_name {
                    continue;
                }
                for &member in &data.members {
                    let Some(symbol) = SymbolRef::new(file, member) else {
                        continue;
                    };
                    if query.add(symbol) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

/// Everything a query can see: the program's own files plus, once loaded,
/// the system declarations.
#[derive(Clone, Copy, Debug)]
pub struct Sources<'a> {
    pub local: &'a SourceSet,
    pub system: Option<&'a SourceSet>,
}

impl<'a> Sources<'a> {
    pub fn new(local: &'a SourceSet, system: Option<&'a SourceSet>) -> Self {
        Self { local, system }
    }

    /// Look up a logical namespace.
    ///
    /// Stages run in order and the first one that satisfies the query wins:
    /// local ordinary files, then local declaration-only files, then system
    /// declarations. A prefix query is never satisfied, so every stage
    /// contributes and earlier stages win name clashes.
    pub fn lookup_in_namespace(&self, full_name: &str, query: &mut SymbolQuery<'a>) -> bool {
        self.local
            .lookup_in_namespace(full_name, query, |file| !file.is_declaration_only())
            || self
                .local
                .lookup_in_namespace(full_name, query, SourceFile::is_declaration_only)
            || self
                .system
                .is_some_and(|system| system.lookup_in_namespace(full_name, query, |_| true))
    }

    /// A file by id, local first.
    pub fn file(&self, id: FileId) -> Option<&'a SourceFile> {
        self.local
            .by_id(id)
            .or_else(|| self.system.and_then(|system| system.by_id(id)))
    }
}
