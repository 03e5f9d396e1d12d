//! HIR test helpers: in-memory source sets and cursor lookups.

use std::path::Path;

use valence::base::{FileId, TextSize};
use valence::hir::{Resolver, SourceSet, Sources, SymbolRef};
use valence::parser::parse;
use valence::syntax::{CompoundName, SourceFile};

/// Parse `(path, text)` pairs into a source set, ids in order.
pub fn source_set(files: &[(&str, &str)]) -> SourceSet {
    let mut set = SourceSet::new();
    for (index, (path, text)) in files.iter().enumerate() {
        let file = parse(FileId::new(index as u32), *path, text)
            .unwrap_or_else(|err| panic!("failed to parse {path}: {err}"));
        set.insert(file);
    }
    set
}

pub fn file<'a>(set: &'a SourceSet, path: &str) -> &'a SourceFile {
    set.get(Path::new(path))
        .unwrap_or_else(|| panic!("{path} not in source set"))
}

/// Offset of the first occurrence of `needle` in `text`.
pub fn offset_of(text: &str, needle: &str) -> TextSize {
    let index = text
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found"));
    TextSize::from(index as u32)
}

/// Offset just past the first occurrence of `needle` in `text`.
pub fn offset_after(text: &str, needle: &str) -> TextSize {
    offset_of(text, needle) + TextSize::of(needle)
}

pub fn name(text: &str) -> CompoundName {
    CompoundName::parse(text).unwrap_or_else(|| panic!("bad name {text:?}"))
}

pub fn resolver<'a>(local: &'a SourceSet, system: Option<&'a SourceSet>) -> Resolver<'a> {
    Resolver::new(Sources::new(local, system))
}

/// Labels of a result set, in order.
pub fn labels(symbols: &[SymbolRef<'_>]) -> Vec<String> {
    symbols.iter().map(|s| s.label().to_string()).collect()
}
