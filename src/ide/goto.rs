//! Go-to-definition implementation.

use std::path::PathBuf;

use smol_str::SmolStr;

use super::analysis::Analysis;
use super::text_utils::{compound_name_at, is_preceded_by_new};
use crate::base::{FileId, LineCol, TextRange, TextSize};
use crate::hir::{SymbolKind, SymbolRef};

/// A target location for go-to-definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    pub path: PathBuf,
    pub file: FileId,
    /// Range of the whole declaration.
    pub range: TextRange,
    /// Start of the declaration (0-indexed).
    pub position: LineCol,
    pub name: SmolStr,
    pub kind: SymbolKind,
}

impl From<SymbolRef<'_>> for GotoTarget {
    fn from(symbol: SymbolRef<'_>) -> Self {
        let file = symbol.file();
        let range = symbol.range();
        Self {
            path: file.path().to_path_buf(),
            file: file.id(),
            range,
            position: file.line_index().line_col(range.start()),
            name: symbol.label(),
            kind: symbol.kind(),
        }
    }
}

/// Find the declaration of the name under `offset`.
///
/// `text` is the editor's current content of the analysed file. After the
/// `new` keyword the name is resolved as a constructor call, landing on the
/// constructor or, for the implicit default constructor, on the class.
pub fn goto_definition(analysis: &Analysis<'_>, text: &str, offset: TextSize) -> Option<GotoTarget> {
    let (name, range) = compound_name_at(text, offset)?;
    let symbol = if is_preceded_by_new(text, range.start()) {
        analysis.resolve_constructor(&name, range.start())
    } else {
        analysis.resolve(&name, range.start())
    };
    symbol.map(GotoTarget::from)
}
