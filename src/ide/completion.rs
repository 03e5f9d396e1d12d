//! Completion suggestions implementation.

use smol_str::SmolStr;

use super::analysis::Analysis;
use super::text_utils::{compound_name_before, is_preceded_by_new};
use crate::base::TextSize;
use crate::hir::{SymbolKind, SymbolRef};

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Namespace,
    Type,
    Field,
    Property,
    Variable,
    Method,
    Constructor,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Namespace => 9,    // Module
            CompletionKind::Type => 7,         // Class
            CompletionKind::Field => 5,        // Field
            CompletionKind::Property => 10,    // Property
            CompletionKind::Variable => 6,     // Variable
            CompletionKind::Method => 2,       // Method
            CompletionKind::Constructor => 4,  // Constructor
        }
    }
}

impl From<SymbolKind> for CompletionKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Namespace => CompletionKind::Namespace,
            SymbolKind::Class
            | SymbolKind::Interface
            | SymbolKind::Struct
            | SymbolKind::Enum
            | SymbolKind::ErrorDomain => CompletionKind::Type,
            SymbolKind::Field => CompletionKind::Field,
            SymbolKind::Property => CompletionKind::Property,
            SymbolKind::Parameter | SymbolKind::LocalVariable => CompletionKind::Variable,
            SymbolKind::Method => CompletionKind::Method,
            SymbolKind::Constructor => CompletionKind::Constructor,
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: SmolStr,
    pub kind: CompletionKind,
    /// Declared type, or what the symbol is.
    pub detail: Option<SmolStr>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    pub fn from_symbol(symbol: SymbolRef<'_>) -> Self {
        let kind = symbol.kind();
        // Constructors show as `Class` or `Class.named`.
        let label = symbol.label();
        let detail = match symbol.declared_type() {
            Some(ty) => SmolStr::new(ty.to_string()),
            None => SmolStr::new_static(kind.display_name()),
        };
        let sort_priority = match kind {
            SymbolKind::Parameter | SymbolKind::LocalVariable => 10,
            SymbolKind::Field
            | SymbolKind::Property
            | SymbolKind::Method
            | SymbolKind::Constructor => 20,
            SymbolKind::Namespace => 40,
            _ => 30,
        };
        Self {
            label,
            kind: kind.into(),
            detail: Some(detail),
            sort_priority,
        }
    }
}

/// Completions for the partial name ending at `offset`.
///
/// After `new`, constructors are offered instead of plain members, along
/// with namespaces so a qualified constructor can be typed step by step.
pub fn completions(analysis: &Analysis<'_>, text: &str, offset: TextSize) -> Vec<CompletionItem> {
    let Some((prefix, range)) = compound_name_before(text, offset) else {
        return Vec::new();
    };
    let constructors = is_preceded_by_new(text, range.start());
    let mut items: Vec<_> = analysis
        .resolve_prefix(&prefix, range.start(), constructors)
        .into_iter()
        .map(CompletionItem::from_symbol)
        .collect();
    // Stable: resolution order breaks ties.
    items.sort_by_key(|item| item.sort_priority);
    items
}
