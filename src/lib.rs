//! # valence-base
//!
//! Static symbol resolution for Vala sources: scopes, scope chains, name
//! lookup through class hierarchies and namespaces spread over many files.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → Consumer API (AnalysisHost, goto-definition, completion)
//!   ↓
//! project  → Build roots, resumable scans, programs, registry
//!   ↓
//! hir      → Symbols, scopes, scope chains, resolver
//!   ↓
//! syntax   → Node arena, compound names, tree dump
//!   ↓
//! parser   → Lexer (logos) + recursive-descent parser
//!   ↓
//! base     → Primitives (FileId, NodeId, TextRange, LineIndex)
//! ```

/// Foundation types: ids, offsets, line index, constants
pub mod base;

/// Lexer and parser producing source trees
pub mod parser;

/// Source tree model
pub mod syntax;

/// Semantic layer: scopes and name resolution
pub mod hir;

/// Programs, scans and the registry
pub mod project;

/// IDE features: analysis snapshots, goto-definition, completion
pub mod ide;

// Re-export commonly needed items
pub use base::{FileId, LineCol, LineIndex, NodeId, SymbolId, TextRange, TextSize};
pub use hir::{Resolver, SymbolKind, SymbolRef};
pub use ide::{Analysis, AnalysisHost};
pub use syntax::{CompoundName, SourceFile};
