//! Semantic layer: symbols, scopes, and name resolution.
//!
//! ## Architecture
//!
//! ```text
//! SourceSet (local) + SourceSet (system)
//!     ↓ Sources: namespace lookup ordering
//! ScopeChain::at(file, pos)           - built per query, borrows the tree
//!     ↓ Scope::lookup, innermost first
//! SymbolQuery                         - matches, filters, deduplicates
//!     ↓
//! Resolver::{resolve, resolve_type, resolve_prefix, resolve_constructor}
//! ```
//!
//! Nothing is cached between queries. Supertypes and declared types are
//! resolved on demand, so replacing one file's tree can never leave stale
//! resolutions behind in another.

mod hierarchy;
mod query;
mod resolve;
mod scope;
mod source;
mod symbol;

pub use query::{QueryOptions, SymbolQuery};
pub use resolve::Resolver;
pub use scope::{
    BlockScope, ClassScope, FileScope, ForEachScope, MethodScope, NamespaceScope, Scope,
    ScopeChain, ScopeRef,
};
pub use source::{SourceSet, Sources};
pub use symbol::{SymbolKind, SymbolRef};
