//! Scopes and position-specific scope chains.
//!
//! A scope is any node that makes names visible to positions inside it:
//! blocks, loop bodies, methods, classes, namespaces, and the file itself.
//! A [`ScopeChain`] is built fresh for one query by descending the tree
//! toward a position; it borrows the tree, so it can never outlive a
//! reparse.

use rustc_hash::FxHashSet;

use super::query::SymbolQuery;
use super::resolve::Resolver;
use super::symbol::{SymbolKind, SymbolRef};
use crate::base::{NodeId, TextSize};
use crate::syntax::{Block, ForEach, Method, NodeKind, SourceFile};

/// Something that contributes visible symbols to a query.
pub trait Scope<'a> {
    /// Offer the symbols declared here that are visible at `pos`.
    ///
    /// Returns `true` when the query is satisfied and enclosing scopes must
    /// not be searched.
    fn lookup(&self, resolver: &Resolver<'a>, query: &mut SymbolQuery<'a>, pos: TextSize) -> bool;
}

/// Offer `ids` that are symbols, stopping when the query does.
fn offer<'a>(file: &'a SourceFile, ids: &[NodeId], query: &mut SymbolQuery<'a>) -> bool {
    ids.iter()
        .filter_map(|&id| SymbolRef::new(file, id))
        .any(|symbol| query.add(symbol))
}

// ============================================================================
// SCOPE KINDS
// ============================================================================

/// Statements in order. A local is visible from the start of the statement
/// that declares it.
#[derive(Clone, Copy, Debug)]
pub struct BlockScope<'a> {
    pub file: &'a SourceFile,
    pub block: &'a Block,
}

impl<'a> Scope<'a> for BlockScope<'a> {
    fn lookup(&self, _: &Resolver<'a>, query: &mut SymbolQuery<'a>, pos: TextSize) -> bool {
        for &statement in &self.block.statements {
            let node = self.file.node(statement);
            if node.range.start() > pos {
                break;
            }
            if let NodeKind::Declaration(decl) = &node.kind {
                if offer(self.file, &decl.variables, query) {
                    return true;
                }
            }
        }
        false
    }
}

/// The loop variable.
#[derive(Clone, Copy, Debug)]
pub struct ForEachScope<'a> {
    pub file: &'a SourceFile,
    pub each: &'a ForEach,
}

impl<'a> Scope<'a> for ForEachScope<'a> {
    fn lookup(&self, _: &Resolver<'a>, query: &mut SymbolQuery<'a>, _: TextSize) -> bool {
        offer(self.file, std::slice::from_ref(&self.each.variable), query)
    }
}

/// Parameters of a method or constructor.
#[derive(Clone, Copy, Debug)]
pub struct MethodScope<'a> {
    pub file: &'a SourceFile,
    pub method: &'a Method,
}

impl<'a> Scope<'a> for MethodScope<'a> {
    fn lookup(&self, _: &Resolver<'a>, query: &mut SymbolQuery<'a>, _: TextSize) -> bool {
        offer(self.file, &self.method.params, query)
    }
}

/// Members of a class and, through its supertypes, inherited members.
/// Declaration order does not matter.
#[derive(Clone, Copy, Debug)]
pub struct ClassScope<'a> {
    pub class: SymbolRef<'a>,
}

impl<'a> Scope<'a> for ClassScope<'a> {
    fn lookup(&self, resolver: &Resolver<'a>, query: &mut SymbolQuery<'a>, _: TextSize) -> bool {
        let mut seen = FxHashSet::default();
        resolver.lookup_in_class(self.class, query, &mut seen)
    }
}

/// A logical namespace: the members of every namespace block with this full
/// name, across the whole program.
#[derive(Clone, Copy, Debug)]
pub struct NamespaceScope<'a> {
    pub full_name: &'a str,
}

impl<'a> Scope<'a> for NamespaceScope<'a> {
    fn lookup(&self, resolver: &Resolver<'a>, query: &mut SymbolQuery<'a>, _: TextSize) -> bool {
        resolver.sources().lookup_in_namespace(self.full_name, query)
    }
}

/// The file's using directives, root namespace first. The first imported
/// namespace that satisfies the query wins.
#[derive(Clone, Copy, Debug)]
pub struct FileScope<'a> {
    pub file: &'a SourceFile,
}

impl<'a> Scope<'a> for FileScope<'a> {
    fn lookup(&self, resolver: &Resolver<'a>, query: &mut SymbolQuery<'a>, _: TextSize) -> bool {
        let sources = resolver.sources();
        self.file
            .usings()
            .iter()
            .any(|using| sources.lookup_in_namespace(using, query))
    }
}

/// Any scope, dispatched by kind.
#[derive(Clone, Copy, Debug)]
pub enum ScopeRef<'a> {
    File(FileScope<'a>),
    Namespace(NamespaceScope<'a>),
    Class(ClassScope<'a>),
    Method(MethodScope<'a>),
    Block(BlockScope<'a>),
    ForEach(ForEachScope<'a>),
}

impl<'a> ScopeRef<'a> {
    /// The scope a node opens, if it opens one.
    pub fn from_node(file: &'a SourceFile, id: NodeId) -> Option<Self> {
        Some(match &file.get(id)?.kind {
            NodeKind::Namespace(ns) => ScopeRef::Namespace(NamespaceScope {
                full_name: &ns.full_name,
            }),
            NodeKind::Class(_) => ScopeRef::Class(ClassScope {
                class: SymbolRef::new(file, id)?,
            }),
            NodeKind::Method(method) | NodeKind::Constructor(method) => {
                ScopeRef::Method(MethodScope { file, method })
            }
            NodeKind::Block(block) => ScopeRef::Block(BlockScope { file, block }),
            NodeKind::ForEach(each) => ScopeRef::ForEach(ForEachScope { file, each }),
            _ => return None,
        })
    }

    /// The member scope of a type symbol. Only namespaces and class-likes
    /// have members that can be named from outside.
    pub fn of_symbol(symbol: SymbolRef<'a>) -> Option<Self> {
        let kind = symbol.kind();
        if kind == SymbolKind::Namespace || kind.is_class_like() {
            Self::from_node(symbol.file(), symbol.node_id())
        } else {
            None
        }
    }

    /// One-line description for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            ScopeRef::File(scope) => format!("file {}", scope.file.path().display()),
            ScopeRef::Namespace(scope) => format!("namespace {}", scope.full_name),
            ScopeRef::Class(scope) => format!("{} {}", scope.class.kind().display_name(), scope.class.label()),
            ScopeRef::Method(scope) => match &scope.method.name {
                Some(name) => format!("method {name}"),
                None => "constructor".to_string(),
            },
            ScopeRef::Block(scope) => format!("block ({} statements)", scope.block.statements.len()),
            ScopeRef::ForEach(_) => "foreach".to_string(),
        }
    }
}

impl<'a> Scope<'a> for ScopeRef<'a> {
    fn lookup(&self, resolver: &Resolver<'a>, query: &mut SymbolQuery<'a>, pos: TextSize) -> bool {
        match self {
            ScopeRef::File(scope) => scope.lookup(resolver, query, pos),
            ScopeRef::Namespace(scope) => scope.lookup(resolver, query, pos),
            ScopeRef::Class(scope) => scope.lookup(resolver, query, pos),
            ScopeRef::Method(scope) => scope.lookup(resolver, query, pos),
            ScopeRef::Block(scope) => scope.lookup(resolver, query, pos),
            ScopeRef::ForEach(scope) => scope.lookup(resolver, query, pos),
        }
    }
}

// ============================================================================
// SCOPE CHAIN
// ============================================================================

/// The scopes enclosing a position, innermost first.
#[derive(Clone, Debug)]
pub struct ScopeChain<'a> {
    scope: ScopeRef<'a>,
    parent: Option<Box<ScopeChain<'a>>>,
}

impl<'a> ScopeChain<'a> {
    pub fn new(scope: ScopeRef<'a>, parent: Option<ScopeChain<'a>>) -> Self {
        Self {
            scope,
            parent: parent.map(Box::new),
        }
    }

    /// The chain at `pos` in `file`.
    pub fn at(file: &'a SourceFile, pos: TextSize) -> Self {
        Self::descend(file, pos, None)
    }

    /// The chain just outside node `exclude`, reached by descending toward
    /// `pos`. Used to resolve a class's supertypes without the class's own
    /// members in view.
    pub fn at_excluding(file: &'a SourceFile, exclude: NodeId, pos: TextSize) -> Self {
        Self::descend(file, pos, Some(exclude))
    }

    /// Walk from the root toward `pos`, entering the first child whose
    /// closed range `[start, end]` contains it. The root namespace is
    /// covered by the file scope's implicit root import, so it is not
    /// pushed.
    fn descend(file: &'a SourceFile, pos: TextSize, exclude: Option<NodeId>) -> Self {
        let mut chain = ScopeChain::new(ScopeRef::File(FileScope { file }), None);
        let mut current = file.root();
        loop {
            let next = file
                .node(current)
                .kind
                .children()
                .find(|&child| file.node(child).range.contains_inclusive(pos));
            let Some(child) = next else {
                break;
            };
            if Some(child) == exclude {
                break;
            }
            if let Some(scope) = ScopeRef::from_node(file, child) {
                chain = ScopeChain::new(scope, Some(chain));
            }
            current = child;
        }
        chain
    }

    pub fn scope(&self) -> &ScopeRef<'a> {
        &self.scope
    }

    pub fn parent(&self) -> Option<&ScopeChain<'a>> {
        self.parent.as_deref()
    }

    /// Scopes from innermost to outermost.
    pub fn scopes(&self) -> impl Iterator<Item = &ScopeRef<'a>> {
        std::iter::successors(Some(self), |chain| chain.parent()).map(ScopeChain::scope)
    }

    /// Walk outward until a scope satisfies the query.
    pub fn lookup(&self, resolver: &Resolver<'a>, query: &mut SymbolQuery<'a>, pos: TextSize) -> bool {
        self.scopes().any(|scope| scope.lookup(resolver, query, pos))
    }

    /// The chain innermost-first, one line per scope.
    pub fn describe(&self) -> Vec<String> {
        self.scopes().map(ScopeRef::describe).collect()
    }
}
