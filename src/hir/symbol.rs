//! Symbols: the named nodes a reference can resolve to.

use std::fmt;

use smol_str::{SmolStr, format_smolstr};

use crate::base::{NodeId, SymbolId, TextRange};
use crate::syntax::{ClassKind, CompoundName, Node, NodeKind, SourceFile};

/// What kind of declaration a symbol is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Class,
    Interface,
    Struct,
    Enum,
    ErrorDomain,
    Field,
    Property,
    Parameter,
    LocalVariable,
    Method,
    Constructor,
}

impl SymbolKind {
    fn of(kind: &NodeKind) -> Option<Self> {
        Some(match kind {
            NodeKind::Namespace(_) => SymbolKind::Namespace,
            NodeKind::Class(class) => match class.kind {
                ClassKind::Class => SymbolKind::Class,
                ClassKind::Interface => SymbolKind::Interface,
                ClassKind::Struct => SymbolKind::Struct,
                ClassKind::Enum => SymbolKind::Enum,
                ClassKind::ErrorDomain => SymbolKind::ErrorDomain,
            },
            NodeKind::Field(_) => SymbolKind::Field,
            NodeKind::Property(_) => SymbolKind::Property,
            NodeKind::Parameter(_) => SymbolKind::Parameter,
            NodeKind::LocalVariable(_) => SymbolKind::LocalVariable,
            NodeKind::Method(_) => SymbolKind::Method,
            NodeKind::Constructor(_) => SymbolKind::Constructor,
            NodeKind::Block(_)
            | NodeKind::Declaration(_)
            | NodeKind::ForEach(_)
            | NodeKind::Statement => return None,
        })
    }

    /// Usable as a type reference: namespaces and class-likes.
    pub fn is_type(self) -> bool {
        self == SymbolKind::Namespace || self.is_class_like()
    }

    pub fn is_class_like(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Interface
                | SymbolKind::Struct
                | SymbolKind::Enum
                | SymbolKind::ErrorDomain
        )
    }

    /// Has a declared type.
    pub fn is_variable(self) -> bool {
        matches!(
            self,
            SymbolKind::Field
                | SymbolKind::Property
                | SymbolKind::Parameter
                | SymbolKind::LocalVariable
        )
    }

    pub fn is_method(self) -> bool {
        matches!(self, SymbolKind::Method | SymbolKind::Constructor)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Struct => "struct",
            SymbolKind::Enum => "enum",
            SymbolKind::ErrorDomain => "errordomain",
            SymbolKind::Field => "field",
            SymbolKind::Property => "property",
            SymbolKind::Parameter => "parameter",
            SymbolKind::LocalVariable => "local",
            SymbolKind::Method => "method",
            SymbolKind::Constructor => "constructor",
        }
    }
}

/// A symbol node, borrowed from the file that owns it.
///
/// The borrow ties every handle to the tree it came from: once that tree is
/// replaced by a reparse, no `SymbolRef` into it can still exist.
#[derive(Clone, Copy)]
pub struct SymbolRef<'a> {
    file: &'a SourceFile,
    node: NodeId,
}

impl<'a> SymbolRef<'a> {
    /// `None` if `node` is not a symbol.
    pub fn new(file: &'a SourceFile, node: NodeId) -> Option<Self> {
        file.get(node)?
            .kind
            .is_symbol()
            .then_some(Self { file, node })
    }

    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    pub fn node_id(&self) -> NodeId {
        self.node
    }

    pub fn id(&self) -> SymbolId {
        SymbolId::new(self.file.id(), self.node)
    }

    pub fn node(&self) -> &'a Node {
        self.file.node(self.node)
    }

    pub fn kind(&self) -> SymbolKind {
        // Construction guarantees a symbol node.
        SymbolKind::of(&self.node().kind).unwrap_or(SymbolKind::Namespace)
    }

    /// Declared name; `None` for an unnamed constructor.
    pub fn name(&self) -> Option<&'a SmolStr> {
        self.node().kind.name()
    }

    pub fn range(&self) -> TextRange {
        self.node().range
    }

    pub fn declared_type(&self) -> Option<&'a CompoundName> {
        self.node().kind.declared_type()
    }

    /// The class a constructor belongs to.
    pub fn owner_class(&self) -> Option<SymbolRef<'a>> {
        match &self.node().kind {
            NodeKind::Constructor(ctor) => SymbolRef::new(self.file, ctor.owner?),
            _ => None,
        }
    }

    /// Name a query matches against. An unnamed constructor answers to its
    /// class's name.
    pub fn match_name(&self) -> Option<&'a SmolStr> {
        match self.name() {
            Some(name) => Some(name),
            None => self.owner_class()?.name(),
        }
    }

    /// Name shown to users and used to deduplicate query results.
    ///
    /// Constructors show as `Class` or `Class.named`.
    pub fn label(&self) -> SmolStr {
        if self.kind() == SymbolKind::Constructor {
            let class = self.owner_class().and_then(|c| c.name()).cloned().unwrap_or_default();
            return match self.name() {
                Some(name) => format_smolstr!("{class}.{name}"),
                None => class,
            };
        }
        self.name().cloned().unwrap_or_default()
    }
}

impl PartialEq for SymbolRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for SymbolRef<'_> {}

impl fmt::Debug for SymbolRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}",
            self.kind().display_name(),
            self.label(),
            self.file.path().display()
        )
    }
}
