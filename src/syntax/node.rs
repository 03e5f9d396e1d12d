//! Tree nodes.
//!
//! Every node lives in its file's arena and carries a source range that
//! contains the ranges of all of its children. Back-references between nodes
//! (a constructor's class, a class's enclosing class) are plain [`NodeId`]s
//! and never own anything.

use smol_str::SmolStr;

use super::name::CompoundName;
use crate::base::{NodeId, TextRange};

/// One element of the syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub range: TextRange,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(range: TextRange, kind: NodeKind) -> Self {
        Self { range, kind }
    }
}

/// What a node is, with the data that kind carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Namespace(Namespace),
    Class(Class),
    Field(Variable),
    Property(Property),
    Parameter(Variable),
    LocalVariable(Variable),
    Method(Method),
    Constructor(Method),
    Block(Block),
    Declaration(DeclarationStatement),
    ForEach(ForEach),
    /// Any other statement. Opaque to lookup.
    Statement,
}

/// A namespace block. Several of these, across files, share one full name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Namespace {
    /// Last segment; `None` for a file's top-level namespace.
    pub name: Option<SmolStr>,
    /// Dotted name from the root, `""` for the top level.
    pub full_name: SmolStr,
    pub members: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Struct,
    Enum,
    ErrorDomain,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Struct => "struct",
            ClassKind::Enum => "enum",
            ClassKind::ErrorDomain => "errordomain",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    pub name: SmolStr,
    pub kind: ClassKind,
    /// Declared supertypes in source order, resolved at lookup time only.
    pub supertypes: Vec<CompoundName>,
    pub members: Vec<NodeId>,
    /// Enclosing class, for display.
    pub enclosing: Option<NodeId>,
}

/// Fields, parameters and locals: a name with a declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: SmolStr,
    pub ty: CompoundName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub name: SmolStr,
    pub ty: CompoundName,
    /// Accessor bodies (`get { ... }`), as blocks.
    pub accessors: Vec<NodeId>,
}

/// Methods, constructors, delegates and signals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    /// `None` only for a class's default constructor.
    pub name: Option<SmolStr>,
    pub return_type: Option<CompoundName>,
    pub params: Vec<NodeId>,
    pub body: Option<NodeId>,
    /// Declaring class, for constructors.
    pub owner: Option<NodeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<NodeId>,
}

/// `T a = x, b;` introduces `a` and `b` at the statement's position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclarationStatement {
    pub variables: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForEach {
    pub variable: NodeId,
    pub body: Option<NodeId>,
}

impl NodeKind {
    /// Declared name of a symbol node. `None` for non-symbols and for an
    /// unnamed constructor or top-level namespace.
    pub fn name(&self) -> Option<&SmolStr> {
        match self {
            NodeKind::Namespace(ns) => ns.name.as_ref(),
            NodeKind::Class(class) => Some(&class.name),
            NodeKind::Field(var) | NodeKind::Parameter(var) | NodeKind::LocalVariable(var) => {
                Some(&var.name)
            }
            NodeKind::Property(prop) => Some(&prop.name),
            NodeKind::Method(method) | NodeKind::Constructor(method) => method.name.as_ref(),
            NodeKind::Block(_)
            | NodeKind::Declaration(_)
            | NodeKind::ForEach(_)
            | NodeKind::Statement => None,
        }
    }

    /// Whether the node declares something a name can refer to.
    pub fn is_symbol(&self) -> bool {
        matches!(
            self,
            NodeKind::Namespace(_)
                | NodeKind::Class(_)
                | NodeKind::Field(_)
                | NodeKind::Property(_)
                | NodeKind::Parameter(_)
                | NodeKind::LocalVariable(_)
                | NodeKind::Method(_)
                | NodeKind::Constructor(_)
        )
    }

    /// Whether the node contributes names to positions inside it.
    pub fn is_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::Namespace(_)
                | NodeKind::Class(_)
                | NodeKind::Method(_)
                | NodeKind::Constructor(_)
                | NodeKind::Block(_)
                | NodeKind::ForEach(_)
        )
    }

    /// Declared type of a variable-like node.
    pub fn declared_type(&self) -> Option<&CompoundName> {
        match self {
            NodeKind::Field(var) | NodeKind::Parameter(var) | NodeKind::LocalVariable(var) => {
                Some(&var.ty)
            }
            NodeKind::Property(prop) => Some(&prop.ty),
            _ => None,
        }
    }

    /// Children in source order, as entered by positional descent.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        let (list, tail): (&[NodeId], Option<NodeId>) = match self {
            NodeKind::Namespace(ns) => (ns.members.as_slice(), None),
            NodeKind::Class(class) => (class.members.as_slice(), None),
            NodeKind::Property(prop) => (prop.accessors.as_slice(), None),
            NodeKind::Method(method) | NodeKind::Constructor(method) => {
                (method.params.as_slice(), method.body)
            }
            NodeKind::Block(block) => (block.statements.as_slice(), None),
            NodeKind::Declaration(decl) => (decl.variables.as_slice(), None),
            NodeKind::ForEach(each) => (std::slice::from_ref(&each.variable), each.body),
            NodeKind::Field(_)
            | NodeKind::Parameter(_)
            | NodeKind::LocalVariable(_)
            | NodeKind::Statement => (&[], None),
        };
        list.iter().copied().chain(tail)
    }

    /// Short lowercase label used by the tree dump.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Namespace(_) => "namespace",
            NodeKind::Class(class) => class.kind.keyword(),
            NodeKind::Field(_) => "field",
            NodeKind::Property(_) => "property",
            NodeKind::Parameter(_) => "parameter",
            NodeKind::LocalVariable(_) => "local",
            NodeKind::Method(_) => "method",
            NodeKind::Constructor(_) => "constructor",
            NodeKind::Block(_) => "block",
            NodeKind::Declaration(_) => "declaration",
            NodeKind::ForEach(_) => "foreach",
            NodeKind::Statement => "statement",
        }
    }
}
