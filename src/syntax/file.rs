//! A parsed source file: node arena, using directives, namespace index.

use std::path::{Path, PathBuf};

use smol_str::SmolStr;

use super::node::{Namespace, Node, NodeKind};
use crate::base::constants::{DECLARATION_EXTENSION, ROOT_NAMESPACE};
use crate::base::{FileId, LineIndex, NodeId, TextRange, TextSize};

/// A problem the parser recovered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub offset: TextSize,
    pub message: SmolStr,
}

/// One parsed file.
///
/// The tree is built once by the parser and never edited afterwards; a
/// changed text produces a whole new `SourceFile` that replaces this one.
#[derive(Clone, Debug)]
pub struct SourceFile {
    id: FileId,
    path: PathBuf,
    declaration_only: bool,
    /// Imported namespace full names; the root namespace is always first.
    usings: Vec<SmolStr>,
    /// Every namespace node in the file, the top-level one included.
    namespaces: Vec<NodeId>,
    nodes: Vec<Node>,
    line_index: LineIndex,
    errors: Vec<SyntaxError>,
}

impl SourceFile {
    /// An empty file: just the unnamed top-level namespace.
    ///
    /// Files ending in the declaration-only extension are flagged as such.
    pub fn new(id: FileId, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let declaration_only = path
            .extension()
            .is_some_and(|ext| ext == DECLARATION_EXTENSION);
        let root = Node::new(
            TextRange::empty(TextSize::from(0)),
            NodeKind::Namespace(Namespace {
                name: None,
                full_name: SmolStr::new_static(ROOT_NAMESPACE),
                members: Vec::new(),
            }),
        );
        Self {
            id,
            path,
            declaration_only,
            usings: vec![SmolStr::new_static(ROOT_NAMESPACE)],
            namespaces: vec![NodeId::ROOT],
            nodes: vec![root],
            line_index: LineIndex::default(),
            errors: Vec::new(),
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Interface/header-style file without implementation bodies.
    pub fn is_declaration_only(&self) -> bool {
        self.declaration_only
    }

    pub fn usings(&self) -> &[SmolStr] {
        &self.usings
    }

    pub fn namespaces(&self) -> &[NodeId] {
        &self.namespaces
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes with their ids, in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i as u32), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    // ------------------------------------------------------------------
    // Construction (used by the parser)
    // ------------------------------------------------------------------

    /// Add a node to the arena. Namespaces are indexed automatically.
    pub fn alloc(&mut self, range: TextRange, kind: NodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        if matches!(kind, NodeKind::Namespace(_)) {
            self.namespaces.push(id);
        }
        self.nodes.push(Node::new(range, kind));
        id
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Move a node's end offset, keeping its start.
    pub fn set_end(&mut self, id: NodeId, end: TextSize) {
        let node = self.node_mut(id);
        let start = node.range.start();
        node.range = TextRange::new(start, end.max(start));
    }

    /// Record an imported namespace. Duplicates are ignored.
    pub fn add_using(&mut self, name: impl Into<SmolStr>) {
        let name = name.into();
        if !self.usings.contains(&name) {
            self.usings.push(name);
        }
    }

    pub fn push_error(&mut self, offset: TextSize, message: impl Into<SmolStr>) {
        self.errors.push(SyntaxError {
            offset,
            message: message.into(),
        });
    }

    /// Stretch the root namespace over the whole text and index its lines.
    pub fn finish(&mut self, text: &str) {
        self.line_index = LineIndex::new(text);
        self.nodes[NodeId::ROOT.index()].range = TextRange::up_to(TextSize::of(text));
    }
}
