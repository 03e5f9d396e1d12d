//! Handles for source files and the nodes parsed out of them.
//!
//! All three are plain indices. A [`NodeId`] is only meaningful together with
//! the [`SourceFile`](crate::syntax::SourceFile) whose arena produced it, and
//! only until that file is reparsed.

use std::fmt;

/// Identifier of a source file within a registry.
///
/// Assigned once per path by [`FileSet`](crate::project::FileSet) and kept
/// across reparses of the same path.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

impl From<u32> for FileId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Index of a node inside one file's node arena.
///
/// `NodeId(0)` is always the file's unnamed top-level namespace.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root namespace of every file.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Position in the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A node anywhere in the registry: the owning file plus the arena index.
///
/// Used as the identity of a symbol where names are not enough, e.g. the
/// seen-set of the class hierarchy walk.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct SymbolId {
    pub file: FileId,
    pub node: NodeId,
}

impl SymbolId {
    #[inline]
    pub const fn new(file: FileId, node: NodeId) -> Self {
        Self { file, node }
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({}:{})", self.file.0, self.node.0)
    }
}
