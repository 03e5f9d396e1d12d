//! Syntax tree model.
//!
//! A [`SourceFile`] owns an arena of [`Node`]s. Node 0 is the file's
//! unnamed top-level namespace; everything else hangs off it. Trees are
//! produced by [`crate::parser`] and replaced wholesale on reparse.

mod dump;
mod file;
mod name;
mod node;

pub use dump::dump;
pub use file::{SourceFile, SyntaxError};
pub use name::{CompoundName, is_identifier};
pub use node::{
    Block, Class, ClassKind, DeclarationStatement, ForEach, Method, Namespace, Node, NodeKind,
    Property, Variable,
};
