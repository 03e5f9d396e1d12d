//! Indented text rendering of a parsed file, for diagnostics.
//!
//! The output is meant for people (and snapshot-style tests), not for
//! machine parsing:
//!
//! ```text
//! using <root>
//! using GLib
//! namespace <root> [0..64]
//!   class Foo : Object [0..64]
//!     field count: int [14..25]
//! ```

use std::fmt::Write;

use super::file::SourceFile;
use super::node::NodeKind;
use crate::base::NodeId;

/// Render `file` as an indented tree, two spaces per level.
pub fn dump(file: &SourceFile) -> String {
    let mut out = String::new();
    for using in file.usings() {
        let shown = if using.is_empty() { "<root>" } else { using.as_str() };
        let _ = writeln!(out, "using {shown}");
    }
    dump_node(file, file.root(), 0, &mut out);
    out
}

fn dump_node(file: &SourceFile, id: NodeId, depth: usize, out: &mut String) {
    let node = file.node(id);
    let _ = write!(out, "{:indent$}{}", "", node.kind.label(), indent = depth * 2);

    match &node.kind {
        NodeKind::Namespace(ns) => {
            let shown = if ns.full_name.is_empty() { "<root>" } else { ns.full_name.as_str() };
            let _ = write!(out, " {shown}");
        }
        NodeKind::Class(class) => {
            let _ = write!(out, " {}", class.name);
            if !class.supertypes.is_empty() {
                let supers: Vec<String> = class.supertypes.iter().map(|s| s.to_string()).collect();
                let _ = write!(out, " : {}", supers.join(", "));
            }
        }
        NodeKind::Field(var) | NodeKind::Parameter(var) | NodeKind::LocalVariable(var) => {
            let _ = write!(out, " {}: {}", var.name, var.ty);
        }
        NodeKind::Property(prop) => {
            let _ = write!(out, " {}: {}", prop.name, prop.ty);
        }
        NodeKind::Method(method) | NodeKind::Constructor(method) => {
            match &method.name {
                Some(name) => {
                    let _ = write!(out, " {name}");
                }
                None => out.push_str(" <default>"),
            }
            if let Some(ret) = &method.return_type {
                let _ = write!(out, ": {ret}");
            }
        }
        NodeKind::Block(_) | NodeKind::Declaration(_) | NodeKind::ForEach(_) | NodeKind::Statement => {}
    }

    let _ = writeln!(out, " [{}..{}]", u32::from(node.range.start()), u32::from(node.range.end()));

    for child in node.kind.children() {
        dump_node(file, child, depth + 1, out);
    }
}
