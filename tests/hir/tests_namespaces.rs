//! Namespace merging, using directives and lookup stage ordering.

use std::path::Path;

use valence::hir::SymbolKind;

use crate::helpers::hir_helpers::*;

const CIRCLE: &str = "\
/* circle.vala
 *
 * Copyright (C) 2011 The Shapes Authors
 */

namespace Shapes {
    /** A round shape. */
    public class Circle { }
}
";
const SQUARE: &str = "\
// square.vala
namespace Shapes {
    /**
     * A shape with four equal sides.
     */
    public class Square { /* no members */ }
}
";
const CANVAS: &str = "\
using Shapes;

class Canvas {
    void draw () {
        paint ();
    }
}
";

#[test]
fn test_namespace_merged_across_files() {
    let set = source_set(&[("circle.vala", CIRCLE), ("square.vala", SQUARE), ("canvas.vala", CANVAS)]);
    let file = file(&set, "canvas.vala");
    let resolver = resolver(&set, None);
    let at = offset_of(CANVAS, "paint");

    let circle = resolver.resolve(&name("Circle"), file, at).unwrap();
    assert_eq!(circle.file().path(), Path::new("circle.vala"));
    let square = resolver.resolve(&name("Square"), file, at).unwrap();
    assert_eq!(square.file().path(), Path::new("square.vala"));
    let qualified = resolver.resolve(&name("Shapes.Square"), file, at).unwrap();
    assert_eq!(qualified, square);
}

#[test]
fn test_prefix_over_merged_namespace() {
    let set = source_set(&[("circle.vala", CIRCLE), ("square.vala", SQUARE), ("canvas.vala", CANVAS)]);
    let file = file(&set, "canvas.vala");
    let found = resolver(&set, None).resolve_prefix(&name("Shapes."), file, offset_of(CANVAS, "paint"), false);
    assert_eq!(labels(&found), vec!["Circle", "Square"]);
}

#[test]
fn test_namespace_members_need_using() {
    let plain = "class Canvas { void draw () { paint (); } }\n";
    let set = source_set(&[("circle.vala", CIRCLE), ("plain.vala", plain)]);
    let file = file(&set, "plain.vala");
    let resolver = resolver(&set, None);
    let at = offset_of(plain, "paint");

    assert!(resolver.resolve(&name("Circle"), file, at).is_none());
    assert!(resolver.resolve(&name("Shapes.Circle"), file, at).is_some());
}

#[test]
fn test_first_using_wins() {
    let first = "namespace First { class Thing { int from_first; } }\n";
    let second = "namespace Second { class Thing { int from_second; } }\n";
    let user = "using First;\nusing Second;\nclass User { Thing thing; }\n";
    let set = source_set(&[("second.vala", second), ("first.vala", first), ("user.vala", user)]);
    let file = file(&set, "user.vala");

    let found = resolver(&set, None)
        .resolve_type(&name("Thing"), file, offset_of(user, "Thing thing"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].file().path(), Path::new("first.vala"));
}

#[test]
fn test_enclosing_namespaces_are_in_scope() {
    let source = "\
namespace App {
    class Shared { }
}
namespace App.Core {
    class User : Shared {
        Shared field;
    }
}
";
    let set = source_set(&[("app.vala", source)]);
    let file = file(&set, "app.vala");
    let found = resolver(&set, None).resolve_type(&name("Shared"), file, offset_of(source, "Shared field"));
    assert_eq!(labels(&found), vec!["Shared"]);
    assert_eq!(found[0].kind(), SymbolKind::Class);
}

// ============================================================================
// STAGE ORDERING
// ============================================================================

const NET_VAPI: &str = "namespace Net { public class Socket { public int vapi_only; } }\n";
const NET_VALA: &str = "/* Licensed under the LGPL. */\nnamespace Net { public class Socket { public int impl_only; /* bytes */ } }\n";
const NET_USER: &str = "using Net;\nclass App { Socket socket; }\n";

#[test]
fn test_source_file_beats_declaration_file() {
    // The declaration file is inserted first; stage order must still win.
    let set = source_set(&[("net.vapi", NET_VAPI), ("net.vala", NET_VALA), ("app.vala", NET_USER)]);
    let file = file(&set, "app.vala");
    let resolver = resolver(&set, None);
    let at = offset_of(NET_USER, "Socket socket");

    let socket = resolver.resolve(&name("Socket"), file, at).unwrap();
    assert_eq!(socket.file().path(), Path::new("net.vala"));
    assert!(resolver.resolve(&name("Socket.impl_only"), file, at).is_some());
    assert!(resolver.resolve(&name("Socket.vapi_only"), file, at).is_none());
}

#[test]
fn test_prefix_sees_every_stage() {
    let only_vapi = "namespace Net { public class Address { } }\n";
    let set = source_set(&[("addr.vapi", only_vapi), ("net.vala", NET_VALA), ("app.vala", NET_USER)]);
    let file = file(&set, "app.vala");
    let found = resolver(&set, None).resolve_prefix(&name("Net."), file, offset_of(NET_USER, "Socket socket"), false);
    assert_eq!(labels(&found), vec!["Socket", "Address"]);
}

#[test]
fn test_system_declarations_come_last() {
    let system = source_set(&[("glib-2.0.vapi", "namespace GLib { public class Object { public int from_system; } }\n")]);
    let user = "using GLib;\nclass Widget : Object { void show () { use (); } }\n";

    let local = source_set(&[("widget.vala", user)]);
    let widget = file(&local, "widget.vala");
    let at = offset_of(user, "use ()");

    assert!(resolver(&local, None).resolve_type(&name("Object"), widget, at).is_empty());
    let with_system = resolver(&local, Some(&system));
    let object = with_system.resolve_type(&name("Object"), widget, at);
    assert_eq!(object[0].file().path(), Path::new("glib-2.0.vapi"));
    assert!(with_system.resolve(&name("from_system"), widget, at).is_some());

    let shadow = "namespace GLib { public class Object { public int from_local; } }\n";
    let shadowed = source_set(&[("widget.vala", user), ("glib.vapi", shadow)]);
    let widget = file(&shadowed, "widget.vala");
    let with_system = resolver(&shadowed, Some(&system));
    let object = with_system.resolve_type(&name("Object"), widget, at);
    assert_eq!(object[0].file().path(), Path::new("glib.vapi"));
}
