//! Member lookup through supertypes.

use valence::base::TextSize;
use valence::hir::SymbolKind;

use crate::helpers::hir_helpers::*;

fn end_of(text: &str) -> TextSize {
    TextSize::of(text)
}

#[test]
fn test_mutual_cycle_terminates() {
    let source = "class A : B { int a; }\nclass B : A { int b; }\n\n";
    let set = source_set(&[("cycle.vala", source)]);
    let file = file(&set, "cycle.vala");
    let resolver = resolver(&set, None);
    let at = end_of(source);

    assert!(resolver.resolve(&name("A.missing"), file, at).is_none());
    assert!(resolver.resolve(&name("B.missing"), file, at).is_none());
    assert_eq!(resolver.resolve(&name("A.b"), file, at).unwrap().kind(), SymbolKind::Field);

    let members = resolver.resolve_prefix(&name("A."), file, at, false);
    assert_eq!(labels(&members), vec!["a", "b"]);
    let members = resolver.resolve_prefix(&name("B."), file, at, false);
    assert_eq!(labels(&members), vec!["b", "a"]);
}

#[test]
fn test_self_inheritance_terminates() {
    let source = "class Loop : Loop { int only; }\n\n";
    let set = source_set(&[("self.vala", source)]);
    let file = file(&set, "self.vala");
    let resolver = resolver(&set, None);

    assert!(resolver.resolve(&name("Loop.other"), file, end_of(source)).is_none());
    assert!(resolver.resolve(&name("Loop.only"), file, end_of(source)).is_some());
}

#[test]
fn test_members_inherited_through_chain() {
    let source = "\
class Base { int shared; }
class Mid : Base { }
class Leaf : Mid {
    void run () {
        use (shared);
    }
}
";
    let set = source_set(&[("chain.vala", source)]);
    let file = file(&set, "chain.vala");
    let found = resolver(&set, None)
        .resolve(&name("shared"), file, offset_of(source, "use (shared"))
        .unwrap();
    assert_eq!(found.kind(), SymbolKind::Field);
    assert!(found.range().start() < offset_of(source, "class Mid"));
}

#[test]
fn test_own_member_hides_inherited() {
    let source = "\
class Base { int value; }
class Derived : Base { string value; }

";
    let set = source_set(&[("hide.vala", source)]);
    let file = file(&set, "hide.vala");
    let found = resolver(&set, None)
        .resolve(&name("Derived.value"), file, end_of(source))
        .unwrap();
    assert_eq!(found.declared_type().unwrap().to_string(), "string");
}

#[test]
fn test_supertype_declared_later() {
    let source = "\
class Derived : Base { }
class Base { int x; }

";
    let set = source_set(&[("later.vala", source)]);
    let file = file(&set, "later.vala");
    assert!(
        resolver(&set, None)
            .resolve(&name("Derived.x"), file, end_of(source))
            .is_some()
    );
}

#[test]
fn test_qualified_supertype_in_other_namespace() {
    let lib = "namespace Lib { public class Base { public int x; } }\n";
    let app = "\
namespace App {
    public class Derived : Lib.Base {
        void run () {
            use (x);
        }
    }
}
";
    let set = source_set(&[("lib.vala", lib), ("app.vala", app)]);
    let file = file(&set, "app.vala");
    let found = resolver(&set, None)
        .resolve(&name("x"), file, offset_of(app, "use (x"))
        .unwrap();
    assert_eq!(found.file().path().to_str(), Some("lib.vala"));
}

#[test]
fn test_interfaces_contribute_members() {
    let source = "\
interface Named { public abstract string name { get; } }
class Thing : Object, Named {
    void show () {
        print (name);
    }
}
";
    let set = source_set(&[("iface.vala", source)]);
    let file = file(&set, "iface.vala");
    let found = resolver(&set, None)
        .resolve(&name("name"), file, offset_of(source, "print"))
        .unwrap();
    assert_eq!(found.kind(), SymbolKind::Property);
}
