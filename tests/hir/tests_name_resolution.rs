//! Name resolution tests: shadowing, declaration order, qualified names and
//! prefix queries.

use rstest::rstest;
use valence::hir::SymbolKind;

use crate::helpers::hir_helpers::*;

// ============================================================================
// SHADOWING AND DECLARATION ORDER
// ============================================================================

const COUNTER: &str = "\
class Counter {
    int total;
    void run () {
        prepare ();
        int total = 1;
        int local = 2;
        use (total, local);
    }
}
";

#[test]
fn test_local_shadows_field() {
    let set = source_set(&[("counter.vala", COUNTER)]);
    let file = file(&set, "counter.vala");
    let resolver = resolver(&set, None);

    let found = resolver
        .resolve(&name("total"), file, offset_of(COUNTER, "use (total"))
        .unwrap();
    assert_eq!(found.kind(), SymbolKind::LocalVariable);
}

#[test]
fn test_field_visible_before_shadowing_local() {
    let set = source_set(&[("counter.vala", COUNTER)]);
    let file = file(&set, "counter.vala");
    let resolver = resolver(&set, None);

    let found = resolver
        .resolve(&name("total"), file, offset_of(COUNTER, "prepare"))
        .unwrap();
    assert_eq!(found.kind(), SymbolKind::Field);
}

#[rstest]
#[case("prepare", false)]
#[case("int total = 1", false)]
#[case("int local", true)]
#[case("use (total", true)]
fn test_local_visible_from_its_statement(#[case] at: &str, #[case] visible: bool) {
    let set = source_set(&[("counter.vala", COUNTER)]);
    let file = file(&set, "counter.vala");
    let resolver = resolver(&set, None);

    let found = resolver.resolve(&name("local"), file, offset_of(COUNTER, at));
    assert_eq!(found.is_some(), visible, "resolving `local` at {at:?}");
}

#[test]
fn test_member_declared_after_use() {
    let source = "\
class Late {
    void run () {
        use (later);
    }
    int later;
}
";
    let set = source_set(&[("late.vala", source)]);
    let file = file(&set, "late.vala");
    let found = resolver(&set, None)
        .resolve(&name("later"), file, offset_of(source, "use (later"))
        .unwrap();
    assert_eq!(found.kind(), SymbolKind::Field);
}

#[test]
fn test_parameters_and_loop_variables() {
    let source = "\
class Walker {
    void walk (int depth) {
        foreach (Node child in children) {
            visit (child, depth);
        }
        done (child);
    }
}
";
    let set = source_set(&[("walker.vala", source)]);
    let file = file(&set, "walker.vala");
    let resolver = resolver(&set, None);

    let inside = offset_of(source, "visit");
    assert_eq!(
        resolver.resolve(&name("child"), file, inside).unwrap().kind(),
        SymbolKind::LocalVariable
    );
    assert_eq!(
        resolver.resolve(&name("depth"), file, inside).unwrap().kind(),
        SymbolKind::Parameter
    );
    assert!(resolver.resolve(&name("child"), file, offset_of(source, "done")).is_none());
}

// ============================================================================
// QUALIFIED NAMES
// ============================================================================

const QUALIFIED: &str = "\
namespace Lib {
    class Tool {
        public int size;
    }
}
class Foo {
    public int Bar;
}
class User {
    void run () {
        Foo x = new Foo ();
        x.Bar = 1;
    }
}
";

#[test]
fn test_member_through_variable_declared_type() {
    let set = source_set(&[("q.vala", QUALIFIED)]);
    let file = file(&set, "q.vala");
    let found = resolver(&set, None)
        .resolve(&name("x.Bar"), file, offset_of(QUALIFIED, "x.Bar"))
        .unwrap();

    assert_eq!(found.kind(), SymbolKind::Field);
    assert_eq!(found.label(), "Bar");
    let foo = offset_of(QUALIFIED, "class Foo");
    assert!(found.range().start() > foo && found.range().start() < offset_of(QUALIFIED, "class User"));
}

#[rstest]
#[case("Lib.Tool", SymbolKind::Class)]
#[case("Lib.Tool.size", SymbolKind::Field)]
#[case("Foo.Bar", SymbolKind::Field)]
fn test_qualified_through_types(#[case] text: &str, #[case] kind: SymbolKind) {
    let set = source_set(&[("q.vala", QUALIFIED)]);
    let file = file(&set, "q.vala");
    let found = resolver(&set, None)
        .resolve(&name(text), file, offset_of(QUALIFIED, "x.Bar"))
        .unwrap();
    assert_eq!(found.kind(), kind);
}

#[rstest]
#[case("x.Missing")]
#[case("Nope.Bar")]
#[case("Lib.Tool.size.more")]
#[case("User.run.x")]
fn test_unresolvable_qualified_names_are_empty(#[case] text: &str) {
    let set = source_set(&[("q.vala", QUALIFIED)]);
    let file = file(&set, "q.vala");
    let found = resolver(&set, None).resolve(&name(text), file, offset_of(QUALIFIED, "x.Bar"));
    assert!(found.is_none(), "{text} resolved to {found:?}");
}

#[test]
fn test_type_query_skips_shadowing_variable() {
    let source = "\
class Foo { }
class Holder {
    int Foo;
    void make () {
        use ();
    }
}
";
    let set = source_set(&[("h.vala", source)]);
    let file = file(&set, "h.vala");
    let resolver = resolver(&set, None);
    let at = offset_of(source, "use ()");

    assert_eq!(resolver.resolve(&name("Foo"), file, at).unwrap().kind(), SymbolKind::Field);
    let types = resolver.resolve_type(&name("Foo"), file, at);
    assert_eq!(labels(&types), vec!["Foo"]);
    assert_eq!(types[0].kind(), SymbolKind::Class);
}

// ============================================================================
// PREFIX QUERIES
// ============================================================================

#[test]
fn test_prefix_matches_all_candidates() {
    let source = "\
class Store {
    void get () { }
    int getValue () { return 0; }
    void set (int value) { }
    void work () {
        use ();
    }
}
";
    let set = source_set(&[("store.vala", source)]);
    let file = file(&set, "store.vala");
    let found = resolver(&set, None).resolve_prefix(&name("get"), file, offset_of(source, "use ()"), false);
    assert_eq!(labels(&found), vec!["get", "getValue"]);
}

#[test]
fn test_prefix_singleton_exact_match_is_suppressed() {
    let source = "\
class Store {
    void get () { }
    void set (int value) { }
    void work () {
        use ();
    }
}
";
    let set = source_set(&[("store.vala", source)]);
    let file = file(&set, "store.vala");
    let resolver = resolver(&set, None);
    let at = offset_of(source, "use ()");

    assert!(resolver.resolve_prefix(&name("get"), file, at, false).is_empty());
    assert_eq!(labels(&resolver.resolve_prefix(&name("ge"), file, at, false)), vec!["get"]);
}

#[test]
fn test_member_prefix_after_dot() {
    let set = source_set(&[("q.vala", QUALIFIED)]);
    let file = file(&set, "q.vala");
    let found = resolver(&set, None).resolve_prefix(&name("Lib."), file, offset_of(QUALIFIED, "x.Bar"), false);
    assert_eq!(labels(&found), vec!["Tool"]);
}

#[test]
fn test_constructor_prefix() {
    let source = "\
class Widget {
    public Widget () { }
    public Widget.with_label (string label) { }
}
class Plain { }
class App {
    void run () {
        use ();
    }
}
";
    let set = source_set(&[("ctor.vala", source)]);
    let file = file(&set, "ctor.vala");
    let resolver = resolver(&set, None);
    let at = offset_of(source, "use ()");

    let found = resolver.resolve_prefix(&name(""), file, at, true);
    let names = labels(&found);
    assert!(names.contains(&"Widget".to_string()));
    assert!(names.contains(&"Widget.with_label".to_string()));
    assert!(names.contains(&"Plain".to_string()));
    assert!(!names.contains(&"run".to_string()));

    let ctor = resolver.resolve_constructor(&name("Widget"), file, at).unwrap();
    assert_eq!(ctor.kind(), SymbolKind::Constructor);
    let named = resolver
        .resolve_constructor(&name("Widget.with_label"), file, at)
        .unwrap();
    assert_eq!(named.label(), "Widget.with_label");
    let plain = resolver.resolve_constructor(&name("Plain"), file, at).unwrap();
    assert_eq!(plain.kind(), SymbolKind::Class);
}
