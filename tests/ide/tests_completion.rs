//! Completion tests over a scanned project.

use valence::ide::{CompletionKind, completions};

use super::tests_goto::{MAIN, SHAPES};
use crate::helpers::hir_helpers::offset_after;
use crate::helpers::project_helpers::project;

fn labels_at(cursor_after: &str) -> Vec<String> {
    let fixture = project(&[("shapes.vala", SHAPES), ("main.vala", MAIN)]);
    let analysis = fixture.host.analysis(&fixture.path("main.vala")).unwrap();
    completions(&analysis, MAIN, offset_after(MAIN, cursor_after))
        .into_iter()
        .map(|item| item.label.to_string())
        .collect()
}

#[test]
fn test_member_completion_through_variable() {
    let fixture = project(&[("shapes.vala", SHAPES), ("main.vala", MAIN)]);
    let analysis = fixture.host.analysis(&fixture.path("main.vala")).unwrap();

    let items = completions(&analysis, MAIN, offset_after(MAIN, "e.ra"));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "radius");
    assert_eq!(items[0].kind, CompletionKind::Field);
    assert_eq!(items[0].detail.as_deref(), Some("double"));
}

#[test]
fn test_constructor_completion_after_new() {
    let labels = labels_at("new Ci");
    assert_eq!(labels, vec!["Circle", "Circle.with_radius"]);
}

#[test]
fn test_constructor_mode_offers_namespaces_and_classes() {
    let labels = labels_at("new Circle.with_radius (2.0);\n    var s = new ");
    assert!(labels.contains(&"Square".to_string()));
    assert!(labels.contains(&"Shapes".to_string()));
    assert!(!labels.contains(&"c".to_string()), "locals are not constructors");
}

#[test]
fn test_locals_sort_first() {
    let fixture = project(&[("shapes.vala", SHAPES), ("main.vala", MAIN)]);
    let analysis = fixture.host.analysis(&fixture.path("main.vala")).unwrap();

    let items = completions(&analysis, MAIN, offset_after(MAIN, "e.radius = 1;\n"));
    assert_eq!(items[0].kind, CompletionKind::Variable);
    let shapes = items.iter().find(|item| item.label == "Shapes").unwrap();
    assert_eq!(shapes.kind, CompletionKind::Namespace);
    assert_eq!(items.last().map(|item| item.kind), Some(CompletionKind::Namespace));
    assert!(items.iter().any(|item| item.label == "Circle" && item.kind == CompletionKind::Type));
}

#[test]
fn test_no_completion_inside_number() {
    assert!(labels_at("with_radius (2.").is_empty());
}
