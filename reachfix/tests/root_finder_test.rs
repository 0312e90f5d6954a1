//! Tests for expression root lookup.
#![allow(clippy::unwrap_used)]

use reachfix::cst::{SyntaxKind, SyntaxNodeExt};
use reachfix::fix::find_expression_root;
use reachfix::test_utils::parse_and_find;

fn root_text(source: &str, needle: &str) -> Option<(SyntaxKind, String)> {
    let (_, node) = parse_and_find(source, needle);
    find_expression_root(&node).map(|root| (root.kind(), root.span_text()))
}

#[test]
fn test_any_link_of_a_chain_reaches_the_same_root() {
    let source = "a.B.C.Method();";
    let expected = Some((
        SyntaxKind::InvocationExpression,
        "a.B.C.Method()".to_owned(),
    ));
    for needle in ["a", "a.B", "a.B.C", "B", "C", "Method"] {
        assert_eq!(root_text(source, needle), expected, "from {needle:?}");
    }
}

#[test]
fn test_chain_inside_argument() {
    assert_eq!(
        root_text("Log(a.B.C);", "a.B"),
        Some((SyntaxKind::MemberAccessExpression, "a.B.C".to_owned()))
    );
}

#[test]
fn test_chain_inside_binary() {
    assert_eq!(
        root_text("x = a.B.C + 1;", "a.B"),
        Some((SyntaxKind::BinaryExpression, "a.B.C + 1".to_owned()))
    );
}

#[test]
fn test_zero_hop() {
    assert_eq!(
        root_text("x = -y;", "y"),
        Some((SyntaxKind::PrefixUnaryExpression, "-y".to_owned()))
    );
    assert_eq!(
        root_text("Run((y));", "y"),
        Some((SyntaxKind::ParenthesizedExpression, "(y)".to_owned()))
    );
}

#[test]
fn test_statement_parent_yields_the_node() {
    assert_eq!(
        root_text("x = 1;", "x = 1"),
        Some((SyntaxKind::AssignmentExpression, "x = 1".to_owned()))
    );
}

#[test]
fn test_for_header_parent_yields_the_node() {
    assert_eq!(
        root_text("for (;; i++) { }", "i++"),
        Some((SyntaxKind::PostfixUnaryExpression, "i++".to_owned()))
    );
}

#[test]
fn test_no_expression_on_the_walk() {
    assert_eq!(root_text("{ A(); }", "A();"), None);
    assert_eq!(root_text("int x = 1;", "int"), None);
}
