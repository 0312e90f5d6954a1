//! Expression root lookup for flagged sub-expressions.

use crate::cst::{SyntaxKind, SyntaxNode};
use std::iter::successors;

/// Find the expression that forms the removable unit around `node`.
///
/// A diagnostic may point anywhere inside a dotted chain such as
/// `a.B.C.Method()`. When `node`'s parent is a member access, the walk
/// climbs to the outermost member access of the chain and yields that
/// node's parent (typically the invocation wrapping the chain). Otherwise
/// `node`'s parent is the answer.
///
/// If the node reached that way is not an expression (an
/// expression-statement, a `for` header, an argument list, ...), the last
/// expression on the walk is returned instead: the outermost member access,
/// or `node` itself. `None` means nothing on the walk is an expression.
#[must_use]
pub fn find_expression_root(node: &SyntaxNode) -> Option<SyntaxNode> {
    let parent = node.parent()?;
    let (anchor, candidate) = if parent.kind() == SyntaxKind::MemberAccessExpression {
        let outermost = outermost_member_access(parent)?;
        let candidate = outermost.parent();
        (outermost, candidate)
    } else {
        (node.clone(), Some(parent))
    };

    match candidate {
        Some(candidate) if candidate.kind().is_expression() => Some(candidate),
        _ if anchor.kind().is_expression() => Some(anchor),
        _ => None,
    }
}

/// Top of the member-access chain that `start` belongs to
fn outermost_member_access(start: SyntaxNode) -> Option<SyntaxNode> {
    successors(Some(start), |access| {
        access
            .parent()
            .filter(|parent| parent.kind() == SyntaxKind::MemberAccessExpression)
    })
    .last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxNodeExt;
    use crate::test_utils::parse_and_find;

    #[test]
    fn test_chain_climbs_to_invocation() {
        let (_, node) = parse_and_find("{ return; a.B.C.Method(); }", "a.B");
        assert_eq!(node.kind(), SyntaxKind::MemberAccessExpression);
        let root = find_expression_root(&node).unwrap();
        assert_eq!(root.kind(), SyntaxKind::InvocationExpression);
        assert_eq!(root.span_text(), "a.B.C.Method()");
    }

    #[test]
    fn test_zero_hop_returns_parent_expression() {
        let (_, node) = parse_and_find("for (int i = 0; false; i++) { }", "i++");
        assert_eq!(node.kind(), SyntaxKind::PostfixUnaryExpression);
        let (_, name) = parse_and_find("x = y + 1;", "y");
        let root = find_expression_root(&name).unwrap();
        assert_eq!(root.kind(), SyntaxKind::BinaryExpression);
    }

    #[test]
    fn test_non_expression_parent_falls_back_to_node() {
        let (_, node) = parse_and_find("for (int i = 0; false; i++) { }", "i++");
        let root = find_expression_root(&node).unwrap();
        assert_eq!(root, node);
    }

    #[test]
    fn test_chain_directly_under_argument_list() {
        let (_, node) = parse_and_find("Log(a.B.C);", "a.B");
        let root = find_expression_root(&node).unwrap();
        assert_eq!(root.kind(), SyntaxKind::MemberAccessExpression);
        assert_eq!(root.span_text(), "a.B.C");
    }

    #[test]
    fn test_nothing_expression_like() {
        let (tree, _) = parse_and_find("A();", "A();");
        assert!(find_expression_root(&tree.root()).is_none());
        let (_, clause) = parse_and_find("if (x) A(); else B();", "else B();");
        assert_eq!(clause.kind(), SyntaxKind::ElseClause);
        assert!(find_expression_root(&clause).is_none());
    }
}
