//! Trivia-aware views of rowan nodes.
//!
//! rowan ranges include the trivia a node's tokens own. The fixer reports
//! and compares code without it, so these helpers trim the outer trivia.

use super::kind::{NodeCategory, SyntaxKind};
use super::language::{SyntaxNode, SyntaxToken};
use super::text::TextRange;
use std::iter::successors;

/// Extra queries on [`SyntaxNode`]
pub trait SyntaxNodeExt {
    /// The category of this node's kind
    fn category(&self) -> NodeCategory;

    /// Range including leading and trailing trivia
    fn full_span(&self) -> TextRange;

    /// Range of the node's own text, without its outer trivia
    fn span(&self) -> TextRange;

    /// Text of the node without its outer trivia
    fn span_text(&self) -> String;

    /// Nearest strict ancestor of the given kind
    fn first_ancestor_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode>;

    /// Trivia tokens before the node's first real token
    fn leading_trivia(&self) -> Vec<SyntaxToken>;

    /// Trivia tokens after the node's last real token
    fn trailing_trivia(&self) -> Vec<SyntaxToken>;
}

impl SyntaxNodeExt for SyntaxNode {
    fn category(&self) -> NodeCategory {
        self.kind().category()
    }

    fn full_span(&self) -> TextRange {
        self.text_range().into()
    }

    fn span(&self) -> TextRange {
        let full = self.full_span();
        let leading = trivia_len(&self.leading_trivia());
        let trailing = trivia_len(&self.trailing_trivia());
        TextRange::new(full.start + leading, full.end.saturating_sub(trailing))
    }

    fn span_text(&self) -> String {
        let full = self.full_span();
        let span = self.span();
        let text = self.text().to_string();
        text.get(span.start - full.start..span.end - full.start)
            .unwrap_or_default()
            .to_owned()
    }

    fn first_ancestor_of_kind(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.ancestors().skip(1).find(|node| node.kind() == kind)
    }

    fn leading_trivia(&self) -> Vec<SyntaxToken> {
        let end = self.text_range().end();
        successors(self.first_token(), SyntaxToken::next_token)
            .take_while(|token| token.kind().is_trivia() && token.text_range().end() <= end)
            .collect()
    }

    fn trailing_trivia(&self) -> Vec<SyntaxToken> {
        let start = self.text_range().start();
        let mut tokens: Vec<_> = successors(self.last_token(), SyntaxToken::prev_token)
            .take_while(|token| token.kind().is_trivia() && token.text_range().start() >= start)
            .collect();
        tokens.reverse();
        tokens
    }
}

fn trivia_len(tokens: &[SyntaxToken]) -> usize {
    tokens.iter().map(|token| token.text().len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxTree;
    use crate::test_utils::parse_and_find;

    #[test]
    fn test_span_trims_outer_trivia() {
        let source = "A();\n  // note\n  B(); // after\nC();";
        let (_, node) = parse_and_find(source, "B();");
        assert_eq!(node.kind(), SyntaxKind::ExpressionStatement);
        assert_eq!(node.text().to_string(), "  // note\n  B(); // after\n");
        assert_eq!(node.span_text(), "B();");
        assert_eq!(node.span(), TextRange::at(source.find("B();").unwrap(), 4));
        assert_eq!(node.leading_trivia().len(), 4);
        assert_eq!(
            node.trailing_trivia()
                .iter()
                .map(|token| token.kind())
                .collect::<Vec<_>>(),
            vec![
                SyntaxKind::Whitespace,
                SyntaxKind::SingleLineComment,
                SyntaxKind::EndOfLine
            ]
        );
    }

    #[test]
    fn test_first_ancestor_is_strict() {
        let (_, node) = parse_and_find("{ { A(); } }", "{ A(); }");
        assert_eq!(node.kind(), SyntaxKind::Block);
        let outer = node.first_ancestor_of_kind(SyntaxKind::Block).unwrap();
        assert_eq!(outer.span_text(), "{ { A(); } }");
    }

    #[test]
    fn test_trivia_only_root() {
        let tree = SyntaxTree::parse("// nothing\n").unwrap();
        let root = tree.root();
        assert_eq!(root.category(), NodeCategory::Root);
        assert!(root.span().is_empty());
        assert_eq!(root.span_text(), "");
    }
}
