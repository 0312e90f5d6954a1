//! Persistent syntax tree and its rewrite primitives.
//!
//! Every rewrite takes the tree by reference and returns a new tree. rowan
//! rebuilds only the green nodes on the path from the edit to the root;
//! all other subtrees are shared with the input, which is never modified.

use super::kind::SyntaxKind;
use super::language::{SyntaxElement, SyntaxNode};
use super::node::SyntaxNodeExt;
use super::parser::{parse_compilation_unit, ParseError};
use super::text::TextRange;
use rowan::{GreenNode, GreenNodeData, NodeOrToken, WalkEvent};
use std::fmt::{self, Write as _};
use std::ops::Range;

/// What to do with the outer trivia of a removed node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriviaDisposal {
    /// Drop the trivia together with the node
    #[default]
    KeepNone,
    /// Leave the leading and trailing trivia where the node was, so
    /// comments around it survive
    KeepExterior,
}

/// Error during a tree rewrite
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// The node handle was obtained from a different tree
    #[error("{kind:?} at {range} does not belong to this tree")]
    NodeNotInTree {
        /// Kind of the foreign node
        kind: SyntaxKind,
        /// Text range of the foreign node
        range: TextRange,
    },
    /// The compilation unit itself cannot be removed or replaced
    #[error("the root node cannot be removed or replaced")]
    RootNotEditable,
}

/// An immutable syntax tree.
///
/// Holds only the green root, so it is `Send` and `Sync`; red nodes are
/// created on demand by [`SyntaxTree::root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    green: GreenNode,
}

impl SyntaxTree {
    /// Parse source text into a tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the source does not parse.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Ok(Self::from_green(parse_compilation_unit(source)?))
    }

    /// Wrap a green root
    #[must_use]
    pub const fn from_green(green: GreenNode) -> Self {
        Self { green }
    }

    /// Green root
    #[must_use]
    pub const fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Navigable root node
    #[must_use]
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Full source text
    #[must_use]
    pub fn text(&self) -> String {
        self.green.to_string()
    }

    /// Byte length of the source text
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.green.text_len())
    }

    /// Whether the source text is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `node` was obtained from this tree
    #[must_use]
    pub fn contains(&self, node: &SyntaxNode) -> bool {
        node.ancestors().last().is_some_and(|root| {
            let green = root.green();
            std::ptr::eq::<GreenNodeData>(&*green, &*self.green)
        })
    }

    /// Resolve a source range to the node it designates.
    ///
    /// Finds the smallest node whose full range contains `range`, then
    /// widens to the outermost ancestor with the same full range. The
    /// compilation unit is only returned when nothing smaller covers the
    /// range.
    #[must_use]
    pub fn find_node(&self, range: TextRange) -> Option<SyntaxNode> {
        let range = range.to_rowan()?;
        let root = self.root();
        if !root.text_range().contains_range(range) {
            return None;
        }
        let mut node = match root.covering_element(range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };
        while let Some(parent) = node.parent() {
            if parent.parent().is_none() || parent.text_range() != node.text_range() {
                break;
            }
            node = parent;
        }
        Some(node)
    }

    /// Replace `target` with `replacement`.
    ///
    /// # Errors
    ///
    /// Fails if `target` is the root or does not belong to this tree.
    pub fn replace_node(
        &self,
        target: &SyntaxNode,
        replacement: GreenNode,
    ) -> Result<Self, RewriteError> {
        self.editable_parent(target)?;
        Ok(Self {
            green: target.replace_with(replacement),
        })
    }

    /// Remove `target`, and the comma separating it from a neighbor in a
    /// list.
    ///
    /// # Errors
    ///
    /// Fails if `target` is the root or does not belong to this tree.
    pub fn remove_node(
        &self,
        target: &SyntaxNode,
        disposal: TriviaDisposal,
    ) -> Result<Self, RewriteError> {
        let parent = self.editable_parent(target)?;
        let kept: Vec<_> = match disposal {
            TriviaDisposal::KeepNone => Vec::new(),
            TriviaDisposal::KeepExterior => target
                .leading_trivia()
                .into_iter()
                .chain(target.trailing_trivia())
                .map(|token| NodeOrToken::Token(token.green().to_owned()))
                .collect(),
        };
        let spliced = parent
            .green()
            .splice_children(removal_range(&parent, target), kept);
        Ok(Self {
            green: parent.replace_with(spliced),
        })
    }

    fn editable_parent(&self, target: &SyntaxNode) -> Result<SyntaxNode, RewriteError> {
        if !self.contains(target) {
            return Err(RewriteError::NodeNotInTree {
                kind: target.kind(),
                range: target.span(),
            });
        }
        target.parent().ok_or(RewriteError::RootNotEditable)
    }

    /// Indented outline of every node and token, with text ranges
    #[must_use]
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;
        for event in self.root().preorder_with_tokens() {
            match event {
                WalkEvent::Enter(element) => {
                    let _ = match &element {
                        NodeOrToken::Node(node) => {
                            writeln!(out, "{:indent$}{node:?}", "", indent = depth * 2)
                        }
                        NodeOrToken::Token(token) => {
                            writeln!(out, "{:indent$}{token:?}", "", indent = depth * 2)
                        }
                    };
                    if element.as_node().is_some() {
                        depth += 1;
                    }
                }
                WalkEvent::Leave(element) => {
                    if element.as_node().is_some() {
                        depth = depth.saturating_sub(1);
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.green, f)
    }
}

/// Children of `parent` that go away with `target`: the node itself, plus
/// an adjacent comma and the trivia between them
fn removal_range(parent: &SyntaxNode, target: &SyntaxNode) -> Range<usize> {
    let index = target.index();
    let siblings: Vec<SyntaxElement> = parent.children_with_tokens().collect();
    let significant = |element: &&SyntaxElement| !element.kind().is_trivia();
    fn is_comma(element: Option<(usize, &SyntaxElement)>) -> Option<(usize, &SyntaxElement)> {
        element.filter(|(_, element)| element.kind() == SyntaxKind::CommaToken)
    }

    let after = siblings.iter().enumerate().skip(index + 1);
    if let Some((comma, _)) = is_comma(after.clone().find(|(_, element)| significant(element))) {
        let end = after
            .skip_while(|(position, _)| *position <= comma)
            .find(|(_, element)| significant(element))
            .map_or(siblings.len(), |(position, _)| position);
        return index..end;
    }

    let before = siblings.iter().enumerate().take(index).rev();
    if let Some((comma, _)) = is_comma(before.clone().find(|(_, element)| significant(element))) {
        return comma..index + 1;
    }
    index..index + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::factory;
    use crate::test_utils::node_at;

    #[test]
    fn test_find_node_exact_statement() {
        let source = "while (false) DoWork();";
        let tree = SyntaxTree::parse(source).unwrap();
        let node = node_at(&tree, source, "DoWork();");
        assert_eq!(node.kind(), SyntaxKind::ExpressionStatement);
    }

    #[test]
    fn test_find_node_never_widens_to_root() {
        let source = "DoWork();\n";
        let tree = SyntaxTree::parse(source).unwrap();
        let node = node_at(&tree, source, "DoWork();");
        assert_eq!(node.kind(), SyntaxKind::ExpressionStatement);
    }

    #[test]
    fn test_find_node_out_of_range() {
        let tree = SyntaxTree::parse("A();").unwrap();
        assert!(tree.find_node(TextRange::new(2, 40)).is_none());
    }

    #[test]
    fn test_remove_keeps_original_untouched() {
        let source = "{ A(); B(); }";
        let tree = SyntaxTree::parse(source).unwrap();
        let target = node_at(&tree, source, "B();");
        let edited = tree.remove_node(&target, TriviaDisposal::KeepNone).unwrap();
        assert_eq!(edited.text(), "{ A(); }");
        assert_eq!(tree.text(), source);
    }

    #[test]
    fn test_remove_shares_untouched_subtrees() {
        let source = "A(); { B(); }";
        let tree = SyntaxTree::parse(source).unwrap();
        let target = node_at(&tree, source, "B();");
        let edited = tree.remove_node(&target, TriviaDisposal::KeepNone).unwrap();
        let before = tree.root().first_child().unwrap();
        let after = edited.root().first_child().unwrap();
        assert!(std::ptr::eq::<GreenNodeData>(&*before.green(), &*after.green()));
    }

    #[test]
    fn test_remove_keep_exterior_leaves_comments() {
        let source = "A();\n  /* note */ B();\nC();";
        let tree = SyntaxTree::parse(source).unwrap();
        let target = node_at(&tree, source, "B();");
        let edited = tree
            .remove_node(&target, TriviaDisposal::KeepExterior)
            .unwrap();
        assert_eq!(edited.text(), "A();\n  /* note */ \nC();");
    }

    #[test]
    fn test_remove_argument_takes_separator() {
        let source = "F(a, b, c);";
        let tree = SyntaxTree::parse(source).unwrap();
        let middle = node_at(&tree, source, "b");
        let edited = tree.remove_node(&middle, TriviaDisposal::KeepNone).unwrap();
        assert_eq!(edited.text(), "F(a, c);");

        let last = node_at(&tree, source, "c");
        let edited = tree.remove_node(&last, TriviaDisposal::KeepNone).unwrap();
        assert_eq!(edited.text(), "F(a, b);");
    }

    #[test]
    fn test_remove_declarator_takes_separator() {
        let source = "{ int a = 1, b = 2; }";
        let tree = SyntaxTree::parse(source).unwrap();
        let first = node_at(&tree, source, "a = 1");
        let edited = tree.remove_node(&first, TriviaDisposal::KeepNone).unwrap();
        assert_eq!(edited.text(), "{ int b = 2; }");
    }

    #[test]
    fn test_root_is_not_editable() {
        let tree = SyntaxTree::parse("A();").unwrap();
        assert_eq!(
            tree.remove_node(&tree.root(), TriviaDisposal::KeepNone),
            Err(RewriteError::RootNotEditable)
        );
    }

    #[test]
    fn test_foreign_node_is_rejected() {
        let source = "A(); B();";
        let tree = SyntaxTree::parse(source).unwrap();
        let other = SyntaxTree::parse(source).unwrap();
        let foreign = node_at(&other, source, "B();");
        assert!(!tree.contains(&foreign));
        assert!(matches!(
            tree.remove_node(&foreign, TriviaDisposal::KeepNone),
            Err(RewriteError::NodeNotInTree { .. })
        ));
    }

    #[test]
    fn test_replace_node() {
        let source = "if (x) A();";
        let tree = SyntaxTree::parse(source).unwrap();
        let target = node_at(&tree, source, "A();");
        let edited = tree.replace_node(&target, factory::empty_block()).unwrap();
        assert_eq!(edited.text(), "if (x) { }");
    }

    #[test]
    fn test_debug_dump_lists_tokens() {
        let tree = SyntaxTree::parse("x++;").unwrap();
        let dump = tree.debug_dump();
        assert!(dump.starts_with("CompilationUnit@0..4"));
        assert!(dump.contains("  ExpressionStatement@0..4"));
        assert!(dump.contains("PostfixUnaryExpression@0..3"));
        assert!(dump.contains("OperatorToken@1..3 \"++\""));
    }
}
