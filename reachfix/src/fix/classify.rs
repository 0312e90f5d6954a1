//! Context classification for flagged nodes.
//!
//! Given the node a diagnostic points at, decide which syntactic unit has
//! to go so that the resulting tree is still valid. The decision is a pure
//! function of the node's kind and its ancestors.

use super::error::FixError;
use super::root::find_expression_root;
use crate::cst::{
    factory, ClauseKind, NodeCategory, SyntaxKind, SyntaxNode, SyntaxNodeExt, SyntaxTree,
    TriviaDisposal,
};
use serde::Serialize;
use std::fmt;

/// The kind of edit a [`RemovalStrategy`] performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Embedded body of a loop or `if`, replaced with `{ }`
    ReplaceWithEmptyBlock,
    /// A whole `else` clause
    RemoveClause,
    /// A statement inside a block or at top level
    RemoveStatement,
    /// The local declaration enclosing the flagged node
    RemoveDeclaration,
    /// An initializer, condition or incrementor of a `for` header
    RemoveForLoopExpression,
    /// The expression statement enclosing the flagged node
    RemoveExpressionStatement,
}

impl StrategyKind {
    /// Short human-readable description
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ReplaceWithEmptyBlock => "replace statement with an empty block",
            Self::RemoveClause => "remove else clause",
            Self::RemoveStatement => "remove statement",
            Self::RemoveDeclaration => "remove local declaration",
            Self::RemoveForLoopExpression => "remove for-loop expression",
            Self::RemoveExpressionStatement => "remove expression statement",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A classified edit together with the node it applies to
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalStrategy {
    /// Replace the statement with an empty block
    ReplaceWithEmptyBlock(SyntaxNode),
    /// Remove the `else` clause
    RemoveClause(SyntaxNode),
    /// Remove the statement
    RemoveStatement(SyntaxNode),
    /// Remove the local declaration statement
    RemoveDeclaration(SyntaxNode),
    /// Remove the expression from the `for` header
    RemoveForLoopExpression(SyntaxNode),
    /// Remove the expression statement
    RemoveExpressionStatement(SyntaxNode),
}

impl RemovalStrategy {
    /// The kind of edit
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        match self {
            Self::ReplaceWithEmptyBlock(_) => StrategyKind::ReplaceWithEmptyBlock,
            Self::RemoveClause(_) => StrategyKind::RemoveClause,
            Self::RemoveStatement(_) => StrategyKind::RemoveStatement,
            Self::RemoveDeclaration(_) => StrategyKind::RemoveDeclaration,
            Self::RemoveForLoopExpression(_) => StrategyKind::RemoveForLoopExpression,
            Self::RemoveExpressionStatement(_) => StrategyKind::RemoveExpressionStatement,
        }
    }

    /// The node the edit replaces or removes
    #[must_use]
    pub const fn target(&self) -> &SyntaxNode {
        match self {
            Self::ReplaceWithEmptyBlock(node)
            | Self::RemoveClause(node)
            | Self::RemoveStatement(node)
            | Self::RemoveDeclaration(node)
            | Self::RemoveForLoopExpression(node)
            | Self::RemoveExpressionStatement(node) => node,
        }
    }

    /// Apply the edit to `tree`, which must be the tree the target came from.
    ///
    /// Removed nodes take their surrounding trivia with them.
    ///
    /// # Errors
    ///
    /// Fails if the target does not belong to `tree`.
    pub fn apply(&self, tree: &SyntaxTree) -> Result<SyntaxTree, FixError> {
        let edited = match self {
            Self::ReplaceWithEmptyBlock(statement) => {
                tree.replace_node(statement, factory::empty_block_in_place_of(statement))?
            }
            Self::RemoveClause(node)
            | Self::RemoveStatement(node)
            | Self::RemoveDeclaration(node)
            | Self::RemoveForLoopExpression(node)
            | Self::RemoveExpressionStatement(node) => {
                tree.remove_node(node, TriviaDisposal::KeepNone)?
            }
        };
        Ok(edited)
    }
}

/// Decide how to remove the code at `node`.
///
/// # Errors
///
/// Returns [`FixError::UnsupportedContext`] when `node` is neither a
/// statement nor nested in a declaration, a `for` header or an expression
/// statement.
pub fn classify(node: &SyntaxNode) -> Result<RemovalStrategy, FixError> {
    match node.category() {
        NodeCategory::Statement(_) => Ok(classify_statement(node)),
        NodeCategory::Root
        | NodeCategory::Clause(_)
        | NodeCategory::Expression(_)
        | NodeCategory::Declaration
        | NodeCategory::Type
        | NodeCategory::List
        | NodeCategory::Token
        | NodeCategory::Other => classify_nested(node),
    }
}

/// A statement is judged by the construct that holds it
fn classify_statement(statement: &SyntaxNode) -> RemovalStrategy {
    let Some(parent) = statement.parent() else {
        return RemovalStrategy::RemoveStatement(statement.clone());
    };
    match parent.category() {
        NodeCategory::Statement(kind) if kind.has_embedded_body() => {
            RemovalStrategy::ReplaceWithEmptyBlock(statement.clone())
        }
        NodeCategory::Clause(ClauseKind::Else) => RemovalStrategy::RemoveClause(parent),
        NodeCategory::Statement(_)
        | NodeCategory::Root
        | NodeCategory::Clause(_)
        | NodeCategory::Expression(_)
        | NodeCategory::Declaration
        | NodeCategory::Type
        | NodeCategory::List
        | NodeCategory::Token
        | NodeCategory::Other => RemovalStrategy::RemoveStatement(statement.clone()),
    }
}

fn classify_nested(node: &SyntaxNode) -> Result<RemovalStrategy, FixError> {
    if let Some(declaration) = node.first_ancestor_of_kind(SyntaxKind::LocalDeclarationStatement)
    {
        return Ok(enclosing_statement(
            declaration,
            RemovalStrategy::RemoveDeclaration,
        ));
    }

    let root = find_expression_root(node).ok_or_else(|| unsupported(node))?;
    if root
        .parent()
        .is_some_and(|parent| parent.kind() == SyntaxKind::ForStatement)
    {
        return Ok(RemovalStrategy::RemoveForLoopExpression(root));
    }

    root.first_ancestor_of_kind(SyntaxKind::ExpressionStatement)
        .map(|statement| {
            enclosing_statement(statement, RemovalStrategy::RemoveExpressionStatement)
        })
        .ok_or_else(|| unsupported(node))
}

/// A statement found by walking up from a nested node is removed with
/// `in_list` when it sits in a statement list; as an embedded body or
/// `else` branch it gets the same treatment as a flagged statement
fn enclosing_statement(
    statement: SyntaxNode,
    in_list: fn(SyntaxNode) -> RemovalStrategy,
) -> RemovalStrategy {
    match classify_statement(&statement) {
        RemovalStrategy::RemoveStatement(statement) => in_list(statement),
        embedded => embedded,
    }
}

fn unsupported(node: &SyntaxNode) -> FixError {
    FixError::UnsupportedContext {
        kind: node.kind(),
        range: node.span(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::parse_and_find;

    fn strategy_for(source: &str, needle: &str) -> (StrategyKind, String) {
        let (_, node) = parse_and_find(source, needle);
        let strategy = classify(&node).unwrap();
        (strategy.kind(), strategy.target().span_text())
    }

    #[test]
    fn test_embedded_bodies_become_blocks() {
        for source in [
            "while (false) DoWork();",
            "if (false) DoWork();",
            "do DoWork(); while (false);",
            "for (;;) DoWork();",
            "foreach (var x in xs) DoWork();",
        ] {
            assert_eq!(
                strategy_for(source, "DoWork();"),
                (StrategyKind::ReplaceWithEmptyBlock, "DoWork();".to_owned()),
                "{source}"
            );
        }
    }

    #[test]
    fn test_other_embedded_bodies() {
        for source in [
            "lock (gate) DoWork();",
            "using (var r = Open()) DoWork();",
            "{ done: DoWork(); }",
        ] {
            assert_eq!(
                strategy_for(source, "DoWork();"),
                (StrategyKind::ReplaceWithEmptyBlock, "DoWork();".to_owned()),
                "{source}"
            );
        }
    }

    #[test]
    fn test_statement_in_method_body() {
        assert_eq!(
            strategy_for("class C { void M() { return; Foo(); } }", "Foo();"),
            (StrategyKind::RemoveStatement, "Foo();".to_owned())
        );
    }

    #[test]
    fn test_statement_in_switch_section() {
        assert_eq!(
            strategy_for("switch (x) { case 1: return; DoWork(); }", "DoWork();"),
            (StrategyKind::RemoveStatement, "DoWork();".to_owned())
        );
    }

    #[test]
    fn test_else_branch_removes_clause() {
        assert_eq!(
            strategy_for("if (x) return; else Other();", "Other();"),
            (StrategyKind::RemoveClause, "else Other();".to_owned())
        );
    }

    #[test]
    fn test_statement_in_block() {
        assert_eq!(
            strategy_for("{ A(); B(); }", "B();"),
            (StrategyKind::RemoveStatement, "B();".to_owned())
        );
    }

    #[test]
    fn test_nested_in_declaration() {
        assert_eq!(
            strategy_for("{ return; int y = 5; }", "5"),
            (StrategyKind::RemoveDeclaration, "int y = 5;".to_owned())
        );
    }

    #[test]
    fn test_for_incrementor() {
        assert_eq!(
            strategy_for("for (int i = 0; false; i++) { }", "i++"),
            (StrategyKind::RemoveForLoopExpression, "i++".to_owned())
        );
    }

    #[test]
    fn test_member_chain() {
        assert_eq!(
            strategy_for("{ return; a.B.C.Method(); }", "a.B"),
            (
                StrategyKind::RemoveExpressionStatement,
                "a.B.C.Method();".to_owned()
            )
        );
    }

    #[test]
    fn test_nested_expression_under_embedded_body() {
        assert_eq!(
            strategy_for("while (false) DoWork(1);", "DoWork(1)"),
            (StrategyKind::ReplaceWithEmptyBlock, "DoWork(1);".to_owned())
        );
    }

    #[test]
    fn test_unsupported_contexts() {
        let (tree, _) = parse_and_find("A();", "A();");
        assert!(matches!(
            classify(&tree.root()),
            Err(FixError::UnsupportedContext {
                kind: SyntaxKind::CompilationUnit,
                ..
            })
        ));

        let (_, condition) = parse_and_find("if (x) A();", "x");
        assert!(matches!(
            classify(&condition),
            Err(FixError::UnsupportedContext { .. })
        ));
    }
}
