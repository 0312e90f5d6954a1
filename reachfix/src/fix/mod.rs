//! Unreachable-code removal.
//!
//! The entry point is [`remove_unreachable_code`]: given a tree and the node
//! a diagnostic flagged, it picks the syntactic unit that has to go
//! ([`classify`]) and returns a new tree without it. Expressions buried in
//! member-access chains are first lifted to their root
//! ([`find_expression_root`]).
//!
//! [`RemoveUnreachableCodeFix`] wraps this for hosts that work with
//! diagnostics and text edits rather than nodes.

mod classify;
mod edit;
mod error;
mod provider;
mod root;

pub use classify::{classify, RemovalStrategy, StrategyKind};
pub use edit::{EditError, TextEdit};
pub use error::FixError;
pub use provider::{
    AppliedFix, CodeAction, Diagnostic, FixAllOutcome, RemoveUnreachableCodeFix, SkipReason,
    SkippedFix,
};
pub use root::find_expression_root;

use crate::cst::{SyntaxNode, SyntaxTree, TextRange};

/// Remove the unreachable code flagged at `node` from `tree`.
///
/// `tree` is left untouched; the result shares every subtree outside the
/// edited path with it.
///
/// # Errors
///
/// [`FixError::UnsupportedContext`] when no removal strategy fits the
/// node's surroundings, [`FixError::Rewrite`] when `node` does not belong
/// to `tree`.
pub fn remove_unreachable_code(
    tree: &SyntaxTree,
    node: &SyntaxNode,
) -> Result<SyntaxTree, FixError> {
    classify(node)?.apply(tree)
}

/// Like [`remove_unreachable_code`], for a node given by its source range.
///
/// # Errors
///
/// [`FixError::NodeNotFound`] when `range` lies outside the tree, plus the
/// errors of [`remove_unreachable_code`].
pub fn remove_unreachable_code_at(
    tree: &SyntaxTree,
    range: TextRange,
) -> Result<SyntaxTree, FixError> {
    let node = tree
        .find_node(range)
        .ok_or(FixError::NodeNotFound { range })?;
    remove_unreachable_code(tree, &node)
}
