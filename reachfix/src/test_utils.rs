//! Helpers for locating code in test sources.
//!
//! Tests describe the flagged code by its text instead of by offsets.
#![allow(clippy::panic)]

use crate::cst::{SyntaxNode, SyntaxTree, TextRange};

/// Range of the first occurrence of `needle` in `source`.
///
/// # Panics
///
/// Panics if `needle` does not occur in `source`.
#[must_use]
pub fn span_of(source: &str, needle: &str) -> TextRange {
    let Some(start) = source.find(needle) else {
        panic!("{needle:?} not found in {source:?}");
    };
    TextRange::at(start, needle.len())
}

/// Range of the `nth` (0-based) occurrence of `needle` in `source`.
///
/// # Panics
///
/// Panics if `needle` occurs fewer than `nth + 1` times.
#[must_use]
pub fn nth_span_of(source: &str, needle: &str, nth: usize) -> TextRange {
    let Some((start, _)) = source.match_indices(needle).nth(nth) else {
        panic!("occurrence {nth} of {needle:?} not found in {source:?}");
    };
    TextRange::at(start, needle.len())
}

/// Node designated by the first occurrence of `needle`.
///
/// # Panics
///
/// Panics if `needle` is missing or resolves to no node.
#[must_use]
pub fn node_at(tree: &SyntaxTree, source: &str, needle: &str) -> SyntaxNode {
    let range = span_of(source, needle);
    let Some(node) = tree.find_node(range) else {
        panic!("no node at {range} for {needle:?}");
    };
    node
}

/// Parse `source` and find the node designated by `needle`.
///
/// # Panics
///
/// Panics if `source` does not parse or `needle` resolves to no node.
#[must_use]
pub fn parse_and_find(source: &str, needle: &str) -> (SyntaxTree, SyntaxNode) {
    let tree = match SyntaxTree::parse(source) {
        Ok(tree) => tree,
        Err(error) => panic!("failed to parse {source:?}: {error}"),
    };
    let node = node_at(&tree, source, needle);
    (tree, node)
}
