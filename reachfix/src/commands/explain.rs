//! Explain and tree commands.

use crate::cst::{SyntaxNode, SyntaxNodeExt, SyntaxTree, TextRange};
use crate::fix::{classify, find_expression_root, StrategyKind};
use crate::output;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;

/// A node, described for output
#[derive(Debug, Serialize)]
pub struct NodeInfo {
    /// Node kind
    pub kind: String,
    /// Text range without trivia
    pub range: TextRange,
    /// Node text without trivia
    pub text: String,
}

impl From<&SyntaxNode> for NodeInfo {
    fn from(node: &SyntaxNode) -> Self {
        Self {
            kind: node.kind().to_string(),
            range: node.span(),
            text: node.span_text(),
        }
    }
}

/// How the code at a span would be removed
#[derive(Debug, Serialize)]
pub struct Explanation {
    /// The requested span
    pub span: TextRange,
    /// The node the span resolves to
    pub node: NodeInfo,
    /// Expression root, when the node is not a statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_root: Option<NodeInfo>,
    /// The chosen strategy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,
    /// The node the strategy removes or replaces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NodeInfo>,
    /// Why no strategy applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Classify the node at `span` without rewriting.
///
/// Returns `None` when the span resolves to no node.
#[must_use]
pub fn explain(tree: &SyntaxTree, span: TextRange) -> Option<Explanation> {
    let node = tree.find_node(span)?;
    let expression_root = if node.kind().is_statement() {
        None
    } else {
        find_expression_root(&node).map(|root| NodeInfo::from(&root))
    };
    let (strategy, target, error) = match classify(&node) {
        Ok(strategy) => (
            Some(strategy.kind()),
            Some(NodeInfo::from(strategy.target())),
            None,
        ),
        Err(error) => (None, None, Some(error.to_string())),
    };
    Some(Explanation {
        span,
        node: NodeInfo::from(&node),
        expression_root,
        strategy,
        target,
        error,
    })
}

/// Print how the code at `span` of `path` would be removed.
///
/// Returns exit code 1 when no strategy applies.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the span
/// lies outside it.
pub fn run_explain<W: Write>(path: &Path, span: TextRange, json: bool, mut writer: W) -> Result<i32> {
    let tree = read_tree(path)?;
    let explanation = explain(&tree, span).with_context(|| {
        format!(
            "span {span} is outside {} ({} bytes)",
            path.display(),
            tree.len()
        )
    })?;

    if json {
        serde_json::to_writer_pretty(&mut writer, &explanation)?;
        writeln!(writer)?;
    } else {
        output::print_explanation(&mut writer, &explanation)?;
    }
    Ok(i32::from(explanation.strategy.is_none()))
}

/// Print the syntax tree of `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn run_tree<W: Write>(path: &Path, mut writer: W) -> Result<i32> {
    let tree = read_tree(path)?;
    write!(writer, "{}", tree.debug_dump())?;
    Ok(0)
}

fn read_tree(path: &Path) -> Result<SyntaxTree> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    SyntaxTree::parse(&source).with_context(|| format!("failed to parse {}", path.display()))
}
