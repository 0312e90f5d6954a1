//! Constructors for synthesized nodes.

use super::kind::SyntaxKind;
use super::language::{SyntaxNode, SyntaxToken};
use super::node::SyntaxNodeExt;
use rowan::{GreenNode, GreenToken, NodeOrToken};

/// An empty block, `{ }`
#[must_use]
pub fn empty_block() -> GreenNode {
    empty_block_with_trivia(Vec::new(), Vec::new())
}

/// An empty block surrounded by the given trivia tokens.
///
/// `leading` goes before `{`, `trailing` after `}`; a single space
/// separates the braces.
#[must_use]
pub fn empty_block_with_trivia(leading: Vec<GreenToken>, trailing: Vec<GreenToken>) -> GreenNode {
    let braces = [
        token(SyntaxKind::OpenBraceToken, "{"),
        token(SyntaxKind::Whitespace, " "),
        token(SyntaxKind::CloseBraceToken, "}"),
    ];
    let children: Vec<_> = leading
        .into_iter()
        .chain(braces)
        .chain(trailing)
        .map(NodeOrToken::Token)
        .collect();
    GreenNode::new(SyntaxKind::Block.into(), children)
}

/// An empty block that takes over the outer trivia of `replaced`, so it
/// sits exactly where `replaced` did.
#[must_use]
pub fn empty_block_in_place_of(replaced: &SyntaxNode) -> GreenNode {
    empty_block_with_trivia(
        green_tokens(&replaced.leading_trivia()),
        green_tokens(&replaced.trailing_trivia()),
    )
}

fn token(kind: SyntaxKind, text: &str) -> GreenToken {
    GreenToken::new(kind.into(), text)
}

fn green_tokens(tokens: &[SyntaxToken]) -> Vec<GreenToken> {
    tokens.iter().map(|token| token.green().to_owned()).collect()
}
