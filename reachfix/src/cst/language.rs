//! The rowan language definition and the typed node aliases built on it.

use super::kind::SyntaxKind;

/// C# as a [`rowan::Language`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CSharp {}

impl rowan::Language for CSharp {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// A node of the red tree, with parent links and absolute offsets
pub type SyntaxNode = rowan::SyntaxNode<CSharp>;
/// A token of the red tree; trivia are tokens too
pub type SyntaxToken = rowan::SyntaxToken<CSharp>;
/// Either a node or a token
pub type SyntaxElement = rowan::SyntaxElement<CSharp>;
