use crate::cst::{RewriteError, SyntaxKind, TextRange};

/// Error while removing unreachable code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixError {
    /// The flagged node sits in a construct no removal strategy covers
    #[error("unsupported context: no removal strategy for {kind} at {range}")]
    UnsupportedContext {
        /// Kind of the flagged node
        kind: SyntaxKind,
        /// Text range of the flagged node
        range: TextRange,
    },
    /// The location does not resolve to any node of the tree
    #[error("no syntax node at {range}")]
    NodeNotFound {
        /// The unresolved location
        range: TextRange,
    },
    /// The tree rewrite itself failed
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}
