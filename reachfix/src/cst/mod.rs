//! CST (Concrete Syntax Tree) module.
//!
//! This module provides a lossless, persistent syntax tree for C# source
//! built on rowan's green/red trees:
//! - Parsing with tree-sitter's C# grammar
//! - Green nodes: immutable, `Arc`-shared, position independent
//! - Red nodes: created on demand, with parent links and absolute offsets
//! - Trivia (whitespace, comments, directives) as tokens next to the token
//!   that owns them
//! - Rewrite primitives that return a new tree sharing unchanged subtrees
//!
//! # Design Principles
//!
//! - **Lossless**: printing a parsed tree reproduces the source exactly
//! - **Persistent**: trees are never mutated, edits copy one root path
//! - **Byte-range anchored**: locations are byte offsets into the source

pub mod factory;
mod kind;
mod language;
mod node;
mod parser;
mod text;
mod tree;
mod trivia;

pub use kind::{ClauseKind, ExpressionKind, NodeCategory, StatementKind, SyntaxKind};
pub use language::{CSharp, SyntaxElement, SyntaxNode, SyntaxToken};
pub use node::SyntaxNodeExt;
pub use parser::ParseError;
pub use rowan::{GreenNode, GreenToken};
pub use text::{ParseRangeError, TextRange};
pub use tree::{RewriteError, SyntaxTree, TriviaDisposal};
