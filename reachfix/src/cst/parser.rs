//! Tree-sitter based parser for C# source code.
//!
//! tree-sitter's C# grammar does the parsing. Its concrete tree is then
//! lowered into a rowan green tree:
//! - Named tree-sitter nodes map onto [`SyntaxKind`]s
//! - Names and literals are wrapped in expression nodes
//! - `else` branches and declarator initializers become clause nodes
//! - Text between tokens becomes trivia tokens next to its owner
//!
//! The lowering walks with an explicit stack and rejects nesting deeper
//! than [`MAX_NESTING_DEPTH`].

use super::kind::SyntaxKind;
use super::trivia;
use crate::constants::MAX_NESTING_DEPTH;
use rowan::{GreenNode, GreenNodeBuilder};
use std::ops::Range;
use tree_sitter::{Node, Parser};

/// Characters of offending source quoted in a syntax error
const SNIPPET_CHARS: usize = 24;

/// Error during parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The C# grammar could not be loaded into the parser
    #[error("failed to load the C# grammar: {0}")]
    Language(String),
    /// tree-sitter returned no tree
    #[error("the parser returned no tree")]
    NoTree,
    /// Source the grammar could not place
    #[error("syntax error at offset {offset}: unexpected `{text}`")]
    Unexpected {
        /// Byte offset of the offending text
        offset: usize,
        /// Start of the offending text
        text: String,
    },
    /// A token the grammar required but the source lacks
    #[error("syntax error at offset {offset}: missing `{expected}`")]
    Missing {
        /// Kind of the missing token or node
        expected: String,
        /// Byte offset where it was expected
        offset: usize,
    },
    /// Nodes nested deeper than the parser accepts
    #[error("nesting exceeds {limit} levels at offset {offset}")]
    TooDeep {
        /// The nesting limit
        limit: usize,
        /// Byte offset of the first node past the limit
        offset: usize,
    },
}

/// Parse a whole compilation unit.
///
/// # Errors
///
/// Returns an error if the source contains a syntax error or nests too
/// deeply.
pub fn parse_compilation_unit(source: &str) -> Result<GreenNode, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| ParseError::Language(e.to_string()))?;
    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;

    let events = lower(tree.root_node(), source)?;
    Ok(build(source, &events))
}

/// Flat description of the tree to build
#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Start(SyntaxKind),
    Token(SyntaxKind, Range<usize>),
    Finish,
}

/// Pending work of the lowering walk
enum Task<'tree> {
    Visit(Node<'tree>),
    /// Open a node that has no tree-sitter counterpart
    Start(SyntaxKind, usize),
    Finish,
}

/// Event list for the tree rooted at `root`, in source order
fn lower(root: Node<'_>, source: &str) -> Result<Vec<Event>, ParseError> {
    let mut lowering = Lowering {
        events: Vec::new(),
        depth: 0,
    };
    let mut cursor = root.walk();
    let mut tasks = vec![Task::Finish];

    check(root, source)?;

    lowering.open(SyntaxKind::CompilationUnit, root.start_byte())?;
    let children: Vec<_> = root.children(&mut cursor).collect();
    push_children(&mut tasks, root.kind(), children);

    while let Some(task) = tasks.pop() {
        let node = match task {
            Task::Start(kind, offset) => {
                lowering.open(kind, offset)?;
                continue;
            }
            Task::Finish => {
                lowering.close();
                continue;
            }
            Task::Visit(node) => node,
        };

        if node.is_extra() {
            continue;
        }
        check(node, source)?;

        let range = node.byte_range();
        if node.is_named() {
            if let Some((wrapper, token)) = atom(node.kind()) {
                if node.has_error() {
                    return Err(unexpected(node, source));
                }
                lowering.open(wrapper, range.start)?;
                lowering.events.push(Event::Token(token, range));
                lowering.close();
                continue;
            }
        }
        if node.child_count() == 0 {
            if !range.is_empty() {
                let kind = token_kind(node, source.get(range.clone()).unwrap_or_default());
                lowering.events.push(Event::Token(kind, range));
            }
            continue;
        }

        let children: Vec<_> = node
            .children(&mut cursor)
            .filter(|child| !child.is_extra())
            .collect();
        if is_transparent(node.kind(), &children) {
            push_children(&mut tasks, node.kind(), children);
            continue;
        }
        lowering.open(node_kind(node.kind()), range.start)?;
        tasks.push(Task::Finish);
        push_children(&mut tasks, node.kind(), children);
    }

    Ok(lowering.events)
}

fn check(node: Node<'_>, source: &str) -> Result<(), ParseError> {
    if node.is_missing() {
        return Err(ParseError::Missing {
            expected: node.kind().to_owned(),
            offset: node.start_byte(),
        });
    }
    if node.is_error() {
        return Err(unexpected(node, source));
    }
    Ok(())
}

fn unexpected(node: Node<'_>, source: &str) -> ParseError {
    ParseError::Unexpected {
        offset: node.start_byte(),
        text: snippet(source, node.byte_range()),
    }
}

struct Lowering {
    events: Vec<Event>,
    depth: usize,
}

impl Lowering {
    fn open(&mut self, kind: SyntaxKind, offset: usize) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                offset,
            });
        }
        self.events.push(Event::Start(kind));
        Ok(())
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.events.push(Event::Finish);
    }
}

/// Queue `children` in source order, grouping the keyword that starts a
/// clause with the node after it
fn push_children<'tree>(tasks: &mut Vec<Task<'tree>>, parent: &str, children: Vec<Node<'tree>>) {
    let clause = match parent {
        "if_statement" => Some(("else", SyntaxKind::ElseClause)),
        "variable_declarator" => Some(("=", SyntaxKind::EqualsValueClause)),
        _ => None,
    };

    let mut ordered = Vec::with_capacity(children.len() + 2);
    let mut children = children.into_iter();
    while let Some(child) = children.next() {
        match clause {
            Some((keyword, kind)) if !child.is_named() && child.kind() == keyword => {
                ordered.push(Task::Start(kind, child.start_byte()));
                ordered.push(Task::Visit(child));
                ordered.extend(children.next().map(Task::Visit));
                ordered.push(Task::Finish);
            }
            _ => ordered.push(Task::Visit(child)),
        }
    }
    tasks.extend(ordered.into_iter().rev());
}

/// Nodes that contribute their children but no node of their own
fn is_transparent(kind: &str, children: &[Node<'_>]) -> bool {
    match kind {
        "global_statement" => true,
        "argument" => children.len() == 1,
        _ => false,
    }
}

/// Named nodes kept as a single token inside a wrapper node
fn atom(kind: &str) -> Option<(SyntaxKind, SyntaxKind)> {
    use SyntaxKind as K;

    let pair = match kind {
        "identifier" | "implicit_type" | "discard" => (K::IdentifierName, K::IdentifierToken),
        "predefined_type" => (K::PredefinedType, K::KeywordToken),
        "integer_literal" | "real_literal" => (K::LiteralExpression, K::NumericLiteralToken),
        "boolean_literal" | "null_literal" => (K::LiteralExpression, K::KeywordToken),
        "character_literal" => (K::LiteralExpression, K::CharacterLiteralToken),
        "string_literal" | "verbatim_string_literal" | "raw_string_literal" => {
            (K::LiteralExpression, K::StringLiteralToken)
        }
        "interpolated_string_expression" => {
            (K::InterpolatedStringExpression, K::StringLiteralToken)
        }
        "this_expression" => (K::ThisExpression, K::KeywordToken),
        "base_expression" => (K::BaseExpression, K::KeywordToken),
        _ => return None,
    };
    Some(pair)
}

fn token_kind(node: Node<'_>, text: &str) -> SyntaxKind {
    if node.is_named() {
        return SyntaxKind::OtherToken;
    }
    match text {
        "{" => SyntaxKind::OpenBraceToken,
        "}" => SyntaxKind::CloseBraceToken,
        "(" => SyntaxKind::OpenParenToken,
        ")" => SyntaxKind::CloseParenToken,
        "[" => SyntaxKind::OpenBracketToken,
        "]" => SyntaxKind::CloseBracketToken,
        ";" => SyntaxKind::SemicolonToken,
        "," => SyntaxKind::CommaToken,
        "." => SyntaxKind::DotToken,
        ":" => SyntaxKind::ColonToken,
        "=" => SyntaxKind::EqualsToken,
        _ if text.starts_with(|c: char| c.is_alphabetic() || c == '_') => {
            SyntaxKind::KeywordToken
        }
        _ => SyntaxKind::OperatorToken,
    }
}

fn node_kind(kind: &str) -> SyntaxKind {
    use SyntaxKind as K;

    match kind {
        "compilation_unit" => K::CompilationUnit,

        "namespace_declaration" | "file_scoped_namespace_declaration" => {
            K::NamespaceDeclaration
        }
        "class_declaration"
        | "struct_declaration"
        | "interface_declaration"
        | "record_declaration"
        | "record_struct_declaration"
        | "enum_declaration" => K::TypeDeclaration,
        "variable_declaration" => K::VariableDeclaration,
        "variable_declarator" => K::VariableDeclarator,
        "parameter" => K::Parameter,
        "catch_declaration" => K::OtherNode,

        "block" => K::Block,
        "empty_statement" => K::EmptyStatement,
        "expression_statement" => K::ExpressionStatement,
        "local_declaration_statement" => K::LocalDeclarationStatement,
        "local_function_statement" => K::LocalFunctionStatement,
        "if_statement" => K::IfStatement,
        "while_statement" => K::WhileStatement,
        "do_statement" => K::DoStatement,
        "for_statement" => K::ForStatement,
        "foreach_statement" | "for_each_statement" => K::ForEachStatement,
        "return_statement" => K::ReturnStatement,
        "throw_statement" => K::ThrowStatement,
        "break_statement" => K::BreakStatement,
        "continue_statement" => K::ContinueStatement,
        "goto_statement" => K::GotoStatement,
        "yield_statement" => K::YieldStatement,
        "switch_statement" => K::SwitchStatement,
        "try_statement" => K::TryStatement,
        "checked_statement" => K::CheckedStatement,
        "lock_statement" => K::LockStatement,
        "using_statement" => K::UsingStatement,
        "fixed_statement" => K::FixedStatement,
        "unsafe_statement" => K::UnsafeStatement,
        "labeled_statement" => K::LabeledStatement,

        "equals_value_clause" => K::EqualsValueClause,
        "switch_section" => K::SwitchSection,
        "catch_clause" => K::CatchClause,
        "finally_clause" => K::FinallyClause,

        "argument_list" => K::ArgumentList,
        "bracketed_argument_list" => K::BracketedArgumentList,
        "argument" => K::Argument,
        "parameter_list" => K::ParameterList,
        "declaration_list" => K::DeclarationList,
        "switch_body" => K::OtherList,

        "qualified_name" | "alias_qualified_name" => K::QualifiedName,
        "generic_name" => K::GenericName,

        "member_access_expression" => K::MemberAccessExpression,
        "conditional_access_expression" => K::ConditionalAccessExpression,
        "member_binding_expression" => K::MemberBindingExpression,
        "invocation_expression" => K::InvocationExpression,
        "element_access_expression" => K::ElementAccessExpression,
        "object_creation_expression" | "implicit_object_creation_expression" => {
            K::ObjectCreationExpression
        }
        "array_creation_expression"
        | "implicit_array_creation_expression"
        | "stackalloc_array_creation_expression"
        | "implicit_stackalloc_expression" => K::ArrayCreationExpression,
        "initializer_expression" => K::InitializerExpression,
        "parenthesized_expression" => K::ParenthesizedExpression,
        "prefix_unary_expression" => K::PrefixUnaryExpression,
        "postfix_unary_expression" => K::PostfixUnaryExpression,
        "binary_expression" => K::BinaryExpression,
        "assignment_expression" => K::AssignmentExpression,
        "conditional_expression" => K::ConditionalExpression,
        "cast_expression" => K::CastExpression,
        "lambda_expression" | "anonymous_method_expression" => K::LambdaExpression,
        "await_expression" => K::AwaitExpression,
        "boolean_literal" | "null_literal" => K::LiteralExpression,

        other if other.ends_with("_statement") => K::OtherStatement,
        other if other.ends_with("_expression") => K::OtherExpression,
        other if other.ends_with("_declaration") => K::MemberDeclaration,
        other if other.ends_with("_clause") => K::OtherClause,
        other if other.ends_with("_list") => K::OtherList,
        other if other.ends_with("_type") => K::TypeSyntax,
        _ => K::OtherNode,
    }
}

fn snippet(source: &str, range: Range<usize>) -> String {
    let text = source.get(range).unwrap_or_default();
    let line = text.lines().next().unwrap_or_default();
    line.chars().take(SNIPPET_CHARS).collect()
}

/// Replay `events` into a green tree, attaching the text between tokens as
/// trivia tokens
fn build(source: &str, events: &[Event]) -> GreenNode {
    let token_starts: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            Event::Token(_, range) => Some(range.start),
            Event::Start(_) | Event::Finish => None,
        })
        .collect();

    let mut builder = GreenNodeBuilder::new();
    let mut consumed = 0;
    let mut tokens_seen = 0;
    let mut depth = 0usize;
    for event in events {
        match event {
            Event::Start(kind) => {
                builder.start_node((*kind).into());
                depth += 1;
            }
            Event::Token(kind, range) => {
                push_trivia(&mut builder, source.get(consumed..range.start));
                builder.token(
                    (*kind).into(),
                    source.get(range.clone()).unwrap_or_default(),
                );
                tokens_seen += 1;

                let gap_end = token_starts
                    .get(tokens_seen)
                    .copied()
                    .unwrap_or(source.len());
                let gap = source.get(range.end..gap_end).unwrap_or_default();
                let trailing_end = range.end + trivia::trailing_len(gap);
                push_trivia(&mut builder, source.get(range.end..trailing_end));
                consumed = trailing_end;
            }
            Event::Finish => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    // Trivia after the last token belongs to the root
                    push_trivia(&mut builder, source.get(consumed..));
                    consumed = source.len();
                }
                builder.finish_node();
            }
        }
    }
    builder.finish()
}

fn push_trivia(builder: &mut GreenNodeBuilder<'_>, gap: Option<&str>) {
    for (kind, text) in trivia::pieces(gap.unwrap_or_default()) {
        builder.token(kind.into(), text);
    }
}
