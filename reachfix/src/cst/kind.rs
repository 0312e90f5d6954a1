//! Node and token kinds, and the categories the fixer reasons about.
//!
//! [`SyntaxKind`] doubles as the raw kind stored in rowan green nodes; see
//! [`super::CSharp`] for the mapping.

use serde::Serialize;
use std::fmt;

/// Kind of a token or node in the syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // Trivia
    /// Spaces and tabs
    Whitespace,
    /// `\n`, `\r\n` or `\r`
    EndOfLine,
    /// `// ...` up to the end of the line
    SingleLineComment,
    /// `/* ... */`
    MultiLineComment,
    /// A preprocessor line such as `#region` or `#if DEBUG`
    DirectiveTrivia,
    /// Text the grammar kept out of the tree, such as code under a disabled `#if`
    SkippedText,

    // Tokens
    /// `{`
    OpenBraceToken,
    /// `}`
    CloseBraceToken,
    /// `(`
    OpenParenToken,
    /// `)`
    CloseParenToken,
    /// `[`
    OpenBracketToken,
    /// `]`
    CloseBracketToken,
    /// `;`
    SemicolonToken,
    /// `,`
    CommaToken,
    /// `.`
    DotToken,
    /// `:`
    ColonToken,
    /// `=`
    EqualsToken,
    /// Any other operator or punctuation; the text tells which
    OperatorToken,
    /// A keyword or contextual keyword; the text tells which
    KeywordToken,
    /// A name
    IdentifierToken,
    /// An integer or real literal
    NumericLiteralToken,
    /// A regular, verbatim, raw or interpolated string literal
    StringLiteralToken,
    /// A character literal
    CharacterLiteralToken,
    /// A grammar token with no dedicated kind
    OtherToken,

    // Root
    /// The whole source file
    CompilationUnit,

    // Declarations
    /// `namespace N { ... }` or `namespace N;`
    NamespaceDeclaration,
    /// A class, struct, interface, record or enum
    TypeDeclaration,
    /// A method, constructor, property, field, event or other member
    MemberDeclaration,
    /// `int x = 1, y`: the type and its declarators
    VariableDeclaration,
    /// `x = 1`: one declared name with its optional initializer
    VariableDeclarator,
    /// One parameter of a method, lambda or local function
    Parameter,

    // Statements
    /// `{ ... }`
    Block,
    /// `;`
    EmptyStatement,
    /// An expression followed by `;`
    ExpressionStatement,
    /// `int x = 1;`
    LocalDeclarationStatement,
    /// A method declared inside a method body
    LocalFunctionStatement,
    /// `if (c) ... else ...`
    IfStatement,
    /// `while (c) ...`
    WhileStatement,
    /// `do ... while (c);`
    DoStatement,
    /// `for (...; ...; ...) ...`
    ForStatement,
    /// `foreach (var x in xs) ...`
    ForEachStatement,
    /// `return ...;`
    ReturnStatement,
    /// `throw ...;`
    ThrowStatement,
    /// `break;`
    BreakStatement,
    /// `continue;`
    ContinueStatement,
    /// `goto label;` and `goto case ...;`
    GotoStatement,
    /// `yield return ...;` and `yield break;`
    YieldStatement,
    /// `switch (x) { ... }`
    SwitchStatement,
    /// `try { ... } catch ... finally ...`
    TryStatement,
    /// `checked { ... }` and `unchecked { ... }`
    CheckedStatement,
    /// `lock (x) ...`
    LockStatement,
    /// `using (var r = ...) ...`
    UsingStatement,
    /// `fixed (int* p = ...) ...`
    FixedStatement,
    /// `unsafe { ... }`
    UnsafeStatement,
    /// `label: ...`
    LabeledStatement,
    /// A statement with no dedicated kind
    OtherStatement,

    // Clauses
    /// `else ...`, attached to an `if`
    ElseClause,
    /// `= value` of a declarator
    EqualsValueClause,
    /// `case ...: ...` of a switch statement
    SwitchSection,
    /// `catch (E e) { ... }`
    CatchClause,
    /// `finally { ... }`
    FinallyClause,
    /// A clause with no dedicated kind
    OtherClause,

    // Lists
    /// `(a, b)` of an invocation or object creation
    ArgumentList,
    /// `[a, b]` of an element access
    BracketedArgumentList,
    /// An argument with a name, `ref`/`out`/`in`, or an inline declaration
    Argument,
    /// `(int a, int b)` of a method
    ParameterList,
    /// `{ ... }` holding members of a type or namespace
    DeclarationList,
    /// A list with no dedicated kind
    OtherList,

    // Types
    /// `int`, `string`, `bool`, ...; the token text tells which
    PredefinedType,
    /// `System.Collections.Generic`
    QualifiedName,
    /// Array, nullable, pointer, tuple and other composed types
    TypeSyntax,

    // Expressions
    /// A simple name
    IdentifierName,
    /// `List<int>`
    GenericName,
    /// A numeric, boolean, `null`, character or string literal
    LiteralExpression,
    /// `$"..."`
    InterpolatedStringExpression,
    /// `a.B`
    MemberAccessExpression,
    /// `a?.B`
    ConditionalAccessExpression,
    /// `.B` inside a conditional access
    MemberBindingExpression,
    /// `f(x)`
    InvocationExpression,
    /// `a[i]`
    ElementAccessExpression,
    /// `new T(...)` and `new(...)`
    ObjectCreationExpression,
    /// `new T[n]`, `new[] { ... }` and `stackalloc`
    ArrayCreationExpression,
    /// `{ a, b }` after `new`
    InitializerExpression,
    /// `(x)`
    ParenthesizedExpression,
    /// `-x`, `!x`, `++x`, ...
    PrefixUnaryExpression,
    /// `x++`, `x--`, `x!`
    PostfixUnaryExpression,
    /// `a + b`, `a && b`, `a ?? b`, ...
    BinaryExpression,
    /// `a = b`, `a += b`, ...
    AssignmentExpression,
    /// `c ? a : b`
    ConditionalExpression,
    /// `(T)x`
    CastExpression,
    /// `x => x + 1` and `delegate { ... }`
    LambdaExpression,
    /// `await x`
    AwaitExpression,
    /// `this`
    ThisExpression,
    /// `base`
    BaseExpression,
    /// An expression with no dedicated kind
    OtherExpression,

    /// A node with no dedicated kind, such as an attribute or a pattern
    OtherNode,
}

impl SyntaxKind {
    /// Every kind, indexed by its raw value
    const ALL: [Self; Self::OtherNode as usize + 1] = [
        Self::Whitespace,
        Self::EndOfLine,
        Self::SingleLineComment,
        Self::MultiLineComment,
        Self::DirectiveTrivia,
        Self::SkippedText,
        Self::OpenBraceToken,
        Self::CloseBraceToken,
        Self::OpenParenToken,
        Self::CloseParenToken,
        Self::OpenBracketToken,
        Self::CloseBracketToken,
        Self::SemicolonToken,
        Self::CommaToken,
        Self::DotToken,
        Self::ColonToken,
        Self::EqualsToken,
        Self::OperatorToken,
        Self::KeywordToken,
        Self::IdentifierToken,
        Self::NumericLiteralToken,
        Self::StringLiteralToken,
        Self::CharacterLiteralToken,
        Self::OtherToken,
        Self::CompilationUnit,
        Self::NamespaceDeclaration,
        Self::TypeDeclaration,
        Self::MemberDeclaration,
        Self::VariableDeclaration,
        Self::VariableDeclarator,
        Self::Parameter,
        Self::Block,
        Self::EmptyStatement,
        Self::ExpressionStatement,
        Self::LocalDeclarationStatement,
        Self::LocalFunctionStatement,
        Self::IfStatement,
        Self::WhileStatement,
        Self::DoStatement,
        Self::ForStatement,
        Self::ForEachStatement,
        Self::ReturnStatement,
        Self::ThrowStatement,
        Self::BreakStatement,
        Self::ContinueStatement,
        Self::GotoStatement,
        Self::YieldStatement,
        Self::SwitchStatement,
        Self::TryStatement,
        Self::CheckedStatement,
        Self::LockStatement,
        Self::UsingStatement,
        Self::FixedStatement,
        Self::UnsafeStatement,
        Self::LabeledStatement,
        Self::OtherStatement,
        Self::ElseClause,
        Self::EqualsValueClause,
        Self::SwitchSection,
        Self::CatchClause,
        Self::FinallyClause,
        Self::OtherClause,
        Self::ArgumentList,
        Self::BracketedArgumentList,
        Self::Argument,
        Self::ParameterList,
        Self::DeclarationList,
        Self::OtherList,
        Self::PredefinedType,
        Self::QualifiedName,
        Self::TypeSyntax,
        Self::IdentifierName,
        Self::GenericName,
        Self::LiteralExpression,
        Self::InterpolatedStringExpression,
        Self::MemberAccessExpression,
        Self::ConditionalAccessExpression,
        Self::MemberBindingExpression,
        Self::InvocationExpression,
        Self::ElementAccessExpression,
        Self::ObjectCreationExpression,
        Self::ArrayCreationExpression,
        Self::InitializerExpression,
        Self::ParenthesizedExpression,
        Self::PrefixUnaryExpression,
        Self::PostfixUnaryExpression,
        Self::BinaryExpression,
        Self::AssignmentExpression,
        Self::ConditionalExpression,
        Self::CastExpression,
        Self::LambdaExpression,
        Self::AwaitExpression,
        Self::ThisExpression,
        Self::BaseExpression,
        Self::OtherExpression,
        Self::OtherNode,
    ];

    /// Kind for a raw value stored in a green node.
    ///
    /// Values outside the enum map to [`SyntaxKind::OtherNode`]; the parser
    /// never stores such values.
    #[must_use]
    pub fn from_raw(raw: u16) -> Self {
        Self::ALL
            .get(usize::from(raw))
            .copied()
            .unwrap_or(Self::OtherNode)
    }
}

/// Statement kinds, as seen by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `{ ... }`
    Block,
    /// `;`
    Empty,
    /// An expression followed by `;`
    Expression,
    /// `int x = 1;`
    LocalDeclaration,
    /// A local function
    LocalFunction,
    /// `if`
    If,
    /// `while`
    While,
    /// `do ... while`
    Do,
    /// `for`
    For,
    /// `foreach`
    ForEach,
    /// `return`
    Return,
    /// `throw`
    Throw,
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `goto`
    Goto,
    /// `yield return` and `yield break`
    Yield,
    /// `switch`
    Switch,
    /// `try`
    Try,
    /// `checked` and `unchecked` blocks
    Checked,
    /// `lock`
    Lock,
    /// `using` with an embedded statement
    Using,
    /// `fixed`
    Fixed,
    /// `unsafe` blocks
    Unsafe,
    /// `label: statement`
    Labeled,
    /// Any other statement
    Other,
}

impl StatementKind {
    /// Whether a child statement of this kind is an embedded body that the
    /// grammar requires, so it cannot simply be deleted.
    #[must_use]
    pub const fn has_embedded_body(self) -> bool {
        matches!(
            self,
            Self::If
                | Self::While
                | Self::Do
                | Self::For
                | Self::ForEach
                | Self::LocalFunction
                | Self::Try
                | Self::Checked
                | Self::Lock
                | Self::Using
                | Self::Fixed
                | Self::Unsafe
                | Self::Labeled
        )
    }
}

/// Clause kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// `else ...`
    Else,
    /// `= value`
    EqualsValue,
    /// `case ...: ...`
    SwitchSection,
    /// `catch ...`
    Catch,
    /// `finally ...`
    Finally,
    /// Any other clause
    Other,
}

/// Expression kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    /// Simple and generic names
    Name,
    /// Literals
    Literal,
    /// Interpolated strings
    InterpolatedString,
    /// `a.B`
    MemberAccess,
    /// `a?.B`
    ConditionalAccess,
    /// `.B` inside `a?.B`
    MemberBinding,
    /// `f(x)`
    Invocation,
    /// `a[i]`
    ElementAccess,
    /// `new T(...)`
    ObjectCreation,
    /// `new T[n]`
    ArrayCreation,
    /// `{ a, b }` initializers
    Initializer,
    /// `(x)`
    Parenthesized,
    /// `-x`
    PrefixUnary,
    /// `x++`
    PostfixUnary,
    /// `a + b`
    Binary,
    /// `a = b`
    Assignment,
    /// `c ? a : b`
    Conditional,
    /// `(T)x`
    Cast,
    /// Lambdas and anonymous methods
    Lambda,
    /// `await x`
    Await,
    /// `this`
    This,
    /// `base`
    Base,
    /// Any other expression
    Other,
}

/// Coarse grouping of kinds used by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// The compilation unit
    Root,
    /// A statement
    Statement(StatementKind),
    /// A clause attached to a statement or declarator
    Clause(ClauseKind),
    /// An expression
    Expression(ExpressionKind),
    /// Namespace, type, member and variable declarations
    Declaration,
    /// Type syntax that is not also an expression
    Type,
    /// Argument, parameter and member lists
    List,
    /// A token or trivia
    Token,
    /// Anything else, such as attributes and patterns
    Other,
}

impl SyntaxKind {
    /// The category of this kind
    #[must_use]
    pub const fn category(self) -> NodeCategory {
        use ExpressionKind as E;
        use NodeCategory as C;
        use StatementKind as S;

        match self {
            Self::Whitespace
            | Self::EndOfLine
            | Self::SingleLineComment
            | Self::MultiLineComment
            | Self::DirectiveTrivia
            | Self::SkippedText
            | Self::OpenBraceToken
            | Self::CloseBraceToken
            | Self::OpenParenToken
            | Self::CloseParenToken
            | Self::OpenBracketToken
            | Self::CloseBracketToken
            | Self::SemicolonToken
            | Self::CommaToken
            | Self::DotToken
            | Self::ColonToken
            | Self::EqualsToken
            | Self::OperatorToken
            | Self::KeywordToken
            | Self::IdentifierToken
            | Self::NumericLiteralToken
            | Self::StringLiteralToken
            | Self::CharacterLiteralToken
            | Self::OtherToken => C::Token,

            Self::CompilationUnit => C::Root,

            Self::NamespaceDeclaration
            | Self::TypeDeclaration
            | Self::MemberDeclaration
            | Self::VariableDeclaration
            | Self::VariableDeclarator
            | Self::Parameter => C::Declaration,

            Self::Block => C::Statement(S::Block),
            Self::EmptyStatement => C::Statement(S::Empty),
            Self::ExpressionStatement => C::Statement(S::Expression),
            Self::LocalDeclarationStatement => C::Statement(S::LocalDeclaration),
            Self::LocalFunctionStatement => C::Statement(S::LocalFunction),
            Self::IfStatement => C::Statement(S::If),
            Self::WhileStatement => C::Statement(S::While),
            Self::DoStatement => C::Statement(S::Do),
            Self::ForStatement => C::Statement(S::For),
            Self::ForEachStatement => C::Statement(S::ForEach),
            Self::ReturnStatement => C::Statement(S::Return),
            Self::ThrowStatement => C::Statement(S::Throw),
            Self::BreakStatement => C::Statement(S::Break),
            Self::ContinueStatement => C::Statement(S::Continue),
            Self::GotoStatement => C::Statement(S::Goto),
            Self::YieldStatement => C::Statement(S::Yield),
            Self::SwitchStatement => C::Statement(S::Switch),
            Self::TryStatement => C::Statement(S::Try),
            Self::CheckedStatement => C::Statement(S::Checked),
            Self::LockStatement => C::Statement(S::Lock),
            Self::UsingStatement => C::Statement(S::Using),
            Self::FixedStatement => C::Statement(S::Fixed),
            Self::UnsafeStatement => C::Statement(S::Unsafe),
            Self::LabeledStatement => C::Statement(S::Labeled),
            Self::OtherStatement => C::Statement(S::Other),

            Self::ElseClause => C::Clause(ClauseKind::Else),
            Self::EqualsValueClause => C::Clause(ClauseKind::EqualsValue),
            Self::SwitchSection => C::Clause(ClauseKind::SwitchSection),
            Self::CatchClause => C::Clause(ClauseKind::Catch),
            Self::FinallyClause => C::Clause(ClauseKind::Finally),
            Self::OtherClause => C::Clause(ClauseKind::Other),

            Self::ArgumentList
            | Self::BracketedArgumentList
            | Self::Argument
            | Self::ParameterList
            | Self::DeclarationList
            | Self::OtherList => C::List,

            Self::PredefinedType | Self::QualifiedName | Self::TypeSyntax => C::Type,

            Self::IdentifierName | Self::GenericName => C::Expression(E::Name),
            Self::LiteralExpression => C::Expression(E::Literal),
            Self::InterpolatedStringExpression => C::Expression(E::InterpolatedString),
            Self::MemberAccessExpression => C::Expression(E::MemberAccess),
            Self::ConditionalAccessExpression => C::Expression(E::ConditionalAccess),
            Self::MemberBindingExpression => C::Expression(E::MemberBinding),
            Self::InvocationExpression => C::Expression(E::Invocation),
            Self::ElementAccessExpression => C::Expression(E::ElementAccess),
            Self::ObjectCreationExpression => C::Expression(E::ObjectCreation),
            Self::ArrayCreationExpression => C::Expression(E::ArrayCreation),
            Self::InitializerExpression => C::Expression(E::Initializer),
            Self::ParenthesizedExpression => C::Expression(E::Parenthesized),
            Self::PrefixUnaryExpression => C::Expression(E::PrefixUnary),
            Self::PostfixUnaryExpression => C::Expression(E::PostfixUnary),
            Self::BinaryExpression => C::Expression(E::Binary),
            Self::AssignmentExpression => C::Expression(E::Assignment),
            Self::ConditionalExpression => C::Expression(E::Conditional),
            Self::CastExpression => C::Expression(E::Cast),
            Self::LambdaExpression => C::Expression(E::Lambda),
            Self::AwaitExpression => C::Expression(E::Await),
            Self::ThisExpression => C::Expression(E::This),
            Self::BaseExpression => C::Expression(E::Base),
            Self::OtherExpression => C::Expression(E::Other),

            Self::OtherNode => C::Other,
        }
    }

    /// Check if this is a token or trivia kind
    #[must_use]
    pub const fn is_token(self) -> bool {
        matches!(self.category(), NodeCategory::Token)
    }

    /// Check if this is whitespace, a line break, a comment or a directive
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::EndOfLine
                | Self::SingleLineComment
                | Self::MultiLineComment
                | Self::DirectiveTrivia
                | Self::SkippedText
        )
    }

    /// Check if this is a statement kind
    #[must_use]
    pub const fn is_statement(self) -> bool {
        matches!(self.category(), NodeCategory::Statement(_))
    }

    /// Check if this is an expression kind
    #[must_use]
    pub const fn is_expression(self) -> bool {
        matches!(self.category(), NodeCategory::Expression(_))
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
