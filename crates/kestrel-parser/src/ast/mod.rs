//! The owned syntax tree.
//!
//! Every node owns its children (`Box`/`Vec`); there are no parent pointers
//! and no shared subtrees. Each node records the span from the start of its
//! first token to the end of its last token, so a parent's span always
//! contains the spans of its children. Parentheses do not produce nodes;
//! a parenthesized expression's span is widened to include them.

mod expressions;
mod operators;
mod patterns;
mod statements;

pub use expressions::*;
pub use operators::*;
pub use patterns::*;
pub use statements::*;

use kestrel_common::Span;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    Module,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Line,
    Block,
    Hashbang,
}

/// A comment from the source, kept verbatim (delimiters included).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub span: Span,
}

/// The root of every parse.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Program {
    pub file_name: Arc<str>,
    pub source_type: SourceType,
    pub directives: Vec<Directive>,
    pub body: Vec<Statement>,
    pub comments: Vec<Comment>,
    pub span: Span,
}

impl Program {
    pub fn is_module(&self) -> bool {
        self.source_type == SourceType::Module
    }

    pub fn is_strict(&self) -> bool {
        self.is_module() || self.directives.iter().any(|d| d.value == "use strict")
    }
}

/// Anything that knows where it came from.
pub trait Spanned {
    fn span(&self) -> Span;
}

macro_rules! impl_spanned {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Spanned for $ty {
                #[inline]
                fn span(&self) -> Span {
                    <$ty>::span(self)
                }
            }
        )+
    };
}

impl_spanned!(Expression, Statement, Pattern, PropertyKey, ClassMember, ForHead, ImportSpecifier);

macro_rules! impl_spanned_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Spanned for $ty {
                #[inline]
                fn span(&self) -> Span {
                    self.span
                }
            }
        )+
    };
}

impl_spanned_field!(
    Program,
    Identifier,
    Literal,
    Function,
    Class,
    Property,
    TemplateLiteral,
    VariableDeclaration,
    VariableDeclarator,
    SwitchCase,
    CatchClause,
    BlockStatement,
    FunctionBody,
    ImportDeclaration,
    ExportDeclaration,
    ExportSpecifier,
    Comment,
    Directive,
);

/// The name of every node form, for diagnostics, logging and dumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum NodeKind {
    Program,
    // Statements
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    ExpressionStatement,
    IfStatement,
    SwitchStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    WhileStatement,
    DoWhileStatement,
    TryStatement,
    ThrowStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    LabeledStatement,
    WithStatement,
    VariableDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    ImportDeclaration,
    ExportDeclaration,
    ErrorStatement,
    // Expressions
    Identifier,
    Literal,
    TemplateLiteral,
    TaggedTemplateExpression,
    ThisExpression,
    SuperExpression,
    ArrayExpression,
    ObjectExpression,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassExpression,
    UnaryExpression,
    UpdateExpression,
    BinaryExpression,
    LogicalExpression,
    AssignmentExpression,
    ConditionalExpression,
    CallExpression,
    NewExpression,
    MemberExpression,
    OptionalChain,
    SequenceExpression,
    SpreadElement,
    YieldExpression,
    AwaitExpression,
    MetaProperty,
    ImportExpression,
    PrivateName,
    ErrorExpression,
    // Patterns
    IdentifierPattern,
    MemberPattern,
    ObjectPattern,
    ArrayPattern,
    AssignmentPattern,
    RestElement,
    ErrorPattern,
}

impl NodeKind {
    pub fn is_statement(self) -> bool {
        (self as u8) >= (NodeKind::BlockStatement as u8)
            && (self as u8) <= (NodeKind::ErrorStatement as u8)
    }

    pub fn is_expression(self) -> bool {
        (self as u8) >= (NodeKind::Identifier as u8)
            && (self as u8) <= (NodeKind::ErrorExpression as u8)
    }

    pub fn is_pattern(self) -> bool {
        (self as u8) >= (NodeKind::IdentifierPattern as u8)
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            NodeKind::ErrorStatement | NodeKind::ErrorExpression | NodeKind::ErrorPattern
        )
    }
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Block(_) => NodeKind::BlockStatement,
            Statement::Empty(_) => NodeKind::EmptyStatement,
            Statement::Debugger(_) => NodeKind::DebuggerStatement,
            Statement::Expression(_) => NodeKind::ExpressionStatement,
            Statement::If(_) => NodeKind::IfStatement,
            Statement::Switch(_) => NodeKind::SwitchStatement,
            Statement::For(_) => NodeKind::ForStatement,
            Statement::ForIn(_) => NodeKind::ForInStatement,
            Statement::ForOf(_) => NodeKind::ForOfStatement,
            Statement::While(_) => NodeKind::WhileStatement,
            Statement::DoWhile(_) => NodeKind::DoWhileStatement,
            Statement::Try(_) => NodeKind::TryStatement,
            Statement::Throw(_) => NodeKind::ThrowStatement,
            Statement::Return(_) => NodeKind::ReturnStatement,
            Statement::Break(_) => NodeKind::BreakStatement,
            Statement::Continue(_) => NodeKind::ContinueStatement,
            Statement::Labeled(_) => NodeKind::LabeledStatement,
            Statement::With(_) => NodeKind::WithStatement,
            Statement::Variable(_) => NodeKind::VariableDeclaration,
            Statement::Function(_) => NodeKind::FunctionDeclaration,
            Statement::Class(_) => NodeKind::ClassDeclaration,
            Statement::Import(_) => NodeKind::ImportDeclaration,
            Statement::Export(_) => NodeKind::ExportDeclaration,
            Statement::Error(_) => NodeKind::ErrorStatement,
        }
    }
}

impl Expression {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Identifier(_) => NodeKind::Identifier,
            Expression::Literal(_) => NodeKind::Literal,
            Expression::Template(_) => NodeKind::TemplateLiteral,
            Expression::TaggedTemplate(_) => NodeKind::TaggedTemplateExpression,
            Expression::This(_) => NodeKind::ThisExpression,
            Expression::Super(_) => NodeKind::SuperExpression,
            Expression::Array(_) => NodeKind::ArrayExpression,
            Expression::Object(_) => NodeKind::ObjectExpression,
            Expression::Function(_) => NodeKind::FunctionExpression,
            Expression::Arrow(_) => NodeKind::ArrowFunctionExpression,
            Expression::Class(_) => NodeKind::ClassExpression,
            Expression::Unary(_) => NodeKind::UnaryExpression,
            Expression::Update(_) => NodeKind::UpdateExpression,
            Expression::Binary(_) => NodeKind::BinaryExpression,
            Expression::Logical(_) => NodeKind::LogicalExpression,
            Expression::Assignment(_) => NodeKind::AssignmentExpression,
            Expression::Conditional(_) => NodeKind::ConditionalExpression,
            Expression::Call(_) => NodeKind::CallExpression,
            Expression::New(_) => NodeKind::NewExpression,
            Expression::Member(_) => NodeKind::MemberExpression,
            Expression::OptionalChain(_) => NodeKind::OptionalChain,
            Expression::Sequence(_) => NodeKind::SequenceExpression,
            Expression::Spread(_) => NodeKind::SpreadElement,
            Expression::Yield(_) => NodeKind::YieldExpression,
            Expression::Await(_) => NodeKind::AwaitExpression,
            Expression::MetaProperty(_) => NodeKind::MetaProperty,
            Expression::Import(_) => NodeKind::ImportExpression,
            Expression::PrivateName(_) => NodeKind::PrivateName,
            Expression::Error(_) => NodeKind::ErrorExpression,
        }
    }
}

impl Pattern {
    pub fn kind(&self) -> NodeKind {
        match self {
            Pattern::Identifier(_) => NodeKind::IdentifierPattern,
            Pattern::Member(_) => NodeKind::MemberPattern,
            Pattern::Object(_) => NodeKind::ObjectPattern,
            Pattern::Array(_) => NodeKind::ArrayPattern,
            Pattern::Assignment(_) => NodeKind::AssignmentPattern,
            Pattern::Rest(_) => NodeKind::RestElement,
            Pattern::Error(_) => NodeKind::ErrorPattern,
        }
    }
}
