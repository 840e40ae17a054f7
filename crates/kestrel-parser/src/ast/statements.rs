//! Statement and declaration nodes.

use super::expressions::{Expression, Identifier, Literal, PropertyKey};
use super::patterns::Pattern;
use kestrel_common::Span;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Statement {
    Block(BlockStatement),
    Empty(EmptyStatement),
    Debugger(DebuggerStatement),
    Expression(ExpressionStatement),
    If(IfStatement),
    Switch(SwitchStatement),
    For(ForStatement),
    ForIn(ForInStatement),
    ForOf(ForOfStatement),
    While(WhileStatement),
    DoWhile(DoWhileStatement),
    Try(TryStatement),
    Throw(ThrowStatement),
    Return(ReturnStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Labeled(LabeledStatement),
    With(WithStatement),
    Variable(VariableDeclaration),
    Function(Box<Function>),
    Class(Box<Class>),
    Import(ImportDeclaration),
    Export(ExportDeclaration),
    /// Placeholder spanning text skipped during error recovery.
    Error(StatementError),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EmptyStatement {
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DebuggerStatement {
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StatementError {
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SwitchStatement {
    pub discriminant: Expression,
    pub cases: Vec<SwitchCase>,
    pub span: Span,
}

/// `test` is `None` for the `default` clause.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SwitchCase {
    pub test: Option<Expression>,
    pub consequent: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ForInit {
    Variable(VariableDeclaration),
    Expression(Expression),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
    pub span: Span,
}

/// Left side of `for-in` / `for-of`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ForHead {
    Variable(VariableDeclaration),
    Pattern(Pattern),
}

impl ForHead {
    pub fn span(&self) -> Span {
        match self {
            ForHead::Variable(decl) => decl.span,
            ForHead::Pattern(pattern) => pattern.span(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForInStatement {
    pub left: ForHead,
    pub right: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForOfStatement {
    pub left: ForHead,
    pub right: Expression,
    pub body: Box<Statement>,
    /// `for await (...)`
    pub is_await: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DoWhileStatement {
    pub body: Box<Statement>,
    pub test: Expression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TryStatement {
    pub block: BlockStatement,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<BlockStatement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatchClause {
    /// `None` for `catch { ... }`.
    pub param: Option<Pattern>,
    pub body: BlockStatement,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ThrowStatement {
    pub argument: Expression,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub argument: Option<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreakStatement {
    pub label: Option<Identifier>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContinueStatement {
    pub label: Option<Identifier>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabeledStatement {
    pub label: Identifier,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WithStatement {
    pub object: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarations: Vec<VariableDeclarator>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableDeclarator {
    pub id: Pattern,
    pub init: Option<Expression>,
    pub span: Span,
}

/// A string-literal statement at the start of a program or function body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub value: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionBody {
    pub directives: Vec<Directive>,
    pub statements: Vec<Statement>,
    /// Includes the braces.
    pub span: Span,
}

impl FunctionBody {
    pub fn has_use_strict(&self) -> bool {
        self.directives.iter().any(|d| d.value == "use strict")
    }
}

/// Function declarations, expressions and method values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Function {
    pub id: Option<Identifier>,
    pub params: Vec<Pattern>,
    pub body: FunctionBody,
    pub is_async: bool,
    pub is_generator: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Class {
    pub id: Option<Identifier>,
    pub super_class: Option<Box<Expression>>,
    pub body: Vec<ClassMember>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClassMember {
    Method(MethodDefinition),
    Property(PropertyDefinition),
    StaticBlock(StaticBlock),
}

impl ClassMember {
    pub fn span(&self) -> Span {
        match self {
            ClassMember::Method(m) => m.span,
            ClassMember::Property(p) => p.span,
            ClassMember::StaticBlock(b) => b.span,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MethodDefinition {
    pub key: PropertyKey,
    pub kind: MethodKind,
    pub value: Box<Function>,
    pub is_static: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyDefinition {
    pub key: PropertyKey,
    pub value: Option<Expression>,
    pub is_static: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StaticBlock {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportDeclaration {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: Literal,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ImportSpecifier {
    /// `import local from "m"`
    Default { local: Identifier, span: Span },
    /// `import * as local from "m"`
    Namespace { local: Identifier, span: Span },
    /// `import { imported as local } from "m"`
    Named {
        imported: Identifier,
        local: Identifier,
        span: Span,
    },
}

impl ImportSpecifier {
    pub fn local(&self) -> &Identifier {
        match self {
            ImportSpecifier::Default { local, .. }
            | ImportSpecifier::Namespace { local, .. }
            | ImportSpecifier::Named { local, .. } => local,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ImportSpecifier::Default { span, .. }
            | ImportSpecifier::Namespace { span, .. }
            | ImportSpecifier::Named { span, .. } => *span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportSpecifier {
    pub local: Identifier,
    pub exported: Identifier,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ExportDefaultValue {
    Function(Box<Function>),
    Class(Box<Class>),
    Expression(Expression),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ExportKind {
    /// `export { a, b as c } [from "m"]`
    Named {
        specifiers: Vec<ExportSpecifier>,
        source: Option<Literal>,
    },
    /// `export * [as ns] from "m"`
    All {
        exported: Option<Identifier>,
        source: Literal,
    },
    /// `export default ...`
    Default { value: ExportDefaultValue },
    /// `export var|let|const|function|class ...`
    Declaration { declaration: Box<Statement> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportDeclaration {
    pub kind: ExportKind,
    pub span: Span,
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Block(s) => s.span,
            Statement::Empty(s) => s.span,
            Statement::Debugger(s) => s.span,
            Statement::Expression(s) => s.span,
            Statement::If(s) => s.span,
            Statement::Switch(s) => s.span,
            Statement::For(s) => s.span,
            Statement::ForIn(s) => s.span,
            Statement::ForOf(s) => s.span,
            Statement::While(s) => s.span,
            Statement::DoWhile(s) => s.span,
            Statement::Try(s) => s.span,
            Statement::Throw(s) => s.span,
            Statement::Return(s) => s.span,
            Statement::Break(s) => s.span,
            Statement::Continue(s) => s.span,
            Statement::Labeled(s) => s.span,
            Statement::With(s) => s.span,
            Statement::Variable(s) => s.span,
            Statement::Function(s) => s.span,
            Statement::Class(s) => s.span,
            Statement::Import(s) => s.span,
            Statement::Export(s) => s.span,
            Statement::Error(s) => s.span,
        }
    }

    pub fn error(span: Span) -> Self {
        Statement::Error(StatementError { span })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Statement::Error(_))
    }

    /// Loop statements, the only valid targets of a labelled `continue`.
    pub fn is_iteration(&self) -> bool {
        matches!(
            self,
            Statement::For(_)
                | Statement::ForIn(_)
                | Statement::ForOf(_)
                | Statement::While(_)
                | Statement::DoWhile(_)
        )
    }
}
