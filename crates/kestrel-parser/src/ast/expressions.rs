//! Expression nodes.

use super::operators::{
    AssignmentOperator, BinaryOperator, LogicalOperator, UnaryOperator, UpdateOperator,
};
use super::patterns::Pattern;
use super::statements::{Class, Function, FunctionBody};
use kestrel_common::Span;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier(Identifier),
    Literal(Literal),
    Template(TemplateLiteral),
    TaggedTemplate(TaggedTemplateExpression),
    This(ThisExpression),
    Super(SuperExpression),
    Array(ArrayExpression),
    Object(ObjectExpression),
    Function(Box<Function>),
    Arrow(Box<ArrowFunction>),
    Class(Box<Class>),
    Unary(UnaryExpression),
    Update(UpdateExpression),
    Binary(BinaryExpression),
    Logical(LogicalExpression),
    Assignment(AssignmentExpression),
    Conditional(ConditionalExpression),
    Call(CallExpression),
    New(NewExpression),
    Member(MemberExpression),
    OptionalChain(OptionalChain),
    Sequence(SequenceExpression),
    Spread(SpreadElement),
    Yield(YieldExpression),
    Await(AwaitExpression),
    MetaProperty(MetaProperty),
    Import(ImportExpression),
    PrivateName(PrivateName),
    /// Placeholder for text that could not be parsed as an expression.
    Error(ErrorNode),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Identifier {
            name: name.into(),
            span,
        }
    }
}

/// `#name` inside a class body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrivateName {
    /// The name without the leading `#`.
    pub name: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum LiteralValue {
    String(String),
    Number(f64),
    /// Digits as written, without the trailing `n`.
    BigInt(String),
    Boolean(bool),
    Null,
    Undefined,
    RegExp { pattern: String, flags: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateElement {
    /// Value with escapes resolved.
    pub cooked: String,
    pub tail: bool,
    pub span: Span,
}

/// `quasis.len() == expressions.len() + 1` always holds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateLiteral {
    pub quasis: Vec<TemplateElement>,
    pub expressions: Vec<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaggedTemplateExpression {
    pub tag: Box<Expression>,
    pub quasi: TemplateLiteral,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThisExpression {
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SuperExpression {
    pub span: Span,
}

/// `None` elements are holes (`[a, , b]`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrayExpression {
    pub elements: Vec<Option<Expression>>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectExpression {
    pub properties: Vec<ObjectMember>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ObjectMember {
    Property(Property),
    Spread(SpreadElement),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expression,
    pub kind: PropertyKind,
    /// `{ f() {} }`
    pub method: bool,
    /// `{ a }` or, in a destructuring target, `{ a = 1 }`.
    pub shorthand: bool,
    pub span: Span,
}

/// The name part of a property, method or class member.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum PropertyKey {
    Identifier(Identifier),
    PrivateName(PrivateName),
    Literal(Literal),
    Computed(ComputedKey),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComputedKey {
    pub expression: Box<Expression>,
    /// Includes the brackets.
    pub span: Span,
}

impl PropertyKey {
    pub fn span(&self) -> Span {
        match self {
            PropertyKey::Identifier(id) => id.span,
            PropertyKey::PrivateName(name) => name.span,
            PropertyKey::Literal(lit) => lit.span,
            PropertyKey::Computed(key) => key.span,
        }
    }

    /// The statically known name: identifiers and string/number literals.
    pub fn static_name(&self) -> Option<String> {
        match self {
            PropertyKey::Identifier(id) => Some(id.name.clone()),
            PropertyKey::Literal(Literal {
                value: LiteralValue::String(s),
                ..
            }) => Some(s.clone()),
            PropertyKey::Literal(Literal {
                value: LiteralValue::Number(n),
                ..
            }) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "body")]
pub enum ArrowBody {
    Expression(Box<Expression>),
    Block(FunctionBody),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrowFunction {
    pub params: Vec<Pattern>,
    pub body: ArrowBody,
    pub is_async: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnaryExpression {
    pub operator: UnaryOperator,
    pub argument: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateExpression {
    pub operator: UpdateOperator,
    pub prefix: bool,
    pub argument: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BinaryExpression {
    pub operator: BinaryOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogicalExpression {
    pub operator: LogicalOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssignmentExpression {
    pub operator: AssignmentOperator,
    pub target: Box<Pattern>,
    pub value: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConditionalExpression {
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    /// `f?.()`
    pub optional: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum MemberProperty {
    Identifier(Identifier),
    PrivateName(PrivateName),
    Computed(Box<Expression>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: MemberProperty,
    /// `a?.b`
    pub optional: bool,
    pub span: Span,
}

impl MemberExpression {
    pub fn is_computed(&self) -> bool {
        matches!(self.property, MemberProperty::Computed(_))
    }
}

/// The outermost node of a chain containing at least one `?.`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OptionalChain {
    pub expression: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SequenceExpression {
    pub expressions: Vec<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpreadElement {
    pub argument: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YieldExpression {
    pub argument: Option<Box<Expression>>,
    /// `yield*`
    pub delegate: bool,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AwaitExpression {
    pub argument: Box<Expression>,
    pub span: Span,
}

/// `new.target` or `import.meta`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetaProperty {
    pub meta: Identifier,
    pub property: Identifier,
    pub span: Span,
}

/// Dynamic `import(source)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImportExpression {
    pub source: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorNode {
    pub span: Span,
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(e) => e.span,
            Expression::Literal(e) => e.span,
            Expression::Template(e) => e.span,
            Expression::TaggedTemplate(e) => e.span,
            Expression::This(e) => e.span,
            Expression::Super(e) => e.span,
            Expression::Array(e) => e.span,
            Expression::Object(e) => e.span,
            Expression::Function(e) => e.span,
            Expression::Arrow(e) => e.span,
            Expression::Class(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Update(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Logical(e) => e.span,
            Expression::Assignment(e) => e.span,
            Expression::Conditional(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::New(e) => e.span,
            Expression::Member(e) => e.span,
            Expression::OptionalChain(e) => e.span,
            Expression::Sequence(e) => e.span,
            Expression::Spread(e) => e.span,
            Expression::Yield(e) => e.span,
            Expression::Await(e) => e.span,
            Expression::MetaProperty(e) => e.span,
            Expression::Import(e) => e.span,
            Expression::PrivateName(e) => e.span,
            Expression::Error(e) => e.span,
        }
    }

    /// Replace the node's span. Used to widen a parenthesized expression to
    /// cover its parentheses.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        let slot = match &mut self {
            Expression::Identifier(e) => &mut e.span,
            Expression::Literal(e) => &mut e.span,
            Expression::Template(e) => &mut e.span,
            Expression::TaggedTemplate(e) => &mut e.span,
            Expression::This(e) => &mut e.span,
            Expression::Super(e) => &mut e.span,
            Expression::Array(e) => &mut e.span,
            Expression::Object(e) => &mut e.span,
            Expression::Function(e) => &mut e.span,
            Expression::Arrow(e) => &mut e.span,
            Expression::Class(e) => &mut e.span,
            Expression::Unary(e) => &mut e.span,
            Expression::Update(e) => &mut e.span,
            Expression::Binary(e) => &mut e.span,
            Expression::Logical(e) => &mut e.span,
            Expression::Assignment(e) => &mut e.span,
            Expression::Conditional(e) => &mut e.span,
            Expression::Call(e) => &mut e.span,
            Expression::New(e) => &mut e.span,
            Expression::Member(e) => &mut e.span,
            Expression::OptionalChain(e) => &mut e.span,
            Expression::Sequence(e) => &mut e.span,
            Expression::Spread(e) => &mut e.span,
            Expression::Yield(e) => &mut e.span,
            Expression::Await(e) => &mut e.span,
            Expression::MetaProperty(e) => &mut e.span,
            Expression::Import(e) => &mut e.span,
            Expression::PrivateName(e) => &mut e.span,
            Expression::Error(e) => &mut e.span,
        };
        *slot = span;
        self
    }

    pub fn error(span: Span) -> Self {
        Expression::Error(ErrorNode { span })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Expression::Error(_))
    }

    /// The string value when this is a string literal.
    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Expression::Literal(Literal {
                value: LiteralValue::String(s),
                ..
            }) => Some(s),
            _ => None,
        }
    }
}
