//! Binding and assignment targets.

use super::expressions::{Expression, Identifier, MemberExpression, PropertyKey};
use kestrel_common::Span;
use serde::Serialize;

/// The left side of a declarator, a parameter, a catch binding, an
/// assignment or a `for-in`/`for-of` head.
///
/// `Member` only appears in assignment position, never in a declaration.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Pattern {
    Identifier(Identifier),
    Member(MemberExpression),
    Object(ObjectPattern),
    Array(ArrayPattern),
    /// A target with a default value: `a = 1` inside a pattern or parameter list.
    Assignment(AssignmentPattern),
    Rest(RestElement),
    Error(PatternError),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ObjectPattern {
    pub properties: Vec<PatternProperty>,
    pub rest: Option<Box<RestElement>>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatternProperty {
    pub key: PropertyKey,
    pub value: Pattern,
    pub shorthand: bool,
    pub span: Span,
}

/// `None` elements are elisions; a `Rest` element may only come last.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArrayPattern {
    pub elements: Vec<Option<Pattern>>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssignmentPattern {
    pub left: Box<Pattern>,
    pub right: Box<Expression>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RestElement {
    pub argument: Box<Pattern>,
    pub span: Span,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PatternError {
    pub span: Span,
}

impl Pattern {
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(p) => p.span,
            Pattern::Member(p) => p.span,
            Pattern::Object(p) => p.span,
            Pattern::Array(p) => p.span,
            Pattern::Assignment(p) => p.span,
            Pattern::Rest(p) => p.span,
            Pattern::Error(p) => p.span,
        }
    }

    pub fn error(span: Span) -> Self {
        Pattern::Error(PatternError { span })
    }

    /// Object or array destructuring.
    pub fn is_destructuring(&self) -> bool {
        matches!(self, Pattern::Object(_) | Pattern::Array(_))
    }

    /// Every identifier this pattern binds, in source order.
    pub fn bound_names(&self) -> Vec<&Identifier> {
        let mut names = Vec::new();
        self.collect_bound_names(&mut names);
        names
    }

    fn collect_bound_names<'a>(&'a self, out: &mut Vec<&'a Identifier>) {
        match self {
            Pattern::Identifier(id) => out.push(id),
            Pattern::Member(_) | Pattern::Error(_) => {}
            Pattern::Object(p) => {
                for prop in &p.properties {
                    prop.value.collect_bound_names(out);
                }
                if let Some(rest) = &p.rest {
                    rest.argument.collect_bound_names(out);
                }
            }
            Pattern::Array(p) => {
                for element in p.elements.iter().flatten() {
                    element.collect_bound_names(out);
                }
            }
            Pattern::Assignment(p) => p.left.collect_bound_names(out),
            Pattern::Rest(p) => p.argument.collect_bound_names(out),
        }
    }
}
