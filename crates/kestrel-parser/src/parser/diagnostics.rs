//! Syntactic diagnostics recorded during a parse.

use kestrel_common::diagnostics::{format_message, get_message_template};
use kestrel_common::{Diagnostic, SourceLocation, Span};
use kestrel_scanner::LexError;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// A syntax error. Parsing continues past it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub code: u32,
    pub filename: Arc<str>,
}

/// A construct that parses but is suspicious or ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseWarning {
    pub message: String,
    pub span: Span,
    pub code: u32,
    pub filename: Arc<str>,
}

/// Fill the message template registered for `code`.
pub(crate) fn render(code: u32, args: &[&str]) -> String {
    get_message_template(code).map_or_else(
        || format!("Unknown diagnostic K{code}."),
        |template| format_message(template, args),
    )
}

impl ParseError {
    pub fn new(filename: &Arc<str>, span: Span, code: u32, args: &[&str]) -> Self {
        ParseError {
            message: render(code, args),
            span,
            code,
            filename: Arc::clone(filename),
        }
    }

    /// Lexical errors are reported alongside syntax errors.
    pub fn from_lex_error(filename: &Arc<str>, error: &LexError) -> Self {
        ParseError {
            message: error.message.clone(),
            span: error.span,
            code: error.code(),
            filename: Arc::clone(filename),
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.span.locate(&self.filename)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(
            Arc::clone(&self.filename),
            self.span,
            self.message.clone(),
            self.code,
        )
    }
}

impl ParseWarning {
    pub fn new(filename: &Arc<str>, span: Span, code: u32, args: &[&str]) -> Self {
        ParseWarning {
            message: render(code, args),
            span,
            code,
            filename: Arc::clone(filename),
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.span.locate(&self.filename)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::warning(
            Arc::clone(&self.filename),
            self.span,
            self.message.clone(),
            self.code,
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error K{}: {}", self.location(), self.code, self.message)
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: warning K{}: {}", self.location(), self.code, self.message)
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        error.to_diagnostic()
    }
}

impl From<&ParseWarning> for Diagnostic {
    fn from(warning: &ParseWarning) -> Self {
        warning.to_diagnostic()
    }
}
