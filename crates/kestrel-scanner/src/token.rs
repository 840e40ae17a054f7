//! Scanned tokens and lexical errors.

use crate::syntax_kind::{SyntaxKind, TokenClass};
use bitflags::bitflags;
use kestrel_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use kestrel_common::{Diagnostic, Span};
use serde::Serialize;
use std::sync::Arc;

bitflags! {
    /// Facts recorded while scanning a token.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
    pub struct TokenFlags: u16 {
        /// A line terminator appears between the previous significant token
        /// and this one (in whitespace or inside a comment).
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// The literal or comment reached end of input before its terminator.
        const UNTERMINATED = 1 << 1;
        /// `0x` prefixed numeric literal.
        const HEX_SPECIFIER = 1 << 2;
        /// `0o` prefixed numeric literal.
        const OCTAL_SPECIFIER = 1 << 3;
        /// `0b` prefixed numeric literal.
        const BINARY_SPECIFIER = 1 << 4;
        /// Numeric literal with an exponent part.
        const SCIENTIFIC = 1 << 5;
        /// Numeric literal containing `_` separators.
        const CONTAINS_SEPARATOR = 1 << 6;
        /// String or template literal that contained at least one escape.
        const CONTAINS_ESCAPE = 1 << 7;
    }
}

/// A classified lexeme.
///
/// `text` is the decoded value for string and template tokens (escapes
/// resolved, delimiters stripped) and the verbatim lexeme for everything
/// else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: String,
    pub span: Span,
    pub flags: TokenFlags,
}

impl Token {
    pub fn new(kind: SyntaxKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
            flags: TokenFlags::empty(),
        }
    }

    #[inline]
    pub fn is(&self, kind: SyntaxKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn class(&self) -> TokenClass {
        self.kind.class()
    }

    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == SyntaxKind::EndOfFileToken
    }

    #[inline]
    pub fn is_invalid(&self) -> bool {
        self.kind == SyntaxKind::Unknown
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// An identifier token whose text is `word` (for contextual keywords
    /// such as `of`, `get`, `async`).
    #[inline]
    pub fn is_contextual(&self, word: &str) -> bool {
        self.kind == SyntaxKind::Identifier && self.text == word
    }
}

/// Categories of lexical error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedComment,
    UnterminatedTemplate,
    UnterminatedRegex,
    InvalidEscape,
    InvalidNumber,
    UnexpectedCharacter,
}

impl LexErrorKind {
    pub fn code(self) -> u32 {
        match self {
            LexErrorKind::UnterminatedString => diagnostic_codes::UNTERMINATED_STRING_LITERAL,
            LexErrorKind::UnterminatedComment => diagnostic_codes::UNTERMINATED_COMMENT,
            LexErrorKind::UnterminatedTemplate => diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
            LexErrorKind::UnterminatedRegex => diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION,
            LexErrorKind::InvalidEscape => diagnostic_codes::INVALID_ESCAPE_SEQUENCE,
            LexErrorKind::InvalidNumber => diagnostic_codes::INVALID_NUMERIC_LITERAL,
            LexErrorKind::UnexpectedCharacter => diagnostic_codes::UNEXPECTED_CHARACTER,
        }
    }

    fn template(self) -> &'static str {
        match self {
            LexErrorKind::UnterminatedString => diagnostic_messages::UNTERMINATED_STRING_LITERAL,
            LexErrorKind::UnterminatedComment => diagnostic_messages::UNTERMINATED_COMMENT,
            LexErrorKind::UnterminatedTemplate => {
                diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL
            }
            LexErrorKind::UnterminatedRegex => diagnostic_messages::UNTERMINATED_REGULAR_EXPRESSION,
            LexErrorKind::InvalidEscape => diagnostic_messages::INVALID_ESCAPE_SEQUENCE,
            LexErrorKind::InvalidNumber => diagnostic_messages::INVALID_NUMERIC_LITERAL,
            LexErrorKind::UnexpectedCharacter => diagnostic_messages::UNEXPECTED_CHARACTER,
        }
    }
}

/// A lexical diagnostic. The offending text is always also present in the
/// token stream as an `Unknown` token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub message: String,
    pub span: Span,
}

impl LexError {
    /// Build an error, filling the kind's message template with `detail`.
    pub fn new(kind: LexErrorKind, span: Span, detail: &str) -> Self {
        LexError {
            kind,
            message: format_message(kind.template(), &[detail]),
            span,
        }
    }

    pub fn code(&self) -> u32 {
        self.kind.code()
    }

    pub fn to_diagnostic(&self, file: &Arc<str>) -> Diagnostic {
        Diagnostic::error(Arc::clone(file), self.span, self.message.clone(), self.code())
    }
}
