//! Diagnostic types and message lookup for the scanner and parser.
//!
//! Message templates and codes live in `data.rs`.

use crate::position::Span;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scanner or parser diagnostic, ready for reporting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: Arc<str>,
    pub span: Span,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(file: Arc<str>, span: Span, message: String, code: u32) -> Self {
        Self {
            file,
            span,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub fn warning(file: Arc<str>, span: Span, message: String, code: u32) -> Self {
        Self {
            file,
            span,
            message_text: message,
            category: DiagnosticCategory::Warning,
            code,
        }
    }

    /// Byte offset of the first character covered.
    pub fn start(&self) -> u32 {
        self.span.start.offset
    }

    /// Length of the covered text in bytes.
    pub fn length(&self) -> u32 {
        self.span.len()
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} - {} K{}: {}",
            self.file, self.span.start, self.category, self.code, self.message_text
        )
    }
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn format_message_fills_placeholders_in_order() {
        let text = format_message("'{0}' expected, found '{1}'.", &[")", "{"]);
        assert_eq!(text, "')' expected, found '{'.");
    }

    #[test]
    fn every_code_has_exactly_one_template() {
        for message in DIAGNOSTIC_MESSAGES {
            let count = DIAGNOSTIC_MESSAGES
                .iter()
                .filter(|m| m.code == message.code)
                .count();
            assert_eq!(count, 1, "code {} is registered {count} times", message.code);
        }
    }

    #[test]
    fn warning_codes_are_warnings() {
        assert_eq!(
            get_diagnostic_category(diagnostic_codes::TRAILING_COMMA),
            Some(DiagnosticCategory::Warning)
        );
        assert_eq!(
            get_diagnostic_category(diagnostic_codes::SEMICOLON_EXPECTED),
            Some(DiagnosticCategory::Error)
        );
        assert_eq!(get_message_template(9999), None);
    }

    #[test]
    fn diagnostic_serializes_with_span() {
        let span = Span::new(Position::new(1, 5, 4), Position::new(1, 6, 5));
        let diag = Diagnostic::error(
            Arc::from("a.js"),
            span,
            diagnostic_messages::EXPRESSION_EXPECTED.to_string(),
            diagnostic_codes::EXPRESSION_EXPECTED,
        );
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["code"], 1102);
        assert_eq!(json["span"]["start"]["column"], 5);
        assert_eq!(diag.length(), 1);
        assert_eq!(diag.to_string(), "a.js:1:5 - error K1102: Expression expected.");
    }
}
