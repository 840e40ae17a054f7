//! ECMAScript parser for the kestrel front end.
//!
//! Source text is scanned by `kestrel-scanner` into a token buffer, then
//! parsed by a recursive-descent parser into an owned syntax tree
//! ([`ast::Program`]). Parsing never fails: malformed input yields a tree
//! with error nodes plus diagnostics.
//!
//! ```
//! use kestrel_parser::{ParserOptions, parse};
//!
//! let result = parse("let x = 1 + 2 * 3;", ParserOptions::default());
//! assert!(result.errors.is_empty());
//! assert_eq!(result.program.body.len(), 1);
//! ```

pub mod ast;
pub mod cursor;
pub mod parser;
pub mod printer;
pub mod visit;

pub use parser::{ContextFlags, ParseError, ParseWarning, ParserOptions, ParserState};

use ast::{Expression, Program};
use kestrel_common::diagnostics::diagnostic_codes;
use kestrel_scanner::{LexError, Token};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// File name used when the caller does not supply one.
pub const DEFAULT_FILE_NAME: &str = "<input>";

/// Everything a parse produces.
#[derive(Clone, Debug, Serialize)]
pub struct ParseResult {
    pub program: Program,
    /// Syntax errors and lexical errors, ordered by position.
    pub errors: Vec<ParseError>,
    pub warnings: Vec<ParseWarning>,
    /// The lexical errors alone, as the scanner reported them.
    pub lex_errors: Vec<LexError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of parsing a lone expression.
#[derive(Clone, Debug, Serialize)]
pub struct ExpressionParseResult {
    pub expression: Expression,
    pub errors: Vec<ParseError>,
    pub warnings: Vec<ParseWarning>,
    pub lex_errors: Vec<LexError>,
}

/// Parse `source` as a script or module (per `options`).
pub fn parse(source: &str, options: ParserOptions) -> ParseResult {
    parse_with_file_name(DEFAULT_FILE_NAME, source, options)
}

/// Parse `source`, attributing diagnostics to `file_name`.
pub fn parse_with_file_name(file_name: &str, source: &str, options: ParserOptions) -> ParseResult {
    debug!(file = file_name, bytes = source.len(), module = options.module_mode, "parse");
    let mut state = ParserState::from_source(file_name, source, options);
    let program = state.parse_program();
    let (mut errors, warnings) = state.take_diagnostics();
    let lex_errors = state.take_lex_errors();
    let file: Arc<str> = Arc::clone(&program.file_name);
    merge_lex_errors(&file, &mut errors, &lex_errors);
    let result = ParseResult {
        program,
        errors,
        warnings,
        lex_errors,
    };
    debug!(
        file = file_name,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "parse finished"
    );
    result
}

/// Parse an already scanned token buffer. Lexical errors are the caller's
/// concern; `lex_errors` in the result is empty. Without the source text a
/// `/` the scanner read as division stays division.
pub fn parse_tokens(file_name: &str, tokens: Vec<Token>, options: ParserOptions) -> ParseResult {
    let mut state = ParserState::new(file_name, tokens, options);
    let program = state.parse_program();
    let (errors, warnings) = state.take_diagnostics();
    ParseResult {
        program,
        errors,
        warnings,
        lex_errors: Vec::new(),
    }
}

/// Parse `source` as a single expression. Tokens left over after the
/// expression are reported.
pub fn parse_expression(source: &str, options: ParserOptions) -> ExpressionParseResult {
    let mut state = ParserState::from_source(DEFAULT_FILE_NAME, source, options);
    let expression = state.parse_expression_allow_in();
    if !state.is_eof() && !state.is_token(kestrel_scanner::SyntaxKind::Unknown) {
        let text = state.current().text.clone();
        state.parse_error_at_current_token(diagnostic_codes::UNEXPECTED_TOKEN, &[&text]);
    }
    let (mut errors, warnings) = state.take_diagnostics();
    let lex_errors = state.take_lex_errors();
    let file: Arc<str> = Arc::from(DEFAULT_FILE_NAME);
    merge_lex_errors(&file, &mut errors, &lex_errors);
    ExpressionParseResult {
        expression,
        errors,
        warnings,
        lex_errors,
    }
}

fn merge_lex_errors(file: &Arc<str>, errors: &mut Vec<ParseError>, lex_errors: &[LexError]) {
    if lex_errors.is_empty() {
        return;
    }
    errors.extend(lex_errors.iter().map(|error| ParseError::from_lex_error(file, error)));
    errors.sort_by_key(|error| error.span.start.offset);
}
