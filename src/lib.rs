//! kestrel: an ECMAScript lexer and error-tolerant parser.
//!
//! This crate re-exports the workspace crates under one roof:
//! - [`common`] - positions, spans and diagnostics
//! - [`scanner`] - the tokenizer
//! - [`parser`] - the token cursor, parser, syntax tree, printer and visitor
//!
//! ```
//! use kestrel::{ParserOptions, parse};
//!
//! let result = parse("a?.b ?? c", ParserOptions::default());
//! assert!(result.errors.is_empty());
//! assert_eq!(
//!     kestrel::parser::printer::to_sexpr(&result.program),
//!     "(program (?? (chain (?. a b)) c))"
//! );
//! ```

pub use kestrel_common as common;
pub use kestrel_parser as parser;
pub use kestrel_scanner as scanner;

pub use kestrel_common::{Diagnostic, DiagnosticCategory, Position, Span};
pub use kestrel_parser::{
    ExpressionParseResult, ParseError, ParseResult, ParseWarning, ParserOptions, parse,
    parse_expression, parse_tokens, parse_with_file_name,
};
pub use kestrel_scanner::{LexError, Token, tokenize};
