//! ECMAScript scanner/tokenizer for the kestrel front end.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token kinds and their classification (`TokenClass`)
//! - `Token`, `TokenFlags` - Scanned tokens with spans and scan-time flags
//! - `Scanner` - Single-pass tokenizer state machine
//! - `LexError` - Lexical diagnostics

pub mod char_codes;

pub mod syntax_kind;
pub use syntax_kind::{
    LiteralKind, OperatorClass, SyntaxKind, TokenClass, keyword_to_text, punctuation_to_text,
    text_to_keyword,
};

pub mod token;
pub use token::{LexError, LexErrorKind, Token, TokenFlags};

pub mod scanner;
pub use scanner::{ScanState, Scanner, escape_string_literal, tokenize};
