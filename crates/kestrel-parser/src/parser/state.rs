//! Parser state: token access, context flags, diagnostics and recovery
//! helpers shared by the statement and expression parsers.

use super::diagnostics::{ParseError, ParseWarning};
use super::options::ParserOptions;
use crate::cursor::TokenCursor;
use bitflags::bitflags;
use kestrel_common::diagnostics::diagnostic_codes;
use kestrel_common::limits::{MAX_DIAGNOSTICS_PER_FILE, MAX_PARSER_RECURSION_DEPTH};
use kestrel_common::{Position, Span};
use kestrel_scanner::syntax_kind::describe;
use kestrel_scanner::{LexError, SyntaxKind, Token, tokenize};
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::trace;

bitflags! {
    /// Syntactic context of the construct being parsed.
    ///
    /// Saved before and restored after every construct that changes it, so
    /// a nested function body never leaks its context to the caller.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ContextFlags: u16 {
        /// Inside any function body, arrows included (`return` is legal).
        const IN_FUNCTION = 1 << 0;
        const IN_LOOP = 1 << 1;
        const IN_SWITCH = 1 << 2;
        const IN_TRY = 1 << 3;
        const IN_CLASS = 1 << 4;
        const IN_WITH = 1 << 5;
        const IN_TEMPLATE = 1 << 6;
        const IN_GENERATOR = 1 << 7;
        const IN_ASYNC = 1 << 8;
        const STRICT = 1 << 9;
        const MODULE = 1 << 10;
        /// `in` is not a binary operator here (the init clause of `for`).
        const NO_IN = 1 << 11;
        const IN_STATIC_BLOCK = 1 << 12;
        /// Inside a non-arrow function, where `new.target` is legal.
        const ALLOW_NEW_TARGET = 1 << 13;
    }
}

/// Context cleared on entry to any function body.
pub(crate) const FUNCTION_BOUNDARY: ContextFlags = ContextFlags::IN_LOOP
    .union(ContextFlags::IN_SWITCH)
    .union(ContextFlags::IN_TRY)
    .union(ContextFlags::IN_WITH)
    .union(ContextFlags::IN_TEMPLATE)
    .union(ContextFlags::IN_GENERATOR)
    .union(ContextFlags::IN_ASYNC)
    .union(ContextFlags::NO_IN)
    .union(ContextFlags::IN_STATIC_BLOCK);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LabelKind {
    /// Labels a loop; a valid `continue` target.
    Loop,
    Other,
}

pub struct ParserState {
    pub(crate) cursor: TokenCursor,
    pub(crate) options: ParserOptions,
    pub(crate) context_flags: ContextFlags,
    /// One map per function body; labels never cross a function boundary.
    pub(crate) label_scopes: Vec<FxHashMap<String, LabelKind>>,
    pub(crate) file_name: Arc<str>,
    pub(crate) errors: Vec<ParseError>,
    pub(crate) warnings: Vec<ParseWarning>,
    pub(crate) recursion_depth: u32,
    /// Start offset of the last recorded error, to suppress cascades.
    pub(crate) last_error_pos: Option<u32>,
    /// Position of the newest empty error placeholder. Enclosing nodes
    /// finished before the next token is consumed extend to cover it.
    placeholder_end: Option<Position>,
    diagnostics_capped: bool,
    /// Text the tokens were scanned from. Without it a misread `/` cannot
    /// be re-scanned.
    source: Option<Arc<str>>,
    lex_errors: Vec<LexError>,
}

impl ParserState {
    pub fn new(file_name: impl Into<Arc<str>>, tokens: Vec<Token>, options: ParserOptions) -> Self {
        let mut context_flags = ContextFlags::empty();
        if options.is_strict() {
            context_flags |= ContextFlags::STRICT;
        }
        if options.module_mode {
            context_flags |= ContextFlags::MODULE;
        }
        ParserState {
            cursor: TokenCursor::new(tokens),
            options,
            context_flags,
            label_scopes: vec![FxHashMap::default()],
            file_name: file_name.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
            recursion_depth: 0,
            last_error_pos: None,
            placeholder_end: None,
            diagnostics_capped: false,
            source: None,
            lex_errors: Vec::new(),
        }
    }

    /// Scan `source` and prepare to parse it. The parser keeps the text so
    /// it can correct the scanner's regex-or-division guesses.
    pub fn from_source(file_name: impl Into<Arc<str>>, source: &str, options: ParserOptions) -> Self {
        let (tokens, lex_errors) = tokenize(source);
        let mut state = ParserState::new(file_name, tokens, options);
        state.source = Some(Arc::from(source));
        state.lex_errors = lex_errors;
        state
    }

    /// Lexical errors of the source, after any re-scans.
    pub fn lex_errors(&self) -> &[LexError] {
        &self.lex_errors
    }

    pub(crate) fn take_lex_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.lex_errors)
    }

    /// Re-scan the current slash as a regular expression. Returns whether
    /// the buffer changed.
    pub(crate) fn rescan_slash_as_regex(&mut self) -> bool {
        let Some(source) = self.source.as_deref() else {
            return false;
        };
        let Some(rescan) = self.cursor.rescan_as_regex(source) else {
            return false;
        };
        let replaced = rescan.replaced;
        self.lex_errors
            .retain(|error| !replaced.contains(&error.span.start.offset));
        self.lex_errors.extend(rescan.errors);
        self.lex_errors.sort_by_key(|error| error.span.start.offset);
        true
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub(crate) fn take_diagnostics(&mut self) -> (Vec<ParseError>, Vec<ParseWarning>) {
        (
            std::mem::take(&mut self.errors),
            std::mem::take(&mut self.warnings),
        )
    }

    // =========================================================================
    // Token access
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.cursor.current().kind
    }

    #[inline]
    pub(crate) fn current(&self) -> &Token {
        self.cursor.current()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.token() == kind
    }

    /// Identifier token spelled `word` (`of`, `get`, `async`, ...).
    #[inline]
    pub(crate) fn is_contextual(&self, word: &str) -> bool {
        self.current().is_contextual(word)
    }

    #[inline]
    pub(crate) fn peek_kind(&self, n: usize) -> SyntaxKind {
        self.cursor.peek(n).kind
    }

    #[inline]
    pub(crate) fn peek(&self, n: usize) -> &Token {
        self.cursor.peek(n)
    }

    #[inline]
    pub(crate) fn next_token(&mut self) {
        self.cursor.advance();
    }

    /// Consume the current token and return it.
    pub(crate) fn bump(&mut self) -> Token {
        let token = self.cursor.current().clone();
        self.cursor.advance();
        token
    }

    #[inline]
    pub(crate) fn token_start(&self) -> Position {
        self.cursor.current().span.start
    }

    #[inline]
    pub(crate) fn token_span(&self) -> Span {
        self.cursor.current().span
    }

    #[inline]
    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.cursor.current().has_preceding_line_break()
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.is_token(SyntaxKind::EndOfFileToken)
    }

    /// Span from `start` to the end of the last consumed token. Empty at
    /// `start` when nothing was consumed.
    pub(crate) fn span_from(&self, start: Position) -> Span {
        let mut end = self.cursor.previous_end();
        if let Some(mark) = self.placeholder_end {
            if mark.offset > end.offset {
                end = mark;
            }
        }
        if end.offset < start.offset {
            Span::empty_at(start)
        } else {
            Span::new(start, end)
        }
    }

    /// Empty span at the current token for a node that is missing.
    pub(crate) fn placeholder_span(&mut self) -> Span {
        let pos = self.token_start();
        self.placeholder_end = Some(pos);
        Span::empty_at(pos)
    }

    /// Run `f` and rewind the cursor afterwards, discarding any diagnostics
    /// it produced.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let checkpoint = self.cursor.checkpoint();
        let saved_flags = self.context_flags;
        let error_count = self.errors.len();
        let warning_count = self.warnings.len();
        let last_error_pos = self.last_error_pos;
        let placeholder_end = self.placeholder_end;
        let result = f(self);
        self.cursor.rewind(checkpoint);
        self.context_flags = saved_flags;
        self.errors.truncate(error_count);
        self.warnings.truncate(warning_count);
        self.last_error_pos = last_error_pos;
        self.placeholder_end = placeholder_end;
        result
    }

    // =========================================================================
    // Context
    // =========================================================================

    #[inline]
    pub(crate) fn in_context(&self, flags: ContextFlags) -> bool {
        self.context_flags.intersects(flags)
    }

    #[inline]
    pub(crate) fn is_strict(&self) -> bool {
        self.in_context(ContextFlags::STRICT)
    }

    #[inline]
    pub(crate) fn is_module(&self) -> bool {
        self.in_context(ContextFlags::MODULE)
    }

    /// Run `f` with `add` set and `remove` cleared, restoring the previous
    /// flags afterwards.
    pub(crate) fn with_context<T>(
        &mut self,
        add: ContextFlags,
        remove: ContextFlags,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = self.context_flags;
        self.context_flags = (self.context_flags - remove) | add;
        let result = f(self);
        self.context_flags = saved;
        result
    }

    /// Run `f` in a fresh label scope.
    pub(crate) fn with_label_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.label_scopes.push(FxHashMap::default());
        let result = f(self);
        self.label_scopes.pop();
        result
    }

    pub(crate) fn find_label(&self, name: &str) -> Option<LabelKind> {
        self.label_scopes
            .last()
            .and_then(|scope| scope.get(name).copied())
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Record an error unless one was already recorded at the same offset.
    pub(crate) fn parse_error_at(&mut self, span: Span, code: u32, args: &[&str]) {
        if self.last_error_pos == Some(span.start.offset) {
            return;
        }
        if self.errors.len() >= MAX_DIAGNOSTICS_PER_FILE {
            if !self.diagnostics_capped {
                self.diagnostics_capped = true;
                self.errors.push(ParseError::new(
                    &self.file_name,
                    span,
                    diagnostic_codes::TOO_MANY_DIAGNOSTICS,
                    &[],
                ));
            }
            return;
        }
        trace!(pos = span.start.offset, code, "parse_error");
        self.last_error_pos = Some(span.start.offset);
        self.errors
            .push(ParseError::new(&self.file_name, span, code, args));
    }

    pub(crate) fn parse_error_at_current_token(&mut self, code: u32, args: &[&str]) {
        self.parse_error_at(self.token_span(), code, args);
    }

    pub(crate) fn parse_warning_at(&mut self, span: Span, code: u32, args: &[&str]) {
        if self.warnings.len() >= MAX_DIAGNOSTICS_PER_FILE {
            return;
        }
        self.warnings
            .push(ParseWarning::new(&self.file_name, span, code, args));
    }

    /// Report `what` as disabled when `enabled` is false.
    pub(crate) fn require_feature(&mut self, enabled: bool, what: &str, span: Span) {
        if !enabled {
            self.parse_error_at(span, diagnostic_codes::FEATURE_DISABLED, &[what]);
        }
    }

    /// `Expression expected.`, or nothing when the current token is an
    /// invalid lexeme the scanner already reported.
    pub(crate) fn report_expression_expected(&mut self) {
        if self.is_token(SyntaxKind::Unknown) {
            return;
        }
        if self.is_eof() {
            self.parse_error_at_current_token(diagnostic_codes::UNEXPECTED_END_OF_INPUT, &[]);
        } else {
            self.parse_error_at_current_token(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
        }
    }

    // =========================================================================
    // Expectations
    // =========================================================================

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or record `'{kind}' expected.` and carry on as though
    /// it had been there. Nothing is consumed on failure.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        if self.is_eof() {
            self.parse_error_at_current_token(diagnostic_codes::UNEXPECTED_END_OF_INPUT, &[]);
        } else {
            self.parse_error_at_current_token(diagnostic_codes::TOKEN_EXPECTED, &[describe(kind)]);
        }
        false
    }

    /// Automatic semicolon insertion applies: `;`, `}`, end of input, or a
    /// line break before the current token.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.has_preceding_line_break()
    }

    /// Terminate a statement: consume `;`, accept an inserted one, or
    /// record `';' expected.` and continue as if it were present.
    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.can_parse_semicolon() {
            return true;
        }
        if !self.is_token(SyntaxKind::Unknown) {
            self.parse_error_at_current_token(diagnostic_codes::SEMICOLON_EXPECTED, &[]);
        }
        false
    }

    // =========================================================================
    // Recursion and recovery
    // =========================================================================

    /// Returns false (after reporting once) when nesting is too deep.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            self.parse_error_at_current_token(diagnostic_codes::MAX_NESTING_DEPTH_EXCEEDED, &[]);
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    /// Tokens that begin a statement and are safe places to resume.
    pub(crate) fn is_statement_start(&self) -> bool {
        matches!(
            self.token(),
            SyntaxKind::VarKeyword
                | SyntaxKind::LetKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::IfKeyword
                | SyntaxKind::ForKeyword
                | SyntaxKind::WhileKeyword
                | SyntaxKind::DoKeyword
                | SyntaxKind::SwitchKeyword
                | SyntaxKind::TryKeyword
                | SyntaxKind::ThrowKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::BreakKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::ExportKeyword
                | SyntaxKind::WithKeyword
                | SyntaxKind::DebuggerKeyword
        )
    }

    /// Skip to the next statement boundary: just past a `;`, or at a `}`,
    /// end of input, or a statement keyword that starts a new line. Always
    /// consumes at least one token unless already at a boundary.
    pub(crate) fn resync_after_error(&mut self) {
        trace!(pos = self.token_start().offset, "resync_after_error");
        let mut first = true;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken => return,
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    return;
                }
                _ if !first
                    && self.is_statement_start()
                    && self.has_preceding_line_break() =>
                {
                    return;
                }
                _ => {}
            }
            first = false;
            self.next_token();
        }
    }
}
