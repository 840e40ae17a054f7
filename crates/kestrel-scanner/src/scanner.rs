//! The scanner: a single left-to-right pass over the source text.
//!
//! `Scanner` produces one `Token` per call to [`Scanner::scan_token`] and ends
//! with exactly one `EndOfFileToken`. Malformed lexemes never stop the scan:
//! they come out as `SyntaxKind::Unknown` tokens and a matching `LexError`
//! is recorded.
//!
//! Two pieces of state make the scan context sensitive:
//! - the last significant token decides whether `/` starts a regular
//!   expression or is a division operator;
//! - a stack of brace depths tracks open `${` substitutions, so the `}` that
//!   closes a substitution resumes template scanning.
//!
//! The first guess about `/` can be wrong after `)` or `}`. A parser that
//! knows better restarts the scan with [`Scanner::resume_at`], feeding it
//! the brace state replayed with [`ScanState::apply`].

use crate::char_codes::{
    LINE_SEPARATOR, PARAGRAPH_SEPARATOR, is_digit_in_radix, is_identifier_part,
    is_identifier_start, is_line_break, is_white_space_single_line,
};
use crate::syntax_kind::{PUNCTUATORS, SyntaxKind, text_to_keyword};
use crate::token::{LexError, LexErrorKind, Token, TokenFlags};
use kestrel_common::limits::{
    INITIAL_TOKEN_CAPACITY_DIVISOR, MAX_INITIAL_TOKEN_CAPACITY, MAX_SOURCE_OFFSET,
};
use kestrel_common::{Position, Span};
use tracing::debug;

/// Brace and template nesting carried from one token to the next.
///
/// It is a function of the token sequence alone, so replaying tokens with
/// [`ScanState::apply`] reconstructs the state a scan had at any boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanState {
    brace_depth: u32,
    /// Brace depth at each open `${`.
    template_stack: Vec<u32>,
}

impl ScanState {
    /// Account for `token` the way the scanner did when producing it.
    pub fn apply(&mut self, token: &Token) {
        match token.kind {
            SyntaxKind::OpenBraceToken => self.brace_depth += 1,
            SyntaxKind::CloseBraceToken => {
                self.brace_depth = self.brace_depth.saturating_sub(1);
            }
            SyntaxKind::TemplateHead => self.template_stack.push(self.brace_depth),
            // The closing `}` popped the substitution and the new `${`
            // pushed it again.
            SyntaxKind::TemplateMiddle => {}
            SyntaxKind::TemplateTail => {
                self.template_stack.pop();
            }
            _ => {}
        }
    }
}

pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    column: u32,
    /// Emit `WhitespaceTrivia` tokens instead of skipping whitespace.
    emit_whitespace: bool,
    state: ScanState,
    last_significant: Option<SyntaxKind>,
    pending_line_break: bool,
    errors: Vec<LexError>,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            pos: 0,
            line: 1,
            column: 1,
            emit_whitespace: false,
            state: ScanState::default(),
            last_significant: None,
            pending_line_break: false,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Emit whitespace runs as `WhitespaceTrivia` tokens.
    #[must_use]
    pub fn with_trivia(mut self, emit_whitespace: bool) -> Self {
        self.emit_whitespace = emit_whitespace;
        self
    }

    /// Rewind to the start of the source, discarding recorded errors.
    pub fn reset(&mut self) {
        let emit_whitespace = self.emit_whitespace;
        *self = Scanner::new(self.source);
        self.emit_whitespace = emit_whitespace;
    }

    /// A scanner positioned at `start` inside `source`, with the nesting
    /// `state` a full scan had there. `None` when `start` is not a character
    /// boundary of `source`.
    pub fn resume_at(source: &'a str, start: Position, state: ScanState) -> Option<Self> {
        let pos = usize::try_from(start.offset).ok()?;
        if !source.is_char_boundary(pos) {
            return None;
        }
        let mut scanner = Scanner::new(source);
        scanner.pos = pos;
        scanner.line = start.line;
        scanner.column = start.column;
        scanner.state = state;
        Some(scanner)
    }

    /// Scan a regular expression literal starting at the current `/`,
    /// whatever the previous token was. Anything else scans as usual.
    pub fn scan_regex_token(&mut self) -> Token {
        let start = self.current_position();
        if self.peek_char() == Some('/') && !matches!(self.peek_byte(1), Some(b'/' | b'*')) {
            self.scan_regex(start)
        } else {
            self.scan_token()
        }
    }

    pub fn source_text(&self) -> &'a str {
        self.source
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Whether the end-of-file token has been produced.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    // =========================================================================
    // Character access
    // =========================================================================

    #[inline]
    fn current_position(&self) -> Position {
        Position::new(self.line, self.column, clamp_offset(self.pos))
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    #[inline]
    fn peek_byte(&self, ahead: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        match ch {
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {
                self.line += 1;
                self.column = 1;
            }
            // \r\n counts as one line break, taken at the \n
            '\r' if self.peek_byte(0) == Some(b'\n') => self.column += 1,
            '\r' => {
                self.line += 1;
                self.column = 1;
            }
            _ => self.column += 1,
        }
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Advance to byte offset `end`. Returns whether a line break was crossed.
    fn advance_to(&mut self, end: usize) -> bool {
        let mut saw_line_break = false;
        while self.pos < end {
            match self.bump() {
                Some(ch) if is_line_break(ch) => saw_line_break = true,
                Some(_) => {}
                None => break,
            }
        }
        saw_line_break
    }

    fn error(&mut self, kind: LexErrorKind, start: Position, detail: &str) {
        let span = Span::new(start, self.current_position());
        self.errors.push(LexError::new(kind, span, detail));
    }

    fn finish_token(
        &mut self,
        kind: SyntaxKind,
        start: Position,
        text: String,
        mut flags: TokenFlags,
    ) -> Token {
        if self.pending_line_break {
            flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
        if !kind.is_trivia() {
            self.pending_line_break = false;
            if kind == SyntaxKind::EndOfFileToken {
                self.finished = true;
            } else {
                self.last_significant = Some(kind);
            }
        }
        Token {
            kind,
            text,
            span: Span::new(start, self.current_position()),
            flags,
        }
    }

    fn slice_from(&self, start: Position) -> &'a str {
        let source = self.source;
        source.get(start.offset as usize..self.pos).unwrap_or_default()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Scan the next token.
    pub fn scan_token(&mut self) -> Token {
        loop {
            let start = self.current_position();
            let Some(ch) = self.peek_char() else {
                return self.finish_token(
                    SyntaxKind::EndOfFileToken,
                    start,
                    String::new(),
                    TokenFlags::empty(),
                );
            };

            if is_line_break(ch) || is_white_space_single_line(ch) {
                self.skip_whitespace();
                if self.emit_whitespace {
                    let text = self.slice_from(start).to_string();
                    return self.finish_token(
                        SyntaxKind::WhitespaceTrivia,
                        start,
                        text,
                        TokenFlags::empty(),
                    );
                }
                continue;
            }

            if ch == '/' {
                match self.peek_byte(1) {
                    Some(b'/') => return self.scan_line_comment(start, SyntaxKind::SingleLineCommentTrivia),
                    Some(b'*') => return self.scan_block_comment(start),
                    _ => {}
                }
                if !self.last_significant.is_some_and(SyntaxKind::ends_operand) {
                    return self.scan_regex(start);
                }
            }

            return match ch {
                '#' if self.pos == 0 && self.peek_byte(1) == Some(b'!') => {
                    self.scan_line_comment(start, SyntaxKind::ShebangTrivia)
                }
                '0'..='9' => self.scan_number(start),
                '.' if self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) => {
                    self.scan_number(start)
                }
                '"' | '\'' => self.scan_string(start, ch),
                '`' => {
                    self.bump();
                    self.scan_template(start, true)
                }
                '}' if self.state.template_stack.last() == Some(&self.state.brace_depth) => {
                    self.state.template_stack.pop();
                    self.bump();
                    self.scan_template(start, false)
                }
                '#' if self.source[self.pos + 1..]
                    .chars()
                    .next()
                    .is_some_and(is_identifier_start) =>
                {
                    self.bump();
                    self.scan_word(start, SyntaxKind::PrivateIdentifier)
                }
                c if is_identifier_start(c) => self.scan_word(start, SyntaxKind::Identifier),
                _ => self.scan_punctuation(start),
            };
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_line_break(ch) {
                self.pending_line_break = true;
            } else if !is_white_space_single_line(ch) {
                break;
            }
            self.bump();
        }
    }

    // =========================================================================
    // Comments
    // =========================================================================

    fn scan_line_comment(&mut self, start: Position, kind: SyntaxKind) -> Token {
        let source = self.source;
        let rest = &source[self.pos..];
        let mut len = memchr::memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
        if let Some(sep) = rest[..len].find([LINE_SEPARATOR, PARAGRAPH_SEPARATOR]) {
            len = sep;
        }
        self.advance_to(self.pos + len);
        let text = self.slice_from(start).to_string();
        self.finish_token(kind, start, text, TokenFlags::empty())
    }

    fn scan_block_comment(&mut self, start: Position) -> Token {
        let body_start = self.pos + 2;
        let source = self.source;
        let body = &source.as_bytes()[body_start..];
        match memchr::memmem::find(body, b"*/") {
            Some(idx) => {
                if self.advance_to(body_start + idx + 2) {
                    self.pending_line_break = true;
                }
                let text = self.slice_from(start).to_string();
                self.finish_token(
                    SyntaxKind::MultiLineCommentTrivia,
                    start,
                    text,
                    TokenFlags::empty(),
                )
            }
            None => {
                if self.advance_to(self.source.len()) {
                    self.pending_line_break = true;
                }
                self.error(LexErrorKind::UnterminatedComment, start, "");
                let text = self.slice_from(start).to_string();
                self.finish_token(SyntaxKind::Unknown, start, text, TokenFlags::UNTERMINATED)
            }
        }
    }

    // =========================================================================
    // Literals
    // =========================================================================

    fn scan_string(&mut self, start: Position, quote: char) -> Token {
        self.bump();
        let mut value = String::new();
        let mut flags = TokenFlags::empty();
        let mut invalid = false;

        loop {
            match self.peek_char() {
                None => {
                    flags |= TokenFlags::UNTERMINATED;
                    break;
                }
                Some(c) if c == quote => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    flags |= TokenFlags::CONTAINS_ESCAPE;
                    if !self.scan_escape(&mut value) {
                        invalid = true;
                    }
                }
                Some('\n' | '\r') => {
                    flags |= TokenFlags::UNTERMINATED;
                    break;
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }

        let kind = if flags.contains(TokenFlags::UNTERMINATED) {
            self.error(LexErrorKind::UnterminatedString, start, "");
            SyntaxKind::Unknown
        } else if invalid {
            SyntaxKind::Unknown
        } else {
            SyntaxKind::StringLiteral
        };
        self.finish_token(kind, start, value, flags)
    }

    /// Decode one escape sequence (the cursor is on the backslash) into
    /// `out`. Returns false and records `InvalidEscape` for malformed
    /// `\x`/`\u` escapes.
    fn scan_escape(&mut self, out: &mut String) -> bool {
        let escape_start = self.current_position();
        self.bump();
        let Some(ch) = self.bump() else {
            // Backslash at end of input; the caller reports the literal as
            // unterminated.
            return true;
        };
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' => out.push('\0'),
            // Line continuation
            '\r' => {
                self.eat('\n');
            }
            '\n' | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => {}
            'x' => {
                let hex = self.take_hex_digits(2);
                match u32::from_str_radix(&hex, 16).ok().filter(|_| hex.len() == 2) {
                    Some(code) => out.push(char::from_u32(code).unwrap_or('\u{FFFD}')),
                    None => {
                        let raw = self.slice_from(escape_start).to_string();
                        self.error(LexErrorKind::InvalidEscape, escape_start, &raw);
                        return false;
                    }
                }
            }
            'u' => match self.scan_unicode_escape_value() {
                Some(code) => self.push_code_point(out, code),
                None => {
                    let raw = self.slice_from(escape_start).to_string();
                    self.error(LexErrorKind::InvalidEscape, escape_start, &raw);
                    return false;
                }
            },
            other => out.push(other),
        }
        true
    }

    fn take_hex_digits(&mut self, max: usize) -> String {
        let mut digits = String::new();
        while digits.len() < max {
            match self.peek_char() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.bump();
                    digits.push(c);
                }
                _ => break,
            }
        }
        digits
    }

    /// Parse the part after `\u`: either `{H..}` or exactly four hex digits.
    fn scan_unicode_escape_value(&mut self) -> Option<u32> {
        if self.eat('{') {
            let digits = self.take_hex_digits(usize::MAX);
            if !self.eat('}') || digits.is_empty() {
                return None;
            }
            let code = u32::from_str_radix(&digits, 16).ok()?;
            (code <= 0x10FFFF).then_some(code)
        } else {
            let digits = self.take_hex_digits(4);
            if digits.len() != 4 {
                return None;
            }
            u32::from_str_radix(&digits, 16).ok()
        }
    }

    /// Push a decoded code point, pairing a high surrogate with an
    /// immediately following `\uDC00`-`\uDFFF` escape.
    fn push_code_point(&mut self, out: &mut String, code: u32) {
        if (0xD800..=0xDBFF).contains(&code) {
            if let Some(low) = self.peek_low_surrogate_escape() {
                self.advance_to(self.pos + 6);
                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                out.push(char::from_u32(combined).unwrap_or('\u{FFFD}'));
                return;
            }
        }
        out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
    }

    fn peek_low_surrogate_escape(&self) -> Option<u32> {
        let rest = self.source.as_bytes().get(self.pos..self.pos + 6)?;
        if rest[0] != b'\\' || rest[1] != b'u' {
            return None;
        }
        let digits = std::str::from_utf8(&rest[2..]).ok()?;
        let code = u32::from_str_radix(digits, 16).ok()?;
        (0xDC00..=0xDFFF).contains(&code).then_some(code)
    }

    /// Scan template characters after the opening `` ` `` or the `}` closing a
    /// substitution.
    fn scan_template(&mut self, start: Position, is_head: bool) -> Token {
        let mut value = String::new();
        let mut flags = TokenFlags::empty();
        let mut invalid = false;

        let kind = loop {
            match self.peek_char() {
                None => {
                    flags |= TokenFlags::UNTERMINATED;
                    self.error(LexErrorKind::UnterminatedTemplate, start, "");
                    break SyntaxKind::Unknown;
                }
                Some('`') => {
                    self.bump();
                    break if is_head {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                Some('$') if self.peek_byte(1) == Some(b'{') => {
                    self.bump();
                    self.bump();
                    self.state.template_stack.push(self.state.brace_depth);
                    break if is_head {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                Some('\\') => {
                    flags |= TokenFlags::CONTAINS_ESCAPE;
                    if !self.scan_escape(&mut value) {
                        invalid = true;
                    }
                }
                Some('\r') => {
                    // Template values normalise CRLF and CR to LF
                    self.bump();
                    self.eat('\n');
                    value.push('\n');
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        };

        let kind = if invalid { SyntaxKind::Unknown } else { kind };
        self.finish_token(kind, start, value, flags)
    }

    fn scan_regex(&mut self, start: Position) -> Token {
        self.bump();
        let mut in_class = false;
        loop {
            let Some(ch) = self.peek_char() else {
                return self.unterminated_regex(start);
            };
            if is_line_break(ch) {
                return self.unterminated_regex(start);
            }
            self.bump();
            match ch {
                '\\' => {
                    if self.peek_char().is_some_and(|c| !is_line_break(c)) {
                        self.bump();
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        while self.peek_char().is_some_and(is_identifier_part) {
            self.bump();
        }
        let text = self.slice_from(start).to_string();
        self.finish_token(
            SyntaxKind::RegularExpressionLiteral,
            start,
            text,
            TokenFlags::empty(),
        )
    }

    fn unterminated_regex(&mut self, start: Position) -> Token {
        self.error(LexErrorKind::UnterminatedRegex, start, "");
        let text = self.slice_from(start).to_string();
        self.finish_token(SyntaxKind::Unknown, start, text, TokenFlags::UNTERMINATED)
    }

    fn scan_number(&mut self, start: Position) -> Token {
        let mut flags = TokenFlags::empty();
        let mut valid = true;
        let mut is_bigint = false;

        let radix_prefix = if self.peek_char() == Some('0') {
            match self.peek_byte(1) {
                Some(b'x' | b'X') => Some((16, TokenFlags::HEX_SPECIFIER)),
                Some(b'o' | b'O') => Some((8, TokenFlags::OCTAL_SPECIFIER)),
                Some(b'b' | b'B') => Some((2, TokenFlags::BINARY_SPECIFIER)),
                _ => None,
            }
        } else {
            None
        };

        if let Some((radix, flag)) = radix_prefix {
            flags |= flag;
            self.bump();
            self.bump();
            let (count, ok) = self.scan_digits(radix, &mut flags);
            valid &= ok && count > 0;
            is_bigint = self.eat('n');
        } else {
            let mut is_integer = true;
            if self.peek_char() != Some('.') {
                let (_, ok) = self.scan_digits(10, &mut flags);
                valid &= ok;
            }
            if self.peek_char() == Some('.') {
                self.bump();
                is_integer = false;
                if self.peek_char() == Some('_') {
                    valid = false;
                }
                let (_, ok) = self.scan_digits(10, &mut flags);
                valid &= ok;
            }
            if matches!(self.peek_char(), Some('e' | 'E')) {
                self.bump();
                is_integer = false;
                flags |= TokenFlags::SCIENTIFIC;
                if matches!(self.peek_char(), Some('+' | '-')) {
                    self.bump();
                }
                let (count, ok) = self.scan_digits(10, &mut flags);
                valid &= ok && count > 0;
            }
            if is_integer {
                is_bigint = self.eat('n');
            }
        }

        // `3in` and `0b12` tails are part of the bad literal
        if self.peek_char().is_some_and(is_identifier_part) {
            valid = false;
            while self.peek_char().is_some_and(is_identifier_part) {
                self.bump();
            }
        }

        let text = self.slice_from(start).to_string();
        let kind = if !valid {
            self.error(LexErrorKind::InvalidNumber, start, &text);
            SyntaxKind::Unknown
        } else if is_bigint {
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.finish_token(kind, start, text, flags)
    }

    /// Scan digits of `radix` with `_` separators. Returns the digit count
    /// and whether every separator sat between two digits.
    fn scan_digits(&mut self, radix: u32, flags: &mut TokenFlags) -> (usize, bool) {
        let mut count = 0;
        let mut ok = true;
        let mut last_was_separator = false;
        while let Some(c) = self.peek_char() {
            if c == '_' {
                *flags |= TokenFlags::CONTAINS_SEPARATOR;
                if count == 0 || last_was_separator {
                    ok = false;
                }
                last_was_separator = true;
            } else if is_digit_in_radix(c, radix) {
                count += 1;
                last_was_separator = false;
            } else {
                break;
            }
            self.bump();
        }
        (count, ok && !last_was_separator)
    }

    // =========================================================================
    // Words and punctuation
    // =========================================================================

    fn scan_word(&mut self, start: Position, kind: SyntaxKind) -> Token {
        while self.peek_char().is_some_and(is_identifier_part) {
            self.bump();
        }
        let text = self.slice_from(start);
        let kind = if kind == SyntaxKind::Identifier {
            text_to_keyword(text).unwrap_or(SyntaxKind::Identifier)
        } else {
            kind
        };
        self.finish_token(kind, start, text.to_string(), TokenFlags::empty())
    }

    fn scan_punctuation(&mut self, start: Position) -> Token {
        let source = self.source;
        let rest = &source[self.pos..];
        for &(text, kind) in PUNCTUATORS {
            if !rest.starts_with(text) {
                continue;
            }
            // `a?.5:b` is a conditional, not optional chaining
            if kind == SyntaxKind::QuestionDotToken
                && rest.as_bytes().get(2).is_some_and(u8::is_ascii_digit)
            {
                continue;
            }
            self.advance_to(self.pos + text.len());
            match kind {
                SyntaxKind::OpenBraceToken => self.state.brace_depth += 1,
                SyntaxKind::CloseBraceToken => {
                    self.state.brace_depth = self.state.brace_depth.saturating_sub(1);
                }
                _ => {}
            }
            return self.finish_token(kind, start, text.to_string(), TokenFlags::empty());
        }

        let ch = self.bump().unwrap_or('\0');
        let text = ch.to_string();
        self.error(LexErrorKind::UnexpectedCharacter, start, &text);
        self.finish_token(SyntaxKind::Unknown, start, text, TokenFlags::empty())
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            None
        } else {
            Some(self.scan_token())
        }
    }
}

/// Byte offsets saturate at `u32::MAX`; see `MAX_SOURCE_OFFSET`.
#[inline]
pub(crate) fn clamp_offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(MAX_SOURCE_OFFSET)
}

/// Scan `source` to completion.
///
/// The returned token list always ends in exactly one `EndOfFileToken`.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let capacity =
        (source.len() / INITIAL_TOKEN_CAPACITY_DIVISOR + 1).min(MAX_INITIAL_TOKEN_CAPACITY);
    let mut tokens = Vec::with_capacity(capacity);
    let mut scanner = Scanner::new(source);
    tokens.extend(scanner.by_ref());
    let errors = scanner.take_errors();
    debug!(
        bytes = source.len(),
        tokens = tokens.len(),
        errors = errors.len(),
        "tokenize"
    );
    (tokens, errors)
}

/// Render `value` as a quoted string literal that scans back to `value`.
pub fn escape_string_literal(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000B}' => out.push_str("\\v"),
            '\u{000C}' => out.push_str("\\f"),
            '\0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() || c == LINE_SEPARATOR || c == PARAGRAPH_SEPARATOR => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{code:02X}"));
                } else {
                    out.push_str(&format!("\\u{code:04X}"));
                }
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
