//! Cursor over a fully scanned token buffer.
//!
//! The buffer keeps every token the scanner produced, comments included.
//! Trivia is skipped when the cursor moves, so `current()` and `peek()`
//! only ever see significant tokens. The cursor's whole state is one index,
//! which makes backtracking a copy of that index.
//!
//! The one exception is [`TokenCursor::rescan_as_regex`], which rewrites the
//! buffer from the current token on when the scanner took a regular
//! expression for a division.

use kestrel_common::{Position, Span};
use kestrel_scanner::{LexError, ScanState, Scanner, SyntaxKind, Token, TokenFlags};
use std::ops::Range;
use tracing::trace;

/// A saved cursor position, restored with [`TokenCursor::rewind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// What [`TokenCursor::rescan_as_regex`] changed.
#[derive(Debug)]
pub struct Rescan {
    /// Byte range whose tokens were replaced. Lexical errors reported there
    /// by the first scan are stale.
    pub replaced: Range<u32>,
    /// Lexical errors from the new scan of that range.
    pub errors: Vec<LexError>,
}

pub struct TokenCursor {
    tokens: Vec<Token>,
    /// Always the index of a significant token (possibly end-of-file).
    index: usize,
}

impl TokenCursor {
    /// Wrap `tokens`. A missing end-of-file token is appended so the cursor
    /// always has somewhere to park.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens
                .last()
                .map_or(Position::START, |token| token.span.end);
            tokens.push(Token::new(
                SyntaxKind::EndOfFileToken,
                "",
                Span::empty_at(end),
            ));
        }
        let mut cursor = TokenCursor { tokens, index: 0 };
        cursor.index = cursor.next_significant(0);
        cursor
    }

    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// First significant token at or after `from` (the end-of-file token if
    /// none).
    fn next_significant(&self, from: usize) -> usize {
        (from..self.tokens.len())
            .find(|&i| !self.tokens[i].is_trivia())
            .unwrap_or_else(|| self.last_index())
    }

    /// Last significant token strictly before `before`.
    fn prev_significant(&self, before: usize) -> Option<usize> {
        (0..before).rev().find(|&i| !self.tokens[i].is_trivia())
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    /// The `n`th significant token after the current one (`peek(0)` is
    /// `current()`). Past the end this is the end-of-file token.
    pub fn peek(&self, n: usize) -> &Token {
        let mut index = self.index;
        for _ in 0..n {
            if index >= self.last_index() {
                break;
            }
            index = self.next_significant(index + 1);
        }
        &self.tokens[index]
    }

    /// Move to the next significant token. At end-of-file this is a no-op.
    pub fn advance(&mut self) {
        if self.index < self.last_index() {
            self.index = self.next_significant(self.index + 1);
        }
    }

    /// Move back to the previous significant token. At the first token this
    /// is a no-op.
    pub fn retreat(&mut self) {
        if let Some(prev) = self.prev_significant(self.index) {
            self.index = prev;
        }
    }

    /// Whether any significant token other than end-of-file remains.
    pub fn has_more(&self) -> bool {
        !self.current().is_eof()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.index)
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.index = checkpoint.0.min(self.last_index());
    }

    /// The most recently consumed significant token.
    pub fn previous(&self) -> Option<&Token> {
        self.prev_significant(self.index).map(|i| &self.tokens[i])
    }

    /// End of the most recently consumed significant token, or the start of
    /// the current token when nothing has been consumed yet.
    pub fn previous_end(&self) -> Position {
        self.previous()
            .map_or(self.current().span.start, |token| token.span.end)
    }

    /// Comment tokens in source order.
    pub fn comments(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| {
            matches!(
                token.kind,
                SyntaxKind::SingleLineCommentTrivia
                    | SyntaxKind::MultiLineCommentTrivia
                    | SyntaxKind::ShebangTrivia
            )
        })
    }

    /// The full buffer, trivia included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Scan the current `/` or `/=` token again as the start of a regular
    /// expression literal.
    ///
    /// `source` must be the text the buffer was scanned from. The new scan
    /// runs until it produces a token identical to the buffered one at the
    /// same offset with the same nesting state; everything before that point
    /// is spliced into the buffer. Returns `None` when the current token is
    /// not a slash or `source` does not match the buffer.
    pub fn rescan_as_regex(&mut self, source: &str) -> Option<Rescan> {
        let current = self.current();
        if !matches!(
            current.kind,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            return None;
        }
        let line_break = current.flags & TokenFlags::PRECEDING_LINE_BREAK;
        let start = current.span.start;
        if !source
            .get(start.offset as usize..)
            .is_some_and(|rest| rest.starts_with('/'))
        {
            return None;
        }

        let mut state = ScanState::default();
        for token in &self.tokens[..self.index] {
            state.apply(token);
        }
        let mut scanner = Scanner::resume_at(source, start, state.clone())?;
        let mut regex = scanner.scan_regex_token();
        regex.flags |= line_break;

        let mut old = self.index;
        let mut old_state = state.clone();
        let mut new_state = state;
        let mut replacement = vec![regex];
        loop {
            let end = replacement
                .last()
                .map_or(start.offset, |token| token.span.end.offset);
            while old < self.last_index() && self.tokens[old].span.start.offset < end {
                old_state.apply(&self.tokens[old]);
                old += 1;
            }
            let next = scanner.scan_token();
            if next.is_eof() {
                old = self.tokens.len();
                replacement.push(next);
                break;
            }
            if old_state == new_state && self.tokens[old] == next {
                break;
            }
            new_state.apply(&next);
            replacement.push(next);
        }

        let replaced_end = self
            .tokens
            .get(old)
            .map_or(u32::MAX, |token| token.span.start.offset);
        trace!(
            offset = start.offset,
            replaced = old - self.index,
            inserted = replacement.len(),
            "rescan slash as regex"
        );
        self.tokens.splice(self.index..old, replacement);
        let mut errors = scanner.take_errors();
        // The token the scans agreed on keeps its original errors.
        errors.retain(|error| error.span.start.offset < replaced_end);
        Some(Rescan {
            replaced: start.offset..replaced_end,
            errors,
        })
    }

    /// Number of significant tokens, end-of-file included.
    pub fn significant_len(&self) -> usize {
        self.tokens.iter().filter(|token| !token.is_trivia()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_scanner::tokenize;

    fn cursor(source: &str) -> TokenCursor {
        TokenCursor::new(tokenize(source).0)
    }

    #[test]
    fn skips_comments_at_consumption_time() {
        let mut c = cursor("/* a */ x // b\n y");
        assert_eq!(c.current().text, "x");
        c.advance();
        assert_eq!(c.current().text, "y");
        assert_eq!(c.comments().count(), 2);
        assert_eq!(c.tokens().len(), 5);
        assert_eq!(c.significant_len(), 3);
    }

    #[test]
    fn peek_is_bounded_by_end_of_file() {
        let c = cursor("a b");
        assert_eq!(c.peek(0).text, "a");
        assert_eq!(c.peek(1).text, "b");
        assert!(c.peek(2).is_eof());
        assert!(c.peek(50).is_eof());
    }

    #[test]
    fn advance_at_end_is_noop() {
        let mut c = cursor("a");
        c.advance();
        assert!(c.current().is_eof());
        assert!(!c.has_more());
        c.advance();
        c.advance();
        assert!(c.current().is_eof());
    }

    #[test]
    fn retreat_and_rewind() {
        let mut c = cursor("a /* c */ b c");
        let start = c.checkpoint();
        c.advance();
        c.advance();
        assert_eq!(c.current().text, "c");
        c.retreat();
        assert_eq!(c.current().text, "b");
        c.rewind(start);
        assert_eq!(c.current().text, "a");
        c.retreat();
        assert_eq!(c.current().text, "a");
    }

    #[test]
    fn previous_end_tracks_consumed_tokens() {
        let mut c = cursor("ab  cd");
        assert_eq!(c.previous_end().offset, 0);
        c.advance();
        assert_eq!(c.previous_end().offset, 2);
        assert_eq!(c.previous().map(|t| t.text.as_str()), Some("ab"));
    }

    #[test]
    fn rescan_splices_regex_and_realigns() {
        let source = "if (x) /a+b/g.test(s); c";
        let mut c = cursor(source);
        for _ in 0..4 {
            c.advance();
        }
        assert_eq!(c.current().kind, SyntaxKind::SlashToken);
        let before = c.tokens().len();

        let rescan = c.rescan_as_regex(source).expect("slash rescans");
        assert_eq!(c.current().kind, SyntaxKind::RegularExpressionLiteral);
        assert_eq!(c.current().text, "/a+b/g");
        assert!(rescan.errors.is_empty());
        // `/ a + b / g` collapsed into one token; `.test(s); c` was reused.
        assert_eq!(rescan.replaced, 7..13);
        assert_eq!(c.tokens().len(), before - 5);
        c.advance();
        assert_eq!(c.current().kind, SyntaxKind::DotToken);
    }

    #[test]
    fn rescan_needs_a_slash_and_matching_source() {
        let mut c = cursor("a / b");
        assert!(c.rescan_as_regex("a / b").is_none());
        c.advance();
        assert!(c.rescan_as_regex("a + b").is_none());
        assert_eq!(c.current().kind, SyntaxKind::SlashToken);
    }

    #[test]
    fn missing_end_of_file_is_appended() {
        let (mut tokens, _) = tokenize("x");
        tokens.pop();
        let mut c = TokenCursor::new(tokens);
        c.advance();
        assert!(c.current().is_eof());
        assert_eq!(c.current().span.start.offset, 1);

        let empty = TokenCursor::new(Vec::new());
        assert!(empty.current().is_eof());
    }
}
