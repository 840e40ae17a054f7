//! Tests for scanner.rs

use super::*;
use crate::syntax_kind::{LiteralKind, OperatorClass, TokenClass, keyword_to_text, punctuation_to_text};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    tokenize(source).0.into_iter().map(|t| t.kind).collect()
}

fn significant(source: &str) -> Vec<Token> {
    tokenize(source)
        .0
        .into_iter()
        .filter(|t| !t.is_trivia() && !t.is_eof())
        .collect()
}

#[test]
fn test_empty_source_is_single_eof() {
    let (tokens, errors) = tokenize("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, SyntaxKind::EndOfFileToken);
    assert_eq!(tokens[0].span.start.offset, 0);
    assert!(errors.is_empty());
}

#[test]
fn test_exactly_one_eof_at_end() {
    let (tokens, _) = tokenize("let x = 1; // done");
    let eof_count = tokens.iter().filter(|t| t.is_eof()).count();
    assert_eq!(eof_count, 1);
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_let_statement() {
    assert_eq!(
        kinds("let x = 42;"),
        vec![
            SyntaxKind::LetKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::SemicolonToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_token_classes() {
    let tokens = significant("x = 'a' + 1 === true && y");
    let classes: Vec<TokenClass> = tokens.iter().map(Token::class).collect();
    assert_eq!(
        classes,
        vec![
            TokenClass::Identifier,
            TokenClass::Operator(OperatorClass::Assignment),
            TokenClass::Literal(LiteralKind::String),
            TokenClass::Operator(OperatorClass::Arithmetic),
            TokenClass::Literal(LiteralKind::Number),
            TokenClass::Operator(OperatorClass::Comparison),
            TokenClass::Literal(LiteralKind::Boolean),
            TokenClass::Operator(OperatorClass::Logical),
            TokenClass::Identifier,
        ]
    );
}

#[test]
fn test_longest_match_operators() {
    assert_eq!(
        kinds("a >>>= b >>> c ?? d ??= e ** f"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanGreaterThanGreaterThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::AsteriskAsteriskToken,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_question_dot_before_digit_is_conditional() {
    assert_eq!(
        kinds("a?.5:b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFileToken,
        ]
    );
    assert_eq!(kinds("a?.b")[1], SyntaxKind::QuestionDotToken);
}

#[test]
fn test_keywords_and_reserved_words() {
    assert_eq!(kinds("while")[0], SyntaxKind::WhileKeyword);
    assert_eq!(kinds("instanceof")[0], SyntaxKind::InstanceOfKeyword);
    assert_eq!(kinds("interface")[0], SyntaxKind::ReservedWord);
    assert_eq!(kinds("undefined")[0], SyntaxKind::UndefinedLiteral);
    assert_eq!(kinds("null")[0], SyntaxKind::NullLiteral);
    assert_eq!(kinds("whilex")[0], SyntaxKind::Identifier);
    assert_eq!(kinds("of")[0], SyntaxKind::Identifier);
}

#[test]
fn test_keyword_to_text_round_trips() {
    for word in ["break", "typeof", "yield", "await", "let"] {
        let kind = text_to_keyword(word).expect("keyword");
        assert_eq!(keyword_to_text(kind), Some(word));
    }
    assert_eq!(keyword_to_text(SyntaxKind::Identifier), None);
    assert_eq!(punctuation_to_text(SyntaxKind::EqualsGreaterThanToken), Some("=>"));
}

#[test]
fn test_string_escapes_are_decoded() {
    let tokens = significant(r#""a\nb\t\x41B\u{43}\'""#);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(tokens[0].text, "a\nb\tABC'");
    assert!(tokens[0].flags.contains(TokenFlags::CONTAINS_ESCAPE));
}

#[test]
fn test_string_surrogate_pair_escape() {
    let tokens = significant(r"'\uD83D\uDE00'");
    assert_eq!(tokens[0].text, "\u{1F600}");
}

#[test]
fn test_string_line_continuation() {
    let tokens = significant("'ab\\\ncd'");
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(tokens[0].text, "abcd");
}

#[test]
fn test_unknown_escape_passes_through() {
    let tokens = significant(r#""\q""#);
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(tokens[0].text, "q");
}

#[test]
fn test_invalid_hex_escape_reports_error() {
    let (tokens, errors) = tokenize(r#""\xZZ""#);
    assert_eq!(tokens[0].kind, SyntaxKind::Unknown);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexErrorKind::InvalidEscape);
    assert_eq!(errors[0].message, "Invalid escape sequence '\\x'.");
}

#[test]
fn test_unterminated_string() {
    let (tokens, errors) = tokenize("'abc\nx");
    assert_eq!(tokens[0].kind, SyntaxKind::Unknown);
    assert!(tokens[0].flags.contains(TokenFlags::UNTERMINATED));
    assert_eq!(tokens[0].text, "abc");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexErrorKind::UnterminatedString);
    // Scanning resumes on the next line
    assert_eq!(tokens[1].kind, SyntaxKind::Identifier);
    assert!(tokens[1].has_preceding_line_break());
}

#[test]
fn test_unterminated_block_comment() {
    let (tokens, errors) = tokenize("a /* never closed");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, LexErrorKind::UnterminatedComment);
    assert_eq!(tokens[1].kind, SyntaxKind::Unknown);
    assert!(tokens.last().is_some_and(Token::is_eof));
}

#[test]
fn test_comments_are_emitted_verbatim() {
    let (tokens, _) = tokenize("// line\n/* block */ x");
    assert_eq!(tokens[0].kind, SyntaxKind::SingleLineCommentTrivia);
    assert_eq!(tokens[0].text, "// line");
    assert_eq!(tokens[1].kind, SyntaxKind::MultiLineCommentTrivia);
    assert_eq!(tokens[1].text, "/* block */");
    assert_eq!(tokens[2].kind, SyntaxKind::Identifier);
}

#[test]
fn test_line_break_inside_block_comment_sets_flag() {
    let tokens = significant("a /*\n*/ b");
    assert!(!tokens[0].has_preceding_line_break());
    assert!(tokens[1].has_preceding_line_break());

    let tokens = significant("a /* same line */ b");
    assert!(!tokens[1].has_preceding_line_break());
}

#[test]
fn test_numeric_literal_forms() {
    for source in ["0", "42", "3.14", ".5", "5.", "1e10", "1E-5", "0xFF", "0o17", "0b1010", "1_000_000"] {
        let (tokens, errors) = tokenize(source);
        assert_eq!(tokens[0].kind, SyntaxKind::NumericLiteral, "source: {source}");
        assert_eq!(tokens[0].text, source);
        assert!(errors.is_empty(), "source: {source}, errors: {errors:?}");
    }
    assert!(significant("0x1F")[0].flags.contains(TokenFlags::HEX_SPECIFIER));
    assert!(significant("2e3")[0].flags.contains(TokenFlags::SCIENTIFIC));
    assert!(significant("1_0")[0].flags.contains(TokenFlags::CONTAINS_SEPARATOR));
}

#[test]
fn test_bigint_literal() {
    assert_eq!(kinds("10n")[0], SyntaxKind::BigIntLiteral);
    assert_eq!(kinds("0xFFn")[0], SyntaxKind::BigIntLiteral);
    // A fractional bigint is not a thing
    assert_eq!(kinds("1.5n")[0], SyntaxKind::Unknown);
}

#[test]
fn test_invalid_numeric_literals() {
    for source in ["3in", "0b12", "1__0", "1_", "0x", "1e"] {
        let (tokens, errors) = tokenize(source);
        assert_eq!(tokens[0].kind, SyntaxKind::Unknown, "source: {source}");
        assert_eq!(errors.len(), 1, "source: {source}");
        assert_eq!(errors[0].kind, LexErrorKind::InvalidNumber);
    }
}

#[test]
fn test_member_access_after_number_dot() {
    assert_eq!(
        kinds("1..toString"),
        vec![
            SyntaxKind::NumericLiteral,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_regex_versus_division() {
    assert_eq!(
        kinds("x = /ab+c/gi"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::EqualsToken,
            SyntaxKind::RegularExpressionLiteral,
            SyntaxKind::EndOfFileToken,
        ]
    );
    assert_eq!(
        kinds("a / b / c"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::SlashToken,
            SyntaxKind::Identifier,
            SyntaxKind::SlashToken,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFileToken,
        ]
    );
    assert_eq!(kinds("(a) / 2")[3], SyntaxKind::SlashToken);
    assert_eq!(kinds("x /= 2")[1], SyntaxKind::SlashEqualsToken);
}

#[test]
fn test_regex_class_may_contain_slash() {
    let tokens = significant("f(/[/]+\\//g)");
    assert_eq!(tokens[2].kind, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(tokens[2].text, "/[/]+\\//g");
    assert_eq!(tokens[3].kind, SyntaxKind::CloseParenToken);
}

#[test]
fn test_unterminated_regex() {
    let (tokens, errors) = tokenize("x = /abc\ny");
    assert_eq!(tokens[2].kind, SyntaxKind::Unknown);
    assert_eq!(errors[0].kind, LexErrorKind::UnterminatedRegex);
    assert_eq!(tokens[3].kind, SyntaxKind::Identifier);
}

#[test]
fn test_template_without_substitution() {
    let tokens = significant("`hello\\n`");
    assert_eq!(tokens[0].kind, SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(tokens[0].text, "hello\n");
}

#[test]
fn test_template_with_substitutions() {
    assert_eq!(
        kinds("`a${b}c${ {d} }e`"),
        vec![
            SyntaxKind::TemplateHead,
            SyntaxKind::Identifier,
            SyntaxKind::TemplateMiddle,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::TemplateTail,
            SyntaxKind::EndOfFileToken,
        ]
    );
    let tokens = significant("`a${b}c`");
    assert_eq!(tokens[0].text, "a");
    assert_eq!(tokens[2].text, "c");
}

#[test]
fn test_nested_template() {
    assert_eq!(
        kinds("`x${`y${z}`}`"),
        vec![
            SyntaxKind::TemplateHead,
            SyntaxKind::TemplateHead,
            SyntaxKind::Identifier,
            SyntaxKind::TemplateTail,
            SyntaxKind::TemplateTail,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_unterminated_template() {
    let (tokens, errors) = tokenize("`abc");
    assert_eq!(tokens[0].kind, SyntaxKind::Unknown);
    assert_eq!(errors[0].kind, LexErrorKind::UnterminatedTemplate);
}

#[test]
fn test_private_identifier() {
    let tokens = significant("this.#count");
    assert_eq!(tokens[2].kind, SyntaxKind::PrivateIdentifier);
    assert_eq!(tokens[2].text, "#count");
}

#[test]
fn test_hashbang() {
    let (tokens, errors) = tokenize("#!/usr/bin/env node\nx");
    assert_eq!(tokens[0].kind, SyntaxKind::ShebangTrivia);
    assert_eq!(tokens[0].text, "#!/usr/bin/env node");
    assert_eq!(tokens[1].kind, SyntaxKind::Identifier);
    assert!(errors.is_empty());
}

#[test]
fn test_unexpected_character() {
    let (tokens, errors) = tokenize("a @ b");
    assert_eq!(tokens[1].kind, SyntaxKind::Unknown);
    assert_eq!(tokens[1].text, "@");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), 1007);
    assert_eq!(errors[0].message, "Invalid character '@'.");
    assert_eq!(tokens[2].kind, SyntaxKind::Identifier);
}

#[test]
fn test_positions_are_one_based_lines_and_columns() {
    let tokens = significant("a\n  bc\r\nd");
    assert_eq!((tokens[0].span.start.line, tokens[0].span.start.column), (1, 1));
    assert_eq!((tokens[1].span.start.line, tokens[1].span.start.column), (2, 3));
    assert_eq!(tokens[1].span.end.column, 5);
    assert_eq!(tokens[1].span.start.offset, 4);
    assert_eq!((tokens[2].span.start.line, tokens[2].span.start.column), (3, 1));
}

#[test]
fn test_spans_are_monotonic_and_cover_lexemes() {
    let source = "function f(a, b) { return a ** b; } /* c */ `t${1}`";
    let (tokens, _) = tokenize(source);
    for pair in tokens.windows(2) {
        assert!(pair[0].span.end.offset <= pair[1].span.start.offset);
    }
    for token in &tokens {
        assert!(token.span.start.offset <= token.span.end.offset);
        assert!(token.span.end.offset as usize <= source.len());
    }
}

#[test]
fn test_with_trivia_emits_whitespace() {
    let tokens: Vec<Token> = Scanner::new("a  b").with_trivia(true).collect();
    let kinds: Vec<SyntaxKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::WhitespaceTrivia,
            SyntaxKind::Identifier,
            SyntaxKind::EndOfFileToken,
        ]
    );
    assert_eq!(tokens[1].text, "  ");
}

#[test]
fn test_iterator_stops_after_eof_and_reset_restarts() {
    let mut scanner = Scanner::new("x y");
    assert_eq!(scanner.by_ref().count(), 3);
    assert!(scanner.is_finished());
    assert!(scanner.next().is_none());

    scanner.reset();
    assert!(!scanner.is_finished());
    assert_eq!(scanner.scan_token().text, "x");
}

#[test]
fn test_unicode_identifiers_and_columns() {
    let tokens = significant("café = 1");
    assert_eq!(tokens[0].kind, SyntaxKind::Identifier);
    assert_eq!(tokens[0].text, "café");
    assert_eq!(tokens[1].span.start.column, 6);
}

#[test]
fn test_escape_string_literal_scans_back() {
    for value in ["plain", "quote\"s", "tab\tnew\nline", "back\\slash", "nul\0", "\u{7}bell"] {
        let literal = escape_string_literal(value, '"');
        let tokens = significant(&literal);
        assert_eq!(tokens.len(), 1, "literal: {literal}");
        assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
        assert_eq!(tokens[0].text, value);
    }
    assert_eq!(escape_string_literal("it's", '\''), "'it\\'s'");
}

#[test]
fn test_lex_error_serializes() {
    let (_, errors) = tokenize("'open");
    let json = serde_json::to_value(&errors[0]).expect("serialize");
    assert_eq!(json["kind"], "UnterminatedString");
    assert_eq!(json["span"]["start"]["offset"], 0);
}

#[test]
fn test_scan_token_drives_an_owned_scanner() {
    let mut scanner = Scanner::new("a + b");
    let texts: Vec<String> = std::iter::from_fn(|| {
        let token = scanner.scan_token();
        (!token.is_eof()).then_some(token.text)
    })
    .collect();
    assert_eq!(texts, ["a", "+", "b"]);
    assert!(scanner.is_finished());
    // The Iterator adapters still resolve to the trait methods.
    assert_eq!(Scanner::new("a b c").position(|t| t.text == "c"), Some(2));
}

#[test]
fn test_offsets_saturate_past_u32() {
    assert_eq!(clamp_offset(0), 0);
    assert_eq!(clamp_offset(u32::MAX as usize), u32::MAX);
    assert_eq!(clamp_offset(usize::MAX), MAX_SOURCE_OFFSET);
}

#[test]
fn test_slash_after_close_paren_scans_as_division() {
    let tokens = significant("if (x) /a/.test(y)");
    assert_eq!(tokens[4].kind, SyntaxKind::SlashToken);
}

#[test]
fn test_resume_at_rescans_slash_as_regex() {
    let source = "if (x) /a}b/g.test(y)";
    let (tokens, _) = tokenize(source);
    let slash = tokens.iter().position(|t| t.kind == SyntaxKind::SlashToken);
    let slash = slash.expect("division guess");

    let mut state = ScanState::default();
    for token in &tokens[..slash] {
        state.apply(token);
    }
    let mut scanner =
        Scanner::resume_at(source, tokens[slash].span.start, state).expect("char boundary");
    let regex = scanner.scan_regex_token();
    assert_eq!(regex.kind, SyntaxKind::RegularExpressionLiteral);
    assert_eq!(regex.text, "/a}b/g");
    assert_eq!(regex.span.start.column, 8);
    assert_eq!(regex.span.end.offset, 13);

    let rest: Vec<SyntaxKind> = scanner.map(|t| t.kind).collect();
    assert_eq!(
        rest,
        [
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::EndOfFileToken,
        ]
    );
}

#[test]
fn test_resume_at_keeps_template_nesting() {
    let source = "`${ {} }` + 1";
    let (tokens, _) = tokenize(source);
    // Resume right at the `}` closing the substitution.
    let close = tokens
        .iter()
        .rposition(|t| t.kind == SyntaxKind::CloseBraceToken)
        .expect("inner block close");
    let mut state = ScanState::default();
    for token in &tokens[..=close] {
        state.apply(token);
    }
    let next = &tokens[close + 1];
    let mut scanner = Scanner::resume_at(source, next.span.start, state).expect("char boundary");
    assert_eq!(scanner.scan_token().kind, SyntaxKind::TemplateTail);
}

#[test]
fn test_resume_at_rejects_non_boundary() {
    let start = Position::new(1, 2, 1);
    assert!(Scanner::resume_at("é", start, ScanState::default()).is_none());
}
