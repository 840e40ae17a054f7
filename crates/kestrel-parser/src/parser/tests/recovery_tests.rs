use crate::ast::*;
use crate::parser::{ParserOptions, ParserState};
use kestrel_common::diagnostics::diagnostic_codes;
use kestrel_common::limits::MAX_DIAGNOSTICS_PER_FILE;
use kestrel_scanner::tokenize;

fn parse_script(source: &str) -> (Program, ParserState) {
    let (tokens, _) = tokenize(source);
    let mut parser = ParserState::new("test.js", tokens, ParserOptions::default());
    let program = parser.parse_program();
    (program, parser)
}

/// Run `f` on a thread with room for debug-build frames.
fn with_large_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(f)
        .expect("spawn parser thread")
        .join()
        .expect("parser thread panicked")
}

#[test]
fn test_missing_close_paren_in_if() {
    let (program, parser) = parse_script("if (x {");

    assert_eq!(program.body.len(), 1);
    assert!(matches!(program.body[0], Statement::If(_)));

    let errors = parser.errors();
    assert_eq!(errors.len(), 2, "{:?}", errors);
    assert_eq!(errors[0].code, diagnostic_codes::TOKEN_EXPECTED);
    assert_eq!(errors[0].span.start.offset, 6);
    assert_eq!(errors[1].code, diagnostic_codes::UNEXPECTED_END_OF_INPUT);
}

#[test]
fn test_missing_semicolons_on_one_line() {
    // Each statement is closed as if the semicolon were there.
    let (program, parser) = parse_script("a b c");

    assert_eq!(program.body.len(), 3);
    let count = parser
        .errors()
        .iter()
        .filter(|d| d.code == diagnostic_codes::SEMICOLON_EXPECTED)
        .count();
    assert_eq!(count, 2, "Expected 2 semicolon errors, got {}", count);
}

#[test]
fn test_stray_close_brace_becomes_error_statement() {
    let (program, parser) = parse_script("a; } b;");

    assert_eq!(program.body.len(), 3, "{:?}", program.body);
    assert!(matches!(program.body[0], Statement::Expression(_)));
    assert!(program.body[1].is_error());
    assert!(matches!(program.body[2], Statement::Expression(_)));

    let error_span = program.body[1].span();
    assert_eq!(error_span.start.offset, 3);
    assert_eq!(error_span.end.offset, 4);

    assert_eq!(parser.errors().len(), 1, "{:?}", parser.errors());
    assert_eq!(parser.errors()[0].code, diagnostic_codes::EXPRESSION_EXPECTED);
}

#[test]
fn test_missing_initializer_keeps_following_statement() {
    let (program, parser) = parse_script("let x = ;\nlet y = 2;");

    assert_eq!(program.body.len(), 2);
    assert!(matches!(program.body[1], Statement::Variable(_)));
    assert_eq!(parser.errors().len(), 1, "{:?}", parser.errors());
    assert_eq!(parser.errors()[0].code, diagnostic_codes::EXPRESSION_EXPECTED);
}

#[test]
fn test_unclosed_argument_list() {
    let (program, parser) = parse_script("f(a, b;\ng();");

    assert_eq!(program.body.len(), 2);
    let count = parser
        .errors()
        .iter()
        .filter(|d| d.code == diagnostic_codes::TOKEN_EXPECTED)
        .count();
    assert_eq!(count, 1, "Expected 1 ')' error, got {}", count);
}

#[test]
fn test_no_cascading_errors_at_one_position() {
    // `Expression expected` and `')' expected` both point at the `;`; only
    // the first is kept.
    let (_, parser) = parse_script("let a = (1 + ;");
    assert_eq!(parser.errors().len(), 1, "{:?}", parser.errors());
    assert_eq!(parser.errors()[0].code, diagnostic_codes::EXPRESSION_EXPECTED);
}

#[test]
fn test_unexpected_end_in_parameter_list() {
    let (program, parser) = parse_script("function f(");

    assert!(matches!(program.body[0], Statement::Function(_)));
    assert!(
        parser
            .errors()
            .iter()
            .any(|d| d.code == diagnostic_codes::UNEXPECTED_END_OF_INPUT),
        "{:?}",
        parser.errors()
    );
}

#[test]
fn test_unclosed_block_inside_function() {
    let (program, parser) = parse_script("function f() {\n  if (a) {\n    b();\n");

    assert_eq!(program.body.len(), 1);
    let Statement::Function(function) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(function.body.statements.len(), 1);
    assert!(!parser.errors().is_empty());
}

#[test]
fn test_deep_parentheses_report_nesting_limit() {
    let source = format!("{}1{}", "(".repeat(1_000), ")".repeat(1_000));
    let codes = with_large_stack(move || {
        let (_, parser) = parse_script(&source);
        parser.errors().iter().map(|d| d.code).collect::<Vec<_>>()
    });
    assert!(
        codes.contains(&diagnostic_codes::MAX_NESTING_DEPTH_EXCEEDED),
        "Expected a nesting error, got {:?}",
        codes
    );
}

#[test]
fn test_deep_unary_chain_reports_nesting_limit() {
    let source = format!("{}x;", "!".repeat(10_000));
    let codes = with_large_stack(move || {
        let (_, parser) = parse_script(&source);
        parser.errors().iter().map(|d| d.code).collect::<Vec<_>>()
    });
    assert!(codes.contains(&diagnostic_codes::MAX_NESTING_DEPTH_EXCEEDED));
}

#[test]
fn test_diagnostics_are_capped() {
    // Every block past the nesting limit is its own error, far more than
    // the per-file cap.
    let source = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
    let codes = with_large_stack(move || {
        let (_, parser) = parse_script(&source);
        parser.errors().iter().map(|d| d.code).collect::<Vec<_>>()
    });
    assert_eq!(codes.len(), MAX_DIAGNOSTICS_PER_FILE + 1);
    assert_eq!(codes.last(), Some(&diagnostic_codes::TOO_MANY_DIAGNOSTICS));
}
