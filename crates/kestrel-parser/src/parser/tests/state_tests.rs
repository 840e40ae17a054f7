use crate::ast::*;
use crate::parser::{ContextFlags, ParserOptions, ParserState};
use kestrel_common::diagnostics::diagnostic_codes;
use kestrel_scanner::tokenize;

fn parse_source(source: &str, options: ParserOptions) -> (Program, ParserState) {
    let (tokens, _) = tokenize(source);
    let mut parser = ParserState::new("test.js", tokens, options);
    let program = parser.parse_program();
    (program, parser)
}

fn parse_script(source: &str) -> (Program, ParserState) {
    parse_source(source, ParserOptions::default())
}

fn error_count(parser: &ParserState, code: u32) -> usize {
    parser.errors().iter().filter(|d| d.code == code).count()
}

fn warning_count(parser: &ParserState, code: u32) -> usize {
    parser.warnings().iter().filter(|d| d.code == code).count()
}

// =============================================================================
// Context flags
// =============================================================================

#[test]
fn test_with_context_restores_flags() {
    let (tokens, _) = tokenize("");
    let mut parser = ParserState::new("test.js", tokens, ParserOptions::default());
    let before = parser.context_flags;

    let inside = parser.with_context(ContextFlags::IN_LOOP, ContextFlags::empty(), |p| {
        p.in_context(ContextFlags::IN_LOOP)
    });

    assert!(inside);
    assert_eq!(parser.context_flags, before);
}

#[test]
fn test_module_options_start_strict() {
    let (tokens, _) = tokenize("");
    let parser = ParserState::new("test.mjs", tokens, ParserOptions::module());
    assert!(parser.is_strict());
    assert!(parser.is_module());
}

#[test]
fn test_use_strict_in_function_does_not_leak() {
    // The function's directive applies to its body only.
    let (_, parser) = parse_script("function f() { \"use strict\"; }\nwith (a) {}");
    let count = error_count(&parser, diagnostic_codes::WITH_IN_STRICT_MODE);
    assert_eq!(count, 0, "Expected no 'with' error after the function, got {}", count);
}

#[test]
fn test_use_strict_directive_at_top_level() {
    let (program, parser) = parse_script("\"use strict\";\nwith (a) {}");
    assert!(program.is_strict());
    let count = error_count(&parser, diagnostic_codes::WITH_IN_STRICT_MODE);
    assert_eq!(count, 1, "Expected 1 'with' error in strict code, got {}", count);
}

#[test]
fn test_escaped_use_strict_is_not_a_directive_switch() {
    let (_, parser) = parse_script("\"use\\x20strict\";\nwith (a) {}");
    assert_eq!(error_count(&parser, diagnostic_codes::WITH_IN_STRICT_MODE), 0);
}

// =============================================================================
// break / continue / labels
// =============================================================================

#[test]
fn test_break_outside_loop() {
    let (_, parser) = parse_script("break;");
    let count = error_count(&parser, diagnostic_codes::BREAK_OUTSIDE_LOOP_OR_SWITCH);
    assert_eq!(count, 1, "Expected 1 break error, got {}", count);
}

#[test]
fn test_break_inside_loop_and_switch() {
    let (_, parser) = parse_script("while (x) { break; }\nswitch (y) { case 1: break; }");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_function_resets_loop_context() {
    let (_, parser) = parse_script("while (x) { function f() { break; } }");
    let count = error_count(&parser, diagnostic_codes::BREAK_OUTSIDE_LOOP_OR_SWITCH);
    assert_eq!(count, 1, "Expected the function body to hide the loop, got {}", count);
}

#[test]
fn test_continue_to_loop_label() {
    let (_, parser) = parse_script("outer: for (;;) { inner: { continue outer; } }");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_continue_to_block_label() {
    let (_, parser) = parse_script("a: { continue a; }");
    let count = error_count(&parser, diagnostic_codes::CONTINUE_OUTSIDE_LOOP);
    assert_eq!(count, 1, "Expected 1 continue error, got {}", count);
}

#[test]
fn test_break_to_block_label() {
    let (_, parser) = parse_script("a: { break a; }");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_undefined_label() {
    let (_, parser) = parse_script("while (x) { break missing; }");
    let count = error_count(&parser, diagnostic_codes::UNDEFINED_LABEL);
    assert_eq!(count, 1, "Expected 1 undefined label error, got {}", count);
}

#[test]
fn test_duplicate_label() {
    let (_, parser) = parse_script("a: a: ;");
    let count = error_count(&parser, diagnostic_codes::DUPLICATE_LABEL);
    assert_eq!(count, 1, "Expected 1 duplicate label error, got {}", count);
}

#[test]
fn test_label_out_of_scope_after_statement() {
    // The label is gone once its statement ends, so reusing it is fine.
    let (_, parser) = parse_script("a: ;\na: ;");
    assert_eq!(error_count(&parser, diagnostic_codes::DUPLICATE_LABEL), 0);
}

#[test]
fn test_labels_do_not_cross_functions() {
    let (_, parser) = parse_script("a: while (x) { (function () { break a; }); }");
    let count = error_count(&parser, diagnostic_codes::UNDEFINED_LABEL);
    assert_eq!(count, 1, "Expected the label to be invisible, got {}", count);
}

// =============================================================================
// return / yield / await / new.target
// =============================================================================

#[test]
fn test_return_outside_function() {
    let (_, parser) = parse_script("return 1;");
    let count = error_count(&parser, diagnostic_codes::RETURN_OUTSIDE_FUNCTION);
    assert_eq!(count, 1, "Expected 1 return error, got {}", count);
}

#[test]
fn test_return_outside_function_allowed_by_option() {
    let options = ParserOptions {
        allow_return_outside_function: true,
        ..ParserOptions::default()
    };
    let (_, parser) = parse_source("return 1;", options);
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_yield_in_generator() {
    let (program, parser) = parse_script("function* g() { yield 1; yield* other(); }");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
    let Statement::Function(function) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert!(function.is_generator);
    assert_eq!(function.body.statements.len(), 2);
}

#[test]
fn test_yield_as_identifier_in_sloppy_code() {
    let (_, parser) = parse_script("yield = 1;");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
    let count = warning_count(&parser, diagnostic_codes::RESERVED_WORD_AS_IDENTIFIER_SLOPPY);
    assert_eq!(count, 1, "Expected 1 reserved word warning, got {}", count);
}

#[test]
fn test_yield_outside_generator_in_strict_code() {
    let (_, parser) = parse_script("\"use strict\";\nyield 1;");
    let count = error_count(&parser, diagnostic_codes::YIELD_OUTSIDE_GENERATOR);
    assert_eq!(count, 1, "Expected 1 yield error, got {}", count);
}

#[test]
fn test_await_is_identifier_in_script() {
    let (_, parser) = parse_script("await(1);");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
    assert!(parser.warnings().is_empty(), "{:?}", parser.warnings());
}

#[test]
fn test_await_in_async_function() {
    let (_, parser) = parse_script("async function f() { await x; }");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_top_level_await_in_module() {
    let (_, parser) = parse_source("await x;", ParserOptions::module());
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_await_in_plain_function_in_module() {
    let (_, parser) = parse_source("function f() { await x; }", ParserOptions::module());
    let count = error_count(&parser, diagnostic_codes::AWAIT_OUTSIDE_ASYNC);
    assert_eq!(count, 1, "Expected 1 await error, got {}", count);
}

#[test]
fn test_new_target_outside_function() {
    let (_, parser) = parse_script("new.target;");
    let count = error_count(&parser, diagnostic_codes::NEW_TARGET_OUTSIDE_FUNCTION);
    assert_eq!(count, 1, "Expected 1 new.target error, got {}", count);
}

#[test]
fn test_new_target_inside_function_and_arrow() {
    let (_, parser) = parse_script("function f() { new.target; () => new.target; }");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

// =============================================================================
// Strict mode names and operators
// =============================================================================

#[test]
fn test_delete_identifier_in_strict_mode() {
    let (_, parser) = parse_script("\"use strict\";\ndelete x;\ndelete x.y;");
    let count = error_count(&parser, diagnostic_codes::DELETE_IDENTIFIER_IN_STRICT_MODE);
    assert_eq!(count, 1, "Expected only the bare identifier to be rejected, got {}", count);
}

#[test]
fn test_reserved_word_binding_sloppy_and_strict() {
    let (_, sloppy) = parse_script("var static = 1;");
    assert!(sloppy.errors().is_empty(), "{:?}", sloppy.errors());
    assert_eq!(
        warning_count(&sloppy, diagnostic_codes::RESERVED_WORD_AS_IDENTIFIER_SLOPPY),
        1
    );

    let (_, strict) = parse_script("\"use strict\";\nvar static = 1;");
    let count = error_count(&strict, diagnostic_codes::RESERVED_WORD_AS_IDENTIFIER);
    assert_eq!(count, 1, "Expected 1 reserved word error, got {}", count);
}

#[test]
fn test_keyword_binding_recovers_as_declaration() {
    let (program, parser) = parse_script("var if = 1;");
    assert_eq!(error_count(&parser, diagnostic_codes::RESERVED_WORD_AS_IDENTIFIER), 1);
    assert!(matches!(program.body[0], Statement::Variable(_)));
}

#[test]
fn test_unary_operand_of_exponent() {
    let (_, parser) = parse_script("-2 ** 2;");
    let count = error_count(&parser, diagnostic_codes::UNARY_OPERAND_OF_EXPONENT);
    assert_eq!(count, 1, "Expected 1 exponent error, got {}", count);

    let (_, parser) = parse_script("(-2) ** 2;\n2 ** -2;");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_invalid_assignment_targets() {
    let (_, parser) = parse_script("1 = 2;\na + b = c;\n++1;");
    let count = error_count(&parser, diagnostic_codes::INVALID_ASSIGNMENT_TARGET);
    assert_eq!(count, 3, "Expected 3 assignment target errors, got {}", count);
}

#[test]
fn test_private_name_requires_class() {
    let (_, parser) = parse_script("this.#x;");
    let count = error_count(&parser, diagnostic_codes::PRIVATE_NAME_OUTSIDE_CLASS);
    assert_eq!(count, 1, "Expected 1 private name error, got {}", count);

    let (_, parser) = parse_script("class A { #x; m() { return this.#x; } }");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_duplicate_constructor() {
    let (_, parser) = parse_script("class A { constructor() {} constructor() {} }");
    let count = error_count(&parser, diagnostic_codes::DUPLICATE_CONSTRUCTOR);
    assert_eq!(count, 1, "Expected 1 duplicate constructor error, got {}", count);
}

#[test]
fn test_accessor_parameter_counts() {
    let (_, parser) = parse_script("({ get a(x) {}, set b() {} });");
    assert_eq!(error_count(&parser, diagnostic_codes::GETTER_WITH_PARAMETERS), 1);
    assert_eq!(error_count(&parser, diagnostic_codes::SETTER_PARAMETER_COUNT), 1);
}

#[test]
fn test_const_without_initializer() {
    let (_, parser) = parse_script("const a;");
    let count = error_count(&parser, diagnostic_codes::CONST_WITHOUT_INITIALIZER);
    assert_eq!(count, 1, "Expected 1 const error, got {}", count);

    let (_, parser) = parse_script("for (const a of b) {}");
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_for_in_of_head_checks() {
    let (_, parser) = parse_script("for (var a, b in c) {}");
    assert_eq!(
        error_count(&parser, diagnostic_codes::FOR_IN_OF_SINGLE_DECLARATION),
        1
    );

    let (_, parser) = parse_script("for (let a = 1 of b) {}");
    assert_eq!(error_count(&parser, diagnostic_codes::FOR_IN_OF_INITIALIZER), 1);
}

#[test]
fn test_multiple_default_clauses() {
    let (_, parser) = parse_script("switch (x) { default: default: }");
    let count = error_count(&parser, diagnostic_codes::MULTIPLE_DEFAULT_CLAUSES);
    assert_eq!(count, 1, "Expected 1 default clause error, got {}", count);
}

#[test]
fn test_try_without_handler() {
    let (_, parser) = parse_script("try {}");
    let count = error_count(&parser, diagnostic_codes::CATCH_OR_FINALLY_EXPECTED);
    assert_eq!(count, 1, "Expected 1 catch/finally error, got {}", count);
}

#[test]
fn test_rest_element_must_be_last() {
    let (_, parser) = parse_script("[...a, b] = c;");
    assert_eq!(error_count(&parser, diagnostic_codes::REST_ELEMENT_MUST_BE_LAST), 1);

    let (_, parser) = parse_script("function f(...a, b) {}");
    assert_eq!(error_count(&parser, diagnostic_codes::REST_ELEMENT_MUST_BE_LAST), 1);
}

// =============================================================================
// Line terminator restrictions
// =============================================================================

#[test]
fn test_line_break_after_throw() {
    let (_, parser) = parse_script("throw\nnew Error();");
    let count = error_count(&parser, diagnostic_codes::LINE_BREAK_AFTER_THROW);
    assert_eq!(count, 1, "Expected 1 throw error, got {}", count);
}

#[test]
fn test_line_break_before_arrow() {
    let (program, parser) = parse_script("let f = (a)\n=> a;");
    let count = error_count(&parser, diagnostic_codes::LINE_BREAK_BEFORE_ARROW);
    assert_eq!(count, 1, "Expected 1 arrow error, got {}", count);

    let Statement::Variable(declaration) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert!(matches!(
        declaration.declarations[0].init,
        Some(Expression::Arrow(_))
    ));
}

// =============================================================================
// Module syntax
// =============================================================================

#[test]
fn test_import_in_script() {
    let (_, parser) = parse_script("import x from \"y\";");
    let count = error_count(&parser, diagnostic_codes::MODULE_SYNTAX_OUTSIDE_MODULE);
    assert_eq!(count, 1, "Expected 1 module syntax error, got {}", count);
}

#[test]
fn test_export_inside_block() {
    let (_, parser) = parse_source("{ export const a = 1; }", ParserOptions::module());
    let count = error_count(&parser, diagnostic_codes::MODULE_SYNTAX_NOT_TOP_LEVEL);
    assert_eq!(count, 1, "Expected 1 top-level error, got {}", count);
}

// =============================================================================
// Feature toggles
// =============================================================================

#[test]
fn test_disabled_features_are_reported() {
    let (_, parser) = parse_source("a?.b;\nx => x;", ParserOptions::es5());
    let count = error_count(&parser, diagnostic_codes::FEATURE_DISABLED);
    assert_eq!(count, 2, "Expected 2 feature errors, got {}", count);
    assert!(
        parser
            .errors()
            .iter()
            .any(|d| d.message.contains("Arrow functions")),
        "{:?}",
        parser.errors()
    );
}

#[test]
fn test_disabled_feature_still_builds_node() {
    let (program, _) = parse_source("a ?? b;", ParserOptions::es5());
    let Statement::Expression(statement) = &program.body[0] else {
        panic!("expected an expression statement");
    };
    assert!(matches!(statement.expression, Expression::Logical(_)));
}

// =============================================================================
// Warnings
// =============================================================================

#[test]
fn test_trailing_comma_warnings() {
    let (_, parser) = parse_script("f(a, b,);\nfunction g(a,) {}");
    let count = warning_count(&parser, diagnostic_codes::TRAILING_COMMA);
    assert_eq!(count, 2, "Expected 2 trailing comma warnings, got {}", count);
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_array_hole_warning_retracted_for_patterns() {
    let (_, parser) = parse_script("[1, , 2];");
    assert_eq!(warning_count(&parser, diagnostic_codes::ARRAY_HOLE), 1);

    let (_, parser) = parse_script("[a, , b] = c;");
    assert_eq!(warning_count(&parser, diagnostic_codes::ARRAY_HOLE), 0);
}

#[test]
fn test_debugger_and_empty_body_warnings() {
    let (_, parser) = parse_script("debugger;\nif (x);");
    assert_eq!(warning_count(&parser, diagnostic_codes::DEBUGGER_STATEMENT), 1);
    assert_eq!(warning_count(&parser, diagnostic_codes::EMPTY_STATEMENT_BODY), 1);
    assert!(parser.errors().is_empty(), "{:?}", parser.errors());
}

#[test]
fn test_unsupported_modes_warn() {
    let options = ParserOptions {
        jsx_mode: true,
        typescript_mode: true,
        ..ParserOptions::default()
    };
    let (_, parser) = parse_source("a;", options);
    assert_eq!(warning_count(&parser, diagnostic_codes::UNSUPPORTED_MODE), 2);
}
