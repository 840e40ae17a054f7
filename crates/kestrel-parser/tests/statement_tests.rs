//! Statement parsing, automatic semicolon insertion and classes.

use kestrel_parser::ast::*;
use kestrel_parser::printer::to_sexpr;
use kestrel_parser::{ParseResult, ParserOptions, parse};

fn parse_ok(source: &str) -> ParseResult {
    let result = parse(source, ParserOptions::default());
    assert!(result.errors.is_empty(), "{source}: {:?}", result.errors);
    result
}

fn sexpr(source: &str) -> String {
    to_sexpr(&parse_ok(source).program)
}

// =============================================================================
// Automatic semicolon insertion
// =============================================================================

#[test]
fn test_asi_after_return() {
    // `return` followed by a line break returns nothing.
    assert_eq!(
        sexpr("function f() { return\na }"),
        "(program (function f () (return) a))"
    );
}

#[test]
fn test_asi_before_prefix_update() {
    assert_eq!(sexpr("a\n++b"), "(program a (prefix ++ b))");
    assert_eq!(sexpr("x\n++\ny"), "(program x (prefix ++ y))");
}

#[test]
fn test_no_asi_before_call_parenthesis() {
    assert_eq!(sexpr("a = b\n(c)"), "(program (= a (call b c)))");
}

#[test]
fn test_asi_between_declarations() {
    assert_eq!(
        sexpr("let x = 1\nlet y = 2"),
        "(program (let (= x 1)) (let (= y 2)))"
    );
}

#[test]
fn test_asi_before_closing_brace_and_eof() {
    assert_eq!(sexpr("{ a } b"), "(program (block a) b)");
    assert_eq!(sexpr("a"), "(program a)");
}

#[test]
fn test_do_while_semicolon_is_optional() {
    assert_eq!(sexpr("do x; while (y) z"), "(program (do-while x y) z)");
}

#[test]
fn test_break_label_on_next_line() {
    assert_eq!(
        sexpr("l: while (1) { break\nl }"),
        "(program (label l (while 1 (block (break) l))))"
    );
}

#[test]
fn test_async_line_break_before_function() {
    assert_eq!(
        sexpr("async\nfunction f() {}"),
        "(program async (function f ()))"
    );
}

#[test]
fn test_yield_without_argument_before_line_break() {
    assert_eq!(
        sexpr("function* g() { yield\na }"),
        "(program (function* g () (yield) a))"
    );
}

#[test]
fn test_missing_semicolon_on_same_line_is_an_error() {
    let result = parse("a b", ParserOptions::default());
    assert_eq!(result.errors.len(), 1, "{:?}", result.errors);
    assert_eq!(to_sexpr(&result.program), "(program a b)");
}

// =============================================================================
// Directives
// =============================================================================

#[test]
fn test_directive_prologue() {
    assert_eq!(
        sexpr("\"use strict\"; 'other'; a;"),
        "(program (directive \"use strict\") (directive \"other\") a)"
    );
}

#[test]
fn test_string_expression_is_not_directive() {
    assert_eq!(sexpr("\"a\" + b;"), "(program (+ \"a\" b))");
    assert_eq!(sexpr("a; \"use strict\";"), "(program a \"use strict\")");
}

// =============================================================================
// Control flow
// =============================================================================

#[test]
fn test_if_else() {
    assert_eq!(sexpr("if (a) b; else c;"), "(program (if a b c))");
    assert_eq!(
        sexpr("if (a) if (b) c; else d;"),
        "(program (if a (if b c d)))"
    );
}

#[test]
fn test_classic_for() {
    assert_eq!(
        sexpr("for (let i = 0; i < n; i++) {}"),
        "(program (for (let (= i 0)) (< i n) (postfix ++ i) (block)))"
    );
    assert_eq!(sexpr("for (;;) {}"), "(program (for _ _ _ (block)))");
}

#[test]
fn test_for_in_and_for_of() {
    assert_eq!(
        sexpr("for (const k in o) {}"),
        "(program (for-in (const k) o (block)))"
    );
    assert_eq!(sexpr("for (x of xs) {}"), "(program (for-of x xs (block)))");
    assert_eq!(sexpr("for (a.b in c) {}"), "(program (for-in (. a b) c (block)))");
    assert_eq!(
        sexpr("for (let [a, b] of c) {}"),
        "(program (for-of (let (array-pattern a b)) c (block)))"
    );
}

#[test]
fn test_in_allowed_inside_parentheses_of_for_init() {
    assert_eq!(
        sexpr("for (var a = (b in c); a; ) {}"),
        "(program (for (var (= a (in b c))) a _ (block)))"
    );
}

#[test]
fn test_for_await() {
    assert_eq!(
        sexpr("async function f() { for await (const x of y) {} }"),
        "(program (async-function f () (for-await-of (const x) y (block))))"
    );
}

#[test]
fn test_switch() {
    assert_eq!(
        sexpr("switch (x) { case 1: a; break; default: b }"),
        "(program (switch x (case 1 a (break)) (default b)))"
    );
}

#[test]
fn test_try_forms() {
    assert_eq!(
        sexpr("try { a } catch (e) { b } finally { c }"),
        "(program (try (block a) (catch e (block b)) (finally (block c))))"
    );
    assert_eq!(sexpr("try {} catch {}"), "(program (try (block) (catch _ (block))))");
    assert_eq!(
        sexpr("try {} catch ({ message }) {}"),
        "(program (try (block) (catch (object-pattern (: message message)) (block))))"
    );
}

#[test]
fn test_simple_statements() {
    assert_eq!(sexpr("while (a) b;"), "(program (while a b))");
    assert_eq!(
        sexpr("throw new Error(\"x\");"),
        "(program (throw (new Error \"x\")))"
    );
    assert_eq!(sexpr("with (o) x;"), "(program (with o x))");
    assert_eq!(sexpr("debugger;"), "(program (debugger))");
    assert_eq!(sexpr(";"), "(program (empty))");
}

#[test]
fn test_let_as_identifier() {
    let result = parse("let = 1;", ParserOptions::default());
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(to_sexpr(&result.program), "(program (= let 1))");
}

#[test]
fn test_variable_declarations() {
    assert_eq!(sexpr("var a = 1, b;"), "(program (var (= a 1) b))");
    assert_eq!(
        sexpr("const {a, b: [c], ...d} = e;"),
        "(program (const (= (object-pattern (: a a) (: b (array-pattern c)) (... d)) e)))"
    );
    assert_eq!(
        sexpr("let [x = 1, ...y] = z;"),
        "(program (let (= (array-pattern (default x 1) (... y)) z)))"
    );
}

#[test]
fn test_function_parameters() {
    assert_eq!(
        sexpr("function f(a, b = 2, {c}, ...d) {}"),
        "(program (function f (a (default b 2) (object-pattern (: c c)) (... d))))"
    );
}

#[test]
fn test_function_body_directives() {
    let result = parse_ok("function f() { 'use strict'; return 1; }");
    let Statement::Function(function) = &result.program.body[0] else {
        panic!("expected a function declaration");
    };
    assert!(function.body.has_use_strict());
    assert_eq!(function.body.statements.len(), 1);
}

// =============================================================================
// Classes
// =============================================================================

#[test]
fn test_class_members() {
    assert_eq!(
        sexpr("class A extends B { constructor() { super(); } static x = 1; #y; }"),
        "(program (class A (extends B) (constructor constructor (function _ () (call super))) \
         (field static x 1) (field #y)))"
    );
}

#[test]
fn test_class_method_kinds() {
    let result = parse_ok(
        "class A { get z() { return 1; } set z(v) {} *gen() {} async m() {} static s() {} }",
    );
    let Statement::Class(class) = &result.program.body[0] else {
        panic!("expected a class declaration");
    };
    let kinds: Vec<(MethodKind, bool)> = class
        .body
        .iter()
        .map(|member| match member {
            ClassMember::Method(method) => (method.kind, method.is_static),
            other => panic!("unexpected member {other:?}"),
        })
        .collect();
    assert_eq!(
        kinds,
        [
            (MethodKind::Get, false),
            (MethodKind::Set, false),
            (MethodKind::Method, false),
            (MethodKind::Method, false),
            (MethodKind::Method, true),
        ]
    );
    let ClassMember::Method(generator) = &class.body[2] else {
        unreachable!();
    };
    assert!(generator.value.is_generator);
    let ClassMember::Method(method) = &class.body[3] else {
        unreachable!();
    };
    assert!(method.value.is_async);
}

#[test]
fn test_class_static_block() {
    assert_eq!(
        sexpr("class A { static { init(); } }"),
        "(program (class A (static-block (call init))))"
    );
}

#[test]
fn test_modifier_words_as_member_names() {
    assert_eq!(
        sexpr("class A { static() {} get; set = 1; }"),
        "(program (class A (method static (function _ ())) (field get) (field set 1)))"
    );
}

#[test]
fn test_class_fields_end_at_line_breaks() {
    assert_eq!(sexpr("class A { a\nb = 2 }"), "(program (class A (field a) (field b 2)))");
}

#[test]
fn test_class_body_is_strict() {
    let result = parse("class A { m() { with (o) {} } }", ParserOptions::default());
    assert_eq!(result.errors.len(), 1, "{:?}", result.errors);
}

// =============================================================================
// Comments
// =============================================================================

#[test]
fn test_comments_are_collected() {
    let result = parse_ok("// line\na; /* block */ b;");
    let kinds: Vec<CommentKind> = result.program.comments.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, [CommentKind::Line, CommentKind::Block]);
    assert_eq!(result.program.comments[1].text, "/* block */");
    assert_eq!(result.program.body.len(), 2);
}

// =============================================================================
// Regular expressions after `)` and `}`
// =============================================================================

#[test]
fn test_regex_after_control_header() {
    assert_eq!(
        sexpr("if (x) /ab+c/.test(s);"),
        "(program (if x (call (. /ab+c/ test) s)))"
    );
    assert_eq!(
        sexpr("while (x) /a/.test(y);"),
        "(program (while x (call (. /a/ test) y)))"
    );
    assert_eq!(
        sexpr("if (x) /=a/.test(s);"),
        "(program (if x (call (. /=a/ test) s)))"
    );
}

#[test]
fn test_regex_after_block() {
    assert_eq!(
        sexpr("{}\n/ab/g.exec(s);"),
        "(program (block) (call (. /ab/g exec) s))"
    );
}

#[test]
fn test_division_after_parenthesis_is_kept() {
    assert_eq!(sexpr("(a) / b / c;"), "(program (/ (/ a b) c))");
}

#[test]
fn test_regex_body_that_scanned_as_string_start() {
    // The first scan read `'/.test(s);` as an unterminated string.
    let result = parse_ok("if (x) /'/.test(s);\ny;");
    assert!(result.lex_errors.is_empty(), "{:?}", result.lex_errors);
    assert_eq!(result.program.body.len(), 2);
}

#[test]
fn test_regex_with_brace_inside_template_substitution() {
    let result = parse_ok("`${ function () { if (x) /}/.test(y) } }`;");
    assert_eq!(result.program.body.len(), 1);
}
