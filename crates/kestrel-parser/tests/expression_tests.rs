//! Expression parsing: precedence, associativity and node shapes.

use kestrel_parser::ast::*;
use kestrel_parser::printer::expression_to_sexpr;
use kestrel_parser::{ParserOptions, parse_expression};

fn sexpr(source: &str) -> String {
    let result = parse_expression(source, ParserOptions::default());
    assert!(result.errors.is_empty(), "{source}: {:?}", result.errors);
    expression_to_sexpr(&result.expression)
}

fn expression(source: &str) -> Expression {
    let result = parse_expression(source, ParserOptions::default());
    assert!(result.errors.is_empty(), "{source}: {:?}", result.errors);
    result.expression
}

// =============================================================================
// Precedence and associativity
// =============================================================================

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    assert_eq!(sexpr("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(sexpr("1 * 2 + 3"), "(+ (* 1 2) 3)");
}

#[test]
fn test_left_associative_operators() {
    assert_eq!(sexpr("a + b - c"), "(- (+ a b) c)");
    assert_eq!(sexpr("a / b / c"), "(/ (/ a b) c)");
    assert_eq!(sexpr("a[b][c]"), "([] ([] a b) c)");
}

#[test]
fn test_right_associative_operators() {
    assert_eq!(sexpr("2 ** 3 ** 2"), "(** 2 (** 3 2))");
    assert_eq!(sexpr("a = b = 3"), "(= a (= b 3))");
    assert_eq!(sexpr("a = b += c"), "(= a (+= b c))");
    assert_eq!(sexpr("a ? b : c ? d : e"), "(? a b (? c d e))");
}

#[test]
fn test_logical_and_equality_levels() {
    // `&&`, `||` and `??` share one left-associative level, as do `&`, `|`
    // and `^`.
    assert_eq!(sexpr("a || b && c"), "(&& (|| a b) c)");
    assert_eq!(sexpr("a && b || c"), "(|| (&& a b) c)");
    assert_eq!(sexpr("a == b < c"), "(== a (< b c))");
    assert_eq!(sexpr("a | b ^ c & d"), "(& (^ (| a b) c) d)");
    assert_eq!(sexpr("a | b == c"), "(| a (== b c))");
    assert_eq!(sexpr("a << 1 + 2"), "(<< a (+ 1 2))");
    assert_eq!(sexpr("a ?? b"), "(?? a b)");
}

#[test]
fn test_relational_keywords() {
    assert_eq!(sexpr("a in b"), "(in a b)");
    assert_eq!(sexpr("a instanceof B"), "(instanceof a B)");
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(sexpr("!a.b"), "(! (. a b))");
    assert_eq!(sexpr("typeof x === \"y\""), "(=== (typeof x) \"y\")");
    assert_eq!(sexpr("void 0"), "(void 0)");
    assert_eq!(sexpr("-a * b"), "(* (- a) b)");
}

#[test]
fn test_update_expressions() {
    assert_eq!(sexpr("x++"), "(postfix ++ x)");
    assert_eq!(sexpr("--x"), "(prefix -- x)");
    assert_eq!(sexpr("a.b++"), "(postfix ++ (. a b))");
}

#[test]
fn test_sequence_is_lowest() {
    assert_eq!(sexpr("a, b = c"), "(, a (= b c))");
}

#[test]
fn test_parentheses_regroup_without_nodes() {
    assert_eq!(sexpr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    let Expression::Identifier(id) = expression("(a)") else {
        panic!("parentheses should not produce a node");
    };
    assert_eq!(id.name, "a");
}

#[test]
fn test_parenthesized_span_includes_parentheses() {
    let parsed = expression("(a)");
    assert_eq!(parsed.span().start.offset, 0);
    assert_eq!(parsed.span().end.offset, 3);
}

// =============================================================================
// Member access, calls and new
// =============================================================================

#[test]
fn test_calls_and_members() {
    assert_eq!(sexpr("a.b(c)"), "(call (. a b) c)");
    assert_eq!(sexpr("f(a, ...b)"), "(call f a (... b))");
    assert_eq!(sexpr("a.b.c()"), "(call (. (. a b) c))");
}

#[test]
fn test_new_expressions() {
    assert_eq!(sexpr("new X"), "(new X)");
    assert_eq!(sexpr("new Foo(a).b"), "(. (new Foo a) b)");
    assert_eq!(sexpr("new a.B(1)"), "(new (. a B) 1)");
}

#[test]
fn test_optional_chains() {
    assert_eq!(sexpr("a?.b.c"), "(chain (. (?. a b) c))");
    assert_eq!(sexpr("f?.(x)"), "(chain (call?. f x))");
    assert_eq!(sexpr("a?.[0]"), "(chain (?.[] a 0))");
}

#[test]
fn test_keyword_property_names() {
    assert_eq!(sexpr("a.if.class"), "(. (. a if) class)");
}

// =============================================================================
// Functions and classes
// =============================================================================

#[test]
fn test_arrow_functions() {
    assert_eq!(sexpr("x => x * 2"), "(=> (x) (* x 2))");
    assert_eq!(sexpr("() => 1"), "(=> () 1)");
    assert_eq!(sexpr("(a, b) => { return a; }"), "(=> (a b) (block (return a)))");
    assert_eq!(sexpr("(a = 1, ...rest) => a"), "(=> ((default a 1) (... rest)) a)");
}

#[test]
fn test_async_arrows_and_async_calls() {
    assert_eq!(sexpr("async x => await x"), "(async=> (x) (await x))");
    assert_eq!(sexpr("async (a) => a"), "(async=> (a) a)");
    assert_eq!(sexpr("async(a)"), "(call async a)");
}

#[test]
fn test_arrow_body_is_assignment_expression() {
    assert_eq!(sexpr("f = x => y = x"), "(= f (=> (x) (= y x)))");
}

#[test]
fn test_function_and_class_expressions() {
    assert_eq!(sexpr("function* () { yield; }"), "(function* _ () (yield))");
    assert_eq!(sexpr("async function f(a) {}"), "(async-function f (a))");
    assert_eq!(sexpr("class extends B {}"), "(class _ (extends B))");
}

#[test]
fn test_dynamic_import() {
    assert_eq!(sexpr("import(\"m\")"), "(import \"m\")");
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_numeric_literals() {
    assert_eq!(sexpr("0x10 + 1e3 + .5"), "(+ (+ 16 1000) 0.5)");
    assert_eq!(sexpr("0b101 + 0o17 + 1_000"), "(+ (+ 5 15) 1000)");
    assert_eq!(sexpr("123n"), "123n");
}

#[test]
fn test_string_literals_are_cooked() {
    let Expression::Literal(literal) = expression(r#""a\nbA""#) else {
        panic!("expected a literal");
    };
    assert_eq!(literal.value, LiteralValue::String("a\nbA".to_string()));
}

#[test]
fn test_keyword_literals() {
    assert_eq!(sexpr("[true, false, null, undefined]"), "(array true false null undefined)");
}

#[test]
fn test_regex_and_division() {
    assert_eq!(sexpr("/ab+c/gi.test(s)"), "(call (. /ab+c/gi test) s)");
    assert_eq!(sexpr("a / 2 / b"), "(/ (/ a 2) b)");

    let Expression::Literal(literal) = expression("/[/]x/u") else {
        panic!("expected a regex literal");
    };
    assert_eq!(
        literal.value,
        LiteralValue::RegExp {
            pattern: "[/]x".to_string(),
            flags: "u".to_string(),
        }
    );
}

#[test]
fn test_templates() {
    assert_eq!(sexpr("`x`"), "(template \"x\")");
    assert_eq!(sexpr("`a${b}c${d}`"), "(template \"a\" b \"c\" d \"\")");
    assert_eq!(sexpr("tag`a${b}c`"), "(tagged tag (template \"a\" b \"c\"))");
}

#[test]
fn test_template_quasis_outnumber_expressions() {
    let Expression::Template(template) = expression("`${a}${b}`") else {
        panic!("expected a template");
    };
    assert_eq!(template.expressions.len(), 2);
    assert_eq!(template.quasis.len(), 3);
    assert!(template.quasis[2].tail);
}

#[test]
fn test_nested_template_in_substitution() {
    assert_eq!(sexpr("`a${`b${c}`}`"), "(template \"a\" (template \"b\" c \"\") \"\")");
}

// =============================================================================
// Array and object literals
// =============================================================================

#[test]
fn test_array_literal_holes_and_spread() {
    let result = parse_expression("[1, , ...a]", ParserOptions::default());
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(expression_to_sexpr(&result.expression), "(array 1 <hole> (... a))");
}

#[test]
fn test_object_literal_members() {
    assert_eq!(sexpr("({a, b: 1, ...c})"), "(object (: a a) (: b 1) (... c))");
    assert_eq!(sexpr("({[k]: v, \"s\": 2})"), "(object (: (computed k) v) (: \"s\" 2))");
}

#[test]
fn test_object_accessors_and_methods() {
    let Expression::Object(object) = expression("({ get a() { return 1; }, set a(v) {}, m() {} })")
    else {
        panic!("expected an object literal");
    };
    let kinds: Vec<(PropertyKind, bool)> = object
        .properties
        .iter()
        .map(|member| match member {
            ObjectMember::Property(property) => (property.kind, property.method),
            ObjectMember::Spread(_) => panic!("unexpected spread"),
        })
        .collect();
    assert_eq!(
        kinds,
        [
            (PropertyKind::Get, false),
            (PropertyKind::Set, false),
            (PropertyKind::Init, true),
        ]
    );
}

#[test]
fn test_get_and_set_as_plain_keys() {
    assert_eq!(sexpr("({get: 1, set})"), "(object (: get 1) (: set set))");
}

// =============================================================================
// Assignment targets
// =============================================================================

#[test]
fn test_destructuring_assignment() {
    assert_eq!(
        sexpr("[a, , b = 1, ...c] = d"),
        "(= (array-pattern a <hole> (default b 1) (... c)) d)"
    );
    assert_eq!(sexpr("({a, b: {c}} = d)"), "(= (object-pattern (: a a) (: b (object-pattern (: c c)))) d)");
}

#[test]
fn test_member_assignment_target() {
    let Expression::Assignment(assignment) = expression("a.b = 1") else {
        panic!("expected an assignment");
    };
    assert!(matches!(*assignment.target, Pattern::Member(_)));
}

#[test]
fn test_trailing_tokens_are_reported() {
    let result = parse_expression("a b", ParserOptions::default());
    assert_eq!(result.errors.len(), 1, "{:?}", result.errors);
    assert_eq!(expression_to_sexpr(&result.expression), "a");
}
