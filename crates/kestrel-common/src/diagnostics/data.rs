//! Diagnostic codes and message templates.
//!
//! Lexical diagnostics live in 1000..1100, syntactic diagnostics in
//! 1100..1300 and warnings from 2000 up. Templates use `{0}`, `{1}`, ...
//! placeholders filled by [`super::format_message`].

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    // Lexical
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1001;
    pub const UNTERMINATED_COMMENT: u32 = 1002;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1003;
    pub const UNTERMINATED_REGULAR_EXPRESSION: u32 = 1004;
    pub const INVALID_ESCAPE_SEQUENCE: u32 = 1005;
    pub const INVALID_NUMERIC_LITERAL: u32 = 1006;
    pub const UNEXPECTED_CHARACTER: u32 = 1007;

    // Syntactic
    pub const TOKEN_EXPECTED: u32 = 1100;
    pub const UNEXPECTED_TOKEN: u32 = 1101;
    pub const EXPRESSION_EXPECTED: u32 = 1102;
    pub const IDENTIFIER_EXPECTED: u32 = 1103;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1104;
    pub const UNEXPECTED_END_OF_INPUT: u32 = 1105;
    pub const SEMICOLON_EXPECTED: u32 = 1106;
    pub const INVALID_ASSIGNMENT_TARGET: u32 = 1107;
    pub const BREAK_OUTSIDE_LOOP_OR_SWITCH: u32 = 1108;
    pub const CONTINUE_OUTSIDE_LOOP: u32 = 1109;
    pub const UNDEFINED_LABEL: u32 = 1110;
    pub const DUPLICATE_LABEL: u32 = 1111;
    pub const RETURN_OUTSIDE_FUNCTION: u32 = 1112;
    pub const YIELD_OUTSIDE_GENERATOR: u32 = 1113;
    pub const AWAIT_OUTSIDE_ASYNC: u32 = 1114;
    pub const WITH_IN_STRICT_MODE: u32 = 1115;
    pub const DELETE_IDENTIFIER_IN_STRICT_MODE: u32 = 1116;
    pub const RESERVED_WORD_AS_IDENTIFIER: u32 = 1117;
    pub const MODULE_SYNTAX_OUTSIDE_MODULE: u32 = 1118;
    pub const MODULE_SYNTAX_NOT_TOP_LEVEL: u32 = 1119;
    pub const UNARY_OPERAND_OF_EXPONENT: u32 = 1120;
    pub const LINE_BREAK_BEFORE_ARROW: u32 = 1121;
    pub const LINE_BREAK_AFTER_THROW: u32 = 1122;
    pub const NEW_TARGET_OUTSIDE_FUNCTION: u32 = 1123;
    pub const DUPLICATE_CONSTRUCTOR: u32 = 1124;
    pub const FEATURE_DISABLED: u32 = 1125;
    pub const TOO_MANY_DIAGNOSTICS: u32 = 1126;
    pub const MAX_NESTING_DEPTH_EXCEEDED: u32 = 1127;
    pub const CATCH_OR_FINALLY_EXPECTED: u32 = 1128;
    pub const MULTIPLE_DEFAULT_CLAUSES: u32 = 1129;
    pub const FOR_IN_OF_SINGLE_DECLARATION: u32 = 1130;
    pub const FOR_IN_OF_INITIALIZER: u32 = 1131;
    pub const REST_ELEMENT_MUST_BE_LAST: u32 = 1132;
    pub const CONST_WITHOUT_INITIALIZER: u32 = 1133;
    pub const PRIVATE_NAME_OUTSIDE_CLASS: u32 = 1134;
    pub const GETTER_WITH_PARAMETERS: u32 = 1135;
    pub const SETTER_PARAMETER_COUNT: u32 = 1136;
    pub const INVALID_DESTRUCTURING_TARGET: u32 = 1137;
    pub const REST_PARAMETER_WITH_INITIALIZER: u32 = 1138;

    // Warnings
    pub const TRAILING_COMMA: u32 = 2001;
    pub const ARRAY_HOLE: u32 = 2002;
    pub const RESERVED_WORD_AS_IDENTIFIER_SLOPPY: u32 = 2003;
    pub const UNSUPPORTED_MODE: u32 = 2004;
    pub const DEBUGGER_STATEMENT: u32 = 2005;
    pub const EMPTY_STATEMENT_BODY: u32 = 2006;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const UNTERMINATED_COMMENT: &str = "'*/' expected.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const UNTERMINATED_REGULAR_EXPRESSION: &str = "Unterminated regular expression literal.";
    pub const INVALID_ESCAPE_SEQUENCE: &str = "Invalid escape sequence '{0}'.";
    pub const INVALID_NUMERIC_LITERAL: &str = "Invalid numeric literal '{0}'.";
    pub const UNEXPECTED_CHARACTER: &str = "Invalid character '{0}'.";

    pub const TOKEN_EXPECTED: &str = "'{0}' expected.";
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token '{0}'.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const UNEXPECTED_END_OF_INPUT: &str = "Unexpected end of input.";
    pub const SEMICOLON_EXPECTED: &str = "';' expected.";
    pub const INVALID_ASSIGNMENT_TARGET: &str = "Invalid left-hand side in assignment.";
    pub const BREAK_OUTSIDE_LOOP_OR_SWITCH: &str =
        "A 'break' statement can only be used within an enclosing iteration or switch statement.";
    pub const CONTINUE_OUTSIDE_LOOP: &str =
        "A 'continue' statement can only be used within an enclosing iteration statement.";
    pub const UNDEFINED_LABEL: &str = "Undefined label '{0}'.";
    pub const DUPLICATE_LABEL: &str = "Duplicate label '{0}'.";
    pub const RETURN_OUTSIDE_FUNCTION: &str =
        "A 'return' statement can only be used within a function body.";
    pub const YIELD_OUTSIDE_GENERATOR: &str =
        "A 'yield' expression is only allowed in a generator body.";
    pub const AWAIT_OUTSIDE_ASYNC: &str = "'await' expressions are only allowed within async functions and at the top levels of modules.";
    pub const WITH_IN_STRICT_MODE: &str = "'with' statements are not allowed in strict mode.";
    pub const DELETE_IDENTIFIER_IN_STRICT_MODE: &str =
        "'delete' cannot be called on an identifier in strict mode.";
    pub const RESERVED_WORD_AS_IDENTIFIER: &str =
        "'{0}' is a reserved word and cannot be used as an identifier.";
    pub const MODULE_SYNTAX_OUTSIDE_MODULE: &str =
        "'{0}' declarations may only appear in module code.";
    pub const MODULE_SYNTAX_NOT_TOP_LEVEL: &str =
        "'{0}' declarations may only appear at the top level of a module.";
    pub const UNARY_OPERAND_OF_EXPONENT: &str = "An unary expression with the '{0}' operator is not allowed in the left-hand side of an exponentiation expression.";
    pub const LINE_BREAK_BEFORE_ARROW: &str = "Line terminator not permitted before arrow.";
    pub const LINE_BREAK_AFTER_THROW: &str = "Line break not permitted after 'throw'.";
    pub const NEW_TARGET_OUTSIDE_FUNCTION: &str =
        "Meta-property 'new.target' is only allowed in the body of a function.";
    pub const DUPLICATE_CONSTRUCTOR: &str = "Multiple constructor implementations are not allowed.";
    pub const FEATURE_DISABLED: &str = "{0} are disabled by the current parser options.";
    pub const TOO_MANY_DIAGNOSTICS: &str =
        "Too many errors; further diagnostics for this file are suppressed.";
    pub const MAX_NESTING_DEPTH_EXCEEDED: &str = "Maximum nesting depth exceeded.";
    pub const CATCH_OR_FINALLY_EXPECTED: &str = "'catch' or 'finally' expected.";
    pub const MULTIPLE_DEFAULT_CLAUSES: &str =
        "A 'default' clause cannot appear more than once in a 'switch' statement.";
    pub const FOR_IN_OF_SINGLE_DECLARATION: &str =
        "Only a single variable declaration is allowed in a 'for...{0}' statement.";
    pub const FOR_IN_OF_INITIALIZER: &str =
        "The variable declaration of a 'for...{0}' statement cannot have an initializer.";
    pub const REST_ELEMENT_MUST_BE_LAST: &str = "A rest element must be last in a destructuring pattern.";
    pub const CONST_WITHOUT_INITIALIZER: &str = "'const' declarations must be initialized.";
    pub const PRIVATE_NAME_OUTSIDE_CLASS: &str =
        "Private identifiers are not allowed outside class bodies.";
    pub const GETTER_WITH_PARAMETERS: &str = "A 'get' accessor cannot have parameters.";
    pub const SETTER_PARAMETER_COUNT: &str = "A 'set' accessor must have exactly one parameter.";
    pub const INVALID_DESTRUCTURING_TARGET: &str = "Invalid destructuring assignment target.";
    pub const REST_PARAMETER_WITH_INITIALIZER: &str = "A rest parameter cannot have an initializer.";

    pub const TRAILING_COMMA: &str = "Trailing comma in {0}.";
    pub const ARRAY_HOLE: &str = "Empty element in array literal.";
    pub const RESERVED_WORD_AS_IDENTIFIER_SLOPPY: &str =
        "'{0}' is a reserved word; using it as an identifier is not allowed in strict mode.";
    pub const UNSUPPORTED_MODE: &str = "{0} syntax is not supported; the option is ignored.";
    pub const DEBUGGER_STATEMENT: &str = "'debugger' statement.";
    pub const EMPTY_STATEMENT_BODY: &str = "Empty statement used as the body of '{0}'.";
}

macro_rules! messages {
    ($($name:ident => $category:ident),* $(,)?) => {
        pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
            $(DiagnosticMessage {
                code: diagnostic_codes::$name,
                category: DiagnosticCategory::$category,
                message: diagnostic_messages::$name,
            },)*
        ];
    };
}

messages! {
    UNTERMINATED_STRING_LITERAL => Error,
    UNTERMINATED_COMMENT => Error,
    UNTERMINATED_TEMPLATE_LITERAL => Error,
    UNTERMINATED_REGULAR_EXPRESSION => Error,
    INVALID_ESCAPE_SEQUENCE => Error,
    INVALID_NUMERIC_LITERAL => Error,
    UNEXPECTED_CHARACTER => Error,
    TOKEN_EXPECTED => Error,
    UNEXPECTED_TOKEN => Error,
    EXPRESSION_EXPECTED => Error,
    IDENTIFIER_EXPECTED => Error,
    DECLARATION_OR_STATEMENT_EXPECTED => Error,
    UNEXPECTED_END_OF_INPUT => Error,
    SEMICOLON_EXPECTED => Error,
    INVALID_ASSIGNMENT_TARGET => Error,
    BREAK_OUTSIDE_LOOP_OR_SWITCH => Error,
    CONTINUE_OUTSIDE_LOOP => Error,
    UNDEFINED_LABEL => Error,
    DUPLICATE_LABEL => Error,
    RETURN_OUTSIDE_FUNCTION => Error,
    YIELD_OUTSIDE_GENERATOR => Error,
    AWAIT_OUTSIDE_ASYNC => Error,
    WITH_IN_STRICT_MODE => Error,
    DELETE_IDENTIFIER_IN_STRICT_MODE => Error,
    RESERVED_WORD_AS_IDENTIFIER => Error,
    MODULE_SYNTAX_OUTSIDE_MODULE => Error,
    MODULE_SYNTAX_NOT_TOP_LEVEL => Error,
    UNARY_OPERAND_OF_EXPONENT => Error,
    LINE_BREAK_BEFORE_ARROW => Error,
    LINE_BREAK_AFTER_THROW => Error,
    NEW_TARGET_OUTSIDE_FUNCTION => Error,
    DUPLICATE_CONSTRUCTOR => Error,
    FEATURE_DISABLED => Error,
    TOO_MANY_DIAGNOSTICS => Error,
    MAX_NESTING_DEPTH_EXCEEDED => Error,
    CATCH_OR_FINALLY_EXPECTED => Error,
    MULTIPLE_DEFAULT_CLAUSES => Error,
    FOR_IN_OF_SINGLE_DECLARATION => Error,
    FOR_IN_OF_INITIALIZER => Error,
    REST_ELEMENT_MUST_BE_LAST => Error,
    CONST_WITHOUT_INITIALIZER => Error,
    PRIVATE_NAME_OUTSIDE_CLASS => Error,
    GETTER_WITH_PARAMETERS => Error,
    SETTER_PARAMETER_COUNT => Error,
    INVALID_DESTRUCTURING_TARGET => Error,
    REST_PARAMETER_WITH_INITIALIZER => Error,
    TRAILING_COMMA => Warning,
    ARRAY_HOLE => Warning,
    RESERVED_WORD_AS_IDENTIFIER_SLOPPY => Warning,
    UNSUPPORTED_MODE => Warning,
    DEBUGGER_STATEMENT => Warning,
    EMPTY_STATEMENT_BODY => Warning,
}
