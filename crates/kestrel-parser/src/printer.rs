//! Compact s-expression rendering of the syntax tree.
//!
//! Operators print in prefix form with their children, so structure (and
//! therefore precedence and associativity) is explicit:
//! `1 + 2 * 3` prints as `(+ 1 (* 2 3))`. Missing optional parts print as
//! `_`, error placeholders as `<error>`.

use crate::ast::*;

/// Render a whole program: `(program ...)`.
pub fn to_sexpr(program: &Program) -> String {
    let mut printer = Printer::default();
    printer.program(program);
    printer.out
}

pub fn statement_to_sexpr(statement: &Statement) -> String {
    let mut printer = Printer::default();
    printer.statement(statement);
    printer.out
}

pub fn expression_to_sexpr(expression: &Expression) -> String {
    let mut printer = Printer::default();
    printer.expression(expression);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn open(&mut self, head: &str) {
        self.out.push('(');
        self.out.push_str(head);
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn space(&mut self) {
        self.out.push(' ');
    }

    fn atom(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn missing(&mut self) {
        self.atom("_");
    }

    fn program(&mut self, program: &Program) {
        self.open("program");
        for directive in &program.directives {
            self.space();
            self.directive(directive);
        }
        for statement in &program.body {
            self.space();
            self.statement(statement);
        }
        self.close();
    }

    fn directive(&mut self, directive: &Directive) {
        self.open("directive ");
        self.string(&directive.value);
        self.close();
    }

    fn string(&mut self, value: &str) {
        self.out.push_str(&format!("{value:?}"));
    }

    fn statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.space();
            self.statement(statement);
        }
    }

    fn block(&mut self, block: &BlockStatement) {
        self.open("block");
        self.statements(&block.body);
        self.close();
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Block(block) => self.block(block),
            Statement::Empty(_) => self.atom("(empty)"),
            Statement::Debugger(_) => self.atom("(debugger)"),
            Statement::Error(_) => self.atom("<error>"),
            Statement::Expression(s) => self.expression(&s.expression),
            Statement::If(s) => {
                self.open("if ");
                self.expression(&s.test);
                self.space();
                self.statement(&s.consequent);
                if let Some(alternate) = &s.alternate {
                    self.space();
                    self.statement(alternate);
                }
                self.close();
            }
            Statement::Switch(s) => {
                self.open("switch ");
                self.expression(&s.discriminant);
                for case in &s.cases {
                    self.space();
                    match &case.test {
                        Some(test) => {
                            self.open("case ");
                            self.expression(test);
                        }
                        None => self.open("default"),
                    }
                    self.statements(&case.consequent);
                    self.close();
                }
                self.close();
            }
            Statement::For(s) => {
                self.open("for ");
                match &s.init {
                    Some(ForInit::Variable(declaration)) => self.variable_declaration(declaration),
                    Some(ForInit::Expression(expression)) => self.expression(expression),
                    None => self.missing(),
                }
                self.space();
                self.optional_expression(s.test.as_ref());
                self.space();
                self.optional_expression(s.update.as_ref());
                self.space();
                self.statement(&s.body);
                self.close();
            }
            Statement::ForIn(s) => {
                self.open("for-in ");
                self.for_head(&s.left);
                self.space();
                self.expression(&s.right);
                self.space();
                self.statement(&s.body);
                self.close();
            }
            Statement::ForOf(s) => {
                self.open(if s.is_await { "for-await-of " } else { "for-of " });
                self.for_head(&s.left);
                self.space();
                self.expression(&s.right);
                self.space();
                self.statement(&s.body);
                self.close();
            }
            Statement::While(s) => {
                self.open("while ");
                self.expression(&s.test);
                self.space();
                self.statement(&s.body);
                self.close();
            }
            Statement::DoWhile(s) => {
                self.open("do-while ");
                self.statement(&s.body);
                self.space();
                self.expression(&s.test);
                self.close();
            }
            Statement::Try(s) => {
                self.open("try ");
                self.block(&s.block);
                if let Some(handler) = &s.handler {
                    self.space();
                    self.open("catch ");
                    match &handler.param {
                        Some(param) => self.pattern(param),
                        None => self.missing(),
                    }
                    self.space();
                    self.block(&handler.body);
                    self.close();
                }
                if let Some(finalizer) = &s.finalizer {
                    self.space();
                    self.open("finally ");
                    self.block(finalizer);
                    self.close();
                }
                self.close();
            }
            Statement::Throw(s) => {
                self.open("throw ");
                self.expression(&s.argument);
                self.close();
            }
            Statement::Return(s) => {
                self.open("return");
                if let Some(argument) = &s.argument {
                    self.space();
                    self.expression(argument);
                }
                self.close();
            }
            Statement::Break(s) => self.jump("break", s.label.as_ref()),
            Statement::Continue(s) => self.jump("continue", s.label.as_ref()),
            Statement::Labeled(s) => {
                self.open("label ");
                self.atom(&s.label.name);
                self.space();
                self.statement(&s.body);
                self.close();
            }
            Statement::With(s) => {
                self.open("with ");
                self.expression(&s.object);
                self.space();
                self.statement(&s.body);
                self.close();
            }
            Statement::Variable(declaration) => self.variable_declaration(declaration),
            Statement::Function(function) => self.function(function),
            Statement::Class(class) => self.class(class),
            Statement::Import(import) => {
                self.open("import ");
                self.literal(&import.source);
                for specifier in &import.specifiers {
                    self.space();
                    match specifier {
                        ImportSpecifier::Default { local, .. } => {
                            self.open("default ");
                            self.atom(&local.name);
                        }
                        ImportSpecifier::Namespace { local, .. } => {
                            self.open("* ");
                            self.atom(&local.name);
                        }
                        ImportSpecifier::Named { imported, local, .. } => {
                            self.open("as ");
                            self.atom(&imported.name);
                            self.space();
                            self.atom(&local.name);
                        }
                    }
                    self.close();
                }
                self.close();
            }
            Statement::Export(export) => self.export(export),
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&Identifier>) {
        self.open(keyword);
        if let Some(label) = label {
            self.space();
            self.atom(&label.name);
        }
        self.close();
    }

    fn export(&mut self, export: &ExportDeclaration) {
        match &export.kind {
            ExportKind::Named { specifiers, source } => {
                self.open("export");
                for specifier in specifiers {
                    self.space();
                    self.open("as ");
                    self.atom(&specifier.local.name);
                    self.space();
                    self.atom(&specifier.exported.name);
                    self.close();
                }
                if let Some(source) = source {
                    self.atom(" (from ");
                    self.literal(source);
                    self.close();
                }
                self.close();
            }
            ExportKind::All { exported, source } => {
                self.open("export-all ");
                match exported {
                    Some(exported) => self.atom(&exported.name),
                    None => self.missing(),
                }
                self.space();
                self.literal(source);
                self.close();
            }
            ExportKind::Default { value } => {
                self.open("export-default ");
                match value {
                    ExportDefaultValue::Function(function) => self.function(function),
                    ExportDefaultValue::Class(class) => self.class(class),
                    ExportDefaultValue::Expression(expression) => self.expression(expression),
                }
                self.close();
            }
            ExportKind::Declaration { declaration } => {
                self.open("export ");
                self.statement(declaration);
                self.close();
            }
        }
    }

    fn for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::Variable(declaration) => self.variable_declaration(declaration),
            ForHead::Pattern(pattern) => self.pattern(pattern),
        }
    }

    fn variable_declaration(&mut self, declaration: &VariableDeclaration) {
        self.open(declaration.kind.as_str());
        for declarator in &declaration.declarations {
            self.space();
            match &declarator.init {
                Some(init) => {
                    self.open("= ");
                    self.pattern(&declarator.id);
                    self.space();
                    self.expression(init);
                    self.close();
                }
                None => self.pattern(&declarator.id),
            }
        }
        self.close();
    }

    fn params(&mut self, params: &[Pattern]) {
        self.out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.space();
            }
            self.pattern(param);
        }
        self.close();
    }

    fn function(&mut self, function: &Function) {
        let head = match (function.is_async, function.is_generator) {
            (false, false) => "function ",
            (false, true) => "function* ",
            (true, false) => "async-function ",
            (true, true) => "async-function* ",
        };
        self.open(head);
        match &function.id {
            Some(id) => self.atom(&id.name),
            None => self.missing(),
        }
        self.space();
        self.params(&function.params);
        for directive in &function.body.directives {
            self.space();
            self.directive(directive);
        }
        self.statements(&function.body.statements);
        self.close();
    }

    fn class(&mut self, class: &Class) {
        self.open("class ");
        match &class.id {
            Some(id) => self.atom(&id.name),
            None => self.missing(),
        }
        if let Some(super_class) = &class.super_class {
            self.atom(" (extends ");
            self.expression(super_class);
            self.close();
        }
        for member in &class.body {
            self.space();
            match member {
                ClassMember::Method(method) => {
                    let kind = match method.kind {
                        MethodKind::Constructor => "constructor",
                        MethodKind::Method => "method",
                        MethodKind::Get => "get",
                        MethodKind::Set => "set",
                    };
                    self.open(kind);
                    if method.is_static {
                        self.atom(" static");
                    }
                    self.space();
                    self.property_key(&method.key);
                    self.space();
                    self.function(&method.value);
                    self.close();
                }
                ClassMember::Property(property) => {
                    self.open("field");
                    if property.is_static {
                        self.atom(" static");
                    }
                    self.space();
                    self.property_key(&property.key);
                    if let Some(value) = &property.value {
                        self.space();
                        self.expression(value);
                    }
                    self.close();
                }
                ClassMember::StaticBlock(block) => {
                    self.open("static-block");
                    self.statements(&block.body);
                    self.close();
                }
            }
        }
        self.close();
    }

    fn property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(id) => self.atom(&id.name),
            PropertyKey::PrivateName(name) => {
                self.out.push('#');
                self.atom(&name.name);
            }
            PropertyKey::Literal(literal) => self.literal(literal),
            PropertyKey::Computed(computed) => {
                self.open("computed ");
                self.expression(&computed.expression);
                self.close();
            }
        }
    }

    fn literal(&mut self, literal: &Literal) {
        match &literal.value {
            LiteralValue::String(value) => self.string(value),
            LiteralValue::Number(value) => self.out.push_str(&value.to_string()),
            LiteralValue::BigInt(digits) => {
                self.atom(digits);
                self.out.push('n');
            }
            LiteralValue::Boolean(value) => self.atom(if *value { "true" } else { "false" }),
            LiteralValue::Null => self.atom("null"),
            LiteralValue::Undefined => self.atom("undefined"),
            LiteralValue::RegExp { pattern, flags } => {
                self.out.push('/');
                self.atom(pattern);
                self.out.push('/');
                self.atom(flags);
            }
        }
    }

    fn template(&mut self, template: &TemplateLiteral) {
        self.open("template");
        for (i, quasi) in template.quasis.iter().enumerate() {
            self.space();
            self.string(&quasi.cooked);
            if let Some(expression) = template.expressions.get(i) {
                self.space();
                self.expression(expression);
            }
        }
        self.close();
    }

    fn optional_expression(&mut self, expression: Option<&Expression>) {
        match expression {
            Some(expression) => self.expression(expression),
            None => self.missing(),
        }
    }

    fn binary(&mut self, operator: &str, left: &Expression, right: &Expression) {
        self.open(operator);
        self.space();
        self.expression(left);
        self.space();
        self.expression(right);
        self.close();
    }

    fn member_property(&mut self, property: &MemberProperty) {
        match property {
            MemberProperty::Identifier(id) => self.atom(&id.name),
            MemberProperty::PrivateName(name) => {
                self.out.push('#');
                self.atom(&name.name);
            }
            MemberProperty::Computed(expression) => self.expression(expression),
        }
    }

    fn member(&mut self, member: &MemberExpression) {
        let head = match (member.optional, member.is_computed()) {
            (false, false) => ".",
            (false, true) => "[]",
            (true, false) => "?.",
            (true, true) => "?.[]",
        };
        self.open(head);
        self.space();
        self.expression(&member.object);
        self.space();
        self.member_property(&member.property);
        self.close();
    }

    fn arguments(&mut self, arguments: &[Expression]) {
        for argument in arguments {
            self.space();
            self.expression(argument);
        }
    }

    fn expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Identifier(id) => self.atom(&id.name),
            Expression::Literal(literal) => self.literal(literal),
            Expression::Template(template) => self.template(template),
            Expression::TaggedTemplate(e) => {
                self.open("tagged ");
                self.expression(&e.tag);
                self.space();
                self.template(&e.quasi);
                self.close();
            }
            Expression::This(_) => self.atom("this"),
            Expression::Super(_) => self.atom("super"),
            Expression::PrivateName(name) => {
                self.out.push('#');
                self.atom(&name.name);
            }
            Expression::Error(_) => self.atom("<error>"),
            Expression::Array(array) => {
                self.open("array");
                for element in &array.elements {
                    self.space();
                    match element {
                        Some(element) => self.expression(element),
                        None => self.atom("<hole>"),
                    }
                }
                self.close();
            }
            Expression::Object(object) => {
                self.open("object");
                for member in &object.properties {
                    self.space();
                    match member {
                        ObjectMember::Property(property) => {
                            let head = match property.kind {
                                PropertyKind::Get => "get ",
                                PropertyKind::Set => "set ",
                                PropertyKind::Init => ": ",
                            };
                            self.open(head);
                            self.property_key(&property.key);
                            self.space();
                            self.expression(&property.value);
                            self.close();
                        }
                        ObjectMember::Spread(spread) => {
                            self.open("... ");
                            self.expression(&spread.argument);
                            self.close();
                        }
                    }
                }
                self.close();
            }
            Expression::Function(function) => self.function(function),
            Expression::Arrow(arrow) => {
                self.open(if arrow.is_async { "async=> " } else { "=> " });
                self.params(&arrow.params);
                match &arrow.body {
                    ArrowBody::Expression(body) => {
                        self.space();
                        self.expression(body);
                    }
                    ArrowBody::Block(body) => {
                        self.space();
                        self.open("block");
                        self.statements(&body.statements);
                        self.close();
                    }
                }
                self.close();
            }
            Expression::Class(class) => self.class(class),
            Expression::Unary(e) => {
                self.open(e.operator.as_str());
                self.space();
                self.expression(&e.argument);
                self.close();
            }
            Expression::Update(e) => {
                self.open(if e.prefix { "prefix" } else { "postfix" });
                self.space();
                self.atom(e.operator.as_str());
                self.space();
                self.expression(&e.argument);
                self.close();
            }
            Expression::Binary(e) => self.binary(e.operator.as_str(), &e.left, &e.right),
            Expression::Logical(e) => self.binary(e.operator.as_str(), &e.left, &e.right),
            Expression::Assignment(e) => {
                self.open(e.operator.as_str());
                self.space();
                self.pattern(&e.target);
                self.space();
                self.expression(&e.value);
                self.close();
            }
            Expression::Conditional(e) => {
                self.open("? ");
                self.expression(&e.test);
                self.space();
                self.expression(&e.consequent);
                self.space();
                self.expression(&e.alternate);
                self.close();
            }
            Expression::Call(e) => {
                self.open(if e.optional { "call?. " } else { "call " });
                self.expression(&e.callee);
                self.arguments(&e.arguments);
                self.close();
            }
            Expression::New(e) => {
                self.open("new ");
                self.expression(&e.callee);
                self.arguments(&e.arguments);
                self.close();
            }
            Expression::Member(member) => self.member(member),
            Expression::OptionalChain(e) => {
                self.open("chain ");
                self.expression(&e.expression);
                self.close();
            }
            Expression::Sequence(e) => {
                self.open(",");
                self.arguments(&e.expressions);
                self.close();
            }
            Expression::Spread(e) => {
                self.open("... ");
                self.expression(&e.argument);
                self.close();
            }
            Expression::Yield(e) => {
                self.open(if e.delegate { "yield*" } else { "yield" });
                if let Some(argument) = &e.argument {
                    self.space();
                    self.expression(argument);
                }
                self.close();
            }
            Expression::Await(e) => {
                self.open("await ");
                self.expression(&e.argument);
                self.close();
            }
            Expression::MetaProperty(e) => {
                self.atom(&e.meta.name);
                self.out.push('.');
                self.atom(&e.property.name);
            }
            Expression::Import(e) => {
                self.open("import ");
                self.expression(&e.source);
                self.close();
            }
        }
    }

    fn pattern(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier(id) => self.atom(&id.name),
            Pattern::Member(member) => self.member(member),
            Pattern::Object(object) => {
                self.open("object-pattern");
                for property in &object.properties {
                    self.space();
                    self.open(": ");
                    self.property_key(&property.key);
                    self.space();
                    self.pattern(&property.value);
                    self.close();
                }
                if let Some(rest) = &object.rest {
                    self.space();
                    self.open("... ");
                    self.pattern(&rest.argument);
                    self.close();
                }
                self.close();
            }
            Pattern::Array(array) => {
                self.open("array-pattern");
                for element in &array.elements {
                    self.space();
                    match element {
                        Some(element) => self.pattern(element),
                        None => self.atom("<hole>"),
                    }
                }
                self.close();
            }
            Pattern::Assignment(assignment) => {
                self.open("default ");
                self.pattern(&assignment.left);
                self.space();
                self.expression(&assignment.right);
                self.close();
            }
            Pattern::Rest(rest) => {
                self.open("... ");
                self.pattern(&rest.argument);
                self.close();
            }
            Pattern::Error(_) => self.atom("<error>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParserOptions, parse, parse_expression};

    fn sexpr(source: &str) -> String {
        let result = parse_expression(source, ParserOptions::default());
        assert!(result.errors.is_empty(), "{source}: {:?}", result.errors);
        expression_to_sexpr(&result.expression)
    }

    #[test]
    fn operators_print_prefix() {
        assert_eq!(sexpr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(sexpr("a = b = 3"), "(= a (= b 3))");
        assert_eq!(sexpr("a.b(c)"), "(call (. a b) c)");
        assert_eq!(sexpr("!x"), "(! x)");
        assert_eq!(sexpr("x++"), "(postfix ++ x)");
    }

    #[test]
    fn program_wraps_statements() {
        let result = parse("'use strict'; return;", ParserOptions {
            allow_return_outside_function: true,
            ..ParserOptions::default()
        });
        assert_eq!(to_sexpr(&result.program), "(program (directive \"use strict\") (return))");
    }
}
