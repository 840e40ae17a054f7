//! Read-only traversal of the syntax tree.
//!
//! Implement the `visit_*` methods of interest and call the matching
//! `walk_*` function to continue into children. Every child of every node is
//! reached by the default methods.

use crate::ast::*;

pub trait Visit {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }

    fn visit_pattern(&mut self, pattern: &Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_function(&mut self, function: &Function) {
        walk_function(self, function);
    }

    fn visit_class(&mut self, class: &Class) {
        walk_class(self, class);
    }

    fn visit_property_key(&mut self, key: &PropertyKey) {
        walk_property_key(self, key);
    }

    fn visit_variable_declaration(&mut self, declaration: &VariableDeclaration) {
        walk_variable_declaration(self, declaration);
    }

    fn visit_identifier(&mut self, _identifier: &Identifier) {}

    fn visit_literal(&mut self, _literal: &Literal) {}
}

pub fn walk_program<V: Visit + ?Sized>(v: &mut V, program: &Program) {
    for statement in &program.body {
        v.visit_statement(statement);
    }
}

fn walk_statements<V: Visit + ?Sized>(v: &mut V, statements: &[Statement]) {
    for statement in statements {
        v.visit_statement(statement);
    }
}

fn walk_block<V: Visit + ?Sized>(v: &mut V, block: &BlockStatement) {
    walk_statements(v, &block.body);
}

fn walk_for_head<V: Visit + ?Sized>(v: &mut V, head: &ForHead) {
    match head {
        ForHead::Variable(declaration) => v.visit_variable_declaration(declaration),
        ForHead::Pattern(pattern) => v.visit_pattern(pattern),
    }
}

pub fn walk_statement<V: Visit + ?Sized>(v: &mut V, statement: &Statement) {
    match statement {
        Statement::Block(block) => walk_block(v, block),
        Statement::Empty(_) | Statement::Debugger(_) | Statement::Error(_) => {}
        Statement::Expression(s) => v.visit_expression(&s.expression),
        Statement::If(s) => {
            v.visit_expression(&s.test);
            v.visit_statement(&s.consequent);
            if let Some(alternate) = &s.alternate {
                v.visit_statement(alternate);
            }
        }
        Statement::Switch(s) => {
            v.visit_expression(&s.discriminant);
            for case in &s.cases {
                if let Some(test) = &case.test {
                    v.visit_expression(test);
                }
                walk_statements(v, &case.consequent);
            }
        }
        Statement::For(s) => {
            match &s.init {
                Some(ForInit::Variable(declaration)) => v.visit_variable_declaration(declaration),
                Some(ForInit::Expression(expression)) => v.visit_expression(expression),
                None => {}
            }
            if let Some(test) = &s.test {
                v.visit_expression(test);
            }
            if let Some(update) = &s.update {
                v.visit_expression(update);
            }
            v.visit_statement(&s.body);
        }
        Statement::ForIn(s) => {
            walk_for_head(v, &s.left);
            v.visit_expression(&s.right);
            v.visit_statement(&s.body);
        }
        Statement::ForOf(s) => {
            walk_for_head(v, &s.left);
            v.visit_expression(&s.right);
            v.visit_statement(&s.body);
        }
        Statement::While(s) => {
            v.visit_expression(&s.test);
            v.visit_statement(&s.body);
        }
        Statement::DoWhile(s) => {
            v.visit_statement(&s.body);
            v.visit_expression(&s.test);
        }
        Statement::Try(s) => {
            walk_block(v, &s.block);
            if let Some(handler) = &s.handler {
                if let Some(param) = &handler.param {
                    v.visit_pattern(param);
                }
                walk_block(v, &handler.body);
            }
            if let Some(finalizer) = &s.finalizer {
                walk_block(v, finalizer);
            }
        }
        Statement::Throw(s) => v.visit_expression(&s.argument),
        Statement::Return(s) => {
            if let Some(argument) = &s.argument {
                v.visit_expression(argument);
            }
        }
        Statement::Break(BreakStatement { label, .. })
        | Statement::Continue(ContinueStatement { label, .. }) => {
            if let Some(label) = label {
                v.visit_identifier(label);
            }
        }
        Statement::Labeled(s) => {
            v.visit_identifier(&s.label);
            v.visit_statement(&s.body);
        }
        Statement::With(s) => {
            v.visit_expression(&s.object);
            v.visit_statement(&s.body);
        }
        Statement::Variable(declaration) => v.visit_variable_declaration(declaration),
        Statement::Function(function) => v.visit_function(function),
        Statement::Class(class) => v.visit_class(class),
        Statement::Import(import) => {
            for specifier in &import.specifiers {
                if let ImportSpecifier::Named { imported, .. } = specifier {
                    v.visit_identifier(imported);
                }
                v.visit_identifier(specifier.local());
            }
            v.visit_literal(&import.source);
        }
        Statement::Export(export) => match &export.kind {
            ExportKind::Named { specifiers, source } => {
                for specifier in specifiers {
                    v.visit_identifier(&specifier.local);
                    v.visit_identifier(&specifier.exported);
                }
                if let Some(source) = source {
                    v.visit_literal(source);
                }
            }
            ExportKind::All { exported, source } => {
                if let Some(exported) = exported {
                    v.visit_identifier(exported);
                }
                v.visit_literal(source);
            }
            ExportKind::Default { value } => match value {
                ExportDefaultValue::Function(function) => v.visit_function(function),
                ExportDefaultValue::Class(class) => v.visit_class(class),
                ExportDefaultValue::Expression(expression) => v.visit_expression(expression),
            },
            ExportKind::Declaration { declaration } => v.visit_statement(declaration),
        },
    }
}

pub fn walk_variable_declaration<V: Visit + ?Sized>(v: &mut V, declaration: &VariableDeclaration) {
    for declarator in &declaration.declarations {
        v.visit_pattern(&declarator.id);
        if let Some(init) = &declarator.init {
            v.visit_expression(init);
        }
    }
}

pub fn walk_function<V: Visit + ?Sized>(v: &mut V, function: &Function) {
    if let Some(id) = &function.id {
        v.visit_identifier(id);
    }
    for param in &function.params {
        v.visit_pattern(param);
    }
    walk_statements(v, &function.body.statements);
}

pub fn walk_class<V: Visit + ?Sized>(v: &mut V, class: &Class) {
    if let Some(id) = &class.id {
        v.visit_identifier(id);
    }
    if let Some(super_class) = &class.super_class {
        v.visit_expression(super_class);
    }
    for member in &class.body {
        match member {
            ClassMember::Method(method) => {
                v.visit_property_key(&method.key);
                v.visit_function(&method.value);
            }
            ClassMember::Property(property) => {
                v.visit_property_key(&property.key);
                if let Some(value) = &property.value {
                    v.visit_expression(value);
                }
            }
            ClassMember::StaticBlock(block) => walk_statements(v, &block.body),
        }
    }
}

pub fn walk_property_key<V: Visit + ?Sized>(v: &mut V, key: &PropertyKey) {
    match key {
        PropertyKey::Identifier(id) => v.visit_identifier(id),
        PropertyKey::Literal(literal) => v.visit_literal(literal),
        PropertyKey::Computed(computed) => v.visit_expression(&computed.expression),
        PropertyKey::PrivateName(_) => {}
    }
}

fn walk_member_property<V: Visit + ?Sized>(v: &mut V, property: &MemberProperty) {
    match property {
        MemberProperty::Identifier(id) => v.visit_identifier(id),
        MemberProperty::Computed(expression) => v.visit_expression(expression),
        MemberProperty::PrivateName(_) => {}
    }
}

fn walk_template<V: Visit + ?Sized>(v: &mut V, template: &TemplateLiteral) {
    for expression in &template.expressions {
        v.visit_expression(expression);
    }
}

pub fn walk_expression<V: Visit + ?Sized>(v: &mut V, expression: &Expression) {
    match expression {
        Expression::Identifier(id) => v.visit_identifier(id),
        Expression::Literal(literal) => v.visit_literal(literal),
        Expression::Template(template) => walk_template(v, template),
        Expression::TaggedTemplate(e) => {
            v.visit_expression(&e.tag);
            walk_template(v, &e.quasi);
        }
        Expression::This(_)
        | Expression::Super(_)
        | Expression::PrivateName(_)
        | Expression::Error(_) => {}
        Expression::Array(array) => {
            for element in array.elements.iter().flatten() {
                v.visit_expression(element);
            }
        }
        Expression::Object(object) => {
            for member in &object.properties {
                match member {
                    ObjectMember::Property(property) => {
                        v.visit_property_key(&property.key);
                        // Shorthand values repeat the key; visit them once.
                        if !(property.shorthand && matches!(property.value, Expression::Identifier(_))) {
                            v.visit_expression(&property.value);
                        }
                    }
                    ObjectMember::Spread(spread) => v.visit_expression(&spread.argument),
                }
            }
        }
        Expression::Function(function) => v.visit_function(function),
        Expression::Arrow(arrow) => {
            for param in &arrow.params {
                v.visit_pattern(param);
            }
            match &arrow.body {
                ArrowBody::Expression(body) => v.visit_expression(body),
                ArrowBody::Block(body) => walk_statements(v, &body.statements),
            }
        }
        Expression::Class(class) => v.visit_class(class),
        Expression::Unary(e) => v.visit_expression(&e.argument),
        Expression::Update(e) => v.visit_expression(&e.argument),
        Expression::Binary(e) => {
            v.visit_expression(&e.left);
            v.visit_expression(&e.right);
        }
        Expression::Logical(e) => {
            v.visit_expression(&e.left);
            v.visit_expression(&e.right);
        }
        Expression::Assignment(e) => {
            v.visit_pattern(&e.target);
            v.visit_expression(&e.value);
        }
        Expression::Conditional(e) => {
            v.visit_expression(&e.test);
            v.visit_expression(&e.consequent);
            v.visit_expression(&e.alternate);
        }
        Expression::Call(e) => {
            v.visit_expression(&e.callee);
            for argument in &e.arguments {
                v.visit_expression(argument);
            }
        }
        Expression::New(e) => {
            v.visit_expression(&e.callee);
            for argument in &e.arguments {
                v.visit_expression(argument);
            }
        }
        Expression::Member(e) => {
            v.visit_expression(&e.object);
            walk_member_property(v, &e.property);
        }
        Expression::OptionalChain(e) => v.visit_expression(&e.expression),
        Expression::Sequence(e) => {
            for expression in &e.expressions {
                v.visit_expression(expression);
            }
        }
        Expression::Spread(e) => v.visit_expression(&e.argument),
        Expression::Yield(e) => {
            if let Some(argument) = &e.argument {
                v.visit_expression(argument);
            }
        }
        Expression::Await(e) => v.visit_expression(&e.argument),
        Expression::MetaProperty(e) => {
            v.visit_identifier(&e.meta);
            v.visit_identifier(&e.property);
        }
        Expression::Import(e) => v.visit_expression(&e.source),
    }
}

pub fn walk_pattern<V: Visit + ?Sized>(v: &mut V, pattern: &Pattern) {
    match pattern {
        Pattern::Identifier(id) => v.visit_identifier(id),
        Pattern::Member(member) => {
            v.visit_expression(&member.object);
            walk_member_property(v, &member.property);
        }
        Pattern::Object(object) => {
            for property in &object.properties {
                v.visit_property_key(&property.key);
                v.visit_pattern(&property.value);
            }
            if let Some(rest) = &object.rest {
                v.visit_pattern(&rest.argument);
            }
        }
        Pattern::Array(array) => {
            for element in array.elements.iter().flatten() {
                v.visit_pattern(element);
            }
        }
        Pattern::Assignment(assignment) => {
            v.visit_pattern(&assignment.left);
            v.visit_expression(&assignment.right);
        }
        Pattern::Rest(rest) => v.visit_pattern(&rest.argument),
        Pattern::Error(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParserOptions, parse};

    #[derive(Default)]
    struct Names(Vec<String>);

    impl Visit for Names {
        fn visit_identifier(&mut self, identifier: &Identifier) {
            self.0.push(identifier.name.clone());
        }
    }

    #[test]
    fn reaches_nested_identifiers() {
        let result = parse(
            "function f(a, {b}) { return a + b; } let [c = d] = e; x?.y;",
            ParserOptions::default(),
        );
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        let mut names = Names::default();
        names.visit_program(&result.program);
        for expected in ["f", "a", "b", "c", "d", "e", "x", "y"] {
            assert!(names.0.iter().any(|n| n == expected), "missing {expected}: {:?}", names.0);
        }
    }
}
