//! Declarations: variables, binding patterns, parameters, functions and
//! classes.

use super::state::{ContextFlags, FUNCTION_BOUNDARY, ParserState};
use crate::ast::*;
use kestrel_common::Position;
use kestrel_common::diagnostics::diagnostic_codes;
use kestrel_scanner::SyntaxKind;
use tracing::trace;

impl ParserState {
    // =========================================================================
    // Variable declarations
    // =========================================================================

    /// `let` begins a declaration (rather than naming a variable) when a
    /// binding follows it.
    pub(crate) fn let_starts_declaration(&self) -> bool {
        if !self.is_token(SyntaxKind::LetKeyword) {
            return false;
        }
        let next = self.peek_kind(1);
        matches!(
            next,
            SyntaxKind::OpenBracketToken | SyntaxKind::OpenBraceToken | SyntaxKind::YieldKeyword
        ) || self.is_identifier_kind(next)
    }

    /// `var`/`let`/`const` and its declarators, without the trailing
    /// semicolon. In a `for` head, initializer checks are left to the
    /// caller because `for (const x of xs)` needs none.
    pub(crate) fn parse_variable_declaration(&mut self, in_for_head: bool) -> VariableDeclaration {
        let start = self.token_start();
        let kind = match self.token() {
            SyntaxKind::LetKeyword => VariableKind::Let,
            SyntaxKind::ConstKeyword => VariableKind::Const,
            _ => VariableKind::Var,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            let declarator_start = self.token_start();
            let id = self.parse_binding_target();
            let init = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(self.parse_assignment_expression())
            } else {
                None
            };
            declarations.push(VariableDeclarator {
                id,
                init,
                span: self.span_from(declarator_start),
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        let declaration = VariableDeclaration {
            kind,
            declarations,
            span: self.span_from(start),
        };
        if !in_for_head {
            self.check_declarator_initializers(&declaration);
        }
        declaration
    }

    /// `const` and destructuring declarators need an initializer.
    pub(crate) fn check_declarator_initializers(&mut self, declaration: &VariableDeclaration) {
        for declarator in &declaration.declarations {
            if declarator.init.is_some() || matches!(declarator.id, Pattern::Error(_)) {
                continue;
            }
            if declaration.kind == VariableKind::Const {
                self.parse_error_at(
                    declarator.id.span(),
                    diagnostic_codes::CONST_WITHOUT_INITIALIZER,
                    &[],
                );
            } else if declarator.id.is_destructuring() {
                self.parse_error_at(
                    declarator.id.span(),
                    diagnostic_codes::TOKEN_EXPECTED,
                    &["="],
                );
            }
        }
    }

    /// `var`/`let`/`const` statement.
    pub(crate) fn parse_variable_statement(&mut self) -> Statement {
        let start = self.token_start();
        let mut declaration = self.parse_variable_declaration(false);
        self.parse_semicolon();
        declaration.span = self.span_from(start);
        Statement::Variable(declaration)
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    /// An identifier, array pattern or object pattern.
    pub(crate) fn parse_binding_target(&mut self) -> Pattern {
        if !self.enter_recursion() {
            // Consume one token so the enclosing list still makes progress.
            if self.is_eof() {
                return Pattern::error(self.placeholder_span());
            }
            let token = self.bump();
            return Pattern::error(token.span);
        }
        let pattern = match self.token() {
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            _ => Pattern::Identifier(self.parse_binding_identifier()),
        };
        self.exit_recursion();
        pattern
    }

    /// A binding target with an optional `= default`.
    pub(crate) fn parse_binding_element(&mut self) -> Pattern {
        let start = self.token_start();
        let target = self.parse_binding_target();
        if !self.parse_optional(SyntaxKind::EqualsToken) {
            return target;
        }
        let default = self.parse_assignment_expression_allow_in();
        Pattern::Assignment(AssignmentPattern {
            left: Box::new(target),
            right: Box::new(default),
            span: self.span_from(start),
        })
    }

    /// `...target` in a pattern or parameter list. Reports anything that
    /// follows it before `closing`.
    fn parse_binding_rest(&mut self, closing: SyntaxKind) -> RestElement {
        let start = self.token_start();
        self.next_token();
        let argument = self.parse_binding_target();
        if self.is_token(SyntaxKind::EqualsToken) {
            self.parse_error_at_current_token(
                diagnostic_codes::REST_PARAMETER_WITH_INITIALIZER,
                &[],
            );
            self.next_token();
            self.parse_assignment_expression_allow_in();
        }
        let rest = RestElement {
            argument: Box::new(argument),
            span: self.span_from(start),
        };
        if self.is_token(SyntaxKind::CommaToken) && self.peek_kind(1) != closing {
            self.parse_error_at(rest.span, diagnostic_codes::REST_ELEMENT_MUST_BE_LAST, &[]);
        }
        rest
    }

    fn parse_array_binding_pattern(&mut self) -> Pattern {
        let start = self.token_start();
        self.require_feature(
            self.options.destructuring,
            "Destructuring patterns",
            self.token_span(),
        );
        self.next_token();

        let mut elements = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken => {
                    elements.push(None);
                    self.next_token();
                }
                SyntaxKind::DotDotDotToken => {
                    let rest = self.parse_binding_rest(SyntaxKind::CloseBracketToken);
                    elements.push(Some(Pattern::Rest(rest)));
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                _ => {
                    elements.push(Some(self.parse_binding_element()));
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        Pattern::Array(ArrayPattern {
            elements,
            span: self.span_from(start),
        })
    }

    fn parse_object_binding_pattern(&mut self) -> Pattern {
        let start = self.token_start();
        self.require_feature(
            self.options.destructuring,
            "Destructuring patterns",
            self.token_span(),
        );
        self.next_token();

        let mut properties = Vec::new();
        let mut rest = None;
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_eof() {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                rest = Some(Box::new(self.parse_binding_rest(SyntaxKind::CloseBraceToken)));
            } else {
                let before = self.cursor.checkpoint();
                let property = self.parse_binding_property();
                if self.cursor.checkpoint() == before {
                    break;
                }
                properties.push(property);
            }
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        Pattern::Object(ObjectPattern {
            properties,
            rest,
            span: self.span_from(start),
        })
    }

    fn parse_binding_property(&mut self) -> PatternProperty {
        let start = self.token_start();
        let key_token = self.current().clone();
        let key = self.parse_property_key();

        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_binding_element();
            return PatternProperty {
                key,
                value,
                shorthand: false,
                span: self.span_from(start),
            };
        }

        let target = match &key {
            PropertyKey::Identifier(id) if key_token.kind.is_identifier_or_keyword() => {
                self.check_identifier_word(&key_token);
                Pattern::Identifier(id.clone())
            }
            _ => {
                self.parse_expected(SyntaxKind::ColonToken);
                Pattern::error(key.span())
            }
        };
        let value = if self.parse_optional(SyntaxKind::EqualsToken) {
            let default = self.parse_assignment_expression_allow_in();
            Pattern::Assignment(AssignmentPattern {
                left: Box::new(target),
                right: Box::new(default),
                span: self.span_from(start),
            })
        } else {
            target
        };
        PatternProperty {
            key,
            value,
            shorthand: true,
            span: self.span_from(start),
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `( params )` of a function, method or arrow.
    pub(crate) fn parse_parameter_list(&mut self) -> Vec<Pattern> {
        let mut params = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return params;
        }
        while !self.is_token(SyntaxKind::CloseParenToken) && !self.is_eof() {
            if self.is_token(SyntaxKind::DotDotDotToken) {
                let rest = self.parse_binding_rest(SyntaxKind::CloseParenToken);
                params.push(Pattern::Rest(rest));
            } else {
                params.push(self.parse_binding_element());
            }

            if !self.is_token(SyntaxKind::CommaToken) {
                break;
            }
            let comma = self.token_span();
            self.next_token();
            if self.is_token(SyntaxKind::CloseParenToken) {
                self.parse_warning_at(comma, diagnostic_codes::TRAILING_COMMA, &["parameter list"]);
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        params
    }

    /// `function` declaration, with an optional leading `async`.
    pub(crate) fn parse_function_declaration(&mut self) -> Statement {
        let function = self.parse_function(true);
        Statement::Function(Box::new(function))
    }

    /// `[async] function [*] name (params) { body }`. The name is required
    /// for declarations other than `export default function`.
    pub(crate) fn parse_function(&mut self, name_required: bool) -> Function {
        let start = self.token_start();
        let is_async = if self.is_contextual("async") {
            self.next_token();
            true
        } else {
            false
        };
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let is_generator = self.parse_optional(SyntaxKind::AsteriskToken);

        let id = if self.is_token(SyntaxKind::OpenParenToken) {
            if name_required {
                self.parse_error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            }
            None
        } else {
            Some(self.parse_binding_identifier())
        };
        self.parse_function_tail(start, id, is_async, is_generator)
    }

    /// Parameters and body of any function-like construct.
    pub(crate) fn parse_function_tail(
        &mut self,
        start: Position,
        id: Option<Identifier>,
        is_async: bool,
        is_generator: bool,
    ) -> Function {
        if is_async {
            self.require_feature(self.options.async_functions, "Async functions", self.span_from(start));
        }
        if is_generator {
            self.require_feature(self.options.generators, "Generators", self.span_from(start));
        }
        trace!(
            name = id.as_ref().map_or("<anonymous>", |id| id.name.as_str()),
            is_async,
            is_generator,
            "parse_function"
        );

        let mut add = ContextFlags::IN_FUNCTION | ContextFlags::ALLOW_NEW_TARGET;
        if is_async {
            add |= ContextFlags::IN_ASYNC;
        }
        if is_generator {
            add |= ContextFlags::IN_GENERATOR;
        }
        let (params, body) = self.with_context(add, FUNCTION_BOUNDARY, |p| {
            let params = p.parse_parameter_list();
            let body = p.with_label_scope(|p| p.parse_function_body());
            (params, body)
        });

        Function {
            id,
            params,
            body,
            is_async,
            is_generator,
            span: self.span_from(start),
        }
    }

    /// A method's function, starting at its parameter list.
    pub(crate) fn parse_method_function(&mut self, is_async: bool, is_generator: bool) -> Function {
        let start = self.token_start();
        self.parse_function_tail(start, None, is_async, is_generator)
    }

    /// `{ directives statements }`. The caller sets up the function context.
    pub(crate) fn parse_function_body(&mut self) -> FunctionBody {
        let start = self.token_start();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return FunctionBody {
                directives: Vec::new(),
                statements: Vec::new(),
                span: self.span_from(start),
            };
        }

        let saved = self.context_flags;
        let directives = self.parse_directive_prologue();
        let statements = self.parse_statement_list(false, |kind| {
            kind == SyntaxKind::CloseBraceToken
        });
        self.context_flags = saved;

        self.parse_expected(SyntaxKind::CloseBraceToken);
        FunctionBody {
            directives,
            statements,
            span: self.span_from(start),
        }
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(crate) fn parse_class_declaration(&mut self) -> Statement {
        let class = self.parse_class(true);
        Statement::Class(Box::new(class))
    }

    /// `class [name] [extends expr] { members }`. Class code is strict.
    pub(crate) fn parse_class(&mut self, name_required: bool) -> Class {
        let start = self.token_start();
        self.next_token();
        if !self.enter_recursion() {
            return Class {
                id: None,
                super_class: None,
                body: Vec::new(),
                span: self.span_from(start),
            };
        }
        let class = self.parse_class_rest(start, name_required);
        self.exit_recursion();
        class
    }

    fn parse_class_rest(&mut self, start: Position, name_required: bool) -> Class {
        let saved = self.context_flags;
        self.context_flags |= ContextFlags::STRICT;

        let id = if self.token().is_identifier_or_keyword()
            && !self.is_token(SyntaxKind::ExtendsKeyword)
        {
            Some(self.parse_binding_identifier())
        } else {
            if name_required {
                self.parse_error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            }
            None
        };

        let super_class = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            Some(Box::new(self.parse_left_hand_side_expression()))
        } else {
            None
        };

        let body = if self.parse_expected(SyntaxKind::OpenBraceToken) {
            self.context_flags |= ContextFlags::IN_CLASS;
            let members = self.parse_class_members();
            self.parse_expected(SyntaxKind::CloseBraceToken);
            members
        } else {
            Vec::new()
        };
        self.context_flags = saved;

        Class {
            id,
            super_class,
            body,
            span: self.span_from(start),
        }
    }

    fn parse_class_members(&mut self) -> Vec<ClassMember> {
        let mut members = Vec::new();
        let mut has_constructor = false;
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_eof() {
            if self.parse_optional(SyntaxKind::SemicolonToken) {
                continue;
            }
            let before = self.cursor.checkpoint();
            let member = self.parse_class_member();
            if self.cursor.checkpoint() == before {
                if !self.is_token(SyntaxKind::Unknown) {
                    let text = self.current().text.clone();
                    self.parse_error_at_current_token(diagnostic_codes::UNEXPECTED_TOKEN, &[&text]);
                }
                self.next_token();
                continue;
            }

            if let ClassMember::Method(method) = &member
                && method.kind == MethodKind::Constructor
            {
                if has_constructor {
                    self.parse_error_at(method.key.span(), diagnostic_codes::DUPLICATE_CONSTRUCTOR, &[]);
                }
                has_constructor = true;
            }
            members.push(member);
        }
        members
    }

    fn parse_class_member(&mut self) -> ClassMember {
        let start = self.token_start();

        let mut is_static = false;
        if self.is_token(SyntaxKind::ReservedWord)
            && self.current().text == "static"
            && !Self::ends_member_name(self.peek_kind(1))
        {
            if self.peek_kind(1) == SyntaxKind::OpenBraceToken {
                return ClassMember::StaticBlock(self.parse_static_block());
            }
            is_static = true;
            self.next_token();
        }

        let (is_async, is_generator, kind) = self.parse_method_modifiers();
        let key = self.parse_property_key();

        let is_method = is_async
            || is_generator
            || kind != PropertyKind::Init
            || self.is_token(SyntaxKind::OpenParenToken);
        if is_method {
            let value = self.parse_method_function(is_async, is_generator);
            self.check_accessor_parameters(kind, &key, &value);
            let is_constructor = !is_static
                && !matches!(key, PropertyKey::PrivateName(_))
                && key.static_name().as_deref() == Some("constructor");
            let kind = match kind {
                PropertyKind::Get => MethodKind::Get,
                PropertyKind::Set => MethodKind::Set,
                PropertyKind::Init if is_constructor => MethodKind::Constructor,
                PropertyKind::Init => MethodKind::Method,
            };
            return ClassMember::Method(MethodDefinition {
                key,
                kind,
                value: Box::new(value),
                is_static,
                span: self.span_from(start),
            });
        }

        self.require_feature(self.options.class_fields, "Class fields", key.span());
        let value = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.with_context(
                ContextFlags::ALLOW_NEW_TARGET,
                FUNCTION_BOUNDARY,
                |p| p.parse_assignment_expression(),
            ))
        } else {
            None
        };
        self.parse_semicolon();
        ClassMember::Property(PropertyDefinition {
            key,
            value,
            is_static,
            span: self.span_from(start),
        })
    }

    /// `static { ... }`.
    fn parse_static_block(&mut self) -> StaticBlock {
        let start = self.token_start();
        self.require_feature(
            self.options.static_blocks,
            "Class static blocks",
            self.token_span(),
        );
        self.next_token();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let body = self.with_context(
            ContextFlags::IN_STATIC_BLOCK | ContextFlags::ALLOW_NEW_TARGET,
            FUNCTION_BOUNDARY | ContextFlags::IN_FUNCTION,
            |p| {
                p.with_label_scope(|p| {
                    p.parse_statement_list(false, |kind| kind == SyntaxKind::CloseBraceToken)
                })
            },
        );

        self.parse_expected(SyntaxKind::CloseBraceToken);
        StaticBlock {
            body,
            span: self.span_from(start),
        }
    }
}
