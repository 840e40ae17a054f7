//! Statement parsing, the program entry point and error recovery between
//! statements.

use super::state::{ContextFlags, LabelKind, ParserState};
use crate::ast::*;
use kestrel_common::diagnostics::diagnostic_codes;
use kestrel_common::limits::INITIAL_STATEMENT_CAPACITY;
use kestrel_common::{Position, Span};
use kestrel_scanner::{SyntaxKind, Token, TokenFlags};
use tracing::{debug, trace};

impl ParserState {
    // =========================================================================
    // Program
    // =========================================================================

    /// Parse the whole token buffer. Always returns a program; problems are
    /// recorded as diagnostics.
    pub fn parse_program(&mut self) -> Program {
        let start = self.token_start();
        let origin = Span::empty_at(Position::START);
        if self.options.jsx_mode {
            self.parse_warning_at(origin, diagnostic_codes::UNSUPPORTED_MODE, &["JSX"]);
        }
        if self.options.typescript_mode {
            self.parse_warning_at(origin, diagnostic_codes::UNSUPPORTED_MODE, &["TypeScript"]);
        }

        let directives = self.parse_directive_prologue();
        let body = self.parse_statement_list(true, |kind| kind == SyntaxKind::EndOfFileToken);

        let comments: Vec<Comment> = self
            .cursor
            .comments()
            .map(|token| Comment {
                kind: match token.kind {
                    SyntaxKind::SingleLineCommentTrivia => CommentKind::Line,
                    SyntaxKind::ShebangTrivia => CommentKind::Hashbang,
                    _ => CommentKind::Block,
                },
                text: token.text.clone(),
                span: token.span,
            })
            .collect();

        let mut span = self.span_from(start);
        if let Some(first) = comments.first() {
            span = span.cover(first.span);
        }
        if let Some(last) = comments.last() {
            span = span.cover(last.span);
        }

        debug!(
            statements = body.len(),
            comments = comments.len(),
            errors = self.errors.len(),
            "program parsed"
        );
        Program {
            file_name: self.file_name.clone(),
            source_type: if self.options.module_mode {
                SourceType::Module
            } else {
                SourceType::Script
            },
            directives,
            body,
            comments,
            span,
        }
    }

    /// Whether a string literal followed by `next` forms a whole statement.
    fn ends_directive(next: &Token) -> bool {
        match next.kind {
            SyntaxKind::SemicolonToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::EndOfFileToken => true,
            kind => {
                next.has_preceding_line_break()
                    && !kind.is_operator()
                    && !kind.is_punctuation()
                    && !matches!(
                        kind,
                        SyntaxKind::NoSubstitutionTemplateLiteral
                            | SyntaxKind::TemplateHead
                            | SyntaxKind::InKeyword
                            | SyntaxKind::InstanceOfKeyword
                    )
            }
        }
    }

    /// Leading string-literal statements. `"use strict"` written without
    /// escapes turns on strict mode for the rest of the enclosing body.
    pub(crate) fn parse_directive_prologue(&mut self) -> Vec<Directive> {
        let mut directives = Vec::new();
        while self.is_token(SyntaxKind::StringLiteral) && Self::ends_directive(self.peek(1)) {
            let token = self.bump();
            self.parse_semicolon();
            if token.text == "use strict" && !token.flags.contains(TokenFlags::CONTAINS_ESCAPE) {
                self.context_flags |= ContextFlags::STRICT;
            }
            directives.push(Directive {
                value: token.text,
                span: self.span_from(token.span.start),
            });
        }
        directives
    }

    // =========================================================================
    // Statement lists and recovery
    // =========================================================================

    /// Statements up to (not including) a token accepted by `is_terminator`.
    /// A statement that cannot start here is skipped to the next boundary
    /// and kept as an error node.
    pub(crate) fn parse_statement_list(
        &mut self,
        top_level: bool,
        is_terminator: impl Fn(SyntaxKind) -> bool,
    ) -> Vec<Statement> {
        let mut statements = Vec::with_capacity(if top_level { INITIAL_STATEMENT_CAPACITY } else { 4 });
        loop {
            let kind = self.token();
            if is_terminator(kind) || kind == SyntaxKind::EndOfFileToken {
                break;
            }

            let start = self.token_start();
            let before = self.cursor.checkpoint();
            let statement = if top_level {
                self.parse_module_item()
            } else {
                self.parse_statement()
            };
            if self.cursor.checkpoint() != before {
                statements.push(statement);
                continue;
            }

            if self.last_error_pos != Some(start.offset) && !self.is_token(SyntaxKind::Unknown) {
                self.parse_error_at_current_token(
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                    &[],
                );
            }
            self.resync_after_error();
            if self.cursor.checkpoint() == before {
                self.next_token();
            }
            statements.push(Statement::error(self.span_from(start)));
        }
        statements
    }

    /// A top-level statement, where `import` and `export` are allowed.
    fn parse_module_item(&mut self) -> Statement {
        match self.token() {
            SyntaxKind::ImportKeyword if !self.is_import_expression_start() => {
                self.check_module_syntax("import", true);
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => {
                self.check_module_syntax("export", true);
                self.parse_export_declaration()
            }
            _ => self.parse_statement(),
        }
    }

    /// `import(` and `import.` start expressions, not declarations.
    pub(crate) fn is_import_expression_start(&self) -> bool {
        matches!(
            self.peek_kind(1),
            SyntaxKind::OpenParenToken | SyntaxKind::DotToken
        )
    }

    fn check_module_syntax(&mut self, keyword: &str, top_level: bool) {
        let span = self.token_span();
        if !self.is_module() {
            self.parse_error_at(span, diagnostic_codes::MODULE_SYNTAX_OUTSIDE_MODULE, &[keyword]);
        } else if !top_level {
            self.parse_error_at(span, diagnostic_codes::MODULE_SYNTAX_NOT_TOP_LEVEL, &[keyword]);
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(crate) fn parse_statement(&mut self) -> Statement {
        if !self.enter_recursion() {
            let start = self.token_start();
            if !self.is_eof() && !self.is_token(SyntaxKind::CloseBraceToken) {
                self.next_token();
            }
            return Statement::error(self.span_from(start));
        }
        trace!(kind = ?self.token(), pos = self.token_start().offset, "parse_statement");

        let statement = match self.token() {
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::SemicolonToken => {
                let token = self.bump();
                Statement::Empty(EmptyStatement { span: token.span })
            }
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::LetKeyword if self.let_starts_declaration() => {
                self.parse_variable_statement()
            }
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::Identifier
                if self.is_contextual("async")
                    && self.peek_kind(1) == SyntaxKind::FunctionKeyword
                    && !self.peek(1).has_preceding_line_break() =>
            {
                self.parse_function_declaration()
            }
            SyntaxKind::ClassKeyword => self.parse_class_declaration(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => {
                self.parse_break_or_continue_statement()
            }
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::DebuggerKeyword => self.parse_debugger_statement(),
            SyntaxKind::ImportKeyword if !self.is_import_expression_start() => {
                self.check_module_syntax("import", false);
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => {
                self.check_module_syntax("export", false);
                self.parse_export_declaration()
            }
            kind if self.is_identifier_kind(kind) && self.peek_kind(1) == SyntaxKind::ColonToken => {
                self.parse_labeled_statement()
            }
            _ => self.parse_expression_statement(),
        };

        self.exit_recursion();
        statement
    }

    pub(crate) fn parse_block(&mut self) -> BlockStatement {
        let start = self.token_start();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return BlockStatement {
                body: Vec::new(),
                span: self.span_from(start),
            };
        }
        let body = self.parse_statement_list(false, |kind| kind == SyntaxKind::CloseBraceToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        BlockStatement {
            body,
            span: self.span_from(start),
        }
    }

    /// The body of `if`/`else`/a loop. A bare `;` is suspicious there.
    fn parse_embedded_statement(&mut self, owner: &str) -> Statement {
        if self.is_token(SyntaxKind::SemicolonToken) {
            self.parse_warning_at(self.token_span(), diagnostic_codes::EMPTY_STATEMENT_BODY, &[owner]);
        }
        self.parse_statement()
    }

    fn parse_loop_body(&mut self, owner: &str) -> Statement {
        self.with_context(ContextFlags::IN_LOOP, ContextFlags::empty(), |p| {
            p.parse_embedded_statement(owner)
        })
    }

    /// `( expression )` after `if`, `while`, `switch` and `with`.
    fn parse_parenthesized_condition(&mut self) -> Expression {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();
        let test = self.parse_parenthesized_condition();
        let consequent = self.parse_embedded_statement("if");
        let alternate = if self.parse_optional(SyntaxKind::ElseKeyword) {
            Some(Box::new(self.parse_embedded_statement("else")))
        } else {
            None
        };
        Statement::If(IfStatement {
            test,
            consequent: Box::new(consequent),
            alternate,
            span: self.span_from(start),
        })
    }

    fn parse_while_statement(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();
        let test = self.parse_parenthesized_condition();
        let body = self.parse_loop_body("while");
        Statement::While(WhileStatement {
            test,
            body: Box::new(body),
            span: self.span_from(start),
        })
    }

    fn parse_do_statement(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();
        let body = self.with_context(ContextFlags::IN_LOOP, ContextFlags::empty(), |p| {
            p.parse_statement()
        });
        self.parse_expected(SyntaxKind::WhileKeyword);
        let test = self.parse_parenthesized_condition();
        // The semicolon after `do ... while (x)` is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        Statement::DoWhile(DoWhileStatement {
            body: Box::new(body),
            test,
            span: self.span_from(start),
        })
    }

    fn parse_for_statement(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();

        let is_await = if self.is_token(SyntaxKind::AwaitKeyword) {
            let span = self.token_span();
            if !self.await_is_operator() || self.in_context(ContextFlags::IN_STATIC_BLOCK) {
                self.parse_error_at(span, diagnostic_codes::AWAIT_OUTSIDE_ASYNC, &[]);
            }
            self.next_token();
            true
        } else {
            false
        };
        self.parse_expected(SyntaxKind::OpenParenToken);

        let declares = matches!(
            self.token(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword
        ) || self.let_starts_declaration();

        if declares {
            let declaration = self.with_context(ContextFlags::NO_IN, ContextFlags::empty(), |p| {
                p.parse_variable_declaration(true)
            });
            if let Some(keyword) = self.for_in_of_keyword() {
                self.check_for_in_of_declaration(&declaration, keyword);
                return self.parse_for_in_of_rest(start, ForHead::Variable(declaration), keyword, is_await);
            }
            self.check_declarator_initializers(&declaration);
            return self.parse_for_rest(start, Some(ForInit::Variable(declaration)), is_await);
        }

        if self.is_token(SyntaxKind::SemicolonToken) {
            return self.parse_for_rest(start, None, is_await);
        }

        let init = self.with_context(ContextFlags::NO_IN, ContextFlags::empty(), |p| {
            p.parse_expression()
        });
        if let Some(keyword) = self.for_in_of_keyword() {
            let target = self.to_assignment_target(init, AssignmentOperator::Assign);
            return self.parse_for_in_of_rest(start, ForHead::Pattern(target), keyword, is_await);
        }
        self.parse_for_rest(start, Some(ForInit::Expression(init)), is_await)
    }

    /// `in` or `of` following a `for` head.
    fn for_in_of_keyword(&self) -> Option<&'static str> {
        if self.is_token(SyntaxKind::InKeyword) {
            Some("in")
        } else if self.is_contextual("of") {
            Some("of")
        } else {
            None
        }
    }

    fn check_for_in_of_declaration(&mut self, declaration: &VariableDeclaration, keyword: &str) {
        if declaration.declarations.len() != 1 {
            self.parse_error_at(
                declaration.span,
                diagnostic_codes::FOR_IN_OF_SINGLE_DECLARATION,
                &[keyword],
            );
        }
        for declarator in &declaration.declarations {
            if let Some(init) = &declarator.init {
                self.parse_error_at(init.span(), diagnostic_codes::FOR_IN_OF_INITIALIZER, &[keyword]);
            }
        }
    }

    /// `; test; update) body` of a classic `for`.
    fn parse_for_rest(&mut self, start: Position, init: Option<ForInit>, is_await: bool) -> Statement {
        if is_await {
            self.parse_error_at_current_token(diagnostic_codes::TOKEN_EXPECTED, &["of"]);
        }
        self.parse_expected(SyntaxKind::SemicolonToken);
        let test = if self.is_token(SyntaxKind::SemicolonToken) {
            None
        } else {
            Some(self.parse_expression_allow_in())
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let update = if self.is_token(SyntaxKind::CloseParenToken) {
            None
        } else {
            Some(self.parse_expression_allow_in())
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_loop_body("for");
        Statement::For(ForStatement {
            init,
            test,
            update,
            body: Box::new(body),
            span: self.span_from(start),
        })
    }

    /// `in expr) body` or `of expr) body`.
    fn parse_for_in_of_rest(
        &mut self,
        start: Position,
        left: ForHead,
        keyword: &str,
        is_await: bool,
    ) -> Statement {
        self.next_token();
        let is_of = keyword == "of";
        let right = if is_of {
            self.parse_assignment_expression_allow_in()
        } else {
            self.parse_expression_allow_in()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_loop_body("for");

        if is_of {
            return Statement::ForOf(ForOfStatement {
                left,
                right,
                body: Box::new(body),
                is_await,
                span: self.span_from(start),
            });
        }
        if is_await {
            self.parse_error_at(left.span(), diagnostic_codes::TOKEN_EXPECTED, &["of"]);
        }
        Statement::ForIn(ForInStatement {
            left,
            right,
            body: Box::new(body),
            span: self.span_from(start),
        })
    }

    fn parse_switch_statement(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();
        let discriminant = self.parse_parenthesized_condition();

        let mut cases = Vec::new();
        if self.parse_expected(SyntaxKind::OpenBraceToken) {
            let mut seen_default = false;
            while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_eof() {
                let case_start = self.token_start();
                let test = match self.token() {
                    SyntaxKind::CaseKeyword => {
                        self.next_token();
                        Some(self.parse_expression_allow_in())
                    }
                    SyntaxKind::DefaultKeyword => {
                        if seen_default {
                            self.parse_error_at_current_token(
                                diagnostic_codes::MULTIPLE_DEFAULT_CLAUSES,
                                &[],
                            );
                        }
                        seen_default = true;
                        self.next_token();
                        None
                    }
                    _ => {
                        self.parse_error_at_current_token(diagnostic_codes::TOKEN_EXPECTED, &["case"]);
                        let before = self.cursor.checkpoint();
                        self.resync_after_error();
                        if self.cursor.checkpoint() == before {
                            self.next_token();
                        }
                        continue;
                    }
                };
                self.parse_expected(SyntaxKind::ColonToken);
                let consequent = self.with_context(ContextFlags::IN_SWITCH, ContextFlags::empty(), |p| {
                    p.parse_statement_list(false, |kind| {
                        matches!(
                            kind,
                            SyntaxKind::CaseKeyword
                                | SyntaxKind::DefaultKeyword
                                | SyntaxKind::CloseBraceToken
                        )
                    })
                });
                cases.push(SwitchCase {
                    test,
                    consequent,
                    span: self.span_from(case_start),
                });
            }
            self.parse_expected(SyntaxKind::CloseBraceToken);
        }

        Statement::Switch(SwitchStatement {
            discriminant,
            cases,
            span: self.span_from(start),
        })
    }

    fn parse_try_statement(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();
        let block = self.with_context(ContextFlags::IN_TRY, ContextFlags::empty(), |p| {
            p.parse_block()
        });

        let handler = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_start();
            self.next_token();
            let param = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let param = self.parse_binding_target();
                self.parse_expected(SyntaxKind::CloseParenToken);
                Some(param)
            } else {
                None
            };
            let body = self.parse_block();
            Some(CatchClause {
                param,
                body,
                span: self.span_from(catch_start),
            })
        } else {
            None
        };

        let finalizer = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            Some(self.parse_block())
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            self.parse_error_at_current_token(diagnostic_codes::CATCH_OR_FINALLY_EXPECTED, &[]);
        }
        Statement::Try(TryStatement {
            block,
            handler,
            finalizer,
            span: self.span_from(start),
        })
    }

    fn parse_throw_statement(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();
        if self.has_preceding_line_break() {
            self.parse_error_at(self.token_span(), diagnostic_codes::LINE_BREAK_AFTER_THROW, &[]);
        }
        let argument = self.parse_expression_allow_in();
        self.parse_semicolon();
        Statement::Throw(ThrowStatement {
            argument,
            span: self.span_from(start),
        })
    }

    fn parse_return_statement(&mut self) -> Statement {
        let start = self.token_start();
        if !self.in_context(ContextFlags::IN_FUNCTION)
            && !self.options.allow_return_outside_function
        {
            self.parse_error_at_current_token(diagnostic_codes::RETURN_OUTSIDE_FUNCTION, &[]);
        }
        self.next_token();
        let argument = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.parse_expression_allow_in())
        };
        self.parse_semicolon();
        Statement::Return(ReturnStatement {
            argument,
            span: self.span_from(start),
        })
    }

    fn parse_break_or_continue_statement(&mut self) -> Statement {
        let start = self.token_start();
        let keyword = self.bump();
        let is_break = keyword.kind == SyntaxKind::BreakKeyword;

        let label = if !self.has_preceding_line_break() && self.is_identifier() {
            let token = self.bump();
            Some(Identifier::new(token.text, token.span))
        } else {
            None
        };

        match &label {
            Some(label) => match self.find_label(&label.name) {
                None => {
                    self.parse_error_at(label.span, diagnostic_codes::UNDEFINED_LABEL, &[&label.name]);
                }
                Some(LabelKind::Other) if !is_break => {
                    self.parse_error_at(label.span, diagnostic_codes::CONTINUE_OUTSIDE_LOOP, &[]);
                }
                Some(_) => {}
            },
            None if is_break => {
                if !self.in_context(ContextFlags::IN_LOOP | ContextFlags::IN_SWITCH) {
                    self.parse_error_at(keyword.span, diagnostic_codes::BREAK_OUTSIDE_LOOP_OR_SWITCH, &[]);
                }
            }
            None => {
                if !self.in_context(ContextFlags::IN_LOOP) {
                    self.parse_error_at(keyword.span, diagnostic_codes::CONTINUE_OUTSIDE_LOOP, &[]);
                }
            }
        }

        self.parse_semicolon();
        let span = self.span_from(start);
        if is_break {
            Statement::Break(BreakStatement { label, span })
        } else {
            Statement::Continue(ContinueStatement { label, span })
        }
    }

    /// Whether the statement after the current `label:` (and any further
    /// labels) is a loop.
    fn labels_a_loop(&self) -> bool {
        let mut n = 2;
        while self.is_identifier_kind(self.peek_kind(n))
            && self.peek_kind(n + 1) == SyntaxKind::ColonToken
        {
            n += 2;
        }
        matches!(
            self.peek_kind(n),
            SyntaxKind::ForKeyword | SyntaxKind::WhileKeyword | SyntaxKind::DoKeyword
        )
    }

    fn parse_labeled_statement(&mut self) -> Statement {
        let start = self.token_start();
        let kind = if self.labels_a_loop() {
            LabelKind::Loop
        } else {
            LabelKind::Other
        };
        let token = self.bump();
        self.check_identifier_word(&token);
        let label = Identifier::new(token.text, token.span);
        self.next_token();

        let fresh = self.find_label(&label.name).is_none();
        if fresh {
            if let Some(scope) = self.label_scopes.last_mut() {
                scope.insert(label.name.clone(), kind);
            }
        } else {
            self.parse_error_at(label.span, diagnostic_codes::DUPLICATE_LABEL, &[&label.name]);
        }

        let body = self.parse_statement();

        if fresh && let Some(scope) = self.label_scopes.last_mut() {
            scope.remove(&label.name);
        }
        Statement::Labeled(LabeledStatement {
            label,
            body: Box::new(body),
            span: self.span_from(start),
        })
    }

    fn parse_with_statement(&mut self) -> Statement {
        let start = self.token_start();
        if self.is_strict() {
            self.parse_error_at_current_token(diagnostic_codes::WITH_IN_STRICT_MODE, &[]);
        }
        self.next_token();
        let object = self.parse_parenthesized_condition();
        let body = self.with_context(ContextFlags::IN_WITH, ContextFlags::empty(), |p| {
            p.parse_embedded_statement("with")
        });
        Statement::With(WithStatement {
            object,
            body: Box::new(body),
            span: self.span_from(start),
        })
    }

    fn parse_debugger_statement(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();
        self.parse_semicolon();
        let span = self.span_from(start);
        self.parse_warning_at(span, diagnostic_codes::DEBUGGER_STATEMENT, &[]);
        Statement::Debugger(DebuggerStatement { span })
    }

    fn parse_expression_statement(&mut self) -> Statement {
        let start = self.token_start();
        let before = self.cursor.checkpoint();
        let expression = self.parse_expression_allow_in();
        // Nothing consumed: leave recovery to the statement list.
        if self.cursor.checkpoint() != before {
            self.parse_semicolon();
        }
        Statement::Expression(ExpressionStatement {
            expression,
            span: self.span_from(start),
        })
    }
}
