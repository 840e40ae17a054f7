//! Expression parsing: assignment, precedence climbing, unary/postfix,
//! call/member chains and primary expressions.

use super::state::{ContextFlags, FUNCTION_BOUNDARY, ParserState};
use crate::ast::*;
use kestrel_common::Position;
use kestrel_common::diagnostics::diagnostic_codes;
use kestrel_scanner::{SyntaxKind, Token, TokenFlags};

/// How an arrow function begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ArrowStart {
    /// `x => ...`
    Identifier,
    /// `(a, b) => ...`
    Parenthesized,
    /// `async x => ...`
    AsyncIdentifier,
    /// `async (a, b) => ...`
    AsyncParenthesized,
}

impl ArrowStart {
    fn is_async(self) -> bool {
        matches!(self, ArrowStart::AsyncIdentifier | ArrowStart::AsyncParenthesized)
    }
}

impl ParserState {
    // =========================================================================
    // Identifiers
    // =========================================================================

    /// Whether `await` is an operator in the current context.
    pub(crate) fn await_is_operator(&self) -> bool {
        self.in_context(ContextFlags::IN_ASYNC | ContextFlags::IN_STATIC_BLOCK) || self.is_module()
    }

    /// Token kinds usable as an identifier reference or binding name here.
    pub(crate) fn is_identifier_kind(&self, kind: SyntaxKind) -> bool {
        match kind {
            SyntaxKind::Identifier | SyntaxKind::ReservedWord | SyntaxKind::LetKeyword => true,
            SyntaxKind::YieldKeyword => !self.in_context(ContextFlags::IN_GENERATOR),
            SyntaxKind::AwaitKeyword => !self.await_is_operator(),
            _ => false,
        }
    }

    #[inline]
    pub(crate) fn is_identifier(&self) -> bool {
        self.is_identifier_kind(self.token())
    }

    fn report_strict_reserved(&mut self, token: &Token) {
        if self.is_strict() {
            self.parse_error_at(
                token.span,
                diagnostic_codes::RESERVED_WORD_AS_IDENTIFIER,
                &[&token.text],
            );
        } else {
            self.parse_warning_at(
                token.span,
                diagnostic_codes::RESERVED_WORD_AS_IDENTIFIER_SLOPPY,
                &[&token.text],
            );
        }
    }

    /// Report a word that may not be used as a name in this context.
    pub(crate) fn check_identifier_word(&mut self, token: &Token) {
        match token.kind {
            SyntaxKind::Identifier | SyntaxKind::UndefinedLiteral => {}
            SyntaxKind::ReservedWord | SyntaxKind::LetKeyword => self.report_strict_reserved(token),
            SyntaxKind::YieldKeyword if !self.in_context(ContextFlags::IN_GENERATOR) => {
                self.report_strict_reserved(token);
            }
            SyntaxKind::AwaitKeyword if !self.await_is_operator() => {}
            _ => self.parse_error_at(
                token.span,
                diagnostic_codes::RESERVED_WORD_AS_IDENTIFIER,
                &[&token.text],
            ),
        }
    }

    /// A binding name. Keywords are consumed with an error so that
    /// `var if = 1` recovers as a declaration.
    pub(crate) fn parse_binding_identifier(&mut self) -> Identifier {
        if self.token().is_identifier_or_keyword() {
            let token = self.bump();
            self.check_identifier_word(&token);
            return Identifier::new(token.text, token.span);
        }
        if self.is_eof() {
            self.parse_error_at_current_token(diagnostic_codes::UNEXPECTED_END_OF_INPUT, &[]);
        } else if !self.is_token(SyntaxKind::Unknown) {
            self.parse_error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
        }
        Identifier::new("", self.placeholder_span())
    }

    /// A property name after `.`: any identifier or keyword.
    fn parse_identifier_name(&mut self) -> Identifier {
        if self.token().is_identifier_or_keyword() {
            let token = self.bump();
            return Identifier::new(token.text, token.span);
        }
        self.parse_error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
        Identifier::new("", self.placeholder_span())
    }

    fn parse_private_name(&mut self) -> PrivateName {
        let token = self.bump();
        self.require_feature(self.options.private_fields, "Private class members", token.span);
        if !self.in_context(ContextFlags::IN_CLASS) {
            self.parse_error_at(token.span, diagnostic_codes::PRIVATE_NAME_OUTSIDE_CLASS, &[]);
        }
        let name = token.text.strip_prefix('#').unwrap_or(&token.text).to_string();
        PrivateName {
            name,
            span: token.span,
        }
    }

    // =========================================================================
    // Expression entry points
    // =========================================================================

    /// Expression, including the comma operator.
    pub(crate) fn parse_expression(&mut self) -> Expression {
        let start = self.token_start();
        let first = self.parse_assignment_expression();
        if !self.is_token(SyntaxKind::CommaToken) {
            return first;
        }
        let mut expressions = vec![first];
        while self.parse_optional(SyntaxKind::CommaToken) {
            expressions.push(self.parse_assignment_expression());
        }
        Expression::Sequence(SequenceExpression {
            expressions,
            span: self.span_from(start),
        })
    }

    /// Expression with `in` allowed, whatever the enclosing context.
    pub(crate) fn parse_expression_allow_in(&mut self) -> Expression {
        self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            p.parse_expression()
        })
    }

    pub(crate) fn parse_assignment_expression_allow_in(&mut self) -> Expression {
        self.with_context(ContextFlags::empty(), ContextFlags::NO_IN, |p| {
            p.parse_assignment_expression()
        })
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> Expression {
        if !self.enter_recursion() {
            return self.nesting_error_expression();
        }
        let expression = self.parse_assignment_expression_worker();
        self.exit_recursion();
        expression
    }

    /// Placeholder once the nesting limit is hit. Consumes the current token
    /// so that the caller always makes progress.
    fn nesting_error_expression(&mut self) -> Expression {
        if self.is_eof() {
            return Expression::error(self.placeholder_span());
        }
        let token = self.bump();
        Expression::error(token.span)
    }

    fn parse_assignment_expression_worker(&mut self) -> Expression {
        if self.is_token(SyntaxKind::YieldKeyword)
            && (self.in_context(ContextFlags::IN_GENERATOR) || self.is_strict())
        {
            return self.parse_yield_expression();
        }

        if let Some(kind) = self.arrow_function_start() {
            return self.parse_arrow_function(kind);
        }

        let start = self.token_start();
        let left = self.parse_conditional_expression();

        let Some(operator) = AssignmentOperator::from_token(self.token()) else {
            return left;
        };
        let target = self.to_assignment_target(left, operator);
        self.next_token();
        let value = self.parse_assignment_expression();
        Expression::Assignment(AssignmentExpression {
            operator,
            target: Box::new(target),
            value: Box::new(value),
            span: self.span_from(start),
        })
    }

    fn parse_yield_expression(&mut self) -> Expression {
        let start = self.token_start();
        let keyword_span = self.token_span();
        self.next_token();
        if !self.in_context(ContextFlags::IN_GENERATOR) {
            self.parse_error_at(keyword_span, diagnostic_codes::YIELD_OUTSIDE_GENERATOR, &[]);
        }

        let mut delegate = false;
        let mut argument = None;
        if !self.has_preceding_line_break() {
            if self.parse_optional(SyntaxKind::AsteriskToken) {
                delegate = true;
                argument = Some(Box::new(self.parse_assignment_expression()));
            } else if self.is_start_of_expression() {
                argument = Some(Box::new(self.parse_assignment_expression()));
            }
        }
        Expression::Yield(YieldExpression {
            argument,
            delegate,
            span: self.span_from(start),
        })
    }

    /// Tokens that can begin an expression.
    pub(crate) fn is_start_of_expression(&self) -> bool {
        let kind = self.token();
        if kind.is_literal() || self.is_identifier_kind(kind) {
            return true;
        }
        matches!(
            kind,
            SyntaxKind::PrivateIdentifier
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::FunctionKeyword
                | SyntaxKind::ClassKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::ImportKeyword
                | SyntaxKind::YieldKeyword
                | SyntaxKind::AwaitKeyword
                | SyntaxKind::TypeOfKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::DeleteKeyword
                | SyntaxKind::PlusToken
                | SyntaxKind::MinusToken
                | SyntaxKind::ExclamationToken
                | SyntaxKind::TildeToken
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::SlashToken
                | SyntaxKind::SlashEqualsToken
        )
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    fn arrow_function_start(&mut self) -> Option<ArrowStart> {
        let kind = self.token();
        if kind == SyntaxKind::OpenParenToken {
            return self
                .look_ahead(|p| p.skip_parenthesized_and_check_arrow())
                .then_some(ArrowStart::Parenthesized);
        }
        if !self.is_identifier_kind(kind) {
            return None;
        }
        if self.peek_kind(1) == SyntaxKind::EqualsGreaterThanToken {
            return Some(ArrowStart::Identifier);
        }
        if !self.is_contextual("async") || self.peek(1).has_preceding_line_break() {
            return None;
        }
        let next = self.peek_kind(1);
        if self.is_identifier_kind(next) && self.peek_kind(2) == SyntaxKind::EqualsGreaterThanToken {
            return Some(ArrowStart::AsyncIdentifier);
        }
        if next == SyntaxKind::OpenParenToken {
            return self
                .look_ahead(|p| {
                    p.next_token();
                    p.skip_parenthesized_and_check_arrow()
                })
                .then_some(ArrowStart::AsyncParenthesized);
        }
        None
    }

    /// With the cursor on `(`, skip to the matching `)` and report whether
    /// `=>` follows.
    fn skip_parenthesized_and_check_arrow(&mut self) -> bool {
        let mut depth = 0usize;
        loop {
            match self.token() {
                SyntaxKind::EndOfFileToken => return false,
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return self.is_token(SyntaxKind::EqualsGreaterThanToken);
                    }
                }
                _ => {}
            }
            self.next_token();
        }
    }

    fn parse_arrow_function(&mut self, kind: ArrowStart) -> Expression {
        let start = self.token_start();
        let is_async = kind.is_async();
        if is_async {
            self.require_feature(self.options.async_functions, "Async functions", self.token_span());
            self.next_token();
        }
        self.require_feature(self.options.arrow_functions, "Arrow functions", self.token_span());

        let mut add = ContextFlags::IN_FUNCTION;
        if is_async {
            add |= ContextFlags::IN_ASYNC;
        }
        let params = match kind {
            ArrowStart::Identifier | ArrowStart::AsyncIdentifier => {
                vec![Pattern::Identifier(self.parse_binding_identifier())]
            }
            ArrowStart::Parenthesized | ArrowStart::AsyncParenthesized => self.with_context(
                add,
                FUNCTION_BOUNDARY,
                |p| p.parse_parameter_list(),
            ),
        };

        if self.is_token(SyntaxKind::EqualsGreaterThanToken) && self.has_preceding_line_break() {
            self.parse_error_at_current_token(diagnostic_codes::LINE_BREAK_BEFORE_ARROW, &[]);
        }
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);

        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            let body = self.with_context(add, FUNCTION_BOUNDARY, |p| {
                p.with_label_scope(|p| p.parse_function_body())
            });
            ArrowBody::Block(body)
        } else {
            // A concise body keeps the caller's `in` restriction.
            let expression = self.with_context(
                add,
                FUNCTION_BOUNDARY - ContextFlags::NO_IN,
                |p| p.parse_assignment_expression(),
            );
            ArrowBody::Expression(Box::new(expression))
        };

        Expression::Arrow(Box::new(ArrowFunction {
            params,
            body,
            is_async,
            span: self.span_from(start),
        }))
    }

    // =========================================================================
    // Conditional and binary
    // =========================================================================

    fn parse_conditional_expression(&mut self) -> Expression {
        let start = self.token_start();
        let test = self.parse_binary_expression(0);
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return test;
        }
        let consequent = self.parse_assignment_expression_allow_in();
        self.parse_expected(SyntaxKind::ColonToken);
        let alternate = self.parse_assignment_expression();
        Expression::Conditional(ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            span: self.span_from(start),
        })
    }

    /// Binding power of a binary operator token; 0 when it is not one.
    fn binary_precedence(&self, kind: SyntaxKind) -> u8 {
        match kind {
            SyntaxKind::AmpersandAmpersandToken
            | SyntaxKind::BarBarToken
            | SyntaxKind::QuestionQuestionToken => 1,
            SyntaxKind::AmpersandToken | SyntaxKind::BarToken | SyntaxKind::CaretToken => 2,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::EqualsEqualsEqualsToken
            | SyntaxKind::ExclamationEqualsEqualsToken => 3,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::InstanceOfKeyword => 4,
            SyntaxKind::InKeyword if !self.in_context(ContextFlags::NO_IN) => 4,
            SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 5,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => 6,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 7,
            SyntaxKind::AsteriskAsteriskToken => 8,
            _ => 0,
        }
    }

    /// Unary operator text when the current token starts a unary
    /// expression (not an update expression).
    fn unary_operator_text(&self) -> Option<&'static str> {
        if self.is_token(SyntaxKind::AwaitKeyword) && self.await_is_operator() {
            return Some("await");
        }
        UnaryOperator::from_token(self.token()).map(UnaryOperator::as_str)
    }

    /// Precedence climbing. Operators bind tighter than `min_prec` are
    /// folded into `left`; `**` recurses for right associativity.
    fn parse_binary_expression(&mut self, min_prec: u8) -> Expression {
        let start = self.token_start();
        let unary_operator = self.unary_operator_text();
        let mut left = self.parse_unary_expression();
        let mut first = true;

        loop {
            let kind = self.token();
            let prec = self.binary_precedence(kind);
            if prec == 0 || prec <= min_prec {
                break;
            }
            let operator_span = self.token_span();

            if kind == SyntaxKind::AsteriskAsteriskToken {
                self.require_feature(
                    self.options.exponent_operator,
                    "Exponentiation operators",
                    operator_span,
                );
                if let (true, Some(text)) = (first, unary_operator) {
                    self.parse_error_at(
                        left.span(),
                        diagnostic_codes::UNARY_OPERAND_OF_EXPONENT,
                        &[text],
                    );
                }
            } else if kind == SyntaxKind::QuestionQuestionToken {
                self.require_feature(
                    self.options.nullish_coalescing,
                    "Nullish coalescing operators",
                    operator_span,
                );
            }
            self.next_token();

            let right = if kind == SyntaxKind::AsteriskAsteriskToken {
                if !self.enter_recursion() {
                    return self.nesting_error_expression();
                }
                let right = self.parse_binary_expression(prec - 1);
                self.exit_recursion();
                right
            } else {
                self.parse_binary_expression(prec)
            };

            let span = self.span_from(start);
            left = match LogicalOperator::from_token(kind) {
                Some(operator) => Expression::Logical(LogicalExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    span,
                }),
                None => match BinaryOperator::from_token(kind) {
                    Some(operator) => Expression::Binary(BinaryExpression {
                        operator,
                        left: Box::new(left),
                        right: Box::new(right),
                        span,
                    }),
                    None => Expression::error(span),
                },
            };
            first = false;
        }
        left
    }

    // =========================================================================
    // Unary and postfix
    // =========================================================================

    fn parse_unary_expression(&mut self) -> Expression {
        let start = self.token_start();
        let kind = self.token();

        if let Some(operator) = UpdateOperator::from_token(kind) {
            self.next_token();
            let argument = self.parse_unary_operand();
            self.check_update_target(&argument);
            return Expression::Update(UpdateExpression {
                operator,
                prefix: true,
                argument: Box::new(argument),
                span: self.span_from(start),
            });
        }

        if let Some(operator) = UnaryOperator::from_token(kind) {
            self.next_token();
            let argument = self.parse_unary_operand();
            if operator == UnaryOperator::Delete
                && self.is_strict()
                && matches!(argument, Expression::Identifier(_))
            {
                self.parse_error_at(
                    argument.span(),
                    diagnostic_codes::DELETE_IDENTIFIER_IN_STRICT_MODE,
                    &[],
                );
            }
            return Expression::Unary(UnaryExpression {
                operator,
                argument: Box::new(argument),
                span: self.span_from(start),
            });
        }

        if kind == SyntaxKind::AwaitKeyword && self.await_is_operator() {
            return self.parse_await_expression();
        }

        self.parse_postfix_expression()
    }

    fn parse_unary_operand(&mut self) -> Expression {
        if !self.enter_recursion() {
            return self.nesting_error_expression();
        }
        let operand = self.parse_unary_expression();
        self.exit_recursion();
        operand
    }

    fn parse_await_expression(&mut self) -> Expression {
        let start = self.token_start();
        let keyword_span = self.token_span();
        self.next_token();

        if !self.in_context(ContextFlags::IN_ASYNC) {
            let top_level = self.is_module()
                && !self.in_context(ContextFlags::IN_FUNCTION | ContextFlags::IN_STATIC_BLOCK);
            if top_level {
                self.require_feature(
                    self.options.top_level_await,
                    "Top-level 'await' expressions",
                    keyword_span,
                );
            } else {
                self.parse_error_at(keyword_span, diagnostic_codes::AWAIT_OUTSIDE_ASYNC, &[]);
            }
        }

        let argument = self.parse_unary_operand();
        Expression::Await(AwaitExpression {
            argument: Box::new(argument),
            span: self.span_from(start),
        })
    }

    fn check_update_target(&mut self, target: &Expression) {
        if !matches!(
            target,
            Expression::Identifier(_) | Expression::Member(_) | Expression::Error(_)
        ) {
            self.parse_error_at(target.span(), diagnostic_codes::INVALID_ASSIGNMENT_TARGET, &[]);
        }
    }

    fn parse_postfix_expression(&mut self) -> Expression {
        let start = self.token_start();
        let expression = self.parse_left_hand_side_expression();
        let Some(operator) = UpdateOperator::from_token(self.token()) else {
            return expression;
        };
        if self.has_preceding_line_break() {
            return expression;
        }
        self.check_update_target(&expression);
        self.next_token();
        Expression::Update(UpdateExpression {
            operator,
            prefix: false,
            argument: Box::new(expression),
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Call, member and `new`
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> Expression {
        let start = self.token_start();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_member_chain(start, expression, true)
    }

    /// `.name`, `?.`, `[expr]`, call arguments and tagged templates
    /// following `expression`. Calls are excluded for a `new` callee.
    fn parse_member_chain(
        &mut self,
        start: Position,
        mut expression: Expression,
        allow_calls: bool,
    ) -> Expression {
        let mut in_optional_chain = false;
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let property = self.parse_member_property_name();
                    expression = Expression::Member(MemberExpression {
                        object: Box::new(expression),
                        property,
                        optional: false,
                        span: self.span_from(start),
                    });
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.require_feature(
                        self.options.optional_chaining,
                        "Optional chains",
                        self.token_span(),
                    );
                    self.next_token();
                    in_optional_chain = true;
                    expression = match self.token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments();
                            Expression::Call(CallExpression {
                                callee: Box::new(expression),
                                arguments,
                                optional: true,
                                span: self.span_from(start),
                            })
                        }
                        SyntaxKind::OpenBracketToken => {
                            let property = self.parse_computed_member();
                            Expression::Member(MemberExpression {
                                object: Box::new(expression),
                                property,
                                optional: true,
                                span: self.span_from(start),
                            })
                        }
                        _ => {
                            let property = self.parse_member_property_name();
                            Expression::Member(MemberExpression {
                                object: Box::new(expression),
                                property,
                                optional: true,
                                span: self.span_from(start),
                            })
                        }
                    };
                }
                SyntaxKind::OpenBracketToken => {
                    let property = self.parse_computed_member();
                    expression = Expression::Member(MemberExpression {
                        object: Box::new(expression),
                        property,
                        optional: false,
                        span: self.span_from(start),
                    });
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let arguments = self.parse_arguments();
                    expression = Expression::Call(CallExpression {
                        callee: Box::new(expression),
                        arguments,
                        optional: false,
                        span: self.span_from(start),
                    });
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let quasi = self.parse_template_literal();
                    expression = Expression::TaggedTemplate(TaggedTemplateExpression {
                        tag: Box::new(expression),
                        quasi,
                        span: self.span_from(start),
                    });
                }
                _ => break,
            }
        }

        if in_optional_chain {
            expression = Expression::OptionalChain(OptionalChain {
                expression: Box::new(expression),
                span: self.span_from(start),
            });
        }
        expression
    }

    fn parse_member_property_name(&mut self) -> MemberProperty {
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            MemberProperty::PrivateName(self.parse_private_name())
        } else {
            MemberProperty::Identifier(self.parse_identifier_name())
        }
    }

    fn parse_computed_member(&mut self) -> MemberProperty {
        self.next_token();
        let property = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseBracketToken);
        MemberProperty::Computed(Box::new(property))
    }

    /// `( args )`, with spread arguments and a warning for a trailing comma.
    pub(crate) fn parse_arguments(&mut self) -> Vec<Expression> {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken) && !self.is_eof() {
            let argument = if self.is_token(SyntaxKind::DotDotDotToken) {
                self.parse_spread_element()
            } else {
                self.parse_assignment_expression_allow_in()
            };
            arguments.push(argument);

            if !self.is_token(SyntaxKind::CommaToken) {
                break;
            }
            let comma = self.token_span();
            self.next_token();
            if self.is_token(SyntaxKind::CloseParenToken) {
                self.parse_warning_at(comma, diagnostic_codes::TRAILING_COMMA, &["argument list"]);
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_spread_element(&mut self) -> Expression {
        let start = self.token_start();
        self.require_feature(self.options.spread, "Spread elements", self.token_span());
        self.next_token();
        let argument = self.parse_assignment_expression_allow_in();
        Expression::Spread(SpreadElement {
            argument: Box::new(argument),
            span: self.span_from(start),
        })
    }

    fn parse_new_expression(&mut self) -> Expression {
        let start = self.token_start();
        let keyword = self.bump();

        if self.parse_optional(SyntaxKind::DotToken) {
            let property = if self.is_contextual("target") {
                let token = self.bump();
                Identifier::new(token.text, token.span)
            } else {
                self.parse_error_at_current_token(diagnostic_codes::TOKEN_EXPECTED, &["target"]);
                Identifier::new("", self.placeholder_span())
            };
            let span = self.span_from(start);
            if !self.in_context(ContextFlags::ALLOW_NEW_TARGET) {
                self.parse_error_at(span, diagnostic_codes::NEW_TARGET_OUTSIDE_FUNCTION, &[]);
            }
            return Expression::MetaProperty(MetaProperty {
                meta: Identifier::new(keyword.text, keyword.span),
                property,
                span,
            });
        }

        if !self.enter_recursion() {
            return self.nesting_error_expression();
        }
        let callee_start = self.token_start();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let callee = self.parse_member_chain(callee_start, callee, false);
        self.exit_recursion();

        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            self.parse_arguments()
        } else {
            Vec::new()
        };
        Expression::New(NewExpression {
            callee: Box::new(callee),
            arguments,
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> Expression {
        let start = self.token_start();
        match self.token() {
            SyntaxKind::Identifier
                if self.is_contextual("async")
                    && self.peek_kind(1) == SyntaxKind::FunctionKeyword
                    && !self.peek(1).has_preceding_line_break() =>
            {
                self.parse_function_expression()
            }
            kind if self.is_identifier_kind(kind) => {
                let token = self.bump();
                self.check_identifier_word(&token);
                Expression::Identifier(Identifier::new(token.text, token.span))
            }
            SyntaxKind::YieldKeyword | SyntaxKind::AwaitKeyword => {
                // `yield` in a generator parameter list, `await` as a name in
                // async code.
                let token = self.bump();
                self.parse_error_at(
                    token.span,
                    diagnostic_codes::RESERVED_WORD_AS_IDENTIFIER,
                    &[&token.text],
                );
                Expression::Identifier(Identifier::new(token.text, token.span))
            }
            SyntaxKind::PrivateIdentifier => Expression::PrivateName(self.parse_private_name()),
            SyntaxKind::ThisKeyword => {
                self.next_token();
                Expression::This(ThisExpression {
                    span: self.span_from(start),
                })
            }
            SyntaxKind::SuperKeyword => {
                self.next_token();
                Expression::Super(SuperExpression {
                    span: self.span_from(start),
                })
            }
            SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral
            | SyntaxKind::BigIntLiteral
            | SyntaxKind::BooleanLiteral
            | SyntaxKind::NullLiteral
            | SyntaxKind::UndefinedLiteral
            | SyntaxKind::RegularExpressionLiteral => Expression::Literal(self.parse_literal()),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                Expression::Template(self.parse_template_literal())
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function_expression(),
            SyntaxKind::ClassKeyword => {
                let class = self.parse_class(false);
                Expression::Class(Box::new(class))
            }
            SyntaxKind::ImportKeyword => self.parse_import_expression(),
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            // The scanner guessed division after `)` or `}`; an operand is
            // expected here, so the slash opens a regular expression.
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
                if self.rescan_slash_as_regex() =>
            {
                self.parse_primary_expression()
            }
            SyntaxKind::Unknown => {
                // Already reported by the scanner.
                let token = self.bump();
                Expression::error(token.span)
            }
            _ => {
                self.report_expression_expected();
                Expression::error(self.placeholder_span())
            }
        }
    }

    /// The current token as a literal node. The caller guarantees the
    /// token is a literal.
    pub(crate) fn parse_literal(&mut self) -> Literal {
        let token = self.bump();
        let value = match token.kind {
            SyntaxKind::StringLiteral => LiteralValue::String(token.text),
            SyntaxKind::NumericLiteral => {
                LiteralValue::Number(numeric_literal_value(&token.text, token.flags))
            }
            SyntaxKind::BigIntLiteral => {
                self.require_feature(self.options.bigint, "BigInt literals", token.span);
                let digits = token.text.strip_suffix('n').unwrap_or(&token.text);
                LiteralValue::BigInt(digits.to_string())
            }
            SyntaxKind::BooleanLiteral => LiteralValue::Boolean(token.text == "true"),
            SyntaxKind::NullLiteral => LiteralValue::Null,
            SyntaxKind::RegularExpressionLiteral => {
                let (pattern, flags) = split_regex(&token.text);
                LiteralValue::RegExp {
                    pattern: pattern.to_string(),
                    flags: flags.to_string(),
                }
            }
            _ => LiteralValue::Undefined,
        };
        Literal {
            value,
            span: token.span,
        }
    }

    /// Template literal starting at a `NoSubstitutionTemplateLiteral` or
    /// `TemplateHead` token.
    pub(crate) fn parse_template_literal(&mut self) -> TemplateLiteral {
        let start = self.token_start();
        self.require_feature(
            self.options.template_literals,
            "Template literals",
            self.token_span(),
        );

        let head = self.bump();
        let mut quasis = vec![TemplateElement {
            cooked: head.text,
            tail: head.kind == SyntaxKind::NoSubstitutionTemplateLiteral,
            span: head.span,
        }];
        let mut expressions = Vec::new();

        if head.kind == SyntaxKind::TemplateHead {
            loop {
                let expression = self.with_context(
                    ContextFlags::IN_TEMPLATE,
                    ContextFlags::NO_IN,
                    |p| p.parse_expression(),
                );
                expressions.push(expression);
                match self.token() {
                    SyntaxKind::TemplateMiddle => {
                        let token = self.bump();
                        quasis.push(TemplateElement {
                            cooked: token.text,
                            tail: false,
                            span: token.span,
                        });
                    }
                    SyntaxKind::TemplateTail => {
                        let token = self.bump();
                        quasis.push(TemplateElement {
                            cooked: token.text,
                            tail: true,
                            span: token.span,
                        });
                        break;
                    }
                    _ => {
                        if !self.is_token(SyntaxKind::Unknown) {
                            self.parse_expected(SyntaxKind::CloseBraceToken);
                        }
                        quasis.push(TemplateElement {
                            cooked: String::new(),
                            tail: true,
                            span: self.placeholder_span(),
                        });
                        break;
                    }
                }
            }
        }

        TemplateLiteral {
            quasis,
            expressions,
            span: self.span_from(start),
        }
    }

    fn parse_parenthesized_expression(&mut self) -> Expression {
        let start = self.token_start();
        self.next_token();
        let expression = self.parse_expression_allow_in();
        self.parse_expected(SyntaxKind::CloseParenToken);
        expression.with_span(self.span_from(start))
    }

    fn parse_array_literal(&mut self) -> Expression {
        let start = self.token_start();
        self.next_token();
        let mut elements = Vec::new();
        loop {
            match self.token() {
                SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken => break,
                SyntaxKind::CommaToken => {
                    self.parse_warning_at(self.token_span(), diagnostic_codes::ARRAY_HOLE, &[]);
                    elements.push(None);
                    self.next_token();
                }
                _ => {
                    let element = if self.is_token(SyntaxKind::DotDotDotToken) {
                        self.parse_spread_element()
                    } else {
                        self.parse_assignment_expression_allow_in()
                    };
                    elements.push(Some(element));
                    if !self.parse_optional(SyntaxKind::CommaToken) {
                        break;
                    }
                }
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        Expression::Array(ArrayExpression {
            elements,
            span: self.span_from(start),
        })
    }

    fn parse_object_literal(&mut self) -> Expression {
        let start = self.token_start();
        self.next_token();
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_eof() {
            let before = self.cursor.checkpoint();
            let member = if self.is_token(SyntaxKind::DotDotDotToken) {
                match self.parse_spread_element() {
                    Expression::Spread(spread) => ObjectMember::Spread(spread),
                    other => ObjectMember::Spread(SpreadElement {
                        span: other.span(),
                        argument: Box::new(other),
                    }),
                }
            } else {
                ObjectMember::Property(self.parse_object_property())
            };
            if self.cursor.checkpoint() == before {
                break;
            }
            properties.push(member);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        Expression::Object(ObjectExpression {
            properties,
            span: self.span_from(start),
        })
    }

    /// Whether `kind` after a `get`/`set`/`async`/`static` word means the
    /// word is itself the member name.
    pub(crate) fn ends_member_name(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CommaToken
                | SyntaxKind::ColonToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::EqualsToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::EndOfFileToken
        )
    }

    /// Leading `async`, `*`, `get` or `set` of a method.
    pub(crate) fn parse_method_modifiers(&mut self) -> (bool, bool, PropertyKind) {
        let mut is_async = false;
        let mut is_generator = false;
        let mut kind = PropertyKind::Init;

        if self.is_contextual("async")
            && !Self::ends_member_name(self.peek_kind(1))
            && !self.peek(1).has_preceding_line_break()
        {
            self.require_feature(self.options.async_functions, "Async functions", self.token_span());
            is_async = true;
            self.next_token();
        }
        if self.is_token(SyntaxKind::AsteriskToken) {
            self.require_feature(self.options.generators, "Generators", self.token_span());
            is_generator = true;
            self.next_token();
        }
        if !is_async
            && !is_generator
            && (self.is_contextual("get") || self.is_contextual("set"))
            && !Self::ends_member_name(self.peek_kind(1))
        {
            kind = if self.is_contextual("get") {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            self.next_token();
        }
        (is_async, is_generator, kind)
    }

    fn parse_object_property(&mut self) -> Property {
        let start = self.token_start();
        let (is_async, is_generator, kind) = self.parse_method_modifiers();
        let key_token = self.current().clone();
        let key = self.parse_property_key();
        if let PropertyKey::PrivateName(name) = &key {
            self.parse_error_at(name.span, diagnostic_codes::PRIVATE_NAME_OUTSIDE_CLASS, &[]);
        }

        let is_method = is_async
            || is_generator
            || kind != PropertyKind::Init
            || self.is_token(SyntaxKind::OpenParenToken);
        if is_method {
            let function = self.parse_method_function(is_async, is_generator);
            self.check_accessor_parameters(kind, &key, &function);
            return Property {
                key,
                value: Expression::Function(Box::new(function)),
                kind,
                method: kind == PropertyKind::Init,
                shorthand: false,
                span: self.span_from(start),
            };
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_assignment_expression_allow_in();
            return Property {
                key,
                value,
                kind,
                method: false,
                shorthand: false,
                span: self.span_from(start),
            };
        }

        // Shorthand `{ a }`, or `{ a = 1 }` as a destructuring target.
        let value = match &key {
            PropertyKey::Identifier(id) if key_token.kind.is_identifier_or_keyword() => {
                self.check_identifier_word(&key_token);
                let reference = Expression::Identifier(id.clone());
                if self.is_token(SyntaxKind::EqualsToken) {
                    self.next_token();
                    let default = self.parse_assignment_expression_allow_in();
                    Expression::Assignment(AssignmentExpression {
                        operator: AssignmentOperator::Assign,
                        target: Box::new(Pattern::Identifier(id.clone())),
                        value: Box::new(default),
                        span: self.span_from(start),
                    })
                } else {
                    reference
                }
            }
            _ => {
                self.parse_expected(SyntaxKind::ColonToken);
                Expression::error(self.placeholder_span())
            }
        };
        Property {
            key,
            value,
            kind,
            method: false,
            shorthand: true,
            span: self.span_from(start),
        }
    }

    /// Property, method or class member name.
    pub(crate) fn parse_property_key(&mut self) -> PropertyKey {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                PropertyKey::Literal(self.parse_literal())
            }
            SyntaxKind::OpenBracketToken => {
                let start = self.token_start();
                self.next_token();
                let expression = self.parse_assignment_expression_allow_in();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                PropertyKey::Computed(ComputedKey {
                    expression: Box::new(expression),
                    span: self.span_from(start),
                })
            }
            SyntaxKind::PrivateIdentifier => {
                let token = self.bump();
                self.require_feature(self.options.private_fields, "Private class members", token.span);
                let name = token.text.strip_prefix('#').unwrap_or(&token.text).to_string();
                PropertyKey::PrivateName(PrivateName {
                    name,
                    span: token.span,
                })
            }
            kind if kind.is_identifier_or_keyword() => {
                let token = self.bump();
                PropertyKey::Identifier(Identifier::new(token.text, token.span))
            }
            _ => {
                if self.is_eof() {
                    self.parse_error_at_current_token(diagnostic_codes::UNEXPECTED_END_OF_INPUT, &[]);
                } else if !self.is_token(SyntaxKind::Unknown) {
                    self.parse_error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
                }
                PropertyKey::Identifier(Identifier::new("", self.placeholder_span()))
            }
        }
    }

    pub(crate) fn check_accessor_parameters(
        &mut self,
        kind: PropertyKind,
        key: &PropertyKey,
        function: &Function,
    ) {
        match kind {
            PropertyKind::Get if !function.params.is_empty() => {
                self.parse_error_at(key.span(), diagnostic_codes::GETTER_WITH_PARAMETERS, &[]);
            }
            PropertyKind::Set
                if function.params.len() != 1
                    || matches!(function.params[0], Pattern::Rest(_)) =>
            {
                self.parse_error_at(key.span(), diagnostic_codes::SETTER_PARAMETER_COUNT, &[]);
            }
            _ => {}
        }
    }

    fn parse_function_expression(&mut self) -> Expression {
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
            None
        } else {
            let mut add = ContextFlags::empty();
            if is_generator {
                add |= ContextFlags::IN_GENERATOR;
            }
            if is_async {
                add |= ContextFlags::IN_ASYNC;
            }
            Some(self.with_context(add, ContextFlags::empty(), |p| {
                p.parse_binding_identifier()
            }))
        };
        let function = self.parse_function_tail(start, id, is_async, is_generator);
        Expression::Function(Box::new(function))
    }

    fn parse_import_expression(&mut self) -> Expression {
        let start = self.token_start();
        let keyword = self.bump();

        if self.parse_optional(SyntaxKind::DotToken) {
            let property = if self.is_contextual("meta") {
                let token = self.bump();
                Identifier::new(token.text, token.span)
            } else {
                self.parse_error_at_current_token(diagnostic_codes::TOKEN_EXPECTED, &["meta"]);
                Identifier::new("", self.placeholder_span())
            };
            let span = self.span_from(start);
            self.require_feature(self.options.import_meta, "'import.meta' expressions", span);
            if !self.is_module() {
                self.parse_error_at(
                    span,
                    diagnostic_codes::MODULE_SYNTAX_OUTSIDE_MODULE,
                    &["import.meta"],
                );
            }
            return Expression::MetaProperty(MetaProperty {
                meta: Identifier::new(keyword.text, keyword.span),
                property,
                span,
            });
        }

        self.require_feature(self.options.dynamic_import, "Dynamic imports", keyword.span);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let source = self.parse_assignment_expression_allow_in();
        self.parse_optional(SyntaxKind::CommaToken);
        self.parse_expected(SyntaxKind::CloseParenToken);
        Expression::Import(ImportExpression {
            source: Box::new(source),
            span: self.span_from(start),
        })
    }

    // =========================================================================
    // Assignment targets
    // =========================================================================

    /// Reinterpret the left side of an assignment as a target.
    pub(crate) fn to_assignment_target(
        &mut self,
        expression: Expression,
        operator: AssignmentOperator,
    ) -> Pattern {
        match expression {
            Expression::Identifier(id) => Pattern::Identifier(id),
            Expression::Member(member) => Pattern::Member(member),
            Expression::Error(error) => Pattern::error(error.span),
            Expression::Array(_) | Expression::Object(_) if operator.is_plain() => {
                self.require_feature(
                    self.options.destructuring,
                    "Destructuring assignments",
                    expression.span(),
                );
                self.to_destructuring_pattern(expression)
            }
            other => {
                let span = other.span();
                self.parse_error_at(span, diagnostic_codes::INVALID_ASSIGNMENT_TARGET, &[]);
                Pattern::error(span)
            }
        }
    }

    /// An array or object literal reinterpreted as a destructuring pattern.
    fn to_destructuring_pattern(&mut self, expression: Expression) -> Pattern {
        match expression {
            Expression::Array(array) => {
                // Elisions in a pattern are not holes in a literal.
                let span = array.span;
                self.warnings.retain(|warning| {
                    warning.code != diagnostic_codes::ARRAY_HOLE || !span.contains(&warning.span)
                });

                let count = array.elements.len();
                let mut elements = Vec::with_capacity(count);
                for (index, element) in array.elements.into_iter().enumerate() {
                    let element = match element {
                        None => None,
                        Some(Expression::Spread(spread)) => {
                            if index + 1 != count {
                                self.parse_error_at(
                                    spread.span,
                                    diagnostic_codes::REST_ELEMENT_MUST_BE_LAST,
                                    &[],
                                );
                            }
                            let argument = self.to_pattern_element(*spread.argument, false);
                            Some(Pattern::Rest(RestElement {
                                argument: Box::new(argument),
                                span: spread.span,
                            }))
                        }
                        Some(other) => Some(self.to_pattern_element(other, true)),
                    };
                    elements.push(element);
                }
                Pattern::Array(ArrayPattern { elements, span })
            }
            Expression::Object(object) => {
                let span = object.span;
                let count = object.properties.len();
                let mut properties = Vec::with_capacity(count);
                let mut rest = None;
                for (index, member) in object.properties.into_iter().enumerate() {
                    match member {
                        ObjectMember::Spread(spread) => {
                            if index + 1 != count {
                                self.parse_error_at(
                                    spread.span,
                                    diagnostic_codes::REST_ELEMENT_MUST_BE_LAST,
                                    &[],
                                );
                            }
                            let argument = self.to_pattern_element(*spread.argument, false);
                            rest = Some(Box::new(RestElement {
                                argument: Box::new(argument),
                                span: spread.span,
                            }));
                        }
                        ObjectMember::Property(property) => {
                            if property.method || property.kind != PropertyKind::Init {
                                self.parse_error_at(
                                    property.span,
                                    diagnostic_codes::INVALID_DESTRUCTURING_TARGET,
                                    &[],
                                );
                                continue;
                            }
                            let value = self.to_pattern_element(property.value, true);
                            properties.push(PatternProperty {
                                key: property.key,
                                value,
                                shorthand: property.shorthand,
                                span: property.span,
                            });
                        }
                    }
                }
                Pattern::Object(ObjectPattern {
                    properties,
                    rest,
                    span,
                })
            }
            other => self.to_pattern_element(other, false),
        }
    }

    /// A nested destructuring element. Defaults (`a = 1`) are allowed when
    /// `allow_default` is set.
    fn to_pattern_element(&mut self, expression: Expression, allow_default: bool) -> Pattern {
        match expression {
            Expression::Identifier(id) => Pattern::Identifier(id),
            Expression::Member(member) => Pattern::Member(member),
            Expression::Error(error) => Pattern::error(error.span),
            Expression::Array(_) | Expression::Object(_) => self.to_destructuring_pattern(expression),
            Expression::Assignment(assignment)
                if allow_default && assignment.operator.is_plain() =>
            {
                Pattern::Assignment(AssignmentPattern {
                    left: assignment.target,
                    right: assignment.value,
                    span: assignment.span,
                })
            }
            other => {
                let span = other.span();
                self.parse_error_at(span, diagnostic_codes::INVALID_DESTRUCTURING_TARGET, &[]);
                Pattern::error(span)
            }
        }
    }
}

/// Numeric value of a numeric literal lexeme.
pub(crate) fn numeric_literal_value(text: &str, flags: TokenFlags) -> f64 {
    let cleaned: String;
    let text = if flags.contains(TokenFlags::CONTAINS_SEPARATOR) {
        cleaned = text.chars().filter(|&c| c != '_').collect();
        cleaned.as_str()
    } else {
        text
    };

    let radix = if flags.contains(TokenFlags::HEX_SPECIFIER) {
        16
    } else if flags.contains(TokenFlags::OCTAL_SPECIFIER) {
        8
    } else if flags.contains(TokenFlags::BINARY_SPECIFIER) {
        2
    } else {
        return text.parse::<f64>().unwrap_or(f64::NAN);
    };

    text.get(2..)
        .unwrap_or("")
        .chars()
        .try_fold(0f64, |value, c| {
            c.to_digit(radix).map(|digit| value * f64::from(radix) + f64::from(digit))
        })
        .unwrap_or(f64::NAN)
}

/// Split `/pattern/flags` at its closing slash.
pub(crate) fn split_regex(text: &str) -> (&str, &str) {
    let body = text.strip_prefix('/').unwrap_or(text);
    match body.rfind('/') {
        Some(end) => (&body[..end], &body[end + 1..]),
        None => (body, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values() {
        assert_eq!(numeric_literal_value("42", TokenFlags::empty()), 42.0);
        assert_eq!(numeric_literal_value(".5", TokenFlags::empty()), 0.5);
        assert_eq!(numeric_literal_value("1e3", TokenFlags::SCIENTIFIC), 1000.0);
        assert_eq!(numeric_literal_value("0xff", TokenFlags::HEX_SPECIFIER), 255.0);
        assert_eq!(numeric_literal_value("0o17", TokenFlags::OCTAL_SPECIFIER), 15.0);
        assert_eq!(numeric_literal_value("0b101", TokenFlags::BINARY_SPECIFIER), 5.0);
        assert_eq!(
            numeric_literal_value("1_000_000", TokenFlags::CONTAINS_SEPARATOR),
            1_000_000.0
        );
    }

    #[test]
    fn regex_split_uses_last_slash() {
        assert_eq!(split_regex("/a\\/b/gi"), ("a\\/b", "gi"));
        assert_eq!(split_regex("/[/]/"), ("[/]", ""));
    }
}
