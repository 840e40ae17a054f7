//! `import` and `export` declarations.

use super::state::ParserState;
use crate::ast::*;
use kestrel_common::diagnostics::diagnostic_codes;
use kestrel_scanner::{SyntaxKind, Token};
use kestrel_scanner::syntax_kind::describe;

impl ParserState {
    /// Consume the contextual keyword `word` or report it missing.
    fn parse_expected_contextual(&mut self, word: &str) -> bool {
        if self.is_contextual(word) {
            self.next_token();
            return true;
        }
        self.parse_error_at_current_token(diagnostic_codes::TOKEN_EXPECTED, &[word]);
        false
    }

    /// The string after `from`, or after `import` in a bare import.
    fn parse_module_specifier(&mut self) -> Literal {
        if self.is_token(SyntaxKind::StringLiteral) {
            return self.parse_literal();
        }
        self.parse_error_at_current_token(
            diagnostic_codes::TOKEN_EXPECTED,
            &[describe(SyntaxKind::StringLiteral)],
        );
        Literal {
            value: LiteralValue::String(String::new()),
            span: self.placeholder_span(),
        }
    }

    /// An imported or exported name: any identifier or keyword.
    fn parse_module_export_name(&mut self) -> Identifier {
        if self.token().is_identifier_or_keyword() {
            let token = self.bump();
            return Identifier::new(token.text, token.span);
        }
        if self.is_token(SyntaxKind::StringLiteral) {
            let token = self.bump();
            return Identifier::new(token.text, token.span);
        }
        self.parse_error_at_current_token(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
        Identifier::new("", self.placeholder_span())
    }

    pub(crate) fn parse_import_declaration(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();

        let mut specifiers = Vec::new();
        if !self.is_token(SyntaxKind::StringLiteral) {
            let mut expect_more = true;
            if self.is_identifier() {
                let local = self.parse_binding_identifier();
                specifiers.push(ImportSpecifier::Default {
                    span: local.span,
                    local,
                });
                expect_more = self.parse_optional(SyntaxKind::CommaToken);
            }
            if expect_more {
                match self.token() {
                    SyntaxKind::AsteriskToken => {
                        let namespace_start = self.token_start();
                        self.next_token();
                        self.parse_expected_contextual("as");
                        let local = self.parse_binding_identifier();
                        specifiers.push(ImportSpecifier::Namespace {
                            local,
                            span: self.span_from(namespace_start),
                        });
                    }
                    SyntaxKind::OpenBraceToken => self.parse_named_imports(&mut specifiers),
                    _ => {
                        self.parse_error_at_current_token(diagnostic_codes::TOKEN_EXPECTED, &["{"]);
                    }
                }
            }
            self.parse_expected_contextual("from");
        }

        let source = self.parse_module_specifier();
        self.parse_semicolon();
        Statement::Import(ImportDeclaration {
            specifiers,
            source,
            span: self.span_from(start),
        })
    }

    /// `{ a, b as c, default as d }`.
    fn parse_named_imports(&mut self, specifiers: &mut Vec<ImportSpecifier>) {
        self.next_token();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_eof() {
            let start = self.token_start();
            let imported_token = self.current().clone();
            let imported = self.parse_module_export_name();
            let local = if self.is_contextual("as") {
                self.next_token();
                self.parse_binding_identifier()
            } else {
                if imported_token.kind == SyntaxKind::StringLiteral {
                    self.parse_expected_contextual("as");
                } else {
                    self.check_identifier_word(&imported_token);
                }
                imported.clone()
            };
            specifiers.push(ImportSpecifier::Named {
                imported,
                local,
                span: self.span_from(start),
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
    }

    pub(crate) fn parse_export_declaration(&mut self) -> Statement {
        let start = self.token_start();
        self.next_token();

        let kind = match self.token() {
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let exported = if self.is_contextual("as") {
                    self.next_token();
                    Some(self.parse_module_export_name())
                } else {
                    None
                };
                self.parse_expected_contextual("from");
                let source = self.parse_module_specifier();
                self.parse_semicolon();
                ExportKind::All { exported, source }
            }
            SyntaxKind::OpenBraceToken => {
                let (specifiers, local_tokens) = self.parse_export_specifiers();
                let source = if self.is_contextual("from") {
                    self.next_token();
                    Some(self.parse_module_specifier())
                } else {
                    // Without `from`, each local names a binding here.
                    for token in &local_tokens {
                        self.check_identifier_word(token);
                    }
                    None
                };
                self.parse_semicolon();
                ExportKind::Named { specifiers, source }
            }
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                let value = if self.is_token(SyntaxKind::FunctionKeyword)
                    || (self.is_contextual("async")
                        && self.peek_kind(1) == SyntaxKind::FunctionKeyword
                        && !self.peek(1).has_preceding_line_break())
                {
                    ExportDefaultValue::Function(Box::new(self.parse_function(false)))
                } else if self.is_token(SyntaxKind::ClassKeyword) {
                    ExportDefaultValue::Class(Box::new(self.parse_class(false)))
                } else {
                    let expression = self.parse_assignment_expression_allow_in();
                    self.parse_semicolon();
                    ExportDefaultValue::Expression(expression)
                };
                ExportKind::Default { value }
            }
            SyntaxKind::VarKeyword
            | SyntaxKind::LetKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::FunctionKeyword
            | SyntaxKind::ClassKeyword => ExportKind::Declaration {
                declaration: Box::new(self.parse_statement()),
            },
            SyntaxKind::Identifier
                if self.is_contextual("async")
                    && self.peek_kind(1) == SyntaxKind::FunctionKeyword =>
            {
                ExportKind::Declaration {
                    declaration: Box::new(self.parse_function_declaration()),
                }
            }
            _ => {
                self.parse_error_at_current_token(
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                    &[],
                );
                ExportKind::Named {
                    specifiers: Vec::new(),
                    source: None,
                }
            }
        };

        Statement::Export(ExportDeclaration {
            kind,
            span: self.span_from(start),
        })
    }

    /// `{ a, b as c }`, plus the tokens of the local names so they can be
    /// checked once it is known whether they refer to local bindings.
    fn parse_export_specifiers(&mut self) -> (Vec<ExportSpecifier>, Vec<Token>) {
        self.next_token();
        let mut specifiers = Vec::new();
        let mut local_tokens = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken) && !self.is_eof() {
            let start = self.token_start();
            local_tokens.push(self.current().clone());
            let local = self.parse_module_export_name();
            let exported = if self.is_contextual("as") {
                self.next_token();
                self.parse_module_export_name()
            } else {
                local.clone()
            };
            specifiers.push(ExportSpecifier {
                local,
                exported,
                span: self.span_from(start),
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        (specifiers, local_tokens)
    }
}
