//! Statement and declaration parsing

use crate::ast::*;
use crate::lexer::{QuoteStyle, Token, TokenType};
use crate::parser::{ParseError, Parser};
use fpr_common::CompilerError;

impl Parser {
    pub fn parse_statement(&mut self) -> Result<Statement, CompilerError> {
        let start = self.current_location();

        let kind = match self.peek_type() {
            Some(TokenType::Import) => StatementKind::Import(self.parse_import_declaration()?),
            Some(TokenType::Export) => {
                self.advance();
                let inner = self.parse_statement()?;
                match inner.kind {
                    StatementKind::Variable(_) | StatementKind::Function(_) => {
                        StatementKind::Export(Box::new(inner))
                    }
                    _ => {
                        return Err(ParseError::InvalidExpression {
                            message: "Only declarations can be exported".to_string(),
                            location: inner.span.start,
                        }
                        .into())
                    }
                }
            }
            Some(TokenType::Let | TokenType::Const | TokenType::Var) => {
                let declaration = self.parse_variable_declaration()?;
                self.consume_semicolon("variable declaration")?;
                StatementKind::Variable(declaration)
            }
            Some(TokenType::Function) => StatementKind::Function(self.parse_function_declaration()?),
            Some(TokenType::Return) => {
                self.advance();
                let bare = self.peek().map_or(true, |token| {
                    token.newline_before
                        || matches!(
                            token.token_type,
                            TokenType::Semicolon | TokenType::RightBrace | TokenType::EndOfFile
                        )
                });
                let value = if bare { None } else { Some(self.parse_expression()?) };
                self.consume_semicolon("return statement")?;
                StatementKind::Return(value)
            }
            Some(TokenType::If) => self.parse_if_statement()?,
            Some(TokenType::While) => {
                self.advance();
                self.expect(TokenType::LeftParen, "while statement")?;
                let condition = self.parse_expression()?;
                self.expect(TokenType::RightParen, "while statement")?;
                let body = Box::new(self.parse_statement()?);
                StatementKind::While { condition, body }
            }
            Some(TokenType::For) => self.parse_for_statement()?,
            Some(TokenType::LeftBrace) => StatementKind::Block(self.parse_block()?),
            Some(TokenType::Semicolon) => {
                self.advance();
                StatementKind::Empty
            }
            _ => {
                let expression = self.parse_expression()?;
                self.consume_semicolon("expression statement")?;
                StatementKind::Expression(expression)
            }
        };

        let span = self.span_from(start);
        Ok(self.make_statement(kind, span))
    }

    /// Parse `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Statement>, CompilerError> {
        self.expect(TokenType::LeftBrace, "block")?;
        let mut statements = Vec::new();
        while !self.check(&TokenType::RightBrace) {
            if self.check(&TokenType::EndOfFile) {
                return Err(ParseError::UnexpectedEndOfFile {
                    expected: "'}' to close block".to_string(),
                    location: self.current_location(),
                }
                .into());
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenType::RightBrace, "block")?;
        Ok(statements)
    }

    fn parse_import_declaration(&mut self) -> Result<ImportDeclaration, CompilerError> {
        self.expect(TokenType::Import, "import declaration")?;

        let mut import = ImportDeclaration {
            default_binding: None,
            namespace_binding: None,
            named: Vec::new(),
            module: String::new(),
            quote: QuoteStyle::Double,
            raw_module: None,
        };

        if !matches!(self.peek_type(), Some(TokenType::StringLiteral { .. })) {
            if matches!(self.peek_type(), Some(TokenType::Identifier(_))) {
                import.default_binding = Some(self.expect_identifier("import declaration")?);
                if !self.match_token(&TokenType::Comma) {
                    return self.finish_import(import);
                }
            }

            if self.match_token(&TokenType::Star) {
                self.expect_word("as", "namespace import")?;
                import.namespace_binding = Some(self.expect_identifier("namespace import")?);
            } else {
                self.expect(TokenType::LeftBrace, "import declaration")?;
                while !self.check(&TokenType::RightBrace) {
                    let imported = self.expect_identifier("import specifier")?;
                    let local = if self.check_word("as") {
                        self.advance();
                        self.expect_identifier("import specifier")?
                    } else {
                        imported.clone()
                    };
                    import.named.push(ImportSpecifier { imported, local });
                    if !self.match_token(&TokenType::Comma) {
                        break;
                    }
                }
                self.expect(TokenType::RightBrace, "import declaration")?;
            }
            return self.finish_import(import);
        }

        self.parse_module_specifier(&mut import)?;
        self.consume_semicolon("import declaration")?;
        Ok(import)
    }

    fn finish_import(&mut self, mut import: ImportDeclaration) -> Result<ImportDeclaration, CompilerError> {
        self.expect_word("from", "import declaration")?;
        self.parse_module_specifier(&mut import)?;
        self.consume_semicolon("import declaration")?;
        Ok(import)
    }

    fn parse_module_specifier(&mut self, import: &mut ImportDeclaration) -> Result<(), CompilerError> {
        match self.advance() {
            Some(Token { token_type: TokenType::StringLiteral { value, quote, raw }, .. }) => {
                import.module = value;
                import.quote = quote;
                import.raw_module = Some(raw);
                Ok(())
            }
            Some(found) => Err(ParseError::UnexpectedToken {
                expected: "module specifier".to_string(),
                found,
            }
            .into()),
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: "module specifier".to_string(),
                location: self.last_end.clone(),
            }
            .into()),
        }
    }

    /// Parse `let a: T = init, b` without the trailing semicolon
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, CompilerError> {
        let keyword = match self.advance().map(|t| t.token_type) {
            Some(TokenType::Let) => DeclarationKeyword::Let,
            Some(TokenType::Const) => DeclarationKeyword::Const,
            _ => DeclarationKeyword::Var,
        };

        let mut declarators = Vec::new();
        loop {
            let start = self.current_location();
            let name = self.expect_identifier("variable declaration")?;
            let type_annotation = if self.match_token(&TokenType::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            let initializer = if self.match_token(&TokenType::Equal) {
                Some(self.parse_assignment_expression()?)
            } else {
                None
            };
            let span = self.span_from(start);
            declarators.push(VariableDeclarator {
                node_id: self.node_id_gen.next(),
                name,
                type_annotation,
                initializer,
                span,
            });

            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }

        Ok(VariableDeclaration { keyword, declarators })
    }

    fn parse_function_declaration(&mut self) -> Result<FunctionDeclaration, CompilerError> {
        self.expect(TokenType::Function, "function declaration")?;
        let name = self.expect_identifier("function declaration")?;

        self.expect(TokenType::LeftParen, "parameter list")?;
        let mut parameters = Vec::new();
        while !self.check(&TokenType::RightParen) {
            let name = self.expect_identifier("parameter list")?;
            let type_annotation = if self.match_token(&TokenType::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };
            parameters.push(Parameter { name, type_annotation });
            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RightParen, "parameter list")?;

        let return_type = if self.match_token(&TokenType::Colon) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        Ok(FunctionDeclaration {
            name,
            parameters,
            return_type,
            body,
        })
    }

    fn parse_if_statement(&mut self) -> Result<StatementKind, CompilerError> {
        self.expect(TokenType::If, "if statement")?;
        self.expect(TokenType::LeftParen, "if statement")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "if statement")?;

        let then_stmt = Box::new(self.parse_statement()?);
        let else_stmt = if self.match_token(&TokenType::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(StatementKind::If {
            condition,
            then_stmt,
            else_stmt,
        })
    }

    fn parse_for_statement(&mut self) -> Result<StatementKind, CompilerError> {
        self.expect(TokenType::For, "for statement")?;
        self.expect(TokenType::LeftParen, "for statement")?;

        let init = if self.check(&TokenType::Semicolon) {
            None
        } else {
            let start = self.current_location();
            let kind = if matches!(
                self.peek_type(),
                Some(TokenType::Let | TokenType::Const | TokenType::Var)
            ) {
                StatementKind::Variable(self.parse_variable_declaration()?)
            } else {
                StatementKind::Expression(self.parse_expression()?)
            };
            let span = self.span_from(start);
            Some(Box::new(self.make_statement(kind, span)))
        };
        self.expect(TokenType::Semicolon, "for statement")?;

        let condition = if self.check(&TokenType::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenType::Semicolon, "for statement")?;

        let update = if self.check(&TokenType::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenType::RightParen, "for statement")?;

        let body = Box::new(self.parse_statement()?);
        Ok(StatementKind::For {
            init,
            condition,
            update,
            body,
        })
    }
}
