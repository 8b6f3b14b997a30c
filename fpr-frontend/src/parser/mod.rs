//! Recursive descent parser for the TypeScript subset
//!
//! Parentheses are not represented in the tree: grouping is implied by the
//! tree shape and the printer re-inserts parentheses from precedence.

pub mod errors;
pub mod expressions;
pub mod statements;
pub mod types;

use crate::ast::*;
use crate::lexer::{Token, TokenType};
use fpr_common::{CompilerError, SourceLocation, SourceSpan};
use std::collections::VecDeque;

pub use errors::ParseError;

pub struct Parser {
    pub(crate) tokens: VecDeque<Token>,
    pub(crate) node_id_gen: NodeIdGenerator,
    pub(crate) file_name: String,
    /// End of the most recently consumed token
    pub(crate) last_end: SourceLocation,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file_name: &str) -> Self {
        // Drop trivia, remembering line breaks for semicolon insertion
        let mut filtered = VecDeque::with_capacity(tokens.len());
        let mut saw_newline = false;
        for mut token in tokens {
            let trivia = match &token.token_type {
                TokenType::Newline => Some(true),
                TokenType::LineComment(_) => Some(false),
                TokenType::BlockComment(text) => Some(text.contains('\n')),
                _ => None,
            };
            match trivia {
                Some(breaks_line) => saw_newline |= breaks_line,
                None => {
                    token.newline_before = saw_newline;
                    saw_newline = false;
                    filtered.push_back(token);
                }
            }
        }

        Self {
            tokens: filtered,
            node_id_gen: NodeIdGenerator::new(),
            file_name: file_name.to_string(),
            last_end: SourceLocation::new(file_name, 1, 1),
        }
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    pub(crate) fn peek_type(&self) -> Option<&TokenType> {
        self.peek().map(|t| &t.token_type)
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.pop_front()?;
        self.last_end = token.span.end.clone();
        Some(token)
    }

    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        match self.peek() {
            Some(token) => {
                std::mem::discriminant(&token.token_type) == std::mem::discriminant(token_type)
            }
            None => matches!(token_type, TokenType::EndOfFile),
        }
    }

    /// Check for a contextual keyword such as `from` or `as`
    pub(crate) fn check_word(&self, word: &str) -> bool {
        matches!(self.peek_type(), Some(TokenType::Identifier(name)) if name == word)
    }

    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        match self.advance() {
            Some(token) if token.token_type == TokenType::EndOfFile => {
                Err(ParseError::UnexpectedEndOfFile {
                    expected: format!("'{}' in {}", token_type, context),
                    location: token.span.start,
                })
            }
            Some(token)
                if std::mem::discriminant(&token.token_type)
                    == std::mem::discriminant(&token_type) =>
            {
                Ok(token)
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: format!("'{}' in {}", token_type, context),
                found: token,
            }),
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: format!("'{}' in {}", token_type, context),
                location: self.last_end.clone(),
            }),
        }
    }

    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        match self.advance() {
            Some(Token { token_type: TokenType::Identifier(name), .. }) => Ok(name),
            Some(token) if token.token_type == TokenType::EndOfFile => {
                Err(ParseError::UnexpectedEndOfFile {
                    expected: format!("identifier in {}", context),
                    location: token.span.start,
                })
            }
            Some(token) => Err(ParseError::UnexpectedToken {
                expected: format!("identifier in {}", context),
                found: token,
            }),
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: format!("identifier in {}", context),
                location: self.last_end.clone(),
            }),
        }
    }

    pub(crate) fn expect_word(&mut self, word: &str, context: &str) -> Result<(), ParseError> {
        if self.check_word(word) {
            self.advance();
            return Ok(());
        }
        match self.advance() {
            Some(found) => Err(ParseError::UnexpectedToken {
                expected: format!("'{}' in {}", word, context),
                found,
            }),
            None => Err(ParseError::UnexpectedEndOfFile {
                expected: format!("'{}' in {}", word, context),
                location: self.last_end.clone(),
            }),
        }
    }

    /// Accept `;`, or an implied one before `}`, end of file or a line break
    pub(crate) fn consume_semicolon(&mut self, context: &str) -> Result<(), ParseError> {
        if self.match_token(&TokenType::Semicolon) {
            return Ok(());
        }
        let implied = self.peek().map_or(true, |token| {
            token.newline_before
                || matches!(token.token_type, TokenType::RightBrace | TokenType::EndOfFile)
        });
        if implied {
            Ok(())
        } else {
            self.expect(TokenType::Semicolon, context).map(|_| ())
        }
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        match self.peek() {
            Some(token) => token.span.start.clone(),
            None => self.last_end.clone(),
        }
    }

    pub(crate) fn span_from(&self, start: SourceLocation) -> SourceSpan {
        SourceSpan::new(start, self.last_end.clone())
    }

    pub(crate) fn make_expression(&mut self, kind: ExpressionKind, span: SourceSpan) -> Expression {
        Expression::new(self.node_id_gen.next(), kind, span)
    }

    pub(crate) fn make_statement(&mut self, kind: StatementKind, span: SourceSpan) -> Statement {
        Statement {
            node_id: self.node_id_gen.next(),
            kind,
            span,
        }
    }

    /// Parse a complete source file
    pub fn parse_program(&mut self) -> Result<Program, CompilerError> {
        let start_location = self.current_location();
        let mut statements = Vec::new();

        while !self.check(&TokenType::EndOfFile) {
            statements.push(self.parse_statement()?);
        }

        let node_id = self.node_id_gen.next();
        Ok(Program {
            node_id,
            file_name: self.file_name.clone(),
            statements,
            next_node_id: self.node_id_gen.peek(),
            span: self.span_from(start_location),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    pub(crate) fn parser_for(input: &str) -> Parser {
        let tokens = Lexer::new(input, "test.ts").tokenize().unwrap();
        Parser::new(tokens, "test.ts")
    }

    #[test]
    fn test_parse_empty_program() {
        let program = parser_for("// nothing here\n").parse_program().unwrap();
        assert!(program.statements.is_empty());
        assert_eq!(program.file_name, "test.ts");
    }

    #[test]
    fn test_next_node_id_is_unused() {
        let program = parser_for("let x = 1 + 2;").parse_program().unwrap();
        assert!(program.next_node_id > program.node_id);
        match &program.statements[0].kind {
            StatementKind::Variable(decl) => {
                let init = decl.declarators[0].initializer.as_ref().unwrap();
                assert!(init.node_id < program.next_node_id);
            }
            other => panic!("Expected variable declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_semicolon_insertion() {
        let program = parser_for("let a = 1\nlet b = 2\n").parse_program().unwrap();
        assert_eq!(program.statements.len(), 2);

        let err = parser_for("let a = 1 let b = 2").parse_program().unwrap_err();
        assert!(matches!(err, CompilerError::ParseError { .. }));
    }

    #[test]
    fn test_error_location_points_at_token() {
        let err = parser_for("let x = ;").parse_program().unwrap_err();
        assert_eq!(err.location(), Some(&SourceLocation::new("test.ts", 1, 9)));
    }
}
