//! TypeScript subset lexer
//!
//! Tokenizes module source into a stream of tokens. Newlines and comments
//! are emitted as tokens; the parser drops them and only remembers where
//! a line break preceded a token.

pub mod literals;
pub mod token;

pub use token::{QuoteStyle, Token, TokenType};

use fpr_common::{CompilerError, SourceLocation, SourceSpan, SourceTracker};
use std::collections::HashMap;

pub struct Lexer {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    pub(crate) tracker: SourceTracker,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    pub fn new(input: &str, file_name: &str) -> Self {
        let keywords = [
            ("import", TokenType::Import),
            ("export", TokenType::Export),
            ("let", TokenType::Let),
            ("const", TokenType::Const),
            ("var", TokenType::Var),
            ("function", TokenType::Function),
            ("return", TokenType::Return),
            ("if", TokenType::If),
            ("else", TokenType::Else),
            ("while", TokenType::While),
            ("for", TokenType::For),
            ("new", TokenType::New),
            ("true", TokenType::True),
            ("false", TokenType::False),
            ("null", TokenType::Null),
            ("typeof", TokenType::Typeof),
        ]
        .into_iter()
        .collect();

        Self {
            input: input.chars().collect(),
            position: 0,
            tracker: SourceTracker::new(file_name),
            keywords,
        }
    }

    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub(crate) fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        self.tracker.advance(ch);
        Some(ch)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.tracker.location()
    }

    /// Consume `next` if it is the current character
    fn eat(&mut self, next: char) -> bool {
        if self.current_char() == Some(next) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace (except newlines)
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() && ch != '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn tokenize_identifier(&mut self) -> TokenType {
        let mut identifier = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.keywords.get(identifier.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenType::Identifier(identifier),
        }
    }

    fn tokenize_line_comment(&mut self) -> TokenType {
        self.advance(); // '/'
        self.advance(); // '/'
        let mut text = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }
        TokenType::LineComment(text)
    }

    fn tokenize_block_comment(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        self.advance(); // '/'
        self.advance(); // '*'
        let mut text = String::new();
        loop {
            match self.current_char() {
                Some('*') if self.peek_char(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    return Ok(TokenType::BlockComment(text));
                }
                Some(ch) => {
                    text.push(ch);
                    self.advance();
                }
                None => {
                    return Err(CompilerError::lexer_error(
                        "Unterminated block comment".to_string(),
                        start,
                    ))
                }
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, CompilerError> {
        self.skip_whitespace();

        let start_location = self.current_location();

        let token_type = match self.current_char() {
            None => TokenType::EndOfFile,

            Some('\n') => {
                self.advance();
                TokenType::Newline
            }

            Some(ch) if ch.is_alphabetic() || ch == '_' || ch == '$' => self.tokenize_identifier(),

            Some(ch) if ch.is_ascii_digit() => self.tokenize_number()?,

            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.tokenize_number()?
            }

            Some(quote @ ('\'' | '"')) => self.tokenize_string_literal(quote)?,

            Some('/') if self.peek_char(1) == Some('/') => self.tokenize_line_comment(),
            Some('/') if self.peek_char(1) == Some('*') => self.tokenize_block_comment()?,

            Some(ch) => {
                self.advance();
                match ch {
                    '+' if self.eat('+') => TokenType::PlusPlus,
                    '+' if self.eat('=') => TokenType::PlusEqual,
                    '+' => TokenType::Plus,
                    '-' if self.eat('-') => TokenType::MinusMinus,
                    '-' if self.eat('=') => TokenType::MinusEqual,
                    '-' => TokenType::Minus,
                    '*' if self.eat('*') => TokenType::StarStar,
                    '*' if self.eat('=') => TokenType::StarEqual,
                    '*' => TokenType::Star,
                    '/' if self.eat('=') => TokenType::SlashEqual,
                    '/' => TokenType::Slash,
                    '%' if self.eat('=') => TokenType::PercentEqual,
                    '%' => TokenType::Percent,
                    '&' if self.eat('&') => TokenType::AmpersandAmpersand,
                    '&' => TokenType::Ampersand,
                    '|' if self.eat('|') => TokenType::PipePipe,
                    '|' => TokenType::Pipe,
                    '^' => TokenType::Caret,
                    '~' => TokenType::Tilde,
                    '!' if self.eat('=') => {
                        if self.eat('=') {
                            TokenType::BangEqualEqual
                        } else {
                            TokenType::BangEqual
                        }
                    }
                    '!' => TokenType::Bang,
                    '=' if self.eat('=') => {
                        if self.eat('=') {
                            TokenType::EqualEqualEqual
                        } else {
                            TokenType::EqualEqual
                        }
                    }
                    '=' => TokenType::Equal,
                    '<' if self.eat('<') => TokenType::LeftShift,
                    '<' if self.eat('=') => TokenType::LessEqual,
                    '<' => TokenType::Less,
                    '>' if self.eat('>') => TokenType::RightShift,
                    '>' if self.eat('=') => TokenType::GreaterEqual,
                    '>' => TokenType::Greater,
                    '?' if self.eat('?') => TokenType::QuestionQuestion,
                    '?' => TokenType::Question,
                    ':' => TokenType::Colon,
                    '(' => TokenType::LeftParen,
                    ')' => TokenType::RightParen,
                    '{' => TokenType::LeftBrace,
                    '}' => TokenType::RightBrace,
                    '[' => TokenType::LeftBracket,
                    ']' => TokenType::RightBracket,
                    ';' => TokenType::Semicolon,
                    ',' => TokenType::Comma,
                    '.' => TokenType::Dot,
                    other => {
                        return Err(CompilerError::lexer_error(
                            format!("Unexpected character: {}", other),
                            start_location,
                        ));
                    }
                }
            }
        };

        let span = SourceSpan::new(start_location, self.current_location());
        Ok(Token::new(token_type, span))
    }

    /// Tokenize entire input into a vector of tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::EndOfFile);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_types(input: &str) -> Vec<TokenType> {
        Lexer::new(input, "test.ts")
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = token_types("import Decimal from let total");
        assert_eq!(
            tokens,
            vec![
                TokenType::Import,
                TokenType::Identifier("Decimal".to_string()),
                TokenType::Identifier("from".to_string()),
                TokenType::Let,
                TokenType::Identifier("total".to_string()),
                TokenType::EndOfFile,
            ]
        );
    }

    #[test]
    fn test_operators() {
        let tokens = token_types("+ - * / ** === !== == != <= >= && || ?? ++ -- += *=");
        let expected = vec![
            TokenType::Plus, TokenType::Minus, TokenType::Star, TokenType::Slash,
            TokenType::StarStar, TokenType::EqualEqualEqual, TokenType::BangEqualEqual,
            TokenType::EqualEqual, TokenType::BangEqual, TokenType::LessEqual,
            TokenType::GreaterEqual, TokenType::AmpersandAmpersand, TokenType::PipePipe,
            TokenType::QuestionQuestion, TokenType::PlusPlus, TokenType::MinusMinus,
            TokenType::PlusEqual, TokenType::StarEqual, TokenType::EndOfFile,
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_comments_and_newlines() {
        let tokens = token_types("// price\n/* total */");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], TokenType::LineComment(" price".to_string()));
        assert_eq!(tokens[1], TokenType::Newline);
        assert_eq!(tokens[2], TokenType::BlockComment(" total ".to_string()));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = Lexer::new("/* open", "test.ts").tokenize().unwrap_err();
        assert!(matches!(err, CompilerError::LexError { .. }));
    }

    #[test]
    fn test_token_locations() {
        let tokens = Lexer::new("let x\n  = 1;", "price.ts").tokenize().unwrap();
        let equal = tokens
            .iter()
            .find(|t| t.token_type == TokenType::Equal)
            .unwrap();
        assert_eq!(equal.span.start, SourceLocation::new("price.ts", 2, 3));
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("let x = #;", "test.ts").tokenize().unwrap_err();
        assert_eq!(err.location(), Some(&SourceLocation::new("test.ts", 1, 9)));
    }
}
