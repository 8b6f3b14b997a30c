//! Type annotation parsing
//!
//! Annotations are only carried through to the printer, so they are kept
//! as normalized text rather than a type tree.

use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};

impl Parser {
    /// Parse the type after `:` in a declaration, parameter or return position
    pub fn parse_type_annotation(&mut self) -> Result<String, ParseError> {
        let mut text = self.parse_type_primary()?;
        while self.match_token(&TokenType::Pipe) {
            text.push_str(" | ");
            text.push_str(&self.parse_type_primary()?);
        }
        Ok(text)
    }

    fn parse_type_primary(&mut self) -> Result<String, ParseError> {
        let location = self.current_location();
        let mut text = match self.advance().map(|t| t.token_type) {
            Some(TokenType::Identifier(name)) => {
                let mut name = name;
                while self.match_token(&TokenType::Dot) {
                    name.push('.');
                    name.push_str(&self.expect_identifier("qualified type name")?);
                }
                if self.match_token(&TokenType::Less) {
                    let mut arguments = vec![self.parse_type_annotation()?];
                    while self.match_token(&TokenType::Comma) {
                        arguments.push(self.parse_type_annotation()?);
                    }
                    self.expect_closing_angle()?;
                    name = format!("{}<{}>", name, arguments.join(", "));
                }
                name
            }
            Some(TokenType::Null) => "null".to_string(),
            Some(TokenType::StringLiteral { quote, raw, .. }) => {
                format!("{q}{raw}{q}", q = quote.as_char())
            }
            Some(TokenType::NumberLiteral(raw)) => raw,
            Some(TokenType::LeftParen) => {
                let inner = self.parse_type_annotation()?;
                self.expect(TokenType::RightParen, "parenthesized type")?;
                format!("({})", inner)
            }
            Some(other) => {
                return Err(ParseError::InvalidType {
                    message: format!("Expected type, found '{}'", other),
                    location,
                })
            }
            None => {
                return Err(ParseError::UnexpectedEndOfFile {
                    expected: "type".to_string(),
                    location,
                })
            }
        };

        while self.check(&TokenType::LeftBracket) {
            self.advance();
            self.expect(TokenType::RightBracket, "array type")?;
            text.push_str("[]");
        }

        Ok(text)
    }

    /// Consume a `>` closing a type argument list, splitting `>>` when nested
    fn expect_closing_angle(&mut self) -> Result<(), ParseError> {
        if let Some(token) = self.tokens.front_mut() {
            if token.token_type == TokenType::RightShift {
                token.token_type = TokenType::Greater;
                token.span.start.column += 1;
                return Ok(());
            }
        }
        self.expect(TokenType::Greater, "type arguments").map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::tests::parser_for;

    fn parse_type(input: &str) -> String {
        parser_for(input).parse_type_annotation().unwrap()
    }

    #[test]
    fn test_simple_and_array_types() {
        assert_eq!(parse_type("number"), "number");
        assert_eq!(parse_type("number[][]"), "number[][]");
        assert_eq!(parse_type("Decimal[]"), "Decimal[]");
    }

    #[test]
    fn test_generic_and_union_types() {
        assert_eq!(parse_type("Array<Array<number>>"), "Array<Array<number>>");
        assert_eq!(parse_type("Map<string, Decimal>"), "Map<string, Decimal>");
        assert_eq!(parse_type("number | null"), "number | null");
    }

    #[test]
    fn test_invalid_type() {
        assert!(parser_for("+").parse_type_annotation().is_err());
    }
}
