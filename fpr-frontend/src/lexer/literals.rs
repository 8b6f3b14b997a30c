//! Numeric and string literal lexing

use crate::lexer::{Lexer, QuoteStyle, TokenType};
use fpr_common::{CompilerError, SourceLocation};

impl Lexer {
    /// Tokenize a numeric literal, keeping its exact source text
    pub fn tokenize_number(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        let mut raw = String::new();

        if self.current_char() == Some('0') && matches!(self.peek_char(1), Some('x' | 'X')) {
            raw.push('0');
            self.advance();
            if let Some(x) = self.advance() {
                raw.push(x);
            }
            while let Some(ch) = self.current_char().filter(|c| c.is_ascii_hexdigit()) {
                raw.push(ch);
                self.advance();
            }
            if raw.len() == 2 {
                return Err(CompilerError::lexer_error(
                    "Invalid hex literal".to_string(),
                    start,
                ));
            }
            return Ok(TokenType::NumberLiteral(raw));
        }

        self.take_digits(&mut raw);

        if self.current_char() == Some('.') {
            raw.push('.');
            self.advance();
            self.take_digits(&mut raw);
        }

        if let Some(e @ ('e' | 'E')) = self.current_char() {
            raw.push(e);
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.current_char() {
                raw.push(sign);
                self.advance();
            }
            if !self.take_digits(&mut raw) {
                return Err(CompilerError::lexer_error(
                    format!("Missing exponent in numeric literal: {}", raw),
                    start,
                ));
            }
        }

        if self.current_char().is_some_and(|c| c.is_alphabetic() || c == '_') {
            return Err(CompilerError::lexer_error(
                format!("Invalid numeric literal: {}", raw),
                start,
            ));
        }

        Ok(TokenType::NumberLiteral(raw))
    }

    /// Append decimal digits to `raw`; returns whether any were consumed
    fn take_digits(&mut self, raw: &mut String) -> bool {
        let before = raw.len();
        while let Some(ch) = self.current_char().filter(|c| c.is_ascii_digit()) {
            raw.push(ch);
            self.advance();
        }
        raw.len() > before
    }

    /// Tokenize a single- or double-quoted string literal
    ///
    /// `raw` is the text between the quotes exactly as written; `value` is
    /// the decoded string used for comparisons.
    pub fn tokenize_string_literal(&mut self, quote: char) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        self.advance(); // opening quote
        let mut value = String::new();
        let mut raw = String::new();

        loop {
            match self.advance() {
                Some(ch) if ch == quote => break,
                Some('\\') => {
                    raw.push('\\');
                    let Some(escaped) = self.advance() else {
                        return Err(CompilerError::lexer_error(
                            "Unterminated string literal".to_string(),
                            start,
                        ));
                    };
                    raw.push(escaped);
                    match escaped {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        'b' => value.push('\u{8}'),
                        'v' => value.push('\u{b}'),
                        'f' => value.push('\u{c}'),
                        '0' if !self.current_char().is_some_and(|c| c.is_ascii_digit()) => value.push('\0'),
                        'x' => {
                            let code = self.take_hex_digits(&mut raw, 2, &start)?;
                            value.push(decode_code_point(code));
                        }
                        'u' => {
                            let code = self.take_unicode_escape(&mut raw, &start)?;
                            value.push(decode_code_point(code));
                        }
                        // Line continuation contributes nothing to the value
                        '\n' | '\u{2028}' | '\u{2029}' => {}
                        '\r' => {
                            if self.current_char() == Some('\n') {
                                raw.push('\n');
                                self.advance();
                            }
                        }
                        other => value.push(other),
                    }
                }
                Some('\n' | '\r') | None => {
                    return Err(CompilerError::lexer_error(
                        "Unterminated string literal".to_string(),
                        start,
                    ))
                }
                Some(ch) => {
                    raw.push(ch);
                    value.push(ch);
                }
            }
        }

        let quote = if quote == '\'' {
            QuoteStyle::Single
        } else {
            QuoteStyle::Double
        };
        Ok(TokenType::StringLiteral { value, quote, raw })
    }

    /// Consume exactly `count` hex digits into `raw`
    fn take_hex_digits(
        &mut self,
        raw: &mut String,
        count: usize,
        start: &SourceLocation,
    ) -> Result<u32, CompilerError> {
        let mut code = 0;
        for _ in 0..count {
            let digit = self.current_char().and_then(|c| c.to_digit(16));
            let Some(digit) = digit else {
                return Err(CompilerError::lexer_error(
                    "Invalid hexadecimal escape sequence".to_string(),
                    start.clone(),
                ));
            };
            raw.extend(self.advance());
            code = code * 16 + digit;
        }
        Ok(code)
    }

    /// `\uXXXX` or `\u{X...}` after the `u`
    fn take_unicode_escape(&mut self, raw: &mut String, start: &SourceLocation) -> Result<u32, CompilerError> {
        if self.current_char() != Some('{') {
            return self.take_hex_digits(raw, 4, start);
        }
        raw.extend(self.advance());
        let mut code: u32 = 0;
        let mut digits = 0;
        while let Some(digit) = self.current_char().and_then(|c| c.to_digit(16)) {
            raw.extend(self.advance());
            code = code.saturating_mul(16).saturating_add(digit);
            digits += 1;
        }
        if digits == 0 || code > 0x10FFFF || self.current_char() != Some('}') {
            return Err(CompilerError::lexer_error(
                "Invalid Unicode escape sequence".to_string(),
                start.clone(),
            ));
        }
        raw.extend(self.advance());
        Ok(code)
    }
}

/// Lone surrogates have no `char`; they decode to U+FFFD
fn decode_code_point(code: u32) -> char {
    char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
}
