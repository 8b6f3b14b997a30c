//! Token definitions for the TypeScript subset lexer

use fpr_common::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quote character a string literal was written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals. Numbers keep their source text so rewrites never round;
    // strings keep theirs so printing never re-escapes.
    NumberLiteral(String),
    StringLiteral { value: String, quote: QuoteStyle, raw: String },

    Identifier(String),

    // Keywords
    Import, Export, Let, Const, Var, Function, Return,
    If, Else, While, For, New, True, False, Null, Typeof,

    // Operators
    Plus,               // +
    Minus,              // -
    Star,               // *
    StarStar,           // **
    Slash,              // /
    Percent,            // %
    Ampersand,          // &
    Pipe,               // |
    Caret,              // ^
    Tilde,              // ~
    Bang,               // !
    Equal,              // =
    Less,               // <
    Greater,            // >
    Question,           // ?
    QuestionQuestion,   // ??
    Colon,              // :

    PlusPlus,           // ++
    MinusMinus,         // --
    LeftShift,          // <<
    RightShift,         // >>
    LessEqual,          // <=
    GreaterEqual,       // >=
    EqualEqual,         // ==
    EqualEqualEqual,    // ===
    BangEqual,          // !=
    BangEqualEqual,     // !==
    AmpersandAmpersand, // &&
    PipePipe,           // ||

    PlusEqual,          // +=
    MinusEqual,         // -=
    StarEqual,          // *=
    SlashEqual,         // /=
    PercentEqual,       // %=

    // Delimiters
    LeftParen, RightParen, LeftBrace, RightBrace, LeftBracket, RightBracket,
    Semicolon, Comma, Dot,

    Newline,
    EndOfFile,

    LineComment(String),
    BlockComment(String),
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenType::NumberLiteral(raw) => return write!(f, "{raw}"),
            TokenType::StringLiteral { quote, raw, .. } => {
                return write!(f, "{q}{raw}{q}", q = quote.as_char())
            }
            TokenType::Identifier(name) => return write!(f, "{name}"),
            TokenType::LineComment(_) => "line comment",
            TokenType::BlockComment(_) => "block comment",

            TokenType::Import => "import",
            TokenType::Export => "export",
            TokenType::Let => "let",
            TokenType::Const => "const",
            TokenType::Var => "var",
            TokenType::Function => "function",
            TokenType::Return => "return",
            TokenType::If => "if",
            TokenType::Else => "else",
            TokenType::While => "while",
            TokenType::For => "for",
            TokenType::New => "new",
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::Null => "null",
            TokenType::Typeof => "typeof",

            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::StarStar => "**",
            TokenType::Slash => "/",
            TokenType::Percent => "%",
            TokenType::Ampersand => "&",
            TokenType::Pipe => "|",
            TokenType::Caret => "^",
            TokenType::Tilde => "~",
            TokenType::Bang => "!",
            TokenType::Equal => "=",
            TokenType::Less => "<",
            TokenType::Greater => ">",
            TokenType::Question => "?",
            TokenType::QuestionQuestion => "??",
            TokenType::Colon => ":",
            TokenType::PlusPlus => "++",
            TokenType::MinusMinus => "--",
            TokenType::LeftShift => "<<",
            TokenType::RightShift => ">>",
            TokenType::LessEqual => "<=",
            TokenType::GreaterEqual => ">=",
            TokenType::EqualEqual => "==",
            TokenType::EqualEqualEqual => "===",
            TokenType::BangEqual => "!=",
            TokenType::BangEqualEqual => "!==",
            TokenType::AmpersandAmpersand => "&&",
            TokenType::PipePipe => "||",
            TokenType::PlusEqual => "+=",
            TokenType::MinusEqual => "-=",
            TokenType::StarEqual => "*=",
            TokenType::SlashEqual => "/=",
            TokenType::PercentEqual => "%=",

            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::LeftBrace => "{",
            TokenType::RightBrace => "}",
            TokenType::LeftBracket => "[",
            TokenType::RightBracket => "]",
            TokenType::Semicolon => ";",
            TokenType::Comma => ",",
            TokenType::Dot => ".",

            TokenType::Newline => "newline",
            TokenType::EndOfFile => "end of file",
        };
        write!(f, "{text}")
    }
}

/// A token with its location in the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
    /// Set by the parser when a line break separated this token from the previous one
    pub newline_before: bool,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self {
            token_type,
            span,
            newline_before: false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token_type)
    }
}
