//! Lexical tokens produced by the [`Tokenizer`](crate::tokenizer::Tokenizer).

use std::fmt;

/// A 1-based line/column location in the input. Columns count characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A character that starts no token. Always exactly one character long.
    Illegal,
    Eof,
    WhiteSpace,
    /// Identifier or keyword.
    Word,
    Integer,
    Float,
    /// `'...'` with `''` as an escaped quote.
    String,
    /// `#` followed by decimal digits.
    Character,
    Plus,
    Minus,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LessThan,
    GreaterThan,
    Equal,
    Colon,
    Dot,
    Comma,
}

impl TokenKind {
    /// Maps a single punctuation character to its token kind.
    pub(crate) fn from_punctuation(ch: char) -> Option<TokenKind> {
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            '=' => TokenKind::Equal,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            _ => return None,
        };
        Some(kind)
    }

    #[must_use]
    pub const fn is_string_fragment(self) -> bool {
        matches!(self, TokenKind::String | TokenKind::Character)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Illegal => "illegal token",
            TokenKind::Eof => "end of file",
            TokenKind::WhiteSpace => "white space",
            TokenKind::Word => "word",
            TokenKind::Integer => "integer",
            TokenKind::Float => "floating point number",
            TokenKind::String => "string",
            TokenKind::Character => "character",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LessThan => "'<'",
            TokenKind::GreaterThan => "'>'",
            TokenKind::Equal => "'='",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
        };
        f.write_str(s)
    }
}

/// One token with its source text and where it starts and ends.
///
/// `end` is the position just past the last character of the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: Position,
    pub end: Position,
}

impl<'a> Token<'a> {
    pub(crate) fn eof(at: Position) -> Self {
        Token {
            kind: TokenKind::Eof,
            text: "",
            start: at,
            end: at,
        }
    }

    /// Returns `true` for a word that equals `keyword`, ignoring ASCII case.
    #[must_use]
    pub fn is_word(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Word && self.text.eq_ignore_ascii_case(keyword)
    }

    /// Describes the token for error messages, e.g. `word "clRed"`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => self.kind.to_string(),
            TokenKind::Word
            | TokenKind::Integer
            | TokenKind::Float
            | TokenKind::String
            | TokenKind::Character
            | TokenKind::Illegal => format!("{} {:?}", self.kind, self.text),
            _ => self.kind.to_string(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.describe(), self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let tok = Token {
            kind: TokenKind::Word,
            text: "clRed",
            start: Position::new(2, 3),
            end: Position::new(2, 8),
        };
        assert_eq!(tok.describe(), "word \"clRed\"");
        assert_eq!(tok.to_string(), "word \"clRed\" at 2:3");
        assert_eq!(Token::eof(Position::default()).describe(), "end of file");
    }

    #[test]
    fn test_is_word_ignores_case() {
        let tok = Token {
            kind: TokenKind::Word,
            text: "END",
            start: Position::default(),
            end: Position::new(1, 4),
        };
        assert!(tok.is_word("end"));
        assert!(!tok.is_word("item"));
    }
}
