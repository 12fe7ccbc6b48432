//! Splits DFM text into [`Token`]s.
//!
//! The tokenizer never fails. A character that cannot start a token comes out
//! as a one-character [`TokenKind::Illegal`] token and scanning continues
//! after it, so callers decide whether that is fatal.
//!
//! ```rust
//! use dfm::tokenizer::Tokenizer;
//! use dfm::token::TokenKind;
//!
//! let kinds: Vec<TokenKind> = Tokenizer::new("Left = -5")
//!     .filter(|t| t.kind != TokenKind::WhiteSpace)
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::Word, TokenKind::Equal, TokenKind::Minus, TokenKind::Integer]
//! );
//! ```

use crate::token::{Position, Token, TokenKind};

pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// The location of the next unread character.
    #[must_use]
    pub fn location(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.position..].chars().nth(n)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        match ch {
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            // CR LF counts once, on the LF.
            '\r' if self.peek_char() != Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            '\r' => {}
            _ => self.column += 1,
        }
        Some(ch)
    }

    fn eat_while(&mut self, accept: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek_char() {
            if !accept(ch) {
                break;
            }
            self.next_char();
        }
    }

    /// Returns the next token, or an [`TokenKind::Eof`] token once the input
    /// is exhausted (repeatedly, if called again).
    pub fn next_token(&mut self) -> Token<'a> {
        let start = self.location();
        let start_offset = self.position;

        let Some(ch) = self.peek_char() else {
            return Token::eof(start);
        };

        let kind = if let Some(kind) = TokenKind::from_punctuation(ch) {
            self.next_char();
            kind
        } else if ch == '\'' {
            self.scan_string();
            TokenKind::String
        } else if ch == '#' {
            self.next_char();
            if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.eat_while(|c| c.is_ascii_digit());
                TokenKind::Character
            } else {
                TokenKind::Illegal
            }
        } else if is_blank(ch) {
            self.eat_while(is_blank);
            TokenKind::WhiteSpace
        } else if ch == '_' || ch.is_alphabetic() {
            self.next_char();
            self.eat_while(|c| c == '_' || c.is_alphanumeric());
            TokenKind::Word
        } else if ch.is_ascii_digit() {
            self.scan_number()
        } else {
            // Only one character is consumed; the next call resumes after it.
            self.next_char();
            TokenKind::Illegal
        };

        Token {
            kind,
            text: &self.input[start_offset..self.position],
            start,
            end: self.location(),
        }
    }

    /// Consumes a quoted string including both quotes. A doubled quote inside
    /// does not end it. An unterminated string runs to the end of input.
    fn scan_string(&mut self) {
        self.next_char();
        while let Some(ch) = self.next_char() {
            if ch == '\'' {
                if self.peek_char() == Some('\'') {
                    self.next_char();
                } else {
                    break;
                }
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        let mut kind = TokenKind::Integer;
        self.eat_while(|c| c.is_ascii_digit());

        if self.peek_char() == Some('.') {
            self.next_char();
            self.eat_while(|c| c.is_ascii_digit());
            kind = TokenKind::Float;
        }

        if matches!(self.peek_char(), Some('e' | 'E')) {
            let digits_at = match self.peek_nth(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_nth(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.next_char();
                }
                self.eat_while(|c| c.is_ascii_digit());
                kind = TokenKind::Float;
            }
        }

        kind
    }

    /// Skips everything up to the next `}` and returns the skipped text. The
    /// `}` itself is left unread. Returns `None`, consuming nothing, if there
    /// is no `}` in the rest of the input.
    ///
    /// Byte blocks make up most of a typical DFM; reading them this way avoids
    /// splitting hex rows into integer and word tokens.
    pub fn skip_to_closing_brace(&mut self) -> Option<&'a str> {
        let rest = &self.input[self.position..];
        let len = rest.find('}')?;
        let target = self.position + len;
        while self.position < target {
            self.next_char();
        }
        Some(&rest[..len])
    }
}

/// Space, tab, CR and LF. Other Unicode spaces start no token.
fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.next_token();
        (token.kind != TokenKind::Eof).then_some(token)
    }
}
