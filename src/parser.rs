//! Recursive-descent parser from DFM text to an [`Object`] tree.
//!
//! ## Grammar
//!
//! ```text
//! object   ::= keyword [name ':'] type ['[' index ']'] property* 'end'
//! keyword  ::= 'object' | 'inherited' | 'inline'
//! property ::= object | name ('.' name)* '=' value
//! value    ::= sign* (integer | float)
//!            | string-run
//!            | '[' [value (',' value)*] ']'
//!            | '(' value* ')'
//!            | '{' hex-digits '}'
//!            | '<' ('item' property* 'end')* '>'
//!            | 'True' | 'False'
//!            | word ('.' word)*
//! ```
//!
//! One token of lookahead is enough for every decision. Keywords ignore case.
//! Each object, set, tuple and item list is one level of recursion, capped at
//! [`ParseOptions::max_depth`].
//!
//! The first error stops the parse. After it is recorded the token source only
//! yields end-of-file, so no further work happens on the way out, and the
//! first error is the one returned.

use crate::object::{Object, ObjectKind, Property};
use crate::options::ParseOptions;
use crate::token::{Position, Token, TokenKind};
use crate::tokenizer::Tokenizer;
use crate::value::PropertyValue;
use crate::{Error, Result};
use log::{trace, warn};

/// Parses one DFM object from text.
///
/// Most users should call [`crate::from_str`] instead.
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
    peeked: Option<Token<'a>>,
    error: Option<Error>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        // 0xFF read as a single-byte character: the binary DFM signature.
        let error = input.starts_with('\u{FF}').then_some(Error::BinaryFormat);
        Parser {
            tokens: Tokenizer::new(input),
            peeked: None,
            error,
            options,
            depth: 0,
        }
    }

    /// Parses the first object in the input. Anything after its `end` is
    /// ignored.
    pub fn parse(mut self) -> Result<Object> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        let result = self.parse_object();
        match self.error {
            Some(first) => Err(first),
            None => result,
        }
    }

    /// Records `err` as the parse error unless one is already recorded.
    fn fail(&mut self, err: Error) -> Error {
        self.peeked = None;
        self.error.get_or_insert(err).clone()
    }

    fn eof(&self) -> Token<'a> {
        Token::eof(self.tokens.location())
    }

    fn fetch(&mut self) -> Result<Token<'a>> {
        loop {
            let token = self.tokens.next_token();
            match token.kind {
                TokenKind::WhiteSpace => continue,
                TokenKind::Illegal => {
                    let Position { line, column } = token.start;
                    return Err(self.fail(Error::illegal_token(line, column, token.text)));
                }
                _ => return Ok(token),
            }
        }
    }

    fn peek(&mut self) -> Result<Token<'a>> {
        if self.error.is_some() {
            return Ok(self.eof());
        }
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.fetch()?;
        self.peeked = Some(token);
        Ok(token)
    }

    fn next(&mut self) -> Result<Token<'a>> {
        if self.error.is_some() {
            return Ok(self.eof());
        }
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.fetch(),
        }
    }

    fn unexpected(&mut self, token: &Token<'_>, expected: &str) -> Error {
        let Position { line, column } = token.start;
        self.fail(Error::unexpected_token(line, column, expected, &token.describe()))
    }

    fn premature_end(&mut self, at: Position, context: &str) -> Error {
        self.fail(Error::premature_end(at.line, at.column, context))
    }

    fn malformed_literal(&mut self, token: &Token<'_>, reason: impl ToString) -> Error {
        let Position { line, column } = token.start;
        self.fail(Error::malformed_literal(
            line,
            column,
            token.text,
            reason.to_string(),
        ))
    }

    /// Runs `parse` one nesting level deeper, failing at `at` past the limit.
    fn nested<T>(
        &mut self,
        at: Position,
        parse: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.depth >= self.options.max_depth {
            let limit = self.options.max_depth;
            return Err(self.fail(Error::nesting_too_deep(at.line, at.column, limit)));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        let token = self.next()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(self.unexpected(&token, &kind.to_string()))
        }
    }

    fn expect_word(&mut self, keyword: &str) -> Result<()> {
        let token = self.next()?;
        if token.is_word(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(&token, &format!("'{}'", keyword)))
        }
    }

    fn identifier(&mut self, what: &str) -> Result<String> {
        let token = self.next()?;
        if token.kind == TokenKind::Word {
            Ok(token.text.to_string())
        } else {
            Err(self.unexpected(&token, &format!("identifier as {}", what)))
        }
    }

    fn parse_object(&mut self) -> Result<Object> {
        let start = self.peek()?.start;
        self.nested(start, |parser| parser.parse_object_body(start))
    }

    fn parse_object_body(&mut self, start: Position) -> Result<Object> {
        let mut obj = Object::default();

        let first = self.peek()?;
        if first.kind == TokenKind::Word {
            if let Some(kind) = ObjectKind::from_keyword(first.text) {
                self.next()?;
                obj.kind = kind;
            }
        }

        let name_or_type = self.identifier("object name or type")?;
        if self.peek()?.kind == TokenKind::Colon {
            self.next()?;
            obj.name = name_or_type;
            obj.type_name = self.identifier("object type")?;
        } else {
            obj.type_name = name_or_type;
        }

        if self.peek()?.kind == TokenKind::LeftBracket {
            self.next()?;
            obj.index = Some(self.parse_index()?);
            self.expect(TokenKind::RightBracket)?;
        }

        trace!("parsing {} {}: {} at {}", obj.kind, obj.name, obj.type_name, start);

        loop {
            let token = self.peek()?;
            if token.kind == TokenKind::Eof {
                if self.options.strict {
                    return Err(self.premature_end(start, "object body"));
                }
                warn!(
                    "input ended inside object {:?} opened at {}, treating it as closed",
                    obj.name, start
                );
                break;
            }
            if token.is_word("end") {
                self.next()?;
                break;
            }
            let property = self.parse_property()?;
            obj.properties.push(property);
        }

        Ok(obj)
    }

    fn parse_index(&mut self) -> Result<usize> {
        let at = self.peek()?.start;
        let value = self.parse_value()?;
        match value {
            PropertyValue::Int(i) if i >= 0 => usize::try_from(i)
                .map_err(|_| self.fail(Error::malformed_index(at.line, at.column, &i.to_string()))),
            other => {
                let found = format!("{} {}", other.type_name(), other);
                Err(self.fail(Error::malformed_index(at.line, at.column, &found)))
            }
        }
    }

    fn parse_property(&mut self) -> Result<Property> {
        let token = self.peek()?;
        if token.kind == TokenKind::Word && ObjectKind::from_keyword(token.text).is_some() {
            let child = self.parse_object()?;
            return Ok(Property::object(child));
        }

        let mut name = self.identifier("property name")?;
        while self.peek()?.kind == TokenKind::Dot {
            self.next()?;
            let part = self.identifier("property name")?;
            name.push('.');
            name.push_str(&part);
        }
        self.expect(TokenKind::Equal)?;
        let value = self.parse_value()?;
        Ok(Property { name, value })
    }

    fn parse_value(&mut self) -> Result<PropertyValue> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Plus | TokenKind::Minus | TokenKind::Integer | TokenKind::Float => {
                self.parse_number()
            }
            TokenKind::String | TokenKind::Character => self.parse_string(),
            TokenKind::LeftBracket => self.nested(token.start, Self::parse_set),
            TokenKind::LeftParen => self.nested(token.start, Self::parse_tuple),
            TokenKind::LeftBrace => self.parse_bytes(),
            TokenKind::LessThan => self.nested(token.start, Self::parse_items),
            TokenKind::Word => self.parse_word(),
            TokenKind::Eof => Err(self.premature_end(token.start, "property value")),
            _ => Err(self.unexpected(&token, "property value")),
        }
    }

    fn parse_number(&mut self) -> Result<PropertyValue> {
        let mut negative = false;
        let mut token = self.next()?;
        while matches!(token.kind, TokenKind::Plus | TokenKind::Minus) {
            if token.kind == TokenKind::Minus {
                negative = !negative;
            }
            token = self.next()?;
        }

        match token.kind {
            TokenKind::Integer => {
                // Sign first, so that i64::MIN converts.
                let literal = if negative {
                    format!("-{}", token.text)
                } else {
                    token.text.to_string()
                };
                literal
                    .parse::<i64>()
                    .map(PropertyValue::Int)
                    .map_err(|e| self.malformed_literal(&token, e))
            }
            TokenKind::Float => {
                let f = token
                    .text
                    .parse::<f64>()
                    .map_err(|e| self.malformed_literal(&token, e))?;
                Ok(PropertyValue::Float(if negative { -f } else { f }))
            }
            _ => Err(self.unexpected(&token, "number after sign")),
        }
    }

    /// Reads fragments like `'abc'#13#10'def' +` into one string. A run
    /// continues after a `+`, or with a fragment on the line the previous
    /// one ended on.
    fn parse_string(&mut self) -> Result<PropertyValue> {
        let mut text = String::new();
        let mut fragment = self.next()?;
        loop {
            self.decode_fragment(&fragment, &mut text)?;

            let next = self.peek()?;
            if next.kind == TokenKind::Plus {
                self.next()?;
                fragment = self.next()?;
                if !fragment.kind.is_string_fragment() {
                    return Err(self.unexpected(&fragment, "string or character after '+'"));
                }
            } else if next.kind.is_string_fragment() && next.start.line == fragment.end.line {
                fragment = self.next()?;
            } else {
                break;
            }
        }
        Ok(PropertyValue::String(text))
    }

    fn decode_fragment(&mut self, token: &Token<'_>, out: &mut String) -> Result<()> {
        if token.kind == TokenKind::Character {
            let code = token.text[1..]
                .parse::<u32>()
                .map_err(|e| self.malformed_literal(token, e))?;
            let ch = char::from_u32(code)
                .ok_or_else(|| self.malformed_literal(token, "not a unicode scalar value"))?;
            out.push(ch);
            return Ok(());
        }

        // Quotes come in pairs in a terminated literal: opening, closing and
        // every doubled one.
        let quotes = token.text.matches('\'').count();
        if token.text.len() < 2 || quotes % 2 != 0 {
            return Err(self.premature_end(token.start, "string literal"));
        }
        let inner = &token.text[1..token.text.len() - 1];
        out.push_str(&inner.replace("''", "'"));
        Ok(())
    }

    fn parse_set(&mut self) -> Result<PropertyValue> {
        let open = self.next()?;
        let mut elements = Vec::new();
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Eof => return Err(self.premature_end(open.start, "set")),
                TokenKind::RightBracket => {
                    self.next()?;
                    break;
                }
                _ => {}
            }
            if !elements.is_empty() {
                let sep = self.next()?;
                if sep.kind != TokenKind::Comma {
                    return Err(self.unexpected(&sep, "',' or ']'"));
                }
            }
            elements.push(self.parse_value()?);
        }
        Ok(PropertyValue::Set(elements))
    }

    fn parse_tuple(&mut self) -> Result<PropertyValue> {
        let open = self.next()?;
        let mut elements = Vec::new();
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Eof => return Err(self.premature_end(open.start, "tuple")),
                TokenKind::RightParen => {
                    self.next()?;
                    break;
                }
                _ => elements.push(self.parse_value()?),
            }
        }
        Ok(PropertyValue::Tuple(elements))
    }

    fn parse_bytes(&mut self) -> Result<PropertyValue> {
        // The '{' was peeked, so nothing past it is buffered.
        let open = self.next()?;
        let Some(body) = self.tokens.skip_to_closing_brace() else {
            return Err(self.premature_end(open.start, "byte block"));
        };
        self.expect(TokenKind::RightBrace)?;

        let nibbles: Vec<u8> = body
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();
        if nibbles.len() % 2 != 0 {
            if self.options.strict {
                let Position { line, column } = open.start;
                return Err(self.fail(Error::malformed_literal(
                    line,
                    column,
                    "{...}",
                    format!("odd number of hex digits ({})", nibbles.len()),
                )));
            }
            warn!(
                "byte block at {} has an odd number of hex digits, dropping the last one",
                open.start
            );
        }

        let bytes = nibbles
            .chunks_exact(2)
            .map(|pair| pair[0] << 4 | pair[1])
            .collect();
        Ok(PropertyValue::Bytes(bytes))
    }

    fn parse_items(&mut self) -> Result<PropertyValue> {
        let open = self.next()?;
        let mut items = Vec::new();
        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Eof => return Err(self.premature_end(open.start, "item list")),
                TokenKind::GreaterThan => {
                    self.next()?;
                    break;
                }
                _ => {}
            }

            self.expect_word("item")?;
            let mut item = Vec::new();
            loop {
                let token = self.peek()?;
                if token.kind == TokenKind::Eof {
                    return Err(self.premature_end(open.start, "item"));
                }
                if token.is_word("end") {
                    self.next()?;
                    break;
                }
                item.push(self.parse_property()?);
            }
            items.push(item);
        }
        Ok(PropertyValue::Items(items))
    }

    fn parse_word(&mut self) -> Result<PropertyValue> {
        let token = self.next()?;
        if token.is_word("true") {
            return Ok(PropertyValue::Bool(true));
        }
        if token.is_word("false") {
            return Ok(PropertyValue::Bool(false));
        }

        let mut identifier = token.text.to_string();
        while self.peek()?.kind == TokenKind::Dot {
            self.next()?;
            let part = self.next()?;
            if part.kind != TokenKind::Word {
                return Err(self.unexpected(&part, "identifier after '.'"));
            }
            identifier.push('.');
            identifier.push_str(part.text);
        }
        Ok(PropertyValue::Identifier(identifier))
    }
}
