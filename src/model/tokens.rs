//! Declared type tokens
//!
//! A member's declared type arrives as a string. Several spellings are
//! accepted and normalized into one [`TypeToken`] tree:
//!
//! - dotted or `::` paths: `Zoo.Model.Animal`, `zoo::model::Animal`
//! - angle-bracket generics: `List<Zoo.Animal>`, `Dictionary<string, int>`
//! - CLR full names: ``System.Collections.Generic.List`1[[Zoo.Animal, Zoo, Version=1.0.0.0]]``
//! - array and nullable suffixes: `Animal[]`, `int?`

use crate::error::{Error, Result};
use crate::names::short_name;
use std::fmt;
use std::str::FromStr;

/// Postfix modifier wrapping a single element token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSuffix {
    /// `T[]`
    Array,
    /// `T?`
    Nullable,
}

/// A parsed type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeToken {
    /// Namespace or module segments before the simple name
    pub path: Vec<String>,
    /// Simple name, without any CLR arity suffix
    pub name: String,
    /// Generic type arguments (the element token when `suffix` is set)
    pub arguments: Vec<TypeToken>,
    /// Postfix modifier, if the token was written `T[]` or `T?`
    pub suffix: Option<TokenSuffix>,
}

impl TypeToken {
    /// Create a plain, non-generic token from a dotted path
    pub fn simple(path: &str) -> Self {
        let mut segments: Vec<String> = path
            .split("::")
            .flat_map(|s| s.split('.'))
            .map(str::to_string)
            .collect();
        segments.pop();
        Self {
            path: segments,
            name: short_name(path).to_string(),
            arguments: Vec::new(),
            suffix: None,
        }
    }

    /// Create a generic token
    pub fn generic(path: &str, arguments: Vec<TypeToken>) -> Self {
        Self {
            arguments,
            ..Self::simple(path)
        }
    }

    /// Parse a raw type token
    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = TokenParser::new(input);
        let token = parser.parse_token()?;
        parser.skip_ws();
        if let Some(c) = parser.peek() {
            return Err(Error::Token(format!(
                "unexpected '{}' at offset {} in '{}'",
                c, parser.pos, input
            )));
        }
        Ok(token)
    }

    /// Simple name (last path segment)
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Dotted full name, without type arguments
    pub fn full_name(&self) -> String {
        if self.path.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.path.join("."), self.name)
        }
    }

    /// Check if the token carries type arguments
    pub fn is_generic(&self) -> bool {
        !self.arguments.is_empty()
    }

    /// The single type argument, if there is exactly one
    pub fn single_argument(&self) -> Option<&TypeToken> {
        match self.arguments.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    fn with_suffix(element: TypeToken, suffix: TokenSuffix) -> Self {
        let name = match suffix {
            TokenSuffix::Array => format!("{}[]", element.name),
            TokenSuffix::Nullable => "Nullable".to_string(),
        };
        Self {
            path: Vec::new(),
            name,
            arguments: vec![element],
            suffix: Some(suffix),
        }
    }
}

impl FromStr for TypeToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.suffix, self.arguments.first()) {
            (Some(TokenSuffix::Array), Some(element)) => return write!(f, "{}[]", element),
            (Some(TokenSuffix::Nullable), Some(element)) => return write!(f, "{}?", element),
            _ => {}
        }
        write!(f, "{}", self.full_name())?;
        if self.is_generic() {
            write!(f, "<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

/// Deepest nesting of generic arguments and suffixes accepted in one token
pub const MAX_TOKEN_DEPTH: usize = 32;

struct TokenParser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl<'a> TokenParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_path_separator(&mut self) -> bool {
        if self.peek() == Some(':') && self.peek_at(1) == Some(':') {
            self.pos += 2;
            return true;
        }
        // '+' separates CLR nested types
        self.eat('.') || self.eat('+')
    }

    fn expect(&mut self, c: char) -> Result<()> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", c)))
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().map_or(false, char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn error(&self, what: &str) -> Error {
        Error::Token(format!("{} at offset {} in '{}'", what, self.pos, self.input))
    }

    fn parse_ident(&mut self) -> Result<String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || ".:+<>[],`?".contains(c) {
                break;
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_token(&mut self) -> Result<TypeToken> {
        if self.depth >= MAX_TOKEN_DEPTH {
            return Err(self.error("type nesting too deep"));
        }
        self.depth += 1;
        let token = self.parse_nested_token();
        self.depth -= 1;
        token
    }

    fn parse_nested_token(&mut self) -> Result<TypeToken> {
        self.skip_ws();
        let mut path = vec![self.parse_ident()?];
        while self.eat_path_separator() {
            path.push(self.parse_ident()?);
        }
        let name = path.pop().unwrap_or_default();

        let mut arguments = Vec::new();
        if self.eat('<') {
            loop {
                arguments.push(self.parse_token()?);
                self.skip_ws();
                if !self.eat(',') {
                    break;
                }
            }
            self.expect('>')?;
        } else if self.eat('`') {
            let digits = self.pos;
            while self.peek().map_or(false, |c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.pos == digits {
                return Err(self.error("expected generic arity"));
            }
            if self.peek() == Some('[') && self.peek_at(1) != Some(']') {
                self.pos += 1;
                arguments = self.parse_clr_arguments()?;
            }
        }

        let mut token = TypeToken {
            path,
            name,
            arguments,
            suffix: None,
        };
        let mut wrapped = self.depth;
        loop {
            let has_suffix = (self.peek() == Some('[') && self.peek_at(1) == Some(']'))
                || self.peek() == Some('?');
            if has_suffix {
                if wrapped >= MAX_TOKEN_DEPTH {
                    return Err(self.error("type nesting too deep"));
                }
                wrapped += 1;
            }
            if self.peek() == Some('[') && self.peek_at(1) == Some(']') {
                self.pos += 2;
                token = TypeToken::with_suffix(token, TokenSuffix::Array);
            } else if self.eat('?') {
                token = TypeToken::with_suffix(token, TokenSuffix::Nullable);
            } else {
                break;
            }
        }
        Ok(token)
    }

    /// Arguments of a CLR generic, after the opening '['
    fn parse_clr_arguments(&mut self) -> Result<Vec<TypeToken>> {
        let mut arguments = Vec::new();
        loop {
            self.skip_ws();
            if self.eat('[') {
                arguments.push(self.parse_token()?);
                self.skip_assembly_qualifier();
                self.expect(']')?;
            } else {
                arguments.push(self.parse_token()?);
            }
            self.skip_ws();
            if !self.eat(',') {
                break;
            }
        }
        self.expect(']')?;
        Ok(arguments)
    }

    /// Skip `, Assembly, Version=..., PublicKeyToken=...` up to the closing ']'
    fn skip_assembly_qualifier(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '[' => depth += 1,
                ']' if depth == 0 => return,
                ']' => depth -= 1,
                _ => {}
            }
            self.pos += 1;
        }
    }
}
