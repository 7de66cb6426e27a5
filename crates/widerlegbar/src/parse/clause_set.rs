use std::{fmt, iter::Peekable};

use super::{ParseErr, ParseResult};
use crate::{Literal, Symbol};

/// Parses a knowledge base into one literal list per clause.
///
/// Clauses are separated by newlines or `;`, literals by whitespace or `,`.
/// A literal may be negated with `-`, `!` or `~`. `#` comments out the rest
/// of the line; clauses without literals are skipped.
pub fn parse_clause_set(formula: &str) -> ParseResult<Vec<Vec<Literal>>> {
    ClauseSetParser::parse(formula)
}

#[derive(Debug, PartialEq, Eq)]
struct Token<'t> {
    pub kind: TokenKind,
    pub spelling: &'t str,
    pub src_pos: usize,
}

impl<'t> fmt::Display for Token<'t> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Semi => write!(f, "end of clause at position {}", self.src_pos),
            _ => write!(f, "'{}' at position {}", self.spelling, self.src_pos),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum TokenKind {
    Comma,
    Semi,
    Not,
    Ident,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semi => write!(f, ";"),
            TokenKind::Not => write!(f, "-"),
            TokenKind::Ident => write!(f, "proposition"),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\''
}

struct ClauseSetTokenizer<'f> {
    formula: &'f str,
    pos: usize,
}

impl<'f> ClauseSetTokenizer<'f> {
    pub fn new(formula: &'f str) -> Self {
        Self { formula, pos: 0 }
    }

    fn bump(&mut self, size: usize) {
        self.pos += size;
        self.formula = &self.formula[size..];
    }

    fn next_token(&mut self) -> Option<ParseResult<Token<'f>>> {
        loop {
            let c = self.formula.chars().next()?;
            if c == '#' {
                let size = self.formula.find('\n').unwrap_or(self.formula.len());
                self.bump(size);
            } else if c.is_whitespace() && c != '\n' {
                self.bump(c.len_utf8());
            } else {
                break;
            }
        }

        let c = self.formula.chars().next()?;
        let (kind, size) = match c {
            ';' | '\n' => (TokenKind::Semi, 1),
            ',' => (TokenKind::Comma, 1),
            '-' | '!' | '~' => (TokenKind::Not, 1),
            c if is_ident_char(c) => {
                let size = self
                    .formula
                    .find(|c| !is_ident_char(c))
                    .unwrap_or(self.formula.len());
                (TokenKind::Ident, size)
            }
            c => {
                let pos = self.pos;
                self.bump(c.len_utf8());
                return Some(Err(ParseErr::InvalidCharacter(c, pos)));
            }
        };

        let t = Token {
            kind,
            spelling: &self.formula[..size],
            src_pos: self.pos,
        };
        self.bump(size);
        Some(Ok(t))
    }
}

impl<'f> Iterator for ClauseSetTokenizer<'f> {
    type Item = ParseResult<Token<'f>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl<'f> From<&'f str> for ClauseSetTokenizer<'f> {
    fn from(f: &'f str) -> Self {
        ClauseSetTokenizer::new(f)
    }
}

pub struct ClauseSetParser<'f> {
    tokens: Peekable<ClauseSetTokenizer<'f>>,
}

impl<'f> ClauseSetParser<'f> {
    pub fn parse(formula: &'f str) -> ParseResult<Vec<Vec<Literal>>> {
        let tokens: ClauseSetTokenizer = formula.into();
        let mut parser = ClauseSetParser {
            tokens: tokens.peekable(),
        };
        parser.parse_cs()
    }

    fn parse_cs(&mut self) -> ParseResult<Vec<Vec<Literal>>> {
        let mut cs = vec![];

        loop {
            while self.semi() {}
            if self.tokens.peek().is_none() {
                break;
            }
            cs.push(self.parse_c()?);
            if !self.semi() && self.tokens.peek().is_some() {
                return Err(ParseErr::Expected(
                    "end of clause".to_string(),
                    self.got_msg()?,
                ));
            }
        }

        Ok(cs)
    }

    fn parse_c(&mut self) -> ParseResult<Vec<Literal>> {
        let mut c = vec![self.parse_literal()?];

        loop {
            if self.comma() {
                c.push(self.parse_literal()?);
            } else if self.next_is(TokenKind::Ident) || self.next_is(TokenKind::Not) {
                c.push(self.parse_literal()?);
            } else {
                break;
            }
        }

        Ok(c)
    }

    fn parse_literal(&mut self) -> ParseResult<Literal> {
        let negated = self.not();
        Ok(Literal::new(self.parse_prop()?, negated))
    }

    fn parse_prop(&mut self) -> ParseResult<Symbol> {
        match self.tokens.next() {
            Some(Err(e)) => Err(e),
            Some(Ok(Token {
                spelling,
                kind: TokenKind::Ident,
                ..
            })) => Ok(Symbol::intern(spelling)),
            Some(Ok(t)) => Err(ParseErr::Expected("proposition".to_string(), t.to_string())),
            None => Err(ParseErr::Expected(
                "proposition".to_string(),
                "end of input".to_string(),
            )),
        }
    }

    fn got_msg(&mut self) -> ParseResult<String> {
        match self.tokens.next() {
            Some(Ok(t)) => Ok(t.to_string()),
            Some(Err(e)) => Err(e),
            None => Ok("end of input".to_string()),
        }
    }

    fn next_is(&mut self, expected: TokenKind) -> bool {
        match self.tokens.peek() {
            Some(Ok(Token { kind, .. })) => *kind == expected,
            _ => false,
        }
    }

    fn eat_if_kind(&mut self, expected: TokenKind) -> bool {
        if self.next_is(expected) {
            self.tokens.next();
            true
        } else {
            false
        }
    }

    fn semi(&mut self) -> bool {
        self.eat_if_kind(TokenKind::Semi)
    }

    fn comma(&mut self) -> bool {
        self.eat_if_kind(TokenKind::Comma)
    }

    fn not(&mut self) -> bool {
        self.eat_if_kind(TokenKind::Not)
    }
}
