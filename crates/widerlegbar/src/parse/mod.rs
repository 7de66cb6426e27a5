use std::fmt;

mod clause_set;

pub use clause_set::{parse_clause_set, ClauseSetParser};

pub type ParseResult<T> = Result<T, ParseErr>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErr {
    Expected(String, String),
    InvalidCharacter(char, usize),
}

impl fmt::Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErr::Expected(expected, got) => write!(f, "Expected {} but got {}", expected, got),
            ParseErr::InvalidCharacter(c, pos) => write!(
                f,
                "Unexpected character '{c}' at position {pos}. Please use alphanumeric propositions only, separate literals with whitespace or ',' and clauses with newlines or ';'."
            ),
        }
    }
}

impl std::error::Error for ParseErr {}
