//! Parse error types.

use std::fmt;

use church_lexer::{LexError, Token};

/// Error produced while parsing an expression, definition, or name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The source could not be tokenized.
    Lex(LexError),
    /// A token that cannot appear where it did, such as `)` with no open
    /// group or `.` outside a lambda header.
    UnexpectedToken(Token),
    /// A token that never belongs in an expression (`=`).
    InvalidToken(Token),
    /// Input ended inside an unfinished construct.
    UnexpectedEnd,
    /// A lambda header without parameters, or not closed by `.`.
    InvalidNameSequence,
    ExpectedIdentifier,
    ExpectedEqual,
    /// Input continues after a complete name.
    TrailingTokens,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => err.fmt(f),
            ParseError::UnexpectedToken(token) => write!(f, "Unexpected token: '{token}'"),
            ParseError::InvalidToken(token) => write!(f, "Invalid token: {token}"),
            ParseError::UnexpectedEnd => f.write_str("Unexpected end of input."),
            ParseError::InvalidNameSequence => f.write_str("Invalid name sequence"),
            ParseError::ExpectedIdentifier => f.write_str("Expected identifier"),
            ParseError::ExpectedEqual => f.write_str("Expected ="),
            ParseError::TrailingTokens => f.write_str("Unexpected additional tokens"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}
