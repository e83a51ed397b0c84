//! Church Lexer - tokenizer for lambda-calculus source text.
//!
//! The token set is tiny: identifiers, `(`, `)`, `\`, `.`, and `=` (used
//! only by definitions). Whitespace is skipped; any other character is a
//! [`LexError`].

mod token;

use std::fmt;

use logos::Logos;

pub use token::Token;

/// Error produced when the source contains a character outside the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LexError {
    InvalidCharacter {
        ch: char,
        /// Byte offset of `ch` in the source.
        offset: usize,
    },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::InvalidCharacter { ch, .. } => {
                write!(f, "Invalid character in string: '{ch}'")
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Tokenize `source`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                let offset = lexer.span().start;
                let ch = source[offset..].chars().next().unwrap_or_default();
                return Err(LexError::InvalidCharacter { ch, offset });
            }
        }
    }
    Ok(tokens)
}

/// Reverse of [`tokenize`]: concatenate token texts, with a single space
/// between consecutive identifiers and nowhere else.
pub fn untokenize(tokens: &[Token]) -> String {
    let mut output = String::new();
    let mut last_was_ident = false;
    for token in tokens {
        let is_ident = token.is_ident();
        if is_ident && last_was_ident {
            output.push(' ');
        }
        output.push_str(token.text());
        last_was_ident = is_ident;
    }
    output
}

/// Whether `text` is exactly one identifier.
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(token::is_ident_char)
}
