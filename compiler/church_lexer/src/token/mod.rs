//! Token definitions.

use std::fmt;

use church_ir::Name;
use logos::Logos;

/// A lexed token. Identifiers are interned while lexing.
#[derive(Logos, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[logos(skip r"\s+")]
pub enum Token {
    #[regex(r"[A-Za-z0-9_]+", |lex| Name::intern(lex.slice()))]
    Ident(Name),
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("\\")]
    Backslash,
    #[token(".")]
    Dot,
    #[token("=")]
    Equal,
}

impl Token {
    /// Source text of the token.
    pub fn text(self) -> &'static str {
        match self {
            Token::Ident(name) => name.as_str(),
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Backslash => "\\",
            Token::Dot => ".",
            Token::Equal => "=",
        }
    }

    #[inline]
    pub fn is_ident(self) -> bool {
        matches!(self, Token::Ident(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

pub(crate) fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
