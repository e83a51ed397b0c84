//! Church Parse - parser for lambda-calculus source text.
//!
//! Grammar:
//!
//! ```text
//! atom = ID | "(" expr ")"
//! expr = atom | expr atom | "\" ID+ "." expr
//! ```
//!
//! Application is left-associative juxtaposition; a lambda body extends as
//! far right as possible. The parser keeps its own frame stack instead of
//! recursing, so nesting depth is bounded only by memory.

mod error;

use church_ir::{Ast, Name};
use church_lexer::{tokenize, Token};
use tracing::trace;

pub use error::ParseError;

/// A parsed `name params* = body` definition.
#[derive(Debug)]
pub struct Definition {
    pub name: Name,
    pub parameters: Vec<Name>,
    pub body: Ast,
}

impl Definition {
    /// The body wrapped in one `Function` per parameter.
    pub fn into_value(self) -> Ast {
        Ast::functions(self.parameters.into_iter(), self.body)
    }
}

/// Parse an expression.
pub fn parse_expr(source: &str) -> Result<Ast, ParseError> {
    let tokens = tokenize(source)?;
    parse_tokens(&tokens)
}

/// Parse a definition: `name params* = expr`.
pub fn parse_definition(source: &str) -> Result<Definition, ParseError> {
    let tokens = tokenize(source)?;
    let Some((&Token::Ident(name), mut rest)) = tokens.split_first() else {
        return Err(ParseError::ExpectedIdentifier);
    };
    let mut parameters = Vec::new();
    loop {
        match rest.split_first() {
            Some((&Token::Ident(parameter), tail)) => {
                parameters.push(parameter);
                rest = tail;
            }
            Some((&Token::Equal, tail)) => {
                rest = tail;
                break;
            }
            _ => return Err(ParseError::ExpectedEqual),
        }
    }
    let body = parse_tokens(rest)?;
    Ok(Definition {
        name,
        parameters,
        body,
    })
}

/// Parse a single identifier with nothing after it.
pub fn parse_name(source: &str) -> Result<Name, ParseError> {
    match tokenize(source)?.as_slice() {
        [Token::Ident(name)] => Ok(*name),
        [Token::Ident(_), ..] => Err(ParseError::TrailingTokens),
        _ => Err(ParseError::ExpectedIdentifier),
    }
}

/// An open construct waiting for its closing token.
enum Frame {
    /// `(` waiting for `)`.
    Group,
    /// `\params.` waiting for its body to end.
    Lambda(Vec<Name>),
}

struct Open {
    frame: Frame,
    /// Application accumulated before the construct opened.
    outer: Option<Ast>,
}

/// Parse a token sequence into an expression.
#[tracing::instrument(level = "trace", skip_all, fields(tokens = tokens.len()))]
pub fn parse_tokens(tokens: &[Token]) -> Result<Ast, ParseError> {
    let mut open: Vec<Open> = Vec::new();
    let mut current: Option<Ast> = None;
    let mut rest = tokens.iter().copied();

    while let Some(token) = rest.next() {
        match token {
            Token::Ident(name) => push_atom(&mut current, Ast::Name(name)),
            Token::LParen => open.push(Open {
                frame: Frame::Group,
                outer: current.take(),
            }),
            Token::Backslash => {
                let parameters = lambda_parameters(&mut rest)?;
                trace!(count = parameters.len(), "lambda header");
                open.push(Open {
                    frame: Frame::Lambda(parameters),
                    outer: current.take(),
                });
            }
            Token::RParen => close_group(&mut open, &mut current)?,
            Token::Dot => return Err(ParseError::UnexpectedToken(token)),
            Token::Equal => return Err(ParseError::InvalidToken(token)),
        }
    }

    while let Some(Open { frame, outer }) = open.pop() {
        match frame {
            Frame::Group => return Err(ParseError::UnexpectedEnd),
            Frame::Lambda(parameters) => {
                let body = current.take().ok_or(ParseError::UnexpectedEnd)?;
                current = outer;
                push_atom(&mut current, Ast::functions(parameters.into_iter(), body));
            }
        }
    }
    current.ok_or(ParseError::UnexpectedEnd)
}

/// Extend the current application with one more atom.
fn push_atom(current: &mut Option<Ast>, atom: Ast) {
    *current = Some(match current.take() {
        Some(function) => Ast::apply(function, atom),
        None => atom,
    });
}

/// Read `ID+ "."` after a backslash.
fn lambda_parameters(rest: &mut impl Iterator<Item = Token>) -> Result<Vec<Name>, ParseError> {
    let mut parameters = Vec::new();
    loop {
        match rest.next() {
            Some(Token::Ident(name)) => parameters.push(name),
            Some(Token::Dot) if !parameters.is_empty() => return Ok(parameters),
            _ => return Err(ParseError::InvalidNameSequence),
        }
    }
}

/// Handle `)`: close any lambdas ending here, then the innermost group.
fn close_group(open: &mut Vec<Open>, current: &mut Option<Ast>) -> Result<(), ParseError> {
    loop {
        let Some(Open { frame, outer }) = open.pop() else {
            return Err(ParseError::UnexpectedToken(Token::RParen));
        };
        let Some(body) = current.take() else {
            return Err(ParseError::UnexpectedToken(Token::RParen));
        };
        *current = outer;
        match frame {
            Frame::Group => {
                push_atom(current, body);
                return Ok(());
            }
            Frame::Lambda(parameters) => {
                push_atom(current, Ast::functions(parameters.into_iter(), body));
            }
        }
    }
}
