//! Church Fmt - printer for surface syntax trees.
//!
//! Produces the display grammar: `\` for lambda, `.` between parameters and
//! body, consecutive lambdas grouped (`\f x.body`), and parentheses only
//! where precedence requires them. Application binds tighter than lambda
//! introduction and is left-associative.
//!
//! Layout is decided by the position a subtree occupies:
//!
//! | Position   | Example slot        | Application | Lambda  |
//! |------------|---------------------|-------------|---------|
//! | `Top`      | whole expression    | bare        | bare    |
//! | `Leading`  | `[f] a`             | bare        | parens  |
//! | `Trailing` | `f [a]` at the end  | parens      | bare    |
//! | `Middle`   | `f [a] b`           | parens      | parens  |

use church_ir::Ast;
use church_lexer::{untokenize, Token};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Position {
    Top,
    Leading,
    Trailing,
    Middle,
}

impl Position {
    /// Position of the argument when an application sits here unparenthesized.
    fn argument_position(self) -> Option<Position> {
        match self {
            Position::Top => Some(Position::Trailing),
            Position::Leading => Some(Position::Middle),
            Position::Trailing | Position::Middle => None,
        }
    }

    fn allows_bare_lambda(self) -> bool {
        matches!(self, Position::Top | Position::Trailing)
    }
}

enum Step<'a> {
    Visit(Position, &'a Ast),
    Emit(Token),
}

/// Turn a surface tree into display tokens.
pub fn unparse(ast: &Ast) -> Vec<Token> {
    let mut out = Vec::new();
    let mut pending = vec![Step::Visit(Position::Top, ast)];

    while let Some(step) = pending.pop() {
        match step {
            Step::Emit(token) => out.push(token),
            Step::Visit(_, Ast::Name(name)) => out.push(Token::Ident(*name)),
            Step::Visit(position, apply @ Ast::Apply(node)) => {
                if let Some(argument_position) = position.argument_position() {
                    pending.push(Step::Visit(argument_position, &node.argument));
                    pending.push(Step::Visit(Position::Leading, &node.function));
                } else {
                    out.push(Token::LParen);
                    pending.push(Step::Emit(Token::RParen));
                    pending.push(Step::Visit(Position::Top, apply));
                }
            }
            Step::Visit(position, function @ Ast::Function(_)) => {
                if position.allows_bare_lambda() {
                    out.push(Token::Backslash);
                    let mut body = function;
                    while let Ast::Function(node) = body {
                        out.push(Token::Ident(node.parameter));
                        body = &node.body;
                    }
                    out.push(Token::Dot);
                    pending.push(Step::Visit(Position::Top, body));
                } else {
                    out.push(Token::LParen);
                    pending.push(Step::Emit(Token::RParen));
                    pending.push(Step::Visit(Position::Top, function));
                }
            }
        }
    }
    out
}

/// Render a surface tree as text.
pub fn format_ast(ast: &Ast) -> String {
    untokenize(&unparse(ast))
}
