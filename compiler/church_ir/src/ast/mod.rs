//! Name-based surface syntax tree.
//!
//! This is the shape the parser produces and the printer consumes: names are
//! plain interned strings with no binding information. Binding resolves them
//! into a [`Term`](crate::Term).

use std::fmt;
use std::mem;

use crate::Name;

/// Surface syntax tree.
///
/// `Function` carries a single parameter; `\x y.b` is two nested nodes.
pub enum Ast {
    Name(Name),
    Apply(Box<AstApply>),
    Function(Box<AstFunction>),
}

/// Payload of [`Ast::Apply`].
pub struct AstApply {
    pub function: Ast,
    pub argument: Ast,
}

/// Payload of [`Ast::Function`].
pub struct AstFunction {
    pub parameter: Name,
    pub body: Ast,
}

impl Ast {
    #[inline]
    pub fn name(name: impl Into<Name>) -> Self {
        Ast::Name(name.into())
    }

    #[inline]
    pub fn apply(function: Ast, argument: Ast) -> Self {
        Ast::Apply(Box::new(AstApply { function, argument }))
    }

    #[inline]
    pub fn function(parameter: impl Into<Name>, body: Ast) -> Self {
        Ast::Function(Box::new(AstFunction {
            parameter: parameter.into(),
            body,
        }))
    }

    /// Wrap `body` in one `Function` per parameter, outermost first.
    pub fn functions(parameters: impl DoubleEndedIterator<Item = Name>, body: Ast) -> Self {
        parameters
            .rev()
            .fold(body, |body, parameter| Ast::function(parameter, body))
    }

    /// Flatten the tree into a pre-order event stream.
    pub fn events(&self) -> Events<'_> {
        Events {
            pending: vec![Pending::Visit(self)],
        }
    }

    fn detach_children(&mut self, out: &mut Vec<Ast>) {
        const PLACEHOLDER: Ast = Ast::Name(Name::EMPTY);
        match self {
            Ast::Name(_) => {}
            Ast::Apply(node) => {
                out.push(mem::replace(&mut node.function, PLACEHOLDER));
                out.push(mem::replace(&mut node.argument, PLACEHOLDER));
            }
            Ast::Function(node) => out.push(mem::replace(&mut node.body, PLACEHOLDER)),
        }
    }
}

impl Drop for Ast {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(mut ast) = detached.pop() {
            ast.detach_children(&mut detached);
        }
    }
}

impl Clone for Ast {
    fn clone(&self) -> Self {
        let mut built: Vec<Ast> = Vec::new();
        let mut scope: Vec<Name> = Vec::new();
        for event in self.events() {
            match event {
                AstEvent::Name(name) => built.push(Ast::Name(name)),
                AstEvent::OpenApply => {}
                AstEvent::CloseApply => {
                    let argument = pop(&mut built);
                    let function = pop(&mut built);
                    built.push(Ast::apply(function, argument));
                }
                AstEvent::OpenFunction(parameter) => scope.push(parameter),
                AstEvent::CloseFunction => {
                    let body = pop(&mut built);
                    let parameter = scope.pop().unwrap_or_default();
                    built.push(Ast::function(parameter, body));
                }
            }
        }
        pop(&mut built)
    }
}

fn pop(built: &mut Vec<Ast>) -> Ast {
    match built.pop() {
        Some(ast) => ast,
        None => unreachable!("event stream closed more nodes than it opened"),
    }
}

impl PartialEq for Ast {
    fn eq(&self, other: &Self) -> bool {
        self.events().eq(other.events())
    }
}

impl Eq for Ast {}

impl fmt::Debug for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Ast(&'a Ast),
            Text(&'static str),
        }

        let mut pending = vec![Piece::Ast(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Ast(Ast::Name(name)) => f.write_str(name.as_str())?,
                Piece::Ast(Ast::Apply(node)) => {
                    f.write_str("(")?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Ast(&node.argument));
                    pending.push(Piece::Text(" "));
                    pending.push(Piece::Ast(&node.function));
                }
                Piece::Ast(Ast::Function(node)) => {
                    write!(f, "(\\{}. ", node.parameter)?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Ast(&node.body));
                }
            }
        }
        Ok(())
    }
}

/// One step of a pre-order walk over an [`Ast`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AstEvent {
    Name(Name),
    OpenApply,
    CloseApply,
    OpenFunction(Name),
    CloseFunction,
}

enum Pending<'a> {
    Visit(&'a Ast),
    Emit(AstEvent),
}

/// Iterator returned by [`Ast::events`].
pub struct Events<'a> {
    pending: Vec<Pending<'a>>,
}

impl Iterator for Events<'_> {
    type Item = AstEvent;

    fn next(&mut self) -> Option<AstEvent> {
        match self.pending.pop()? {
            Pending::Emit(event) => Some(event),
            Pending::Visit(Ast::Name(name)) => Some(AstEvent::Name(*name)),
            Pending::Visit(Ast::Apply(node)) => {
                self.pending.push(Pending::Emit(AstEvent::CloseApply));
                self.pending.push(Pending::Visit(&node.argument));
                self.pending.push(Pending::Visit(&node.function));
                Some(AstEvent::OpenApply)
            }
            Pending::Visit(Ast::Function(node)) => {
                self.pending.push(Pending::Emit(AstEvent::CloseFunction));
                self.pending.push(Pending::Visit(&node.body));
                Some(AstEvent::OpenFunction(node.parameter))
            }
        }
    }
}
