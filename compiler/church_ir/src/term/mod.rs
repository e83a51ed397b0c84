//! Bound lambda terms.
//!
//! Terms are immutable and reference counted: cloning a `Term` is O(1) and
//! reduction builds new nodes instead of mutating old ones.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::rc::Rc;

use crate::canon::{alpha_eq, canon_tokens};
use crate::BinderId;

/// A lambda term whose variables refer to binders by identity.
///
/// Equality (`==`) is alpha-equivalence, and `Hash` is consistent with it.
#[derive(Clone)]
pub enum Term {
    /// Reference to an enclosing binder, or to a binder resolved in an
    /// [`Environment`](crate::Environment).
    Variable(BinderId),
    /// Function application.
    Apply(Rc<Application>),
    /// Introduces `parameter`, scoping `body`.
    Function(Rc<Abstraction>),
}

/// Payload of [`Term::Apply`].
#[derive(Clone, Debug)]
pub struct Application {
    pub function: Term,
    pub argument: Term,
}

/// Payload of [`Term::Function`].
#[derive(Clone, Debug)]
pub struct Abstraction {
    pub parameter: BinderId,
    pub body: Term,
}

impl Term {
    #[inline]
    pub fn variable(binder: BinderId) -> Self {
        Term::Variable(binder)
    }

    #[inline]
    pub fn apply(function: Term, argument: Term) -> Self {
        Term::Apply(Rc::new(Application { function, argument }))
    }

    #[inline]
    pub fn function(parameter: BinderId, body: Term) -> Self {
        Term::Function(Rc::new(Abstraction { parameter, body }))
    }

    /// Apply `self` to each argument in turn, left-associatively.
    pub fn apply_all(self, arguments: impl IntoIterator<Item = Term>) -> Self {
        arguments
            .into_iter()
            .fold(self, |function, argument| Term::apply(function, argument))
    }

    /// Whether `self` and `other` are the same node (not merely equal).
    pub fn ptr_eq(&self, other: &Term) -> bool {
        match (self, other) {
            (Term::Variable(a), Term::Variable(b)) => a == b,
            (Term::Apply(a), Term::Apply(b)) => Rc::ptr_eq(a, b),
            (Term::Function(a), Term::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Number of nodes in the term.
    pub fn size(&self) -> usize {
        let mut pending = vec![self];
        let mut count = 0usize;
        while let Some(term) = pending.pop() {
            count += 1;
            match term {
                Term::Variable(_) => {}
                Term::Apply(node) => {
                    pending.push(&node.argument);
                    pending.push(&node.function);
                }
                Term::Function(node) => pending.push(&node.body),
            }
        }
        count
    }

    /// Move uniquely-owned children into `out`, leaving placeholders.
    fn detach_children(&mut self, out: &mut Vec<Term>) {
        const PLACEHOLDER: Term = Term::Variable(BinderId::DETACHED);
        match self {
            Term::Variable(_) => {}
            Term::Apply(node) => {
                if let Some(node) = Rc::get_mut(node) {
                    out.push(mem::replace(&mut node.function, PLACEHOLDER));
                    out.push(mem::replace(&mut node.argument, PLACEHOLDER));
                }
            }
            Term::Function(node) => {
                if let Some(node) = Rc::get_mut(node) {
                    out.push(mem::replace(&mut node.body, PLACEHOLDER));
                }
            }
        }
    }
}

// Deep terms would overflow the native stack with the derived drop glue.
impl Drop for Term {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(mut term) = detached.pop() {
            term.detach_children(&mut detached);
        }
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        alpha_eq(self, other)
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for token in canon_tokens(self) {
            token.hash(state);
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Term(&'a Term),
            Text(&'static str),
        }

        let mut pending = vec![Piece::Term(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Term(Term::Variable(binder)) => write!(f, "{binder:?}")?,
                Piece::Term(Term::Apply(node)) => {
                    f.write_str("(")?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Term(&node.argument));
                    pending.push(Piece::Text(" "));
                    pending.push(Piece::Term(&node.function));
                }
                Piece::Term(Term::Function(node)) => {
                    write!(f, "(\\{:?}. ", node.parameter)?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Term(&node.body));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
