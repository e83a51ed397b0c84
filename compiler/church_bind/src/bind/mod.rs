//! Surface tree to bound term.

use church_ir::{Ast, AstEvent, BinderId, Environment, Name, Term};
use rustc_hash::FxHashMap;

use crate::BindError;

/// Lexical scope during binding: innermost binder per name wins.
#[derive(Default)]
struct ScopeStack {
    by_name: FxHashMap<Name, Vec<BinderId>>,
    open: Vec<Name>,
}

impl ScopeStack {
    fn push(&mut self, name: Name) -> BinderId {
        let binder = BinderId::fresh(name);
        self.by_name.entry(name).or_default().push(binder);
        self.open.push(name);
        binder
    }

    fn pop(&mut self) -> BinderId {
        let popped = self
            .open
            .pop()
            .and_then(|name| self.by_name.get_mut(&name))
            .and_then(Vec::pop);
        match popped {
            Some(binder) => binder,
            None => unreachable!("function closed without being opened"),
        }
    }

    fn resolve(&self, name: Name) -> Option<BinderId> {
        self.by_name.get(&name).and_then(|binders| binders.last()).copied()
    }
}

fn pop_term(terms: &mut Vec<Term>) -> Term {
    match terms.pop() {
        Some(term) => term,
        None => unreachable!("event stream closed more nodes than it opened"),
    }
}

/// Resolve every name in `ast`.
///
/// Each `Function` gets a brand-new binder, even when its name repeats. A
/// name with no enclosing binder is looked up by name in `globals`, newest
/// definition first.
#[tracing::instrument(level = "debug", skip_all)]
pub fn bind(ast: &Ast, globals: &Environment) -> Result<Term, BindError> {
    let mut scope = ScopeStack::default();
    let mut terms: Vec<Term> = Vec::new();

    for event in ast.events() {
        match event {
            AstEvent::Name(name) => {
                let binder = match scope.resolve(name) {
                    Some(binder) => binder,
                    None => globals
                        .lookup_by_name(name)
                        .map(|(binder, _)| binder)
                        .ok_or(BindError::UndefinedName(name))?,
                };
                terms.push(Term::variable(binder));
            }
            AstEvent::OpenFunction(name) => {
                scope.push(name);
            }
            AstEvent::CloseFunction => {
                let body = pop_term(&mut terms);
                terms.push(Term::function(scope.pop(), body));
            }
            AstEvent::OpenApply => {}
            AstEvent::CloseApply => {
                let argument = pop_term(&mut terms);
                let function = pop_term(&mut terms);
                terms.push(Term::apply(function, argument));
            }
        }
    }

    let term = pop_term(&mut terms);
    debug_assert!(terms.is_empty());
    Ok(term)
}

#[cfg(test)]
mod tests;
