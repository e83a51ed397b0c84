//! Bound term back to surface tree.

use church_ir::{Ast, BinderId, Name, Term};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::names::NameAllocator;

enum Step<'a> {
    Visit(&'a Term),
    CloseApply,
    CloseFunction {
        binder: BinderId,
        name: Name,
        shadowed: Option<Name>,
    },
}

/// Give every binder of `term` a printable name.
///
/// Free variables print as `free_names` says, falling back to their
/// binder's own name. Two distinct free binders never share a printed name:
/// binders listed in `free_names` choose first, in order of first
/// occurrence, and a later clash gets a numeric suffix (`n n0`). Bound
/// variables keep their binder's name unless it is already visible at that
/// point, in which case a suffix is added the same way (`\x x0.x0`). The
/// result therefore re-binds to an alpha-equivalent term.
pub fn unbind(term: &Term, free_names: &FxHashMap<BinderId, Name>) -> Ast {
    let mut names = NameAllocator::default();
    let free = free_binders(term);
    let (listed, unlisted): (Vec<BinderId>, Vec<BinderId>) =
        free.into_iter().partition(|binder| free_names.contains_key(binder));
    let mut free_display: FxHashMap<BinderId, Name> = FxHashMap::default();
    for binder in listed.into_iter().chain(unlisted) {
        let preferred = free_names.get(&binder).copied().unwrap_or(binder.name());
        free_display.insert(binder, names.claim(preferred));
    }

    let mut scope: FxHashMap<BinderId, Name> = FxHashMap::default();
    let mut steps = vec![Step::Visit(term)];
    let mut out: Vec<Ast> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(Term::Variable(binder)) => {
                let name = scope
                    .get(binder)
                    .or_else(|| free_display.get(binder))
                    .copied()
                    .unwrap_or(binder.name());
                out.push(Ast::name(name));
            }
            Step::Visit(Term::Apply(node)) => {
                steps.push(Step::CloseApply);
                steps.push(Step::Visit(&node.argument));
                steps.push(Step::Visit(&node.function));
            }
            Step::Visit(Term::Function(node)) => {
                let binder = node.parameter;
                let name = names.claim(binder.name());
                let shadowed = scope.insert(binder, name);
                steps.push(Step::CloseFunction {
                    binder,
                    name,
                    shadowed,
                });
                steps.push(Step::Visit(&node.body));
            }
            Step::CloseApply => {
                let argument = pop_ast(&mut out);
                let function = pop_ast(&mut out);
                out.push(Ast::apply(function, argument));
            }
            Step::CloseFunction {
                binder,
                name,
                shadowed,
            } => {
                match shadowed {
                    Some(outer) => scope.insert(binder, outer),
                    None => scope.remove(&binder),
                };
                names.release(name);
                let body = pop_ast(&mut out);
                out.push(Ast::function(name, body));
            }
        }
    }

    let ast = pop_ast(&mut out);
    debug_assert!(out.is_empty());
    ast
}

fn pop_ast(out: &mut Vec<Ast>) -> Ast {
    match out.pop() {
        Some(ast) => ast,
        None => unreachable!("unbind closed more nodes than it opened"),
    }
}

/// Binders referenced in `term` outside of their own function, in order of
/// first occurrence.
fn free_binders(term: &Term) -> Vec<BinderId> {
    enum Walk<'a> {
        Visit(&'a Term),
        Leave(BinderId),
    }

    let mut bound: FxHashMap<BinderId, usize> = FxHashMap::default();
    let mut seen = FxHashSet::default();
    let mut free = Vec::new();
    let mut pending = vec![Walk::Visit(term)];

    while let Some(walk) = pending.pop() {
        match walk {
            Walk::Visit(Term::Variable(binder)) => {
                if !bound.contains_key(binder) && seen.insert(*binder) {
                    free.push(*binder);
                }
            }
            Walk::Visit(Term::Apply(node)) => {
                pending.push(Walk::Visit(&node.argument));
                pending.push(Walk::Visit(&node.function));
            }
            Walk::Visit(Term::Function(node)) => {
                *bound.entry(node.parameter).or_default() += 1;
                pending.push(Walk::Leave(node.parameter));
                pending.push(Walk::Visit(&node.body));
            }
            Walk::Leave(binder) => {
                if let Some(depth) = bound.get_mut(&binder) {
                    *depth -= 1;
                    if *depth == 0 {
                        bound.remove(&binder);
                    }
                }
            }
        }
    }

    free
}
