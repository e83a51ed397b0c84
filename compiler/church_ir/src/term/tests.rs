use super::*;
use crate::Name;

fn binder(name: &str) -> BinderId {
    BinderId::fresh(Name::intern(name))
}

#[test]
fn test_identity_equals_renamed_identity() {
    let x = binder("x");
    let y = binder("y");
    let id_x = Term::function(x, Term::variable(x));
    let id_y = Term::function(y, Term::variable(y));
    assert_eq!(id_x, id_y);
}

#[test]
fn test_true_and_false_differ() {
    let (x, y) = (binder("x"), binder("y"));
    let t = Term::function(x, Term::function(y, Term::variable(x)));
    let (a, b) = (binder("a"), binder("b"));
    let f = Term::function(a, Term::function(b, Term::variable(b)));
    assert_ne!(t, f);
}

#[test]
fn test_apply_all_is_left_associative() {
    let (f, a, b) = (binder("f"), binder("a"), binder("b"));
    let built = Term::variable(f).apply_all([Term::variable(a), Term::variable(b)]);
    let expected = Term::apply(
        Term::apply(Term::variable(f), Term::variable(a)),
        Term::variable(b),
    );
    assert!(matches!(&built, Term::Apply(node) if matches!(node.function, Term::Apply(_))));
    assert_eq!(built, expected);
}

#[test]
fn test_clone_shares_nodes() {
    let x = binder("x");
    let term = Term::function(x, Term::variable(x));
    let copy = term.clone();
    assert!(term.ptr_eq(&copy));
    let other = Term::function(x, Term::variable(x));
    assert!(!term.ptr_eq(&other));
}

#[test]
fn test_size_counts_nodes() {
    let (f, x) = (binder("f"), binder("x"));
    // \f x.f (f x)
    let body = Term::apply(
        Term::variable(f),
        Term::apply(Term::variable(f), Term::variable(x)),
    );
    let two = Term::function(f, Term::function(x, body));
    assert_eq!(two.size(), 7);
}

#[test]
fn test_debug_output() {
    let x = binder("x");
    let term = Term::function(x, Term::apply(Term::variable(x), Term::variable(x)));
    let shown = format!("{term:?}");
    let serial = x.serial();
    assert_eq!(shown, format!("(\\x#{serial}. (x#{serial} x#{serial}))"));
}

#[test]
fn test_deep_term_drop_and_debug() {
    let x = binder("x");
    let mut term = Term::variable(x);
    for _ in 0..100_000 {
        term = Term::apply(term, Term::variable(x));
    }
    let mut nested = Term::variable(x);
    for _ in 0..100_000 {
        nested = Term::function(x, nested);
    }
    assert!(format!("{nested:?}").starts_with("(\\x#"));
    assert_eq!(term.size(), 200_001);
    drop(term);
    drop(nested);
}

#[test]
fn test_shared_subterm_survives_drop() {
    let x = binder("x");
    let shared = Term::function(x, Term::variable(x));
    let pair = Term::apply(shared.clone(), shared.clone());
    drop(pair);
    assert_eq!(shared.size(), 2);
}
