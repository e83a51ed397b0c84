#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use church_ir::Binding;
use church_parse::parse_expr;

fn bind_source(source: &str) -> Result<Term, BindError> {
    bind(&parse_expr(source).unwrap(), &Environment::empty())
}

fn binder(name: &str) -> BinderId {
    BinderId::fresh(Name::intern(name))
}

#[test]
fn test_bind_shapes() {
    let x = binder("x");
    let y = binder("y");
    let rx = || Term::variable(x);
    let ry = || Term::variable(y);
    let cases = [
        (r"\x.x", Term::function(x, rx())),
        (r"\x x.x", Term::function(x, Term::function(y, ry()))),
        (r"\x.\x.x", Term::function(x, Term::function(y, ry()))),
        (r"\x.x x", Term::function(x, Term::apply(rx(), rx()))),
        (
            r"\x.x x x",
            Term::function(x, Term::apply(Term::apply(rx(), rx()), rx())),
        ),
        (
            r"\x.(\x.x)x",
            Term::function(x, Term::apply(Term::function(y, ry()), rx())),
        ),
    ];
    for (source, expected) in cases {
        assert_eq!(bind_source(source).unwrap(), expected, "source: {source}");
    }
}

#[test]
fn test_shadowing_picks_innermost() {
    // \x x.x must not equal \x y.x
    let inner = bind_source(r"\x x.x").unwrap();
    let outer = bind_source(r"\x y.x").unwrap();
    assert_ne!(inner, outer);
}

#[test]
fn test_each_function_gets_fresh_binder() {
    let term = bind_source(r"(\x.x)(\x.x)").unwrap();
    let Term::Apply(node) = &term else {
        panic!("expected an application");
    };
    let (Term::Function(left), Term::Function(right)) = (&node.function, &node.argument) else {
        panic!("expected two functions");
    };
    assert_ne!(left.parameter, right.parameter);
    assert_eq!(left.parameter.name(), right.parameter.name());
}

#[test]
fn test_undefined_names() {
    for (source, name) in [(r"\x.y", "y"), (r"(\x.x)x", "x"), ("nothing", "nothing")] {
        let err = bind_source(source).unwrap_err();
        assert_eq!(err, BindError::UndefinedName(Name::intern(name)));
    }
    assert_eq!(
        bind_source(r"\x.y").unwrap_err().to_string(),
        "Undefined name: y"
    );
}

#[test]
fn test_globals_resolve_by_name() {
    let two = binder("two");
    let globals = Environment::empty().extend(two, Binding::Value(two));
    let term = bind(&parse_expr("two").unwrap(), &globals).unwrap();
    assert!(matches!(&term, Term::Variable(found) if *found == two));
}

#[test]
fn test_local_binder_shadows_global() {
    let x = binder("x");
    let globals = Environment::empty().extend(x, Binding::Value(x));
    let term = bind(&parse_expr(r"\x.x").unwrap(), &globals).unwrap();
    let Term::Function(node) = &term else {
        panic!("expected a function");
    };
    assert!(matches!(&node.body, Term::Variable(found) if *found == node.parameter));
}

#[test]
fn test_newest_global_wins() {
    let n1 = binder("n");
    let n2 = binder("n");
    let globals = Environment::empty()
        .extend(n1, Binding::Value(n1))
        .extend(n2, Binding::Value(n2));
    let term = bind(&parse_expr("n").unwrap(), &globals).unwrap();
    assert!(matches!(&term, Term::Variable(found) if *found == n2));
}

#[test]
fn test_bind_deeply_nested() {
    let repeats = 20_000;
    let sources = [
        format!(r"\x.x{}", " x".repeat(repeats)),
        format!(r"\x.{}x{}", "x(".repeat(repeats), ")".repeat(repeats)),
        format!("{}x", r"\x.".repeat(repeats)),
    ];
    for source in &sources {
        let term = bind_source(source).unwrap();
        assert!(term.size() > repeats);
    }
}
