#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use super::*;
use church_bind::{bind, unbind};
use church_fmt::format_ast;
use church_ir::Name;
use church_parse::parse_expr;
use pretty_assertions::assert_eq;

/// Top-level definitions, each closed over the ones before it.
#[derive(Default)]
struct Definitions {
    env: Environment,
}

impl Definitions {
    fn with_prelude() -> Self {
        let mut defs = Definitions::default();
        for (name, source) in [
            ("true", r"\x y.x"),
            ("false", r"\x y.y"),
            ("and", r"\p q.p q p"),
            ("or", r"\p q.p p q"),
            ("not", r"\p.p false true"),
            ("zero", r"\f x.x"),
            ("succ", r"\n f x.f (n f x)"),
            ("one", "succ zero"),
            ("two", "succ one"),
            ("three", "succ two"),
            ("four", "succ three"),
            ("add", r"\m n f x.m f (n f x)"),
            ("mul", r"\m n f.m (n f)"),
            ("pow", r"\b e.e b"),
            ("id", r"\x.x"),
            ("omega", r"(\x.x x)(\x.x x)"),
        ] {
            defs.define(name, source);
        }
        defs
    }

    fn define(&mut self, name: &str, source: &str) {
        let term = self.bind(source);
        let binder = BinderId::fresh(Name::intern(name));
        self.env = self.env.extend(binder, Binding::Thunk(term, self.env.clone()));
    }

    fn bind(&self, source: &str) -> Term {
        bind(&parse_expr(source).unwrap(), &self.env).unwrap()
    }

    fn eval(&self, source: &str) -> Term {
        reduce_in(&self.bind(source), &self.env)
    }

    fn show(&self, term: &Term) -> String {
        format_ast(&unbind(term, &self.env.free_names()))
    }
}

fn closed(source: &str) -> Term {
    bind(&parse_expr(source).unwrap(), &Environment::empty()).unwrap()
}

#[test]
fn test_identity() {
    assert_eq!(reduce(&closed(r"(\x.x)(\y.y)")), closed(r"\y.y"));
}

#[test]
fn test_normal_form_is_unchanged() {
    for source in [r"\x.x", r"\f x.f (f x)", r"\x.x (\y.y) x"] {
        assert_eq!(reduce(&closed(source)), closed(source), "source: {source}");
    }
}

#[test]
fn test_logic() {
    let defs = Definitions::with_prelude();
    let t = defs.eval("true");
    let f = defs.eval("false");
    assert_eq!(defs.eval("not true"), f);
    assert_eq!(defs.eval("not false"), t);
    assert_eq!(defs.eval("and true false"), f);
    assert_eq!(defs.eval("and true true"), t);
    assert_eq!(defs.eval("or false true"), t);
    assert_eq!(defs.eval("or false false"), f);
}

#[test]
fn test_arithmetic() {
    let defs = Definitions::with_prelude();
    assert_eq!(defs.eval("add two two"), closed(r"\f x.f(f(f(f x)))"));
    assert_eq!(defs.eval("mul two three"), closed(r"\f x.f(f(f(f(f(f x)))))"));
    assert_eq!(defs.eval("pow two three"), defs.eval("mul two four"));
    assert_eq!(defs.eval("succ zero"), defs.eval("one"));
    assert_eq!(defs.show(&defs.eval("add two two")), r"\f x.f(f(f(f x)))");
}

#[test]
fn test_reduce_is_idempotent() {
    let defs = Definitions::with_prelude();
    for source in ["add two two", "pow two three", "not true", r"\x.id x"] {
        let once = defs.eval(source);
        let twice = reduce_in(&once, &defs.env);
        assert_eq!(twice, once, "source: {source}");
    }
}

#[test]
fn test_later_definition_does_not_change_earlier_one() {
    let mut defs = Definitions::with_prelude();
    defs.define("n", r"\f x.f(f x)");
    defs.define("four", "add n n");
    defs.define("n", r"\f x.f(f(f x))");
    defs.define("six", "add n n");
    assert_eq!(defs.eval("four"), closed(r"\f x.f(f(f(f x)))"));
    assert_eq!(defs.eval("six"), closed(r"\f x.f(f(f(f(f(f x)))))"));
}

#[test]
fn test_capture_avoidance() {
    let y = BinderId::fresh(Name::intern("y"));
    let globals = Environment::empty().extend(y, Binding::Value(y));
    let term = bind(&parse_expr(r"(\x.\y.x)y").unwrap(), &globals).unwrap();
    let result = reduce_in(&term, &globals);

    let expected = bind(&parse_expr(r"\y0.y").unwrap(), &globals).unwrap();
    assert_eq!(result, expected);
    assert_eq!(format_ast(&unbind(&result, &globals.free_names())), r"\y0.y");
}

#[test]
fn test_normal_order_skips_unused_divergent_argument() {
    let defs = Definitions::with_prelude();
    assert_eq!(defs.eval(r"(\x y.y) omega"), closed(r"\y.y"));
    assert_eq!(defs.eval("false omega id"), closed(r"\x.x"));
}

#[test]
fn test_stuck_application_reduces_arguments() {
    let f = BinderId::fresh(Name::intern("f"));
    let globals = Environment::empty().extend(f, Binding::Value(f));
    let term = bind(&parse_expr(r"f ((\x.x) f)").unwrap(), &globals).unwrap();
    let result = reduce_in(&term, &globals);
    assert_eq!(result, Term::apply(Term::variable(f), Term::variable(f)));
}

#[test]
fn test_normalized_functions_get_fresh_binders() {
    let term = closed(r"\x.x");
    let result = reduce(&term);
    let (Term::Function(before), Term::Function(after)) = (&term, &result) else {
        panic!("expected functions");
    };
    assert_ne!(before.parameter, after.parameter);
    assert_eq!(before.parameter.name(), after.parameter.name());
    assert_eq!(result, term);
}

#[test]
fn test_step_budget() {
    let defs = Definitions::with_prelude();
    let omega = defs.bind("omega");

    let mut reducer = Reducer::new(EvalMode::Budgeted { max_steps: 100 });
    let err = reducer.normalize(&omega, &defs.env).unwrap_err();
    assert_eq!(err, EvalError::StepLimitExceeded { limit: 100 });
    assert_eq!(err.to_string(), "Step limit exceeded (100 steps)");
    assert_eq!(reducer.stats().beta_steps, 100);
}

#[test]
fn test_budget_allows_exactly_max_steps() {
    let term = closed(r"(\x.x)(\y.y)");
    let mut reducer = Reducer::new(EvalMode::Budgeted { max_steps: 1 });
    assert_eq!(reducer.normalize(&term, &Environment::empty()).unwrap(), closed(r"\y.y"));

    let mut reducer = Reducer::new(EvalMode::Budgeted { max_steps: 0 });
    assert_eq!(
        reducer.normalize(&term, &Environment::empty()).unwrap_err(),
        EvalError::StepLimitExceeded { limit: 0 }
    );
}

#[test]
fn test_budget_is_per_call() {
    let term = closed(r"(\x.x)(\y.y)");
    let mut reducer = Reducer::new(EvalMode::Budgeted { max_steps: 1 });
    for _ in 0..3 {
        assert_eq!(reducer.normalize(&term, &Environment::empty()).unwrap(), closed(r"\y.y"));
    }
    assert_eq!(reducer.weak_head(&term, &Environment::empty()).map(|_| ()), Ok(()));
    // Stats still add up over every call.
    assert_eq!(reducer.stats().beta_steps, 4);
}

#[test]
fn test_stats() {
    let mut reducer = Reducer::default();
    assert_eq!(reducer.mode(), EvalMode::Unbounded);
    reducer.normalize(&closed(r"(\x.x)(\y.y)"), &Environment::empty()).unwrap();
    assert_eq!(
        reducer.stats(),
        ReductionStats {
            beta_steps: 1,
            variable_lookups: 2,
        }
    );
}

#[test]
fn test_weak_head_stops_at_function() {
    let mut reducer = Reducer::default();
    // The body is left alone, so its redex is not counted.
    let head = reducer
        .weak_head(&closed(r"(\x y.x)(\z.(\w.w) z)"), &Environment::empty())
        .unwrap();
    let WeakHead::Closure(closure) = &head else {
        panic!("expected a closure, got {head:?}");
    };
    assert_eq!(closure.function.parameter.name(), Name::intern("y"));
    assert_eq!(closure.env.len(), 1);
    assert_eq!(reducer.stats().beta_steps, 1);
}

#[test]
fn test_weak_head_of_stuck_application() {
    let f = BinderId::fresh(Name::intern("f"));
    let globals = Environment::empty().extend(f, Binding::Value(f));
    let term = bind(&parse_expr(r"(\x.f x) f").unwrap(), &globals).unwrap();
    let head = Reducer::default().weak_head(&term, &globals).unwrap();
    let WeakHead::Neutral(neutral) = &head else {
        panic!("expected a neutral term, got {head:?}");
    };
    assert_eq!(*neutral, Term::apply(Term::variable(f), Term::variable(f)));
}

#[test]
#[should_panic(expected = "unbound variable")]
fn test_unbound_variable_panics() {
    let stray = BinderId::fresh(Name::intern("stray"));
    reduce(&Term::variable(stray));
}

#[test]
fn test_deep_reductions() {
    let repeats = 20_000;
    let defs = Definitions::with_prelude();

    // Nested in argument position.
    let nested = format!("{}true{}", "id (".repeat(repeats), ")".repeat(repeats));
    assert_eq!(defs.eval(&nested), defs.eval("true"));

    // A long application spine.
    let spine = format!("{}true", "id ".repeat(repeats));
    assert_eq!(defs.eval(&spine), defs.eval("true"));

    // Deep normal forms.
    let lambdas = closed(&format!("{}x", r"\x.".repeat(repeats)));
    assert_eq!(reduce(&lambdas), lambdas);
    let numeral = closed(&format!(r"\f x.{}x{}", "f(".repeat(repeats), ")".repeat(repeats)));
    assert_eq!(reduce(&numeral), numeral);
}

#[test]
fn test_many_beta_steps() {
    let mut defs = Definitions::with_prelude();
    defs.define("ten", r"\f x.f(f(f(f(f(f(f(f(f(f x)))))))))");
    defs.define("thousand", "mul ten (mul ten ten)");
    let mut reducer = Reducer::default();
    let term = defs.bind("thousand");
    let result = reducer.normalize(&term, &defs.env).unwrap();
    assert_eq!(result.size(), 2 * 1000 + 3);
    assert_eq!(reducer.stats().beta_steps, 253);
}
