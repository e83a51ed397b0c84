//! The call-by-name reduction machine.

use std::rc::Rc;

use church_ir::{Abstraction, BinderId, Binding, Environment, Term};

use crate::{EvalError, EvalMode};

/// How far a pending evaluation must go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Form {
    /// Expose the head only: a variable, a stuck application, or a closure.
    WeakHead,
    /// Reduce everything, including arguments and function bodies.
    Normal,
}

/// A function paired with the environment it was reached in.
#[derive(Clone, Debug)]
pub struct Closure {
    pub function: Rc<Abstraction>,
    pub env: Environment,
}

/// Result of weak-head reduction.
#[derive(Clone, Debug)]
pub enum WeakHead {
    /// A function, ready for a beta step.
    Closure(Closure),
    /// A variable, or an application whose head is a variable. Arguments of
    /// the application are already in normal form.
    Neutral(Term),
}

/// Counters for a single reducer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// Beta steps taken.
    pub beta_steps: u64,
    /// Variables looked up in an environment.
    pub variable_lookups: u64,
}

enum Task {
    Eval {
        term: Term,
        env: Environment,
        form: Form,
    },
    /// The head of an application is on the value stack; apply it.
    Apply {
        argument: Term,
        env: Environment,
        form: Form,
    },
    /// Head and normalized argument are on the value stack.
    CombineApply,
    /// Normalized body is on the value stack.
    CombineFunction(BinderId),
}

/// Normal-order reducer with an optional step budget.
///
/// The budget applies to each `normalize` or `weak_head` call separately.
/// Statistics accumulate across calls on the same reducer.
#[derive(Debug, Default)]
pub struct Reducer {
    mode: EvalMode,
    stats: ReductionStats,
}

impl Reducer {
    pub fn new(mode: EvalMode) -> Self {
        Reducer {
            mode,
            stats: ReductionStats::default(),
        }
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn stats(&self) -> ReductionStats {
        self.stats
    }

    /// Reduce `term` to normal form under `env`.
    ///
    /// Every function in the result has a binder that did not exist before
    /// the call. Free variables of the result are `Value` bindings of `env`.
    ///
    /// # Panics
    ///
    /// Panics if `term` refers to a binder that is neither enclosing it nor
    /// bound in `env`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn normalize(&mut self, term: &Term, env: &Environment) -> Result<Term, EvalError> {
        let before = self.stats;
        let result = self.run(term, env, Form::Normal).map(|value| match value {
            WeakHead::Neutral(term) => term,
            WeakHead::Closure(_) => unreachable!("normal form produced a closure"),
        });
        tracing::debug!(
            beta_steps = self.stats.beta_steps.saturating_sub(before.beta_steps),
            variable_lookups = self.stats.variable_lookups.saturating_sub(before.variable_lookups),
            "normalized"
        );
        result
    }

    /// Reduce `term` under `env` only until its head is exposed.
    ///
    /// # Panics
    ///
    /// Same as [`normalize`](Self::normalize).
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn weak_head(&mut self, term: &Term, env: &Environment) -> Result<WeakHead, EvalError> {
        self.run(term, env, Form::WeakHead)
    }

    fn run(&mut self, term: &Term, env: &Environment, form: Form) -> Result<WeakHead, EvalError> {
        // The budget applies to this call alone; stats keep accumulating.
        let start = self.stats.beta_steps;
        let mut tasks = vec![Task::Eval {
            term: term.clone(),
            env: env.clone(),
            form,
        }];
        let mut values: Vec<WeakHead> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Eval { term, env, form } => {
                    self.eval(&term, env, form, &mut tasks, &mut values);
                }
                Task::Apply {
                    argument,
                    env,
                    form,
                } => match pop_value(&mut values) {
                    WeakHead::Closure(Closure {
                        function,
                        env: closure_env,
                    }) => {
                        self.beta_step(start)?;
                        tracing::trace!(parameter = ?function.parameter, "beta");
                        let env = closure_env
                            .extend(function.parameter, Binding::Thunk(argument, env));
                        tasks.push(Task::Eval {
                            term: function.body.clone(),
                            env,
                            form,
                        });
                    }
                    WeakHead::Neutral(head) => {
                        values.push(WeakHead::Neutral(head));
                        tasks.push(Task::CombineApply);
                        tasks.push(Task::Eval {
                            term: argument,
                            env,
                            form: Form::Normal,
                        });
                    }
                },
                Task::CombineApply => {
                    let argument = pop_term(&mut values);
                    let function = pop_term(&mut values);
                    values.push(WeakHead::Neutral(Term::apply(function, argument)));
                }
                Task::CombineFunction(parameter) => {
                    let body = pop_term(&mut values);
                    values.push(WeakHead::Neutral(Term::function(parameter, body)));
                }
            }
        }

        let result = pop_value(&mut values);
        debug_assert!(values.is_empty());
        Ok(result)
    }

    fn eval(
        &mut self,
        term: &Term,
        env: Environment,
        form: Form,
        tasks: &mut Vec<Task>,
        values: &mut Vec<WeakHead>,
    ) {
        match term {
            Term::Variable(binder) => {
                self.stats.variable_lookups = self.stats.variable_lookups.saturating_add(1);
                match env.lookup(*binder) {
                    Some(Binding::Thunk(term, thunk_env)) => tasks.push(Task::Eval {
                        term: term.clone(),
                        env: thunk_env.clone(),
                        form,
                    }),
                    Some(Binding::Value(value)) => {
                        values.push(WeakHead::Neutral(Term::variable(*value)));
                    }
                    None => panic!("unbound variable {binder:?} reached during reduction"),
                }
            }
            Term::Apply(node) => {
                tasks.push(Task::Apply {
                    argument: node.argument.clone(),
                    env: env.clone(),
                    form,
                });
                tasks.push(Task::Eval {
                    term: node.function.clone(),
                    env,
                    form: Form::WeakHead,
                });
            }
            Term::Function(node) => match form {
                Form::WeakHead => values.push(WeakHead::Closure(Closure {
                    function: Rc::clone(node),
                    env,
                })),
                Form::Normal => {
                    let fresh = node.parameter.renamed();
                    tasks.push(Task::CombineFunction(fresh));
                    tasks.push(Task::Eval {
                        term: node.body.clone(),
                        env: env.extend(node.parameter, Binding::Value(fresh)),
                        form: Form::Normal,
                    });
                }
            },
        }
    }

    fn beta_step(&mut self, start: u64) -> Result<(), EvalError> {
        let taken = self.stats.beta_steps.saturating_sub(start);
        if !self.mode.allows_step(taken) {
            let limit = self.mode.max_steps().unwrap_or(taken);
            tracing::debug!(limit, "step limit exceeded");
            return Err(EvalError::StepLimitExceeded { limit });
        }
        self.stats.beta_steps = self.stats.beta_steps.saturating_add(1);
        Ok(())
    }
}

fn pop_value(values: &mut Vec<WeakHead>) -> WeakHead {
    match values.pop() {
        Some(value) => value,
        None => unreachable!("reduction finished a task without its operands"),
    }
}

fn pop_term(values: &mut Vec<WeakHead>) -> Term {
    match pop_value(values) {
        WeakHead::Neutral(term) => term,
        WeakHead::Closure(_) => unreachable!("closure left where a normal form was expected"),
    }
}

/// Reduce a closed `term` to normal form.
///
/// Does not return if `term` has no normal form.
pub fn reduce(term: &Term) -> Term {
    reduce_in(term, &Environment::empty())
}

/// Reduce `term` to normal form under the definitions in `env`.
pub fn reduce_in(term: &Term, env: &Environment) -> Term {
    match Reducer::new(EvalMode::Unbounded).normalize(term, env) {
        Ok(term) => term,
        Err(err) => unreachable!("unbounded reduction failed: {err}"),
    }
}

#[cfg(test)]
mod tests;
