#![deny(clippy::arithmetic_side_effects)]
//! Church Eval - normal-order reduction for bound lambda terms.
//!
//! # Architecture
//!
//! The [`Reducer`] is a call-by-name machine driven by a work stack and a
//! value stack:
//! - substitution is an [`Environment`](church_ir::Environment) extension
//!   holding the argument as an unevaluated thunk
//! - a function in head position is only reduced to a closure
//! - a function reduced to normal form gets a fresh binder
//!
//! No step recurses natively, so neither term depth nor the number of
//! reductions is limited by the native stack.

mod errors;
mod eval_mode;
mod reducer;

pub use errors::EvalError;
pub use eval_mode::EvalMode;
pub use reducer::{reduce, reduce_in, Closure, ReductionStats, Reducer, WeakHead};
