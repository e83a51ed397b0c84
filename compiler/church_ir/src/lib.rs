//! Church IR - core data types for the lambda-calculus engine.
//!
//! # Architecture
//!
//! - [`Name`]: interned identifier, used for display and for surface syntax
//! - [`BinderId`]: identity of one binding occurrence; scope is decided by
//!   identity, never by name
//! - [`Term`]: bound lambda term (`Variable` / `Apply` / `Function`)
//! - [`Ast`]: name-based surface tree produced by the parser
//! - [`Environment`]: persistent binder-to-[`Binding`] list shared between
//!   closures, thunks, and top-level definitions
//! - [`canon`]: alpha-equivalence through a canonical token stream
//!
//! Every traversal in this crate (equality, hashing, `Debug`, and `Drop`)
//! uses an explicit work stack, so term depth is limited only by memory.

pub mod ast;
mod binder;
pub mod canon;
mod env;
mod name;
mod term;

pub use ast::{Ast, AstApply, AstEvent, AstFunction};
pub use binder::BinderId;
pub use canon::{alpha_eq, canonical_bits, canonical_hash, BitString, CanonToken};
pub use env::{Binding, Environment};
pub use name::Name;
pub use term::{Abstraction, Application, Term};
