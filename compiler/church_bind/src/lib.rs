//! Church Bind - name resolution.
//!
//! [`bind`] turns a name-based [`Ast`](church_ir::Ast) into a
//! [`Term`](church_ir::Term) whose variables point at unique binder
//! identities; [`unbind`] goes back, choosing printable names that cannot
//! capture anything.
//!
//! Both directions walk the tree with explicit stacks.

mod bind;
mod names;
mod unbind;

use std::fmt;

use church_ir::Name;

pub use bind::bind;
pub use unbind::unbind;

/// Error produced by [`bind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindError {
    /// A name matched neither an enclosing binder nor a top-level definition.
    UndefinedName(Name),
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::UndefinedName(name) => write!(f, "Undefined name: {name}"),
        }
    }
}

impl std::error::Error for BindError {}
