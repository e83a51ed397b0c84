//! Persistent binding environments.
//!
//! An `Environment` is an immutable cons-list of `(BinderId, Binding)` pairs,
//! newest first. Extending returns a new list that shares the old one as its
//! tail, so closures and thunks can hold on to the environment they were
//! created in while top-level definitions keep accumulating.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::{BinderId, Name, Term};

/// What a binder is bound to.
#[derive(Clone, Debug)]
pub enum Binding {
    /// Rigid reference to an already-substituted variable. Entering a
    /// function body for full normalization binds its parameter this way.
    Value(BinderId),
    /// Unevaluated term paired with the environment it must be evaluated in:
    /// a pending argument, or a top-level definition.
    Thunk(Term, Environment),
}

/// Immutable, structurally shared binding list.
#[derive(Clone, Default)]
pub struct Environment {
    head: Option<Rc<Frame>>,
}

struct Frame {
    binder: BinderId,
    binding: Binding,
    parent: Environment,
}

impl Environment {
    /// The empty environment.
    #[inline]
    pub fn empty() -> Self {
        Environment { head: None }
    }

    /// A new environment with `binder ↦ binding` in front of `self`.
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn extend(&self, binder: BinderId, binding: Binding) -> Environment {
        Environment {
            head: Some(Rc::new(Frame {
                binder,
                binding,
                parent: self.clone(),
            })),
        }
    }

    /// Look up a binder by identity. The newest binding wins.
    pub fn lookup(&self, binder: BinderId) -> Option<&Binding> {
        self.iter()
            .find(|&(candidate, _)| candidate == binder)
            .map(|(_, binding)| binding)
    }

    /// Look up a binder by display name. The newest binding wins.
    pub fn lookup_by_name(&self, name: Name) -> Option<(BinderId, &Binding)> {
        self.iter().find(|(binder, _)| binder.name() == name)
    }

    /// Iterate over bindings, newest first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            frame: self.head.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Map from every binder in the environment to its display name.
    ///
    /// Used to render terms that refer to top-level definitions.
    pub fn free_names(&self) -> FxHashMap<BinderId, Name> {
        self.iter()
            .map(|(binder, _)| (binder, binder.name()))
            .collect()
    }

    /// Whether both environments are the same list (not merely equal).
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        match (&self.head, &other.head) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// Long lists, and thunks nested inside thunks, would otherwise be freed
// through recursive drop glue.
impl Drop for Environment {
    fn drop(&mut self) {
        let mut pending: Vec<Rc<Frame>> = self.head.take().into_iter().collect();
        while let Some(frame) = pending.pop() {
            if let Ok(mut frame) = Rc::try_unwrap(frame) {
                pending.extend(frame.parent.head.take());
                if let Binding::Thunk(_, env) = &mut frame.binding {
                    pending.extend(env.head.take());
                }
            }
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(binder, _)| binder))
            .finish()
    }
}

/// Iterator returned by [`Environment::iter`].
pub struct Iter<'a> {
    frame: Option<&'a Frame>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (BinderId, &'a Binding);

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frame?;
        self.frame = frame.parent.head.as_deref();
        Some((frame.binder, &frame.binding))
    }
}
