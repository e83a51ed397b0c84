//! Evaluation modes for the reducer.
//!
//! A reduction either runs until it reaches a normal form, however long that
//! takes, or gives up after a fixed number of beta steps.

/// Reduction policy, checked on every beta step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Reduce until a normal form is reached. Terms without one never return.
    #[default]
    Unbounded,
    /// Stop with [`EvalError::StepLimitExceeded`](crate::EvalError) once
    /// `max_steps` beta steps have been taken and another is needed.
    Budgeted {
        /// Maximum number of beta steps.
        max_steps: u64,
    },
}

impl EvalMode {
    /// Step budget, or `None` for unbounded reduction.
    #[inline]
    pub fn max_steps(self) -> Option<u64> {
        match self {
            Self::Unbounded => None,
            Self::Budgeted { max_steps } => Some(max_steps),
        }
    }

    /// Whether another beta step is allowed after `taken` steps.
    #[inline]
    pub fn allows_step(self, taken: u64) -> bool {
        match self.max_steps() {
            Some(limit) => taken < limit,
            None => true,
        }
    }
}
