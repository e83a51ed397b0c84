//! Errors returned by budgeted reduction.

use std::fmt;

/// Why a reduction stopped before reaching a normal form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// The [`EvalMode::Budgeted`](crate::EvalMode::Budgeted) step limit was hit.
    StepLimitExceeded {
        /// The configured number of beta steps.
        limit: u64,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::StepLimitExceeded { limit } => {
                write!(f, "Step limit exceeded ({limit} steps)")
            }
        }
    }
}

impl std::error::Error for EvalError {}
