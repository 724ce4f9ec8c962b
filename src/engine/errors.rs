//! Error types for the stepping engine
//!
//! This module defines two layers of errors:
//! - [`StepError`]: what a step context operation or an algorithm function can
//!   return. [`StepError::Detached`] is the cooperative cancellation signal and is
//!   never reported to the user.
//! - [`StepperError`]: what the stepper reports for an invocation or a rejected
//!   command.
//!
//! Every failure is terminal for the current invocation and leaves the stepper
//! reusable.

use thiserror::Error;

/// Errors raised inside an algorithm invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// The stepper was reset or relaunched; the invocation must stop
    #[error("invocation detached from its stepper")]
    Detached,

    /// A required input was not supplied
    #[error("missing input '{0}'")]
    MissingInput(&'static str),

    /// A position argument does not fit the collection
    #[error("position {position} is out of bounds for length {len}")]
    InvalidPosition { position: i64, len: usize },

    /// An intermediate value does not fit in an `i64`
    #[error("integer overflow while computing {0}")]
    Overflow(&'static str),

    /// The step history grew past its memory limit
    #[error("step history limit exceeded: {current} bytes used, limit is {limit}")]
    HistoryLimitExceeded { current: usize, limit: usize },
}

/// Errors reported by the stepper
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepperError {
    /// The algorithm returned an error
    #[error("algorithm failed: {0}")]
    Algorithm(#[from] StepError),

    /// The algorithm panicked; the payload message is kept for diagnostics
    #[error("algorithm panicked: {0}")]
    AlgorithmPanicked(String),

    /// Speed multipliers must be finite and positive
    #[error("invalid speed {0} (must be a positive number)")]
    InvalidSpeed(f64),

    /// The worker thread could not be started
    #[error("failed to start algorithm worker: {0}")]
    WorkerSpawn(String),

    /// The invocation ended without an outcome (reset or replaced)
    #[error("invocation was interrupted before it finished")]
    Interrupted,
}

impl StepperError {
    /// Whether this error is the silent cancellation signal
    pub fn is_detached(&self) -> bool {
        matches!(self, StepperError::Algorithm(StepError::Detached))
    }
}
