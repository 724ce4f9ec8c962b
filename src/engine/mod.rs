//! Stepping engine
//!
//! This module runs instrumented algorithm functions one observable step at a
//! time:
//! - [`context`]: the [`StepContext`] trait algorithms report through, and the
//!   gating protocol behind it
//! - [`stepper`]: the [`Stepper`] state machine and its [`Command`]s
//! - [`errors`]: error types
//!
//! # Threading
//!
//! Each invocation runs on its own worker thread. The worker and the controller
//! share one mutex-protected session and a condition variable. Every launch or
//! reset bumps a generation token; a worker holding an older token gets
//! [`StepError::Detached`](errors::StepError::Detached) at its next step and
//! unwinds without touching the display.

pub mod context;
pub mod errors;
mod session;
pub mod stepper;
mod surface;

pub use context::{NoopContext, StepContext, StepResult};
pub use errors::{StepError, StepperError};
pub use session::Mode;
pub use stepper::{Binding, Command, Stepper};
pub use surface::Metrics;
