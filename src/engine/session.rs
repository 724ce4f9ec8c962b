// State shared between a stepper and its worker thread

use crate::algorithms::Output;
use crate::engine::errors::StepperError;
use crate::engine::surface::Surface;
use serde::Serialize;
use std::fmt;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Control mode of a stepper. `paused` is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Mode {
    #[default]
    Idle,
    Running,
    SteppingWait,
    AutoPlaying,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Idle => "idle",
            Mode::Running => "running",
            Mode::SteppingWait => "stepping",
            Mode::AutoPlaying => "auto",
        };
        f.write_str(name)
    }
}

pub(crate) type Outcome = Result<Output, StepperError>;

pub(crate) struct Session {
    /// Generation token of the live invocation
    pub(crate) generation: u64,
    pub(crate) mode: Mode,
    pub(crate) paused: bool,
    /// The worker is blocked at a single-step gate
    pub(crate) parked: bool,
    pub(crate) step_delay: Duration,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) surface: Surface,
}

impl Session {
    pub(crate) fn new(surface: Surface) -> Self {
        Session {
            generation: 0,
            mode: Mode::Idle,
            paused: false,
            parked: false,
            step_delay: Duration::ZERO,
            outcome: None,
            surface,
        }
    }

    /// Detach the live invocation, if any, and go idle
    pub(crate) fn detach(&mut self) {
        self.generation += 1;
        self.mode = Mode::Idle;
        self.paused = false;
        self.parked = false;
        self.outcome = None;
    }

    pub(crate) fn release(&mut self) {
        self.paused = false;
        self.parked = false;
    }
}

/// Session behind a mutex plus the condition variable every waiter sleeps on
pub(crate) struct Shared {
    session: Mutex<Session>,
    signal: Condvar,
}

impl Shared {
    pub(crate) fn new(session: Session) -> Self {
        Shared {
            session: Mutex::new(session),
            signal: Condvar::new(),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn notify(&self) {
        self.signal.notify_all();
    }

    pub(crate) fn wait_while<'a, F>(
        &self,
        guard: MutexGuard<'a, Session>,
        condition: F,
    ) -> MutexGuard<'a, Session>
    where
        F: FnMut(&mut Session) -> bool,
    {
        self.signal
            .wait_while(guard, condition)
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn wait_timeout_while<'a, F>(
        &self,
        guard: MutexGuard<'a, Session>,
        timeout: Duration,
        condition: F,
    ) -> MutexGuard<'a, Session>
    where
        F: FnMut(&mut Session) -> bool,
    {
        match self.signal.wait_timeout_while(guard, timeout, condition) {
            Ok((guard, _)) => guard,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }

    pub(crate) fn wait_timeout<'a>(
        &self,
        guard: MutexGuard<'a, Session>,
        timeout: Duration,
    ) -> MutexGuard<'a, Session> {
        match self.signal.wait_timeout(guard, timeout) {
            Ok((guard, _)) => guard,
            Err(poisoned) => poisoned.into_inner().0,
        }
    }
}
