//! Step context: the capability surface handed to algorithm functions
//!
//! Every operation is a suspension point. A [`LiveContext`] performs the side
//! effect and then runs the gating protocol:
//!
//! 1. On entry, wait while the stepper is paused.
//! 2. Record the event (and apply it when the display follows the live edge).
//! 3. In single-step mode, set `paused` and park until the controller releases
//!    the gate. Otherwise sleep for the current step delay, picking up speed
//!    changes while sleeping.
//!
//! Waiting is done on the session condition variable, so pause, step, speed and
//! reset commands wake a blocked worker immediately. Once the invocation's
//! generation token is stale every operation returns [`StepError::Detached`].

use crate::engine::errors::StepError;
use crate::engine::session::{Mode, Session, Shared};
use crate::snapshot::StepRecord;
use crate::visual::{Delta, Highlight};
use std::sync::{Arc, MutexGuard};
use std::time::{Duration, Instant};

pub type StepResult = Result<(), StepError>;

/// Operations an algorithm function may use to report progress
pub trait StepContext {
    /// Append a numbered line to the output log
    fn log(&mut self, message: &str) -> StepResult;

    fn highlight(&mut self, indices: &[usize], kind: Highlight) -> StepResult;

    /// Highlight a window of `len` text cells starting at `start`, and the
    /// first `len` pattern cells
    fn highlight_match(&mut self, start: usize, len: usize, kind: Highlight) -> StepResult;

    fn highlight_comparison(
        &mut self,
        text_index: usize,
        pattern_index: usize,
        kind: Highlight,
    ) -> StepResult;

    /// Publish a state delta to the visualizer
    fn update(&mut self, delta: Delta) -> StepResult;

    /// Pure delay that honors pause; `None` waits for the current step delay
    fn wait(&mut self, duration: Option<Duration>) -> StepResult;
}

/// Context that does nothing and never suspends
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopContext;

impl StepContext for NoopContext {
    fn log(&mut self, _message: &str) -> StepResult {
        Ok(())
    }

    fn highlight(&mut self, _indices: &[usize], _kind: Highlight) -> StepResult {
        Ok(())
    }

    fn highlight_match(&mut self, _start: usize, _len: usize, _kind: Highlight) -> StepResult {
        Ok(())
    }

    fn highlight_comparison(
        &mut self,
        _text_index: usize,
        _pattern_index: usize,
        _kind: Highlight,
    ) -> StepResult {
        Ok(())
    }

    fn update(&mut self, _delta: Delta) -> StepResult {
        Ok(())
    }

    fn wait(&mut self, _duration: Option<Duration>) -> StepResult {
        Ok(())
    }
}

type Guard<'a> = MutexGuard<'a, Session>;

/// Gating protocol for one invocation
struct Gate<'a> {
    shared: &'a Shared,
    generation: u64,
}

impl<'a> Gate<'a> {
    fn check(&self, session: &Session) -> StepResult {
        if session.generation == self.generation {
            Ok(())
        } else {
            Err(StepError::Detached)
        }
    }

    fn hold_while_paused(&self, guard: Guard<'a>) -> Result<Guard<'a>, StepError> {
        let generation = self.generation;
        let guard = self
            .shared
            .wait_while(guard, |s| s.generation == generation && s.paused);
        self.check(&guard)?;
        Ok(guard)
    }

    /// Delay or park after a side effect
    fn pace(&self, mut guard: Guard<'a>) -> StepResult {
        if guard.mode != Mode::SteppingWait {
            let started = Instant::now();
            loop {
                self.check(&guard)?;
                if guard.mode == Mode::SteppingWait {
                    break;
                }
                // Re-read each time round: speed changes land mid-delay
                let elapsed = started.elapsed();
                if elapsed >= guard.step_delay {
                    return Ok(());
                }
                let remaining = guard.step_delay - elapsed;
                guard = self.shared.wait_timeout(guard, remaining);
            }
        }
        self.park(guard)
    }

    fn park(&self, mut guard: Guard<'a>) -> StepResult {
        guard.paused = true;
        guard.parked = true;
        self.shared.notify();
        tracing::trace!(generation = self.generation, "parked at step gate");

        let generation = self.generation;
        let mut guard = self.shared.wait_while(guard, |s| {
            s.generation == generation && s.paused && s.mode == Mode::SteppingWait
        });
        self.check(&guard)?;
        guard.parked = false;
        Ok(())
    }
}

/// Context bound to a live stepper invocation
pub(crate) struct LiveContext {
    shared: Arc<Shared>,
    generation: u64,
}

impl LiveContext {
    pub(crate) fn new(shared: Arc<Shared>, generation: u64) -> Self {
        LiveContext { shared, generation }
    }

    fn gate(&self) -> Gate<'_> {
        Gate {
            shared: &self.shared,
            generation: self.generation,
        }
    }

    fn emit(&mut self, record: StepRecord) -> StepResult {
        let gate = self.gate();
        let mut guard = gate.hold_while_paused(self.shared.lock())?;
        guard.surface.record(record)?;
        gate.pace(guard)
    }
}

impl StepContext for LiveContext {
    fn log(&mut self, message: &str) -> StepResult {
        self.emit(StepRecord::Log(message.to_string()))
    }

    fn highlight(&mut self, indices: &[usize], kind: Highlight) -> StepResult {
        self.emit(StepRecord::Highlight {
            indices: indices.to_vec(),
            kind,
        })
    }

    fn highlight_match(&mut self, start: usize, len: usize, kind: Highlight) -> StepResult {
        self.emit(StepRecord::HighlightMatch { start, len, kind })
    }

    fn highlight_comparison(
        &mut self,
        text_index: usize,
        pattern_index: usize,
        kind: Highlight,
    ) -> StepResult {
        self.emit(StepRecord::HighlightComparison {
            text_index,
            pattern_index,
            kind,
        })
    }

    fn update(&mut self, delta: Delta) -> StepResult {
        self.emit(StepRecord::Update(delta))
    }

    fn wait(&mut self, duration: Option<Duration>) -> StepResult {
        let gate = self.gate();
        let generation = self.generation;
        let mut guard = self.shared.lock();
        let mut remaining = duration.unwrap_or(guard.step_delay);

        loop {
            guard = gate.hold_while_paused(guard)?;
            if remaining.is_zero() {
                return Ok(());
            }
            // The clock only runs while unpaused
            let started = Instant::now();
            guard = self.shared.wait_timeout_while(guard, remaining, |s| {
                s.generation == generation && !s.paused
            });
            remaining = remaining.saturating_sub(started.elapsed());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Inputs, Output};
    use crate::config::StepperConfig;
    use crate::engine::stepper::{Binding, Stepper};
    use crate::snapshot::Snapshot;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    static DETACHED_IN_WAIT: AtomicBool = AtomicBool::new(false);

    fn timed(_inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
        ctx.log("start")?;
        ctx.wait(Some(Duration::from_millis(150)))?;
        ctx.log("end")?;
        Ok(Output::Index(0))
    }

    fn long_wait(_inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
        ctx.log("start")?;
        let result = ctx.wait(Some(Duration::from_secs(60)));
        if result == Err(StepError::Detached) {
            DETACHED_IN_WAIT.store(true, Ordering::SeqCst);
        }
        result?;
        ctx.log("end")?;
        Ok(Output::Index(0))
    }

    fn zero_wait(_inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
        ctx.log("a")?;
        ctx.wait(Some(Duration::ZERO))?;
        ctx.log("b")?;
        Ok(Output::Index(0))
    }

    fn stepper(algorithm: crate::algorithms::AlgorithmFn) -> Stepper {
        Stepper::new(
            Binding {
                algorithm,
                inputs: Inputs::default(),
                initial: None,
            },
            None,
            StepperConfig::instant(),
        )
    }

    fn wait_for(stepper: &Stepper, condition: impl Fn(&Snapshot) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !condition(&stepper.snapshot()) {
            assert!(Instant::now() < deadline, "condition not reached");
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_noop_wait_returns_immediately() {
        let started = Instant::now();
        NoopContext.wait(Some(Duration::from_secs(60))).unwrap();
        NoopContext.wait(None).unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_wait_clock_stops_while_paused() {
        let mut s = stepper(timed);
        s.auto(1.0).unwrap();
        wait_for(&s, |snap| snap.log.len() == 1);
        s.pause_resume();

        // Longer than the whole wait; nothing may happen while paused
        thread::sleep(Duration::from_millis(300));
        let held = s.snapshot();
        assert!(held.paused);
        assert_eq!(held.log.len(), 1);
        assert_eq!(held.mode, Mode::AutoPlaying);

        // Most of the wait is still owed after resuming
        let resumed = Instant::now();
        s.pause_resume();
        assert_eq!(s.wait_idle(), Some(Ok(Output::Index(0))));
        assert!(resumed.elapsed() >= Duration::from_millis(100));
        assert_eq!(s.snapshot().metrics.steps, 2);
    }

    #[test]
    fn test_reset_during_wait_detaches() {
        let mut s = stepper(long_wait);
        s.auto(1.0).unwrap();
        wait_for(&s, |snap| snap.log.len() == 1);

        let started = Instant::now();
        s.reset();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(DETACHED_IN_WAIT.load(Ordering::SeqCst));

        let snap = s.snapshot();
        assert_eq!(snap.mode, Mode::Idle);
        assert!(snap.log.is_empty());
        assert!(snap.outcome.is_none());
    }

    #[test]
    fn test_wait_is_not_a_step() {
        let mut s = stepper(zero_wait);
        s.step().unwrap();
        assert_eq!(s.settle(), Mode::SteppingWait);
        assert_eq!(s.snapshot().recorded, 1);

        // One release runs through the wait to the next record
        s.step().unwrap();
        assert_eq!(s.settle(), Mode::SteppingWait);
        assert_eq!(s.snapshot().recorded, 2);
        let lines = s.snapshot().log.get_output();
        assert_eq!(lines.last().map(String::as_str), Some("[Step 2] b"));
    }
}
