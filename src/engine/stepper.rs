// Stepper: owns one binding and drives its algorithm on a worker thread

use crate::algorithms::{AlgorithmFn, Inputs, Output};
use crate::config::StepperConfig;
use crate::engine::context::{LiveContext, StepContext};
use crate::engine::errors::StepperError;
use crate::engine::session::{Mode, Outcome, Session, Shared};
use crate::engine::surface::Surface;
use crate::snapshot::{Snapshot, StepRecord};
use crate::visual::{Delta, Visualizer};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// An algorithm bound to its inputs and the state shown before it starts
#[derive(Clone)]
pub struct Binding {
    pub algorithm: AlgorithmFn,
    pub inputs: Inputs,
    pub initial: Option<Delta>,
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("inputs", &self.inputs)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

/// Controller commands, as sent by a control surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Start a fast run without waiting for it
    Run,
    Step,
    Prev,
    /// Start auto-play, or stop it when already auto-playing
    Auto { speed: f64 },
    PauseResume,
    SetSpeed(f64),
    Reset,
    Stop,
}

/// Drives one algorithm invocation at a time.
///
/// The display (log, metrics, visualizer) is rebuilt from the step history, so
/// `prev` can move backwards while the live invocation is held at a gate.
pub struct Stepper {
    binding: Arc<Binding>,
    shared: Arc<Shared>,
    config: StepperConfig,
    speed: f64,
    worker: Option<JoinHandle<()>>,
}

impl Stepper {
    /// Create a stepper and render the initial state
    pub fn new(
        binding: Binding,
        visualizer: Option<Box<dyn Visualizer>>,
        config: StepperConfig,
    ) -> Self {
        let surface = Surface::new(
            binding.initial.clone(),
            visualizer,
            config.history_limit_bytes,
        );
        Stepper {
            binding: Arc::new(binding),
            shared: Arc::new(Shared::new(Session::new(surface))),
            config,
            speed: 1.0,
            worker: None,
        }
    }

    pub fn dispatch(&mut self, command: Command) -> Result<(), StepperError> {
        tracing::debug!(?command, "stepper command");
        match command {
            Command::Run => self.start_run(),
            Command::Step => self.step(),
            Command::Prev => {
                self.prev();
                Ok(())
            }
            Command::Auto { speed } => self.auto(speed),
            Command::PauseResume => {
                self.pause_resume();
                Ok(())
            }
            Command::SetSpeed(speed) => self.set_speed(speed),
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::Stop => {
                self.stop();
                Ok(())
            }
        }
    }

    /// Run the algorithm to completion at the fixed run delay
    pub fn run(&mut self) -> Result<Output, StepperError> {
        self.start_run()?;
        self.wait_idle().unwrap_or(Err(StepperError::Interrupted))
    }

    /// Start a run in the background
    pub fn start_run(&mut self) -> Result<(), StepperError> {
        self.launch(Mode::Running, self.config.run_delay(), self.config.settle())
    }

    /// Advance by one step: replay a reviewed record, release the gate, or start
    pub fn step(&mut self) -> Result<(), StepperError> {
        let mut session = self.shared.lock();
        if session.surface.is_reviewing() {
            session.surface.advance();
        } else {
            let mode = session.mode;
            match mode {
                Mode::SteppingWait => session.release(),
                Mode::Running | Mode::AutoPlaying => {
                    session.mode = Mode::SteppingWait;
                    session.paused = false;
                }
                Mode::Idle => {
                    drop(session);
                    return self.launch(
                        Mode::SteppingWait,
                        self.config.run_delay(),
                        self.config.step_settle(),
                    );
                }
            }
        }
        drop(session);
        self.shared.notify();
        Ok(())
    }

    /// Move the display back one record. A running invocation is held.
    pub fn prev(&mut self) {
        let mut session = self.shared.lock();
        if session.surface.cursor() == 0 {
            return;
        }
        if matches!(session.mode, Mode::Running | Mode::AutoPlaying) {
            session.mode = Mode::SteppingWait;
        }
        session.surface.rewind();
        drop(session);
        self.shared.notify();
    }

    /// Toggle auto-play
    pub fn auto(&mut self, speed: f64) -> Result<(), StepperError> {
        if self.mode() == Mode::AutoPlaying {
            self.stop();
            return Ok(());
        }
        let delay = self.delay_for(speed)?;
        self.speed = speed;
        self.launch(Mode::AutoPlaying, delay, self.config.settle())
    }

    pub fn pause_resume(&mut self) {
        let mut session = self.shared.lock();
        let mode = session.mode;
        match mode {
            Mode::SteppingWait | Mode::AutoPlaying => {
                session.paused = !session.paused;
                tracing::debug!(paused = session.paused, "pause toggled");
            }
            Mode::Idle | Mode::Running => {
                tracing::warn!(%mode, "pause/resume ignored");
                return;
            }
        }
        drop(session);
        self.shared.notify();
    }

    /// Change the auto-play speed; takes effect on the current delay
    pub fn set_speed(&mut self, speed: f64) -> Result<(), StepperError> {
        let delay = self.delay_for(speed)?;
        self.speed = speed;
        let mut session = self.shared.lock();
        if session.mode == Mode::AutoPlaying {
            session.step_delay = delay;
            drop(session);
            self.shared.notify();
        }
        Ok(())
    }

    /// Abandon the invocation and clear log, metrics and visualizer
    pub fn reset(&mut self) {
        {
            let mut session = self.shared.lock();
            session.detach();
            session.surface.clear();
        }
        self.shared.notify();
        self.reap();
    }

    /// Abandon the invocation, keeping the display
    pub fn stop(&mut self) {
        self.shared.lock().detach();
        self.shared.notify();
        self.reap();
    }

    /// Block until the stepper is idle and return the last outcome
    pub fn wait_idle(&self) -> Option<Result<Output, StepperError>> {
        let session = self
            .shared
            .wait_while(self.shared.lock(), |s| s.mode != Mode::Idle);
        session.outcome.clone()
    }

    /// Block until the worker is parked at a single-step gate or idle
    pub fn settle(&self) -> Mode {
        let session = self
            .shared
            .wait_while(self.shared.lock(), |s| !s.parked && s.mode != Mode::Idle);
        session.mode
    }

    pub fn mode(&self) -> Mode {
        self.shared.lock().mode
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = self.shared.lock();
        Snapshot {
            mode: session.mode,
            paused: session.paused,
            speed: self.speed,
            step_delay: session.step_delay,
            metrics: session.surface.metrics(),
            log: session.surface.log().clone(),
            scene: session.surface.scene(),
            cursor: session.surface.cursor(),
            recorded: session.surface.recorded(),
            outcome: session.outcome.clone(),
        }
    }

    /// Every record captured by the current invocation
    pub fn records(&self) -> Vec<StepRecord> {
        self.shared.lock().surface.records().to_vec()
    }

    fn launch(
        &mut self,
        mode: Mode,
        step_delay: Duration,
        settle: Duration,
    ) -> Result<(), StepperError> {
        let generation = {
            let mut session = self.shared.lock();
            session.detach();
            session.mode = mode;
            session.step_delay = step_delay;
            session.surface.restart();
            session.generation
        };
        self.shared.notify();
        self.reap();

        tracing::debug!(generation, %mode, ?step_delay, "launching invocation");
        let binding = Arc::clone(&self.binding);
        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(format!("algostep-worker-{generation}"))
            .spawn(move || invoke(&binding, &shared, generation, settle));

        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                Ok(())
            }
            Err(err) => {
                let error = StepperError::WorkerSpawn(err.to_string());
                tracing::error!(%error, "could not start invocation");
                let mut session = self.shared.lock();
                session.mode = Mode::Idle;
                session.outcome = Some(Err(error.clone()));
                drop(session);
                self.shared.notify();
                Err(error)
            }
        }
    }

    /// Join the previous worker; it unwinds once its generation is stale
    fn reap(&mut self) {
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                tracing::warn!("worker thread panicked outside the algorithm");
            }
        }
    }

    /// Auto-play delay for `speed`, rejecting speeds with no representable delay
    fn delay_for(&self, speed: f64) -> Result<Duration, StepperError> {
        let delay = if speed.is_finite() && speed > 0.0 {
            self.config.auto_delay(speed)
        } else {
            None
        };
        delay.ok_or_else(|| {
            tracing::warn!(speed, "rejected speed");
            StepperError::InvalidSpeed(speed)
        })
    }
}

impl Drop for Stepper {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Worker body for one invocation
fn invoke(binding: &Binding, shared: &Arc<Shared>, generation: u64, settle: Duration) {
    let mut ctx = LiveContext::new(Arc::clone(shared), generation);
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        ctx.wait(Some(settle))?;
        (binding.algorithm)(&binding.inputs, &mut ctx)
    }));

    let outcome: Outcome = match result {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(err)) => Err(StepperError::Algorithm(err)),
        Err(payload) => Err(StepperError::AlgorithmPanicked(panic_message(&*payload))),
    };

    let mut session = shared.lock();
    if session.generation != generation {
        tracing::trace!(generation, "dropping result of detached invocation");
        return;
    }
    match &outcome {
        Ok(output) => {
            let steps = session.surface.metrics().steps;
            tracing::info!(%output, steps, "algorithm finished");
        }
        Err(error) => tracing::error!(%error, "algorithm failed"),
    }
    session.mode = Mode::Idle;
    session.release();
    session.outcome = Some(outcome);
    drop(session);
    shared.notify();
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::errors::StepError;
    use crate::visual::{ArrayVisualizer, Highlight};

    fn counting(inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
        for (i, _) in inputs.array.iter().enumerate() {
            ctx.highlight(&[i], Highlight::Active)?;
            ctx.log(&format!("visit {i}"))?;
        }
        Ok(Output::Index(inputs.array.len() as i64))
    }

    fn exploding(_inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
        ctx.log("about to fail")?;
        panic!("boom");
    }

    fn stepper(algorithm: AlgorithmFn) -> Stepper {
        let inputs = Inputs {
            array: vec![4, 5, 6],
            ..Inputs::default()
        };
        Stepper::new(
            Binding {
                algorithm,
                initial: Some(Delta::Array(inputs.array.clone())),
                inputs,
            },
            Some(Box::new(ArrayVisualizer::new())),
            StepperConfig::instant(),
        )
    }

    fn step_and_settle(stepper: &mut Stepper) {
        stepper.step().unwrap();
        stepper.settle();
    }

    #[test]
    fn test_run_returns_output_and_goes_idle() {
        let mut s = stepper(counting);
        assert_eq!(s.run(), Ok(Output::Index(3)));

        let snap = s.snapshot();
        assert_eq!(snap.mode, Mode::Idle);
        assert_eq!(snap.metrics.steps, 3);
        assert_eq!(snap.log.len(), 3);
    }

    #[test]
    fn test_panic_is_reported_as_failure() {
        let mut s = stepper(exploding);
        let result = s.run();

        assert_eq!(result, Err(StepperError::AlgorithmPanicked("boom".into())));
        assert_eq!(s.mode(), Mode::Idle);
        assert_eq!(s.snapshot().log.len(), 1);
    }

    #[test]
    fn test_single_steps_park_after_each_record() {
        let mut s = stepper(counting);
        step_and_settle(&mut s);

        let snap = s.snapshot();
        assert_eq!(snap.mode, Mode::SteppingWait);
        assert!(snap.paused);
        assert_eq!(snap.recorded, 1);

        step_and_settle(&mut s);
        assert_eq!(s.snapshot().recorded, 2);
    }

    #[test]
    fn test_invalid_speed_is_rejected() {
        let mut s = stepper(counting);
        assert_eq!(s.auto(0.0), Err(StepperError::InvalidSpeed(0.0)));
        assert!(s.set_speed(f64::NAN).is_err());
        assert_eq!(s.mode(), Mode::Idle);
    }

    #[test]
    fn test_tiny_speed_is_rejected_without_panicking() {
        let mut s = Stepper::new(
            Binding {
                algorithm: counting,
                inputs: Inputs::with_array(vec![1]),
                initial: None,
            },
            None,
            StepperConfig {
                auto_baseline_ms: 2000,
                ..StepperConfig::instant()
            },
        );
        assert_eq!(s.auto(1e-300), Err(StepperError::InvalidSpeed(1e-300)));
        assert_eq!(s.set_speed(1e-300), Err(StepperError::InvalidSpeed(1e-300)));
        assert_eq!(s.mode(), Mode::Idle);
        assert!(s.snapshot().log.is_empty());

        // The rejected speed is not remembered
        assert_eq!(s.speed(), 1.0);
    }

    #[test]
    fn test_pause_ignored_when_idle() {
        let mut s = stepper(counting);
        s.pause_resume();
        assert!(!s.snapshot().paused);
    }
}
