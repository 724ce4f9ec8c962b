// Stepper behavior across run, step, prev, auto-play, pause and reset

use std::thread;
use std::time::{Duration, Instant};

use algostep::algorithms::{Inputs, Output};
use algostep::config::StepperConfig;
use algostep::engine::{
    Binding, Command, Metrics, Mode, NoopContext, StepContext, StepError, Stepper, StepperError,
};
use algostep::exercise::{practice, Catalog};
use algostep::snapshot::Snapshot;
use algostep::visual::Highlight;

fn sort_stepper(config: StepperConfig) -> Stepper {
    let exercise = Catalog::new().get("BUBBLE_SORT").expect("exercise exists");
    Stepper::new(
        exercise.binding(Inputs::with_array(vec![5, 1, 4, 2, 8])),
        Some(exercise.visualizer()),
        config,
    )
}

fn custom(algorithm: algostep::algorithms::AlgorithmFn) -> Stepper {
    Stepper::new(
        Binding {
            algorithm,
            inputs: Inputs::with_array(vec![1, 2, 3]),
            initial: None,
        },
        None,
        StepperConfig::instant(),
    )
}

fn failing(_inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    ctx.log("about to fail")?;
    ctx.highlight(&[0], Highlight::Comparing)?;
    Err(StepError::MissingInput("element"))
}

fn panicking(_inputs: &Inputs, ctx: &mut dyn StepContext) -> Result<Output, StepError> {
    ctx.log("about to panic")?;
    panic!("index out of range");
}

/// Poll until `condition` holds, failing after two seconds
fn wait_for(stepper: &Stepper, condition: impl Fn(&Snapshot) -> bool) -> Snapshot {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let snapshot = stepper.snapshot();
        if condition(&snapshot) {
            return snapshot;
        }
        assert!(Instant::now() < deadline, "condition not reached");
        thread::sleep(Duration::from_millis(2));
    }
}

fn step_to_end(stepper: &mut Stepper) -> Vec<Metrics> {
    let mut seen = Vec::new();
    stepper.step().expect("step starts");
    while stepper.settle() != Mode::Idle {
        seen.push(stepper.snapshot().metrics);
        stepper.step().expect("step releases");
    }
    seen
}

fn assert_cleared(snapshot: &Snapshot) {
    assert_eq!(snapshot.mode, Mode::Idle);
    assert!(!snapshot.paused);
    assert!(snapshot.log.is_empty());
    assert_eq!(snapshot.metrics, Metrics::default());
    assert!(snapshot.scene.is_empty());
    assert_eq!(snapshot.recorded, 0);
    assert!(snapshot.outcome.is_none());
}

#[test]
fn test_run_matches_direct_invocation() {
    for exercise in Catalog::new().iter() {
        for case in practice::cases(exercise.id) {
            let direct = (exercise.algorithm)(&case.input, &mut NoopContext);

            let mut stepper = Stepper::new(
                exercise.binding(case.input.clone()),
                Some(exercise.visualizer()),
                StepperConfig::instant(),
            );
            let run = stepper.run();

            assert_eq!(run, direct.map_err(StepperError::from), "{}", exercise.id);
        }
    }
}

#[test]
fn test_reset_is_idempotent() {
    let mut stepper = sort_stepper(StepperConfig::instant());
    stepper.run().expect("run succeeds");

    stepper.reset();
    let once = stepper.snapshot();
    stepper.reset();
    let twice = stepper.snapshot();

    assert_cleared(&once);
    assert_cleared(&twice);
    assert_eq!(once.cursor, twice.cursor);
}

#[test]
fn test_pause_resume_round_trip() {
    let mut reference = sort_stepper(StepperConfig::instant());
    let expected = reference.run();
    let expected_log = reference.snapshot().log.get_output();

    let config = StepperConfig {
        auto_baseline_ms: 10,
        ..StepperConfig::instant()
    };
    let mut stepper = sort_stepper(config);
    stepper.dispatch(Command::Auto { speed: 1.0 }).expect("auto starts");
    stepper.dispatch(Command::PauseResume).expect("pause");

    let paused = wait_for(&stepper, |s| s.paused);
    assert_eq!(paused.mode, Mode::AutoPlaying);
    thread::sleep(Duration::from_millis(30));
    let held = stepper.snapshot().recorded;
    thread::sleep(Duration::from_millis(30));
    assert_eq!(stepper.snapshot().recorded, held);

    stepper.dispatch(Command::PauseResume).expect("resume");
    let result = stepper.wait_idle().expect("outcome recorded");

    assert_eq!(result, expected);
    assert_eq!(stepper.snapshot().log.get_output(), expected_log);
}

#[test]
fn test_single_step_equivalence() {
    let mut reference = sort_stepper(StepperConfig::instant());
    let expected = reference.run();
    let expected_records = reference.records();

    let mut stepper = sort_stepper(StepperConfig::instant());
    let seen = step_to_end(&mut stepper);

    assert_eq!(stepper.wait_idle(), Some(expected));
    assert_eq!(stepper.records(), expected_records);
    assert_eq!(
        stepper.snapshot().log.get_output(),
        reference.snapshot().log.get_output()
    );

    // Counters never go down while stepping forward
    for pair in seen.windows(2) {
        assert!(pair[1].comparisons >= pair[0].comparisons);
        assert!(pair[1].swaps >= pair[0].swaps);
        assert!(pair[1].steps >= pair[0].steps);
    }
}

#[test]
fn test_prev_replays_recorded_steps() {
    let mut stepper = sort_stepper(StepperConfig::instant());
    for _ in 0..3 {
        stepper.step().expect("step");
        stepper.settle();
    }
    let third = stepper.snapshot();
    assert_eq!((third.cursor, third.recorded), (3, 3));

    stepper.prev();
    let second = stepper.snapshot();
    assert_eq!((second.cursor, second.recorded), (2, 3));
    assert!(second.is_reviewing());
    assert_eq!(second.mode, Mode::SteppingWait);

    // Moving forward through the review does not release the worker
    stepper.step().expect("step");
    let replayed = stepper.snapshot();
    assert_eq!((replayed.cursor, replayed.recorded), (3, 3));
    assert_eq!(replayed.log.get_output(), third.log.get_output());
    assert_eq!(replayed.metrics, third.metrics);
    assert_eq!(replayed.scene, third.scene);

    stepper.step().expect("step");
    stepper.settle();
    assert_eq!(stepper.snapshot().recorded, 4);
}

#[test]
fn test_prev_after_completion_rewinds_display() {
    let mut stepper = sort_stepper(StepperConfig::instant());
    stepper.run().expect("run succeeds");
    let end = stepper.snapshot();

    stepper.prev();
    stepper.prev();
    let back = stepper.snapshot();
    assert_eq!(back.mode, Mode::Idle);
    assert_eq!(back.cursor, end.recorded - 2);
    assert!(back.metrics.steps <= end.metrics.steps);

    stepper.step().expect("step");
    stepper.step().expect("step");
    let again = stepper.snapshot();
    assert_eq!(again.cursor, end.cursor);
    assert_eq!(again.log.get_output(), end.log.get_output());
    assert_eq!(again.scene, end.scene);
}

#[test]
fn test_prev_at_start_is_a_no_op() {
    let mut stepper = sort_stepper(StepperConfig::instant());
    stepper.prev();
    let snapshot = stepper.snapshot();
    assert_eq!(snapshot.cursor, 0);
    assert_eq!(snapshot.mode, Mode::Idle);
}

#[test]
fn test_reset_detaches_a_waiting_invocation() {
    let config = StepperConfig {
        auto_baseline_ms: 60_000,
        ..StepperConfig::instant()
    };
    let mut stepper = sort_stepper(config);
    stepper.auto(1.0).expect("auto starts");
    wait_for(&stepper, |s| s.recorded >= 1);

    // Returns promptly: the sleeping worker wakes and sees a stale generation
    let started = Instant::now();
    stepper.reset();
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_cleared(&stepper.snapshot());

    // Nothing from the old invocation shows up later
    thread::sleep(Duration::from_millis(20));
    assert_cleared(&stepper.snapshot());
}

#[test]
fn test_auto_toggle_stops_playback() {
    let config = StepperConfig {
        auto_baseline_ms: 60_000,
        ..StepperConfig::instant()
    };
    let mut stepper = sort_stepper(config);
    stepper.auto(2.0).expect("auto starts");
    let playing = wait_for(&stepper, |s| s.recorded >= 1);
    assert_eq!(playing.mode, Mode::AutoPlaying);
    assert_eq!(playing.step_delay, Duration::from_millis(30_000));

    stepper.set_speed(4.0).expect("valid speed");
    assert_eq!(stepper.snapshot().step_delay, Duration::from_millis(15_000));

    stepper.auto(2.0).expect("toggle");
    let stopped = stepper.snapshot();
    assert_eq!(stopped.mode, Mode::Idle);
    assert!(!stopped.log.is_empty());
}

#[test]
fn test_step_during_auto_switches_to_stepping() {
    let config = StepperConfig {
        auto_baseline_ms: 60_000,
        ..StepperConfig::instant()
    };
    let mut stepper = sort_stepper(config);
    stepper.auto(1.0).expect("auto starts");
    wait_for(&stepper, |s| s.recorded >= 1);

    stepper.step().expect("step");
    assert_eq!(stepper.settle(), Mode::SteppingWait);
    assert!(stepper.snapshot().paused);
}

#[test]
fn test_failure_returns_to_idle() {
    let mut stepper = custom(failing);
    let result = stepper.run();
    assert_eq!(
        result,
        Err(StepperError::Algorithm(StepError::MissingInput("element")))
    );

    let snapshot = stepper.snapshot();
    assert_eq!(snapshot.mode, Mode::Idle);
    assert_eq!(snapshot.metrics.steps, 1);
    assert_eq!(snapshot.metrics.comparisons, 1);
    assert_eq!(snapshot.outcome, Some(result));

    // Reusable after a reset
    stepper.reset();
    assert!(stepper.run().is_err());
}

#[test]
fn test_panic_returns_to_idle() {
    let mut stepper = custom(panicking);
    assert_eq!(
        stepper.run(),
        Err(StepperError::AlgorithmPanicked("index out of range".into()))
    );
    assert_eq!(stepper.mode(), Mode::Idle);
    assert_eq!(stepper.snapshot().log.len(), 1);
}

#[test]
fn test_invalid_speed_is_rejected() {
    let mut stepper = sort_stepper(StepperConfig::instant());
    for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert_eq!(
            stepper.dispatch(Command::Auto { speed }).map_err(|e| e.to_string()),
            Err(StepperError::InvalidSpeed(speed).to_string())
        );
    }
    assert_eq!(stepper.mode(), Mode::Idle);
}

#[test]
fn test_commands_after_completion_are_harmless() {
    let mut stepper = sort_stepper(StepperConfig::instant());
    stepper.run().expect("run succeeds");

    stepper.pause_resume();
    stepper.stop();
    let snapshot = stepper.snapshot();
    assert_eq!(snapshot.mode, Mode::Idle);
    assert!(!snapshot.paused);
    assert!(!snapshot.log.is_empty());
}
